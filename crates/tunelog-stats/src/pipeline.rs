//! Runs every aggregator and assembles the report.

use crate::aggregator::{
    AggregationContext, DataAggregator, OverviewAggregator, SkipRateAggregator,
    TopArtistsAggregator, TopTracksAggregator,
};
use crate::day_of_week::WeekdayWeekendAggregator;
use crate::heatmap::{DayHourHeatmapAggregator, MonthHourHeatmapAggregator, WeekdayHourHeatmapAggregator};
use crate::hourly_distribution::{HourlyDistributionAggregator, PeakHoursAggregator};
use crate::monthly_trends::MonthlyTrendAggregator;
use crate::report::AggregatedReport;
use crate::special_days::SpecialDaysAggregator;
use crate::types::ReportMetadata;
use tracing::{info, instrument};
use tunelog_common::{PlayEvent, Result};
use tunelog_config::AggregationSettings;

/// What the report counts as a skip.
pub const SKIP_DEFINITION: &str = "Track marked 'skipped' or ended with 'fwdbtn'/'backbtn'";

/// Builds the full report from `events`.
///
/// A pure function of its inputs: the same events and settings always give
/// the same report.
#[instrument(skip(events, settings), fields(events = events.len(), timezone = %settings.timezone))]
pub fn build_report(events: &[PlayEvent], settings: &AggregationSettings) -> Result<AggregatedReport> {
    let ctx = AggregationContext::for_timezone(events, &settings.timezone)?;

    let report = AggregatedReport {
        overview: OverviewAggregator::new().aggregate(&ctx)?,
        top_artists: TopArtistsAggregator::new(settings.top_limit).aggregate(&ctx)?,
        top_tracks: TopTracksAggregator::new(settings.top_limit).aggregate(&ctx)?,
        hourly_heatmap: MonthHourHeatmapAggregator.aggregate(&ctx)?,
        weekday_hour_heatmap: WeekdayHourHeatmapAggregator.aggregate(&ctx)?,
        day_hour_heatmap: DayHourHeatmapAggregator.aggregate(&ctx)?,
        hourly_distribution: HourlyDistributionAggregator::new().aggregate(&ctx)?,
        weekday_vs_weekend: WeekdayWeekendAggregator::new(settings.bucket_top_artists).aggregate(&ctx)?,
        skipped_tracks: SkipRateAggregator::new(
            settings.skip_min_plays,
            settings.skip_min_rate,
            settings.skip_limit,
        )
        .aggregate(&ctx)?,
        monthly_trend: MonthlyTrendAggregator::new().aggregate(&ctx)?,
        special_days: SpecialDaysAggregator::new(settings.special_days.clone()).aggregate(&ctx)?,
        peak_hours: PeakHoursAggregator::new(settings.peak_hours).aggregate(&ctx)?,
        metadata: ReportMetadata {
            timezone: ctx.timezone().name().to_string(),
            data_source: settings.data_source.clone(),
            skip_definition: SKIP_DEFINITION.to_string(),
            min_plays_for_skip_rate: settings.skip_min_plays,
        },
    };

    info!(
        "Aggregated {} plays: {} minutes, {} artists, peak hour {}:00",
        report.overview.total_plays,
        report.overview.total_minutes,
        report.overview.unique_artists,
        report.peak_hours.peak_hour
    );
    Ok(report)
}
