//! The aggregated report document and its JSON file.

use crate::types::{
    ArtistRank, DayHourCell, HourlyPoint, MonthHourCell, MonthlyPoint, Overview, PeakHours,
    ReportMetadata, SkippedTrack, SpecialDayActivity, TrackRank, WeekdayHourCell, WeekdayWeekend,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;
use tunelog_common::{Result, TunelogError};

/// Everything the renderer draws, computed once from the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedReport {
    /// Whole-history totals
    pub overview: Overview,
    /// Artists by listening time
    pub top_artists: Vec<ArtistRank>,
    /// Tracks by listening time
    pub top_tracks: Vec<TrackRank>,
    /// Plays per (month, hour)
    pub hourly_heatmap: Vec<MonthHourCell>,
    /// Plays per (month, weekday, hour)
    pub weekday_hour_heatmap: Vec<WeekdayHourCell>,
    /// Plays per (month, day, hour)
    pub day_hour_heatmap: Vec<DayHourCell>,
    /// Plays and minutes per hour of day
    pub hourly_distribution: Vec<HourlyPoint>,
    /// Weekday against weekend listening
    pub weekday_vs_weekend: WeekdayWeekend,
    /// Frequently skipped tracks
    pub skipped_tracks: Vec<SkippedTrack>,
    /// Plays and hours per month
    pub monthly_trend: Vec<MonthlyPoint>,
    /// Listening on special days, by key
    pub special_days: BTreeMap<String, SpecialDayActivity>,
    /// Busiest hours of the day
    pub peak_hours: PeakHours,
    /// How the report was produced
    pub metadata: ReportMetadata,
}

impl AggregatedReport {
    /// Pretty-printed JSON; non-ASCII text is written as is.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a report document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the report to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?).map_err(|e| {
            TunelogError::with_source(format!("failed to write report {}", path.display()), e)
        })?;
        info!("Wrote report to {}", path.display());
        Ok(())
    }

    /// Reads a report written by [`AggregatedReport::write_to`].
    pub fn read_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TunelogError::with_source(format!("failed to read report {}", path.display()), e)
        })?;
        Self::from_json(&content)
    }
}
