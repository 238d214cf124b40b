//! Hour-of-day distribution and peak hours.

use crate::aggregator::{AggregationContext, DataAggregator};
use crate::ranking::Tally;
use crate::types::{HourlyPoint, PeakHours};
use std::collections::BTreeMap;
use tracing::{debug, instrument};
use tunelog_common::{ms_to_minutes, Result};

/// Plays and minutes per local hour, hours ascending.
#[derive(Debug, Default)]
pub struct HourlyDistributionAggregator;

impl HourlyDistributionAggregator {
    /// Distribution over every event.
    pub const fn new() -> Self {
        Self
    }
}

impl DataAggregator<Vec<HourlyPoint>> for HourlyDistributionAggregator {
    #[instrument(skip(self, ctx))]
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<Vec<HourlyPoint>> {
        let mut hours: BTreeMap<u32, (u64, u64)> = BTreeMap::new();
        for (event, local) in ctx.iter() {
            let (plays, ms) = hours.entry(local.hour).or_default();
            *plays += 1;
            *ms += event.ms_played;
        }

        let result: Vec<HourlyPoint> = hours
            .into_iter()
            .map(|(hour, (plays, ms))| HourlyPoint {
                hour,
                plays,
                minutes: ms_to_minutes(ms),
            })
            .collect();

        debug!("Aggregated {} hourly distribution data points", result.len());
        Ok(result)
    }
}

/// Busiest hours of the day by play count.
///
/// Ties go to the hour seen first in the history.
#[derive(Debug)]
pub struct PeakHoursAggregator {
    /// Hours listed in `top_hours`
    pub count: usize,
}

impl PeakHoursAggregator {
    /// Reports the busiest `count` hours.
    pub const fn new(count: usize) -> Self {
        Self { count }
    }
}

impl DataAggregator<PeakHours> for PeakHoursAggregator {
    #[instrument(skip(self, ctx), fields(count = self.count))]
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<PeakHours> {
        let mut tally = Tally::new();
        for (_, local) in ctx.iter() {
            tally.entry(local.hour).record(0, false);
        }

        let ranked = tally.ranked_by(|t| t.plays);
        let peak_hour = ranked.first().map_or(0, |(hour, _)| *hour);
        let mut top_hours: Vec<u32> = ranked.iter().take(self.count).map(|(hour, _)| *hour).collect();
        top_hours.sort_unstable();

        let description = match (top_hours.first(), top_hours.last()) {
            (Some(first), Some(last)) => format!("Most active between {first}:00 and {last}:00"),
            _ => "No listening activity".to_string(),
        };

        debug!("Peak hour {peak_hour}:00, top hours {top_hours:?}");
        Ok(PeakHours {
            peak_hour,
            top_hours,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;
    use tunelog_common::test_utils::*;
    use tunelog_common::PlayEvent;

    fn ctx(events: &[PlayEvent]) -> AggregationContext<'_> {
        AggregationContext::new(events, Tz::America__Los_Angeles)
    }

    #[test]
    fn test_hourly_distribution_in_local_time() {
        let events = sample_history();
        let hours = HourlyDistributionAggregator::new().aggregate(&ctx(&events)).unwrap();

        assert_eq!(
            hours,
            vec![
                HourlyPoint { hour: 8, plays: 3, minutes: 16 },
                HourlyPoint { hour: 10, plays: 2, minutes: 5 },
                HourlyPoint { hour: 21, plays: 1, minutes: 1 },
            ]
        );
    }

    #[test]
    fn test_peak_hours() {
        let events = sample_history();
        let peak = PeakHoursAggregator::new(5).aggregate(&ctx(&events)).unwrap();

        assert_eq!(peak.peak_hour, 8);
        assert_eq!(peak.top_hours, vec![8, 10, 21]);
        assert_eq!(peak.description, "Most active between 8:00 and 21:00");
    }

    #[test]
    fn test_peak_hour_tie_goes_to_first_seen() {
        // 15:00 and 16:00 UTC are 07:00 and 08:00 in Los Angeles.
        let events = vec![
            play(mock_timestamp(2025, 1, 10, 16, 0, 0), "a", "x", 1),
            play(mock_timestamp(2025, 1, 10, 15, 0, 0), "b", "x", 1),
            play(mock_timestamp(2025, 1, 11, 15, 0, 0), "c", "x", 1),
            play(mock_timestamp(2025, 1, 11, 16, 0, 0), "d", "x", 1),
        ];

        let peak = PeakHoursAggregator::new(1).aggregate(&ctx(&events)).unwrap();
        assert_eq!(peak.peak_hour, 8);
        assert_eq!(peak.top_hours, vec![8]);
        assert_eq!(peak.description, "Most active between 8:00 and 8:00");
    }

    #[test]
    fn test_peak_hours_empty() {
        let peak = PeakHoursAggregator::new(5).aggregate(&ctx(&[])).unwrap();
        assert_eq!(peak.peak_hour, 0);
        assert!(peak.top_hours.is_empty());
        assert_eq!(peak.description, "No listening activity");
    }
}
