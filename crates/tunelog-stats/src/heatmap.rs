//! Play-count heatmaps over local month, weekday, day and hour.
//!
//! Months are the calendar month only; a history spanning several years
//! folds the same month together. Cells are sorted by key.

use crate::aggregator::{AggregationContext, DataAggregator};
use crate::types::{DayHourCell, MonthHourCell, WeekdayHourCell};
use std::collections::BTreeMap;
use tracing::{debug, instrument};
use tunelog_common::{LocalTime, Result};

/// Counts plays per key, keys ascending.
fn count_by<K: Ord, F: Fn(&LocalTime) -> K>(ctx: &AggregationContext<'_>, key: F) -> BTreeMap<K, u64> {
    let mut counts = BTreeMap::new();
    for (_, local) in ctx.iter() {
        *counts.entry(key(local)).or_insert(0) += 1;
    }
    counts
}

/// Plays per (month, hour).
#[derive(Debug, Default)]
pub struct MonthHourHeatmapAggregator;

impl DataAggregator<Vec<MonthHourCell>> for MonthHourHeatmapAggregator {
    #[instrument(skip(self, ctx))]
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<Vec<MonthHourCell>> {
        let cells: Vec<MonthHourCell> = count_by(ctx, |t| (t.month(), t.hour))
            .into_iter()
            .map(|((month, hour), plays)| MonthHourCell { month, hour, plays })
            .collect();
        debug!("Month x hour heatmap has {} cells", cells.len());
        Ok(cells)
    }
}

/// Plays per (month, weekday, hour), weekday 0 = Monday.
#[derive(Debug, Default)]
pub struct WeekdayHourHeatmapAggregator;

impl DataAggregator<Vec<WeekdayHourCell>> for WeekdayHourHeatmapAggregator {
    #[instrument(skip(self, ctx))]
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<Vec<WeekdayHourCell>> {
        let cells: Vec<WeekdayHourCell> = count_by(ctx, |t| (t.month(), t.weekday_index(), t.hour))
            .into_iter()
            .map(|((month, weekday, hour), plays)| WeekdayHourCell {
                month,
                weekday,
                hour,
                plays,
            })
            .collect();
        debug!("Month x weekday x hour heatmap has {} cells", cells.len());
        Ok(cells)
    }
}

/// Plays per (month, day of month, hour).
#[derive(Debug, Default)]
pub struct DayHourHeatmapAggregator;

impl DataAggregator<Vec<DayHourCell>> for DayHourHeatmapAggregator {
    #[instrument(skip(self, ctx))]
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<Vec<DayHourCell>> {
        let cells: Vec<DayHourCell> = count_by(ctx, |t| (t.month(), t.day(), t.hour))
            .into_iter()
            .map(|((month, day, hour), plays)| DayHourCell {
                month,
                day,
                hour,
                plays,
            })
            .collect();
        debug!("Month x day x hour heatmap has {} cells", cells.len());
        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;
    use tunelog_common::test_utils::*;

    #[test]
    fn test_month_hour_heatmap() {
        let events = sample_history();
        let ctx = AggregationContext::new(&events, Tz::America__Los_Angeles);
        let cells = MonthHourHeatmapAggregator.aggregate(&ctx).unwrap();

        assert_eq!(
            cells,
            vec![
                MonthHourCell { month: 1, hour: 10, plays: 2 },
                MonthHourCell { month: 1, hour: 21, plays: 1 },
                MonthHourCell { month: 2, hour: 8, plays: 3 },
            ]
        );
    }

    #[test]
    fn test_weekday_hour_heatmap() {
        let events = sample_history();
        let ctx = AggregationContext::new(&events, Tz::America__Los_Angeles);
        let cells = WeekdayHourHeatmapAggregator.aggregate(&ctx).unwrap();

        assert_eq!(cells.len(), 3);
        // Saturday is 5
        assert_eq!(cells[0], WeekdayHourCell { month: 1, weekday: 0, hour: 21, plays: 1 });
        assert_eq!(cells[1], WeekdayHourCell { month: 1, weekday: 5, hour: 10, plays: 2 });
        assert_eq!(cells[2], WeekdayHourCell { month: 2, weekday: 0, hour: 8, plays: 3 });
    }

    #[test]
    fn test_day_hour_heatmap_totals() {
        let events = sample_history();
        let ctx = AggregationContext::new(&events, Tz::America__Los_Angeles);
        let cells = DayHourHeatmapAggregator.aggregate(&ctx).unwrap();

        assert_eq!(cells.iter().map(|c| c.plays).sum::<u64>(), events.len() as u64);
        assert_eq!(cells[0], DayHourCell { month: 1, day: 4, hour: 10, plays: 2 });
        assert_eq!(cells[1], DayHourCell { month: 1, day: 6, hour: 21, plays: 1 });
    }
}
