//! Monthly listening trend with month-over-month deltas.

use crate::aggregator::{AggregationContext, DataAggregator};
use crate::types::MonthlyPoint;
use std::collections::BTreeMap;
use tracing::{debug, instrument};
use tunelog_common::{ms_to_hours, round_to, round_whole, Result};

/// Three letter English month name.
pub const fn month_abbr(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}

/// Plays and hours per local (year, month), ascending.
#[derive(Debug, Default)]
pub struct MonthlyTrendAggregator;

impl MonthlyTrendAggregator {
    /// Trend over every event.
    pub const fn new() -> Self {
        Self
    }

    /// Fills `delta`, `delta_pct`, `is_peak` and `is_inflection`.
    ///
    /// Deltas use the already rounded hours so they match what is displayed.
    fn annotate(points: &mut [MonthlyPoint]) {
        for i in 1..points.len() {
            let previous = points[i - 1].hours;
            let current = points[i].hours;
            points[i].delta = round_to(current - previous, 1);
            points[i].delta_pct = if previous > 0.0 {
                round_whole((current - previous) / previous * 100.0)
            } else {
                0
            };
        }

        if let Some(peak) = first_max_by(points, |p| p.hours) {
            points[peak].is_peak = true;
        }
        if let Some(inflection) = first_max_by(points, |p| p.delta) {
            points[inflection].is_inflection = true;
        }
    }
}

/// Index of the first element with the largest key.
fn first_max_by<F: Fn(&MonthlyPoint) -> f64>(points: &[MonthlyPoint], key: F) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, point) in points.iter().enumerate() {
        let value = key(point);
        if best.map_or(true, |(_, max)| value > max) {
            best = Some((i, value));
        }
    }
    best.map(|(i, _)| i)
}

impl DataAggregator<Vec<MonthlyPoint>> for MonthlyTrendAggregator {
    #[instrument(skip(self, ctx))]
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<Vec<MonthlyPoint>> {
        let mut months: BTreeMap<(i32, u32), (u64, u64)> = BTreeMap::new();
        for (event, local) in ctx.iter() {
            let (plays, ms) = months.entry((local.year(), local.month())).or_default();
            *plays += 1;
            *ms += event.ms_played;
        }

        let mut points: Vec<MonthlyPoint> = months
            .into_iter()
            .map(|((year, month), (plays, ms))| MonthlyPoint {
                year,
                month,
                month_name: month_abbr(month).to_string(),
                plays,
                hours: ms_to_hours(ms),
                delta: 0.0,
                delta_pct: 0,
                is_peak: false,
                is_inflection: false,
            })
            .collect();
        Self::annotate(&mut points);

        debug!("Aggregated {} monthly data points", points.len());
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;
    use tunelog_common::test_utils::*;
    use tunelog_common::PlayEvent;

    const HOUR: u64 = 3_600_000;

    fn ctx(events: &[PlayEvent]) -> AggregationContext<'_> {
        AggregationContext::new(events, Tz::America__Los_Angeles)
    }

    fn month_of(year: i32, month: u32, ms: u64) -> PlayEvent {
        play(mock_timestamp(year, month, 15, 20, 0, 0), "t", "a", ms)
    }

    #[test]
    fn test_month_abbr() {
        assert_eq!(month_abbr(1), "Jan");
        assert_eq!(month_abbr(12), "Dec");
        assert_eq!(month_abbr(13), "???");
    }

    #[test]
    fn test_sample_history_months() {
        let events = sample_history();
        let trend = MonthlyTrendAggregator::new().aggregate(&ctx(&events)).unwrap();

        assert_eq!(trend.len(), 2);
        assert_eq!((trend[0].year, trend[0].month, trend[0].month_name.as_str()), (2025, 1, "Jan"));
        assert_eq!(trend[0].plays, 3);
        assert_eq!(trend[1].plays, 3);
        assert_eq!(trend[1].hours, 0.3);
        assert_eq!(trend[0].delta, 0.0);
    }

    #[test]
    fn test_deltas_peak_and_inflection() {
        let events = vec![
            month_of(2025, 1, 10 * HOUR),
            month_of(2025, 2, 15 * HOUR),
            month_of(2025, 3, 30 * HOUR),
            month_of(2025, 4, 12 * HOUR),
            month_of(2025, 5, 30 * HOUR),
        ];
        let trend = MonthlyTrendAggregator::new().aggregate(&ctx(&events)).unwrap();

        let deltas: Vec<f64> = trend.iter().map(|p| p.delta).collect();
        assert_eq!(deltas, vec![0.0, 5.0, 15.0, -18.0, 18.0]);
        let pcts: Vec<i64> = trend.iter().map(|p| p.delta_pct).collect();
        assert_eq!(pcts, vec![0, 50, 100, -60, 150]);

        // March and May tie on hours, the first one wins.
        let peaks: Vec<bool> = trend.iter().map(|p| p.is_peak).collect();
        assert_eq!(peaks, vec![false, false, true, false, false]);
        let inflections: Vec<bool> = trend.iter().map(|p| p.is_inflection).collect();
        assert_eq!(inflections, vec![false, false, false, false, true]);
    }

    #[test]
    fn test_zero_previous_month_has_zero_pct() {
        let events = vec![month_of(2025, 1, 0), month_of(2025, 2, 2 * HOUR)];
        let trend = MonthlyTrendAggregator::new().aggregate(&ctx(&events)).unwrap();
        assert_eq!(trend[1].delta, 2.0);
        assert_eq!(trend[1].delta_pct, 0);
    }

    #[test]
    fn test_years_are_kept_apart() {
        let events = vec![month_of(2025, 1, HOUR), month_of(2024, 1, HOUR)];
        let trend = MonthlyTrendAggregator::new().aggregate(&ctx(&events)).unwrap();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].year, 2024);
        assert_eq!(trend[1].year, 2025);
    }

    #[test]
    fn test_empty() {
        assert!(MonthlyTrendAggregator::new().aggregate(&ctx(&[])).unwrap().is_empty());
    }
}
