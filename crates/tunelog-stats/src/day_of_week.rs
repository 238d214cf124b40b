//! Weekday against weekend listening, normalised per day.

use crate::aggregator::{AggregationContext, DataAggregator};
use crate::ranking::Tally;
use crate::types::{BucketArtist, BucketStats, WeekdayWeekend};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, instrument};
use tunelog_common::{ms_to_hours, ms_to_minutes, round_to, Result, MS_PER_HOUR};

/// Running totals for one bucket.
#[derive(Debug, Default)]
struct Bucket<'a> {
    plays: u64,
    ms: u64,
    days: HashSet<NaiveDate>,
    artists: Tally<&'a str>,
}

impl Bucket<'_> {
    #[allow(clippy::cast_precision_loss)]
    fn finish(self, top_artists: usize) -> BucketStats {
        // A bucket with no plays still divides by one day.
        let days_count = (self.days.len() as u64).max(1);
        let unique_artists = self.artists.len();

        let top_artists = self
            .artists
            .ranked_by(|t| t.ms)
            .into_iter()
            .take(top_artists)
            .map(|(artist, totals)| BucketArtist {
                artist: artist.to_string(),
                minutes: ms_to_minutes(totals.ms),
            })
            .collect();

        BucketStats {
            total_hours: ms_to_hours(self.ms),
            total_plays: self.plays,
            days_count,
            avg_hours_per_day: round_to(self.ms as f64 / MS_PER_HOUR / days_count as f64, 2),
            avg_plays_per_day: round_to(self.plays as f64 / days_count as f64, 1),
            unique_artists,
            top_artists,
        }
    }
}

/// Splits plays into Monday-Friday and Saturday-Sunday by local date.
#[derive(Debug)]
pub struct WeekdayWeekendAggregator {
    /// Artists listed per bucket
    pub top_artists: usize,
}

impl WeekdayWeekendAggregator {
    /// Lists `top_artists` artists per bucket.
    pub const fn new(top_artists: usize) -> Self {
        Self { top_artists }
    }
}

impl DataAggregator<WeekdayWeekend> for WeekdayWeekendAggregator {
    #[instrument(skip(self, ctx))]
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<WeekdayWeekend> {
        let mut weekday = Bucket::default();
        let mut weekend = Bucket::default();

        for (event, local) in ctx.iter() {
            let bucket = if local.is_weekend() { &mut weekend } else { &mut weekday };
            bucket.plays += 1;
            bucket.ms += event.ms_played;
            bucket.days.insert(local.date);
            if let Some(artist) = event.artist.as_deref() {
                bucket.artists.entry(artist).record(event.ms_played, false);
            }
        }

        debug!(
            "Weekday: {} plays over {} days, weekend: {} plays over {} days",
            weekday.plays,
            weekday.days.len(),
            weekend.plays,
            weekend.days.len()
        );

        Ok(WeekdayWeekend {
            weekday: weekday.finish(self.top_artists),
            weekend: weekend.finish(self.top_artists),
        })
    }
}
