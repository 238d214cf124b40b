//! Aggregation context, the [`DataAggregator`] trait and the ranking aggregators.

use crate::ranking::Tally;
use crate::types::{ArtistRank, Overview, SkippedTrack, TrackRank};
use chrono_tz::Tz;
use std::collections::HashSet;
use tracing::{debug, instrument};
use tunelog_common::{
    ms_to_days, ms_to_hours, ms_to_minutes, parse_timezone, percentage, LocalTime, PlayEvent,
    Result, TrackKey, TunelogError,
};

/// Events plus their local calendar fields in the target timezone.
#[derive(Debug, Clone)]
pub struct AggregationContext<'a> {
    events: &'a [PlayEvent],
    local_times: Vec<LocalTime>,
    timezone: Tz,
}

impl<'a> AggregationContext<'a> {
    /// Converts every event into `timezone` once.
    pub fn new(events: &'a [PlayEvent], timezone: Tz) -> Self {
        let local_times = events
            .iter()
            .map(|event| LocalTime::from_instant(event.timestamp, timezone))
            .collect();

        Self {
            events,
            local_times,
            timezone,
        }
    }

    /// Like [`AggregationContext::new`], resolving the timezone by name.
    pub fn for_timezone(events: &'a [PlayEvent], timezone: &str) -> Result<Self> {
        Ok(Self::new(events, parse_timezone(timezone)?))
    }

    /// The events being aggregated
    pub const fn events(&self) -> &'a [PlayEvent] {
        self.events
    }

    /// Target timezone
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// No events at all
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Each event with its local time.
    pub fn iter(&self) -> impl Iterator<Item = (&'a PlayEvent, &LocalTime)> + '_ {
        self.events.iter().zip(self.local_times.iter())
    }
}

/// Computes one report section from the events.
pub trait DataAggregator<T> {
    /// Aggregates the context into a report section
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<T>;
}

/// Whole-history totals.
#[derive(Debug, Default)]
pub struct OverviewAggregator;

impl OverviewAggregator {
    /// Overview of every event.
    pub const fn new() -> Self {
        Self
    }
}

impl DataAggregator<Overview> for OverviewAggregator {
    #[instrument(skip(self, ctx), fields(events = ctx.len()))]
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<Overview> {
        let total_ms = ctx
            .events()
            .iter()
            .try_fold(0u64, |acc, e| acc.checked_add(e.ms_played))
            .ok_or_else(|| TunelogError::aggregation("total listening time overflows u64 milliseconds"))?;
        let artists: HashSet<&str> = ctx.events().iter().filter_map(|e| e.artist.as_deref()).collect();
        let tracks: HashSet<String> = ctx.events().iter().filter_map(PlayEvent::track_identity).collect();

        let overview = Overview {
            total_plays: ctx.len() as u64,
            total_minutes: ms_to_minutes(total_ms),
            total_hours: ms_to_hours(total_ms),
            total_days: ms_to_days(total_ms),
            unique_artists: artists.len(),
            unique_tracks: tracks.len(),
            total_ms,
        };

        debug!(
            "Overview: {} plays, {} artists, {} tracks",
            overview.total_plays, overview.unique_artists, overview.unique_tracks
        );
        Ok(overview)
    }
}

/// Artists ranked by listening time.
#[derive(Debug)]
pub struct TopArtistsAggregator {
    /// Entries kept
    pub limit: usize,
}

impl TopArtistsAggregator {
    /// Keeps the top `limit` artists.
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl DataAggregator<Vec<ArtistRank>> for TopArtistsAggregator {
    #[instrument(skip(self, ctx), fields(limit = self.limit))]
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<Vec<ArtistRank>> {
        let mut tally = Tally::new();
        for event in ctx.events() {
            if let Some(artist) = &event.artist {
                tally.entry(artist.as_str()).record(event.ms_played, event.is_skip());
            }
        }
        debug!("Ranking {} artists", tally.len());

        let mut ranked = tally.ranked_by(|t| t.ms);
        ranked.truncate(self.limit);
        let top_ms = ranked.first().map_or(0, |(_, t)| t.ms);

        Ok(ranked
            .into_iter()
            .map(|(artist, totals)| ArtistRank {
                artist: artist.to_string(),
                ms: totals.ms,
                minutes: ms_to_minutes(totals.ms),
                hours: ms_to_hours(totals.ms),
                plays: totals.plays,
                pct: percentage(totals.ms, top_ms),
            })
            .collect())
    }
}

/// Tracks ranked by listening time, keyed by (title, artist).
#[derive(Debug)]
pub struct TopTracksAggregator {
    /// Entries kept
    pub limit: usize,
}

impl TopTracksAggregator {
    /// Keeps the top `limit` tracks.
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl DataAggregator<Vec<TrackRank>> for TopTracksAggregator {
    #[instrument(skip(self, ctx), fields(limit = self.limit))]
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<Vec<TrackRank>> {
        let mut tally = Tally::new();
        for event in ctx.events() {
            if let Some(key) = event.track_key() {
                tally.entry(key).record(event.ms_played, event.is_skip());
            }
        }
        debug!("Ranking {} tracks", tally.len());

        let mut ranked = tally.ranked_by(|t| t.ms);
        ranked.truncate(self.limit);
        let top_ms = ranked.first().map_or(0, |(_, t)| t.ms);

        Ok(ranked
            .into_iter()
            .map(|(TrackKey { title, artist }, totals)| TrackRank {
                track: title,
                artist,
                ms: totals.ms,
                minutes: ms_to_minutes(totals.ms),
                hours: ms_to_hours(totals.ms),
                plays: totals.plays,
                pct: percentage(totals.ms, top_ms),
            })
            .collect())
    }
}

/// Tracks that are often skipped.
///
/// Only tracks with at least `min_plays` plays and a skip rate strictly above
/// `min_rate` are listed, highest rate first.
#[derive(Debug)]
pub struct SkipRateAggregator {
    /// Plays a track needs before its rate counts
    pub min_plays: u32,
    /// Rate a track must exceed, as a fraction
    pub min_rate: f64,
    /// Entries kept
    pub limit: usize,
}

impl SkipRateAggregator {
    /// Lists at most `limit` tracks.
    pub const fn new(min_plays: u32, min_rate: f64, limit: usize) -> Self {
        Self {
            min_plays,
            min_rate,
            limit,
        }
    }
}

impl DataAggregator<Vec<SkippedTrack>> for SkipRateAggregator {
    #[instrument(skip(self, ctx), fields(min_plays = self.min_plays))]
    #[allow(clippy::cast_precision_loss)]
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<Vec<SkippedTrack>> {
        let mut tally = Tally::new();
        for event in ctx.events() {
            if let Some(key) = event.track_key() {
                tally.entry(key).record(event.ms_played, event.is_skip());
            }
        }

        let mut candidates: Vec<SkippedTrack> = tally
            .iter()
            .filter(|(_, t)| t.plays >= u64::from(self.min_plays))
            .filter(|(_, t)| t.skips as f64 / t.plays as f64 > self.min_rate)
            .map(|(key, t)| SkippedTrack {
                track: key.title.clone(),
                artist: key.artist.clone(),
                total_plays: t.plays,
                skipped: t.skips,
                skip_rate: percentage(t.skips, t.plays),
            })
            .collect();

        candidates.sort_by(|a, b| b.skip_rate.cmp(&a.skip_rate));
        candidates.truncate(self.limit);

        debug!("{} frequently skipped tracks", candidates.len());
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunelog_common::test_utils::*;
    use tunelog_common::EndReason;

    fn ctx(events: &[PlayEvent]) -> AggregationContext<'_> {
        AggregationContext::new(events, Tz::America__Los_Angeles)
    }

    #[test]
    fn test_overview_on_sample_history() {
        let events = sample_history();
        let overview = OverviewAggregator::new().aggregate(&ctx(&events)).unwrap();

        assert_eq!(overview.total_plays, 6);
        assert_eq!(overview.total_ms, 1_320_000);
        assert_eq!(overview.total_minutes, 22);
        assert_eq!(overview.total_hours, 0.4);
        assert_eq!(overview.total_days, 0.0);
        assert_eq!(overview.unique_artists, 2);
        assert_eq!(overview.unique_tracks, 3);
    }

    #[test]
    fn test_overview_counts_uri_identity() {
        let ts = mock_timestamp(2025, 5, 1, 12, 0, 0);
        let events = vec![
            PlayEventBuilder::at(ts).track("Song", "X").uri("spotify:track:1").build(),
            // Same title and artist, different release.
            PlayEventBuilder::at(ts).track("Song", "X").uri("spotify:track:2").build(),
            PlayEventBuilder::at(ts).track("Song", "X").uri("spotify:track:1").build(),
        ];

        let overview = OverviewAggregator::new().aggregate(&ctx(&events)).unwrap();
        assert_eq!(overview.unique_tracks, 2);
        assert_eq!(overview.unique_artists, 1);
    }

    #[test]
    fn test_overview_rejects_overflowing_durations() {
        let ts = mock_timestamp(2025, 5, 1, 12, 0, 0);
        let events = vec![
            PlayEventBuilder::at(ts).ms(u64::MAX).build(),
            PlayEventBuilder::at(ts).ms(1).build(),
        ];

        assert!(matches!(
            OverviewAggregator::new().aggregate(&ctx(&events)),
            Err(TunelogError::Aggregation { .. })
        ));
    }

    #[test]
    fn test_overview_empty() {
        let overview = OverviewAggregator::new().aggregate(&ctx(&[])).unwrap();
        assert_eq!(overview, Overview::default());
    }

    #[test]
    fn test_top_artists() {
        let events = sample_history();
        let top = TopArtistsAggregator::new(5).aggregate(&ctx(&events)).unwrap();

        // A: 180000 + 60000 + 240000 ms, B: 120000 + 120000 ms
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].artist, "A");
        assert_eq!(top[0].minutes, 8);
        assert_eq!(top[0].plays, 3);
        assert_eq!(top[0].pct, 100);
        assert_eq!(top[1].artist, "B");
        assert_eq!(top[1].minutes, 4);
        assert_eq!(top[1].pct, 50);
    }

    #[test]
    fn test_top_artists_limit_and_ties() {
        let ts = mock_timestamp(2025, 5, 1, 12, 0, 0);
        let events = vec![
            play(ts, "t1", "First", 60_000),
            play(ts, "t2", "Second", 60_000),
            play(ts, "t3", "Third", 90_000),
        ];

        let top = TopArtistsAggregator::new(2).aggregate(&ctx(&events)).unwrap();
        let names: Vec<_> = top.iter().map(|a| a.artist.as_str()).collect();
        assert_eq!(names, vec!["Third", "First"]);
        assert_eq!(top[1].pct, 67);
    }

    #[test]
    fn test_artist_ms_adds_up_when_minutes_round() {
        let ts = mock_timestamp(2025, 5, 1, 12, 0, 0);
        let events = vec![
            play(ts, "a", "A", 40_000),
            play(ts, "b", "B", 40_000),
            PlayEventBuilder::at(ts).anonymous().ms(25_000).build(),
        ];

        let overview = OverviewAggregator::new().aggregate(&ctx(&events)).unwrap();
        let top = TopArtistsAggregator::new(5).aggregate(&ctx(&events)).unwrap();

        // Each artist rounds to one minute, the whole history to two.
        assert_eq!(top.iter().map(|a| a.ms).sum::<u64>(), overview.total_ms - 25_000);
        assert_eq!(top[0].ms, 40_000);
        assert_eq!(top[0].minutes, 1);
    }

    #[test]
    fn test_top_tracks_keyed_by_title_and_artist() {
        let ts = mock_timestamp(2025, 5, 1, 12, 0, 0);
        let events = vec![
            play(ts, "Intro", "One", 30_000),
            play(ts, "Intro", "Two", 45_000),
            play(ts, "Intro", "One", 30_000),
        ];

        let top = TopTracksAggregator::new(5).aggregate(&ctx(&events)).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!((top[0].track.as_str(), top[0].artist.as_str()), ("Intro", "One"));
        assert_eq!(top[0].plays, 2);
        assert_eq!(top[1].artist, "Two");
        assert_eq!(top[1].pct, 75);
    }

    #[test]
    fn test_skip_rates() {
        let ts = mock_timestamp(2025, 5, 1, 12, 0, 0);
        let mut events = Vec::new();
        // 10 plays, 4 skips: 40%
        for i in 0..10 {
            let reason = if i < 4 { EndReason::ForwardButton } else { EndReason::TrackDone };
            events.push(PlayEventBuilder::at(ts).track("Often", "A").reason(reason).build());
        }
        // 10 plays, 3 skips: exactly 30%, not listed
        for i in 0..10 {
            events.push(PlayEventBuilder::at(ts).track("Borderline", "B").skipped(i < 3).build());
        }
        // 9 plays, all skipped: below the play minimum
        for _ in 0..9 {
            events.push(PlayEventBuilder::at(ts).track("Rare", "C").skipped(true).build());
        }
        // 12 plays, 9 back-button skips: 75%
        for i in 0..12 {
            let reason = if i < 9 { EndReason::BackButton } else { EndReason::EndPlay };
            events.push(PlayEventBuilder::at(ts).track("Hated", "D").reason(reason).build());
        }

        let skipped = SkipRateAggregator::new(10, 0.3, 10).aggregate(&ctx(&events)).unwrap();
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].track, "Hated");
        assert_eq!(skipped[0].skip_rate, 75);
        assert_eq!(skipped[0].total_plays, 12);
        assert_eq!(skipped[0].skipped, 9);
        assert_eq!(skipped[1].track, "Often");
        assert_eq!(skipped[1].skip_rate, 40);
    }

    #[test]
    fn test_for_timezone_rejects_unknown_name() {
        assert!(AggregationContext::for_timezone(&[], "Not/AZone").is_err());
    }
}
