//! Test utilities and shared fixtures for tunelog.
//!
//! Enabled for this crate's own tests and, through the `testing` feature,
//! for the unit and integration tests of the other workspace crates.

use crate::types::{EndReason, PlayEvent};
use chrono::{DateTime, TimeZone, Utc};

/// Test fixture for creating a UTC timestamp.
pub fn mock_timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .expect("valid fixture timestamp")
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Builder for [`PlayEvent`] fixtures.
#[derive(Debug, Clone)]
pub struct PlayEventBuilder {
    event: PlayEvent,
}

impl PlayEventBuilder {
    /// A completed three-minute play at `timestamp`.
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            event: PlayEvent {
                timestamp,
                track: Some("Untitled".to_string()),
                artist: Some("Unknown Artist".to_string()),
                album: None,
                track_uri: None,
                ms_played: 180_000,
                skipped: false,
                end_reason: EndReason::TrackDone,
            },
        }
    }

    /// Sets title and artist.
    pub fn track(mut self, title: &str, artist: &str) -> Self {
        self.event.track = Some(title.to_string());
        self.event.artist = Some(artist.to_string());
        self
    }

    /// Removes title and artist, like a podcast row.
    pub fn anonymous(mut self) -> Self {
        self.event.track = None;
        self.event.artist = None;
        self
    }

    /// Sets the track URI.
    pub fn uri(mut self, uri: &str) -> Self {
        self.event.track_uri = Some(uri.to_string());
        self
    }

    /// Sets the played duration.
    pub fn ms(mut self, ms_played: u64) -> Self {
        self.event.ms_played = ms_played;
        self
    }

    /// Sets the skipped flag.
    pub fn skipped(mut self, skipped: bool) -> Self {
        self.event.skipped = skipped;
        self
    }

    /// Sets the end reason.
    pub fn reason(mut self, reason: EndReason) -> Self {
        self.event.end_reason = reason;
        self
    }

    /// Finishes the fixture.
    pub fn build(self) -> PlayEvent {
        self.event
    }
}

/// Shorthand for a completed play of `title` by `artist`.
pub fn play(timestamp: DateTime<Utc>, title: &str, artist: &str, ms_played: u64) -> PlayEvent {
    PlayEventBuilder::at(timestamp)
        .track(title, artist)
        .ms(ms_played)
        .build()
}

/// A small, hand-checked history used across crates.
///
/// All instants are chosen so the Los Angeles local time is easy to read:
/// - 2025-01-04 (Sat) 10:00 local: Alpha/A 3 min, Beta/B 2 min
/// - 2025-01-06 (Mon) 21:00 local: Alpha/A 1 min, skipped by forward button
/// - 2025-02-03 (Mon) 08:00 local: Gamma/A 4 min, Beta/B 2 min
/// - one podcast row on 2025-02-03 08:30 local, 10 min, no artist
pub fn sample_history() -> Vec<PlayEvent> {
    vec![
        play(mock_timestamp(2025, 1, 4, 18, 0, 0), "Alpha", "A", 180_000),
        play(mock_timestamp(2025, 1, 4, 18, 5, 0), "Beta", "B", 120_000),
        PlayEventBuilder::at(mock_timestamp(2025, 1, 7, 5, 0, 0))
            .track("Alpha", "A")
            .ms(60_000)
            .reason(EndReason::ForwardButton)
            .build(),
        play(mock_timestamp(2025, 2, 3, 16, 0, 0), "Gamma", "A", 240_000),
        play(mock_timestamp(2025, 2, 3, 16, 10, 0), "Beta", "B", 120_000),
        PlayEventBuilder::at(mock_timestamp(2025, 2, 3, 16, 30, 0))
            .anonymous()
            .ms(600_000)
            .build(),
    ]
}

/// Renders events back into export JSON, as found on disk.
pub fn history_json(events: &[PlayEvent]) -> String {
    let records: Vec<serde_json::Value> = events
        .iter()
        .map(|e| {
            serde_json::json!({
                "ts": e.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                "ms_played": e.ms_played,
                "master_metadata_track_name": e.track,
                "master_metadata_album_artist_name": e.artist,
                "master_metadata_album_album_name": e.album,
                "spotify_track_uri": e.track_uri,
                "skipped": e.skipped,
                "reason_end": e.end_reason.as_str(),
            })
        })
        .collect();
    serde_json::Value::Array(records).to_string()
}
