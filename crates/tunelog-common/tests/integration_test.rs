//! Integration tests for tunelog-common.
//!
//! These tests read history exports from disk the way the aggregate command does.

use std::io::Write;
use tunelog_common::{read_history, EndReason, TunelogError};

const EXPORT: &str = r#"[
  {"ts": "2025-01-04T18:00:00Z", "platform": "ios", "ms_played": 180000,
   "master_metadata_track_name": "Alpha", "master_metadata_album_artist_name": "A",
   "spotify_track_uri": "spotify:track:alpha", "reason_start": "clickrow",
   "reason_end": "trackdone", "shuffle": false, "skipped": false},
  {"ts": "2025-01-07T05:00:00Z", "platform": "ios", "ms_played": 60000,
   "master_metadata_track_name": "Alpha", "master_metadata_album_artist_name": "A",
   "spotify_track_uri": "spotify:track:alpha", "reason_start": "fwdbtn",
   "reason_end": "fwdbtn", "shuffle": true, "skipped": null},
  {"ts": "2025-02-03T16:30:00Z", "platform": "web", "ms_played": 600000,
   "master_metadata_track_name": null, "master_metadata_album_artist_name": null,
   "spotify_track_uri": null, "episode_name": "Weekly News",
   "reason_end": "endplay", "skipped": null}
]"#;

#[test]
fn test_read_history_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXPORT.as_bytes()).unwrap();

    let events = read_history(file.path()).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events.iter().map(|e| e.ms_played).sum::<u64>(), 840_000);
    assert_eq!(events.iter().filter(|e| e.is_skip()).count(), 1);
    assert_eq!(events[1].end_reason, EndReason::ForwardButton);
    assert!(events[2].artist.is_none());
}

#[test]
fn test_read_history_rejects_truncated_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"[{"ts": "2025-01-01T00:00:00Z", "ms_played": 10"#).unwrap();

    let err = read_history(file.path()).unwrap_err();
    assert!(matches!(err, TunelogError::Serialization(_)));
}

#[test]
fn test_read_history_accepts_empty_array() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[]").unwrap();

    assert!(read_history(file.path()).unwrap().is_empty());
}
