//! Reading the streaming history export into [`PlayEvent`]s.
//!
//! The export is a JSON array of objects using the extended streaming
//! history field names. Every record must carry a parseable `ts` and a
//! `ms_played`; the first record that doesn't aborts the whole read.

use crate::error::{Result, TunelogError};
use crate::types::{EndReason, PlayEvent};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// One record exactly as it appears in the export.
#[derive(Debug, Deserialize)]
struct RawPlayEvent {
    ts: String,
    ms_played: u64,
    master_metadata_track_name: Option<String>,
    master_metadata_album_artist_name: Option<String>,
    master_metadata_album_album_name: Option<String>,
    spotify_track_uri: Option<String>,
    skipped: Option<bool>,
    reason_end: Option<String>,
}

/// Empty strings in the export mean "unknown".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parses an RFC 3339 instant such as `2025-04-06T17:03:12Z`.
pub fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}

impl RawPlayEvent {
    fn into_event(self, index: usize) -> Result<PlayEvent> {
        let timestamp = parse_timestamp(&self.ts).map_err(|e| {
            TunelogError::input_field(index, format!("unparseable timestamp '{}': {e}", self.ts), "ts")
        })?;

        Ok(PlayEvent {
            timestamp,
            track: non_empty(self.master_metadata_track_name),
            artist: non_empty(self.master_metadata_album_artist_name),
            album: non_empty(self.master_metadata_album_album_name),
            track_uri: non_empty(self.spotify_track_uri),
            ms_played: self.ms_played,
            skipped: self.skipped.unwrap_or(false),
            end_reason: self
                .reason_end
                .map(EndReason::from)
                .unwrap_or_default(),
        })
    }
}

/// Parses a whole export document.
#[instrument(skip(json), fields(bytes = json.len()))]
pub fn parse_history(json: &str) -> Result<Vec<PlayEvent>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
    debug!("Export contains {} records", records.len());

    records
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let raw: RawPlayEvent = serde_json::from_value(value)
                .map_err(|e| TunelogError::input(index, e.to_string()))?;
            raw.into_event(index)
        })
        .collect()
}

/// Reads and parses the export at `path`.
pub fn read_history(path: &Path) -> Result<Vec<PlayEvent>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TunelogError::with_source(format!("failed to read history file {}", path.display()), e)
    })?;
    let events = parse_history(&content)?;
    info!("Loaded {} play events from {}", events.len(), path.display());
    Ok(events)
}
