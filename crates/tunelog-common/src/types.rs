//! Play-event model for a streaming history export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why playback of a track stopped, as recorded in the export's `reason_end`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EndReason {
    /// The track played to the end.
    TrackDone,
    /// The forward button was pressed.
    ForwardButton,
    /// The back button was pressed.
    BackButton,
    /// Playback ended without a specific cause.
    EndPlay,
    /// The user logged out.
    Logout,
    /// Playback was changed from another device.
    Remote,
    /// Another row was clicked in a list.
    ClickRow,
    /// The play button was pressed.
    PlayButton,
    /// The track failed to play.
    TrackError,
    /// The client exited unexpectedly.
    UnexpectedExit,
    /// The client exited unexpectedly while paused.
    UnexpectedExitWhilePaused,
    /// The app was (re)loaded.
    AppLoad,
    /// The export did not record a reason.
    #[default]
    Unknown,
    /// Any value not listed above, kept verbatim.
    Other(String),
}

impl EndReason {
    /// The raw export spelling of this reason.
    pub fn as_str(&self) -> &str {
        match self {
            Self::TrackDone => "trackdone",
            Self::ForwardButton => "fwdbtn",
            Self::BackButton => "backbtn",
            Self::EndPlay => "endplay",
            Self::Logout => "logout",
            Self::Remote => "remote",
            Self::ClickRow => "clickrow",
            Self::PlayButton => "playbtn",
            Self::TrackError => "trackerror",
            Self::UnexpectedExit => "unexpected-exit",
            Self::UnexpectedExitWhilePaused => "unexpected-exit-while-paused",
            Self::AppLoad => "appload",
            Self::Unknown => "unknown",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this reason is explicit forward/back navigation.
    pub const fn is_navigation(&self) -> bool {
        matches!(self, Self::ForwardButton | Self::BackButton)
    }
}

impl FromStr for EndReason {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "trackdone" => Self::TrackDone,
            "fwdbtn" => Self::ForwardButton,
            "backbtn" => Self::BackButton,
            "endplay" => Self::EndPlay,
            "logout" => Self::Logout,
            "remote" => Self::Remote,
            "clickrow" => Self::ClickRow,
            "playbtn" => Self::PlayButton,
            "trackerror" => Self::TrackError,
            "unexpected-exit" => Self::UnexpectedExit,
            "unexpected-exit-while-paused" => Self::UnexpectedExitWhilePaused,
            "appload" => Self::AppLoad,
            "" | "unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for EndReason {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(reason) => reason,
            Err(never) => match never {},
        }
    }
}

impl From<EndReason> for String {
    fn from(value: EndReason) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a track for per-track rankings: (title, artist).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackKey {
    /// Track title
    pub title: String,
    /// Album artist name
    pub artist: String,
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}

/// One logged instance of a track being played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayEvent {
    /// When playback stopped, in UTC.
    pub timestamp: DateTime<Utc>,
    /// Track title; absent for podcast and audiobook rows.
    pub track: Option<String>,
    /// Album artist name; absent for podcast and audiobook rows.
    pub artist: Option<String>,
    /// Album name.
    pub album: Option<String>,
    /// Streaming service URI of the track.
    pub track_uri: Option<String>,
    /// How long the track was played, in milliseconds.
    pub ms_played: u64,
    /// The export's own skipped flag.
    pub skipped: bool,
    /// Why playback stopped.
    pub end_reason: EndReason,
}

impl PlayEvent {
    /// A play counts as skipped when flagged so or ended by forward/back navigation.
    pub const fn is_skip(&self) -> bool {
        self.skipped || self.end_reason.is_navigation()
    }

    /// (title, artist) when both are known.
    pub fn track_key(&self) -> Option<TrackKey> {
        match (&self.track, &self.artist) {
            (Some(title), Some(artist)) => Some(TrackKey {
                title: title.clone(),
                artist: artist.clone(),
            }),
            _ => None,
        }
    }

    /// Identity used for distinct-track counting: the URI when present,
    /// otherwise the (title, artist) pair.
    pub fn track_identity(&self) -> Option<String> {
        if let Some(uri) = &self.track_uri {
            return Some(uri.clone());
        }
        self.track_key().map(|key| format!("{}\u{1f}{}", key.title, key.artist))
    }
}
