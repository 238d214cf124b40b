//! Report sections and data points.
//!
//! Field names are the JSON keys of the report document.

use serde::{Deserialize, Serialize};

/// Whole-history totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Number of play events
    pub total_plays: u64,
    /// Total listening time in whole minutes
    pub total_minutes: u64,
    /// Total listening time in hours, one decimal
    pub total_hours: f64,
    /// Total listening time in days, one decimal
    pub total_days: f64,
    /// Distinct artist names
    pub unique_artists: usize,
    /// Distinct tracks, by URI or by title and artist
    pub unique_tracks: usize,
    /// Total listening time in milliseconds
    pub total_ms: u64,
}

/// One entry of the top artists list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRank {
    /// Artist name
    pub artist: String,
    /// Listening time in milliseconds
    pub ms: u64,
    /// Listening time in whole minutes
    pub minutes: u64,
    /// Listening time in hours, one decimal
    pub hours: f64,
    /// Number of plays
    pub plays: u64,
    /// Listening time relative to the first entry, as a percentage
    pub pct: i64,
}

/// One entry of the top tracks list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRank {
    /// Track title
    pub track: String,
    /// Artist name
    pub artist: String,
    /// Listening time in milliseconds
    pub ms: u64,
    /// Listening time in whole minutes
    pub minutes: u64,
    /// Listening time in hours, one decimal
    pub hours: f64,
    /// Number of plays
    pub plays: u64,
    /// Listening time relative to the first entry, as a percentage
    pub pct: i64,
}

/// Plays and minutes for one local hour of day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyPoint {
    /// Hour of day, 0-23
    pub hour: u32,
    /// Plays started in this hour
    pub plays: u64,
    /// Minutes played, whole
    pub minutes: u64,
}

/// Plays per (month, hour)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthHourCell {
    /// Month, 1-12
    pub month: u32,
    /// Hour of day, 0-23
    pub hour: u32,
    /// Plays
    pub plays: u64,
}

/// Plays per (month, weekday, hour)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayHourCell {
    /// Month, 1-12
    pub month: u32,
    /// Days since Monday, 0-6
    pub weekday: u32,
    /// Hour of day, 0-23
    pub hour: u32,
    /// Plays
    pub plays: u64,
}

/// Plays per (month, day of month, hour)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHourCell {
    /// Month, 1-12
    pub month: u32,
    /// Day of month, 1-31
    pub day: u32,
    /// Hour of day, 0-23
    pub hour: u32,
    /// Plays
    pub plays: u64,
}

/// One month of the monthly trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Calendar year
    pub year: i32,
    /// Month, 1-12
    pub month: u32,
    /// Three letter month name
    pub month_name: String,
    /// Plays in the month
    pub plays: u64,
    /// Hours listened, one decimal
    pub hours: f64,
    /// Hours minus the previous month's hours, one decimal
    pub delta: f64,
    /// `delta` relative to the previous month, as a percentage
    pub delta_pct: i64,
    /// First month with the most hours
    pub is_peak: bool,
    /// First month with the largest increase
    pub is_inflection: bool,
}

/// An artist's minutes within a weekday/weekend bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketArtist {
    /// Artist name
    pub artist: String,
    /// Minutes played, whole
    pub minutes: u64,
}

/// Listening totals for weekdays or for weekends
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    /// Hours listened, one decimal
    pub total_hours: f64,
    /// Plays
    pub total_plays: u64,
    /// Distinct local dates with plays, at least 1
    pub days_count: u64,
    /// Hours per day, two decimals
    pub avg_hours_per_day: f64,
    /// Plays per day, one decimal
    pub avg_plays_per_day: f64,
    /// Distinct artists
    pub unique_artists: usize,
    /// Most played artists by minutes
    pub top_artists: Vec<BucketArtist>,
}

/// Weekday (Mon-Fri) against weekend (Sat-Sun) listening
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekdayWeekend {
    /// Monday to Friday
    pub weekday: BucketStats,
    /// Saturday and Sunday
    pub weekend: BucketStats,
}

/// A frequently skipped track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedTrack {
    /// Track title
    pub track: String,
    /// Artist name
    pub artist: String,
    /// Plays of the track
    pub total_plays: u64,
    /// Plays that were skips
    pub skipped: u64,
    /// Skips per play as a percentage
    pub skip_rate: i64,
}

/// Listening on a special calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDayActivity {
    /// Label of the day
    pub date: String,
    /// Plays on that day
    pub plays: u64,
    /// Minutes played, whole
    pub minutes: u64,
}

/// The busiest hours of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakHours {
    /// Hour with the most plays
    pub peak_hour: u32,
    /// Busiest hours, ascending
    pub top_hours: Vec<u32>,
    /// Human readable range
    pub description: String,
}

/// How the report was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Timezone of every local-time bucket
    pub timezone: String,
    /// Name of the export
    pub data_source: String,
    /// What counts as a skip
    pub skip_definition: String,
    /// Minimum plays for a track to get a skip rate
    pub min_plays_for_skip_rate: u32,
}
