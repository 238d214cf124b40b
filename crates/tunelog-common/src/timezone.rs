//! Conversion of UTC instants into the dashboard's target timezone.
//!
//! Every time bucket (hour of day, weekday, month, calendar day) is taken in
//! local time, so events are converted once with [`LocalTime::from_instant`]
//! and the calendar fields read from there.

use crate::error::{Result, TunelogError};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;

/// Common abbreviations accepted in place of an IANA name.
const TIMEZONE_ALIASES: &[(&str, &str)] = &[
    ("PST", "America/Los_Angeles"),
    ("PT", "America/Los_Angeles"),
    ("MST", "America/Denver"),
    ("CST", "America/Chicago"),
    ("EST", "America/New_York"),
    ("GMT", "UTC"),
    ("CET", "Europe/Paris"),
    ("JST", "Asia/Tokyo"),
];

/// Resolves an IANA timezone name (or one of a few common abbreviations).
pub fn parse_timezone(name: &str) -> Result<Tz> {
    let trimmed = name.trim();
    let resolved = TIMEZONE_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(trimmed))
        .map_or(trimmed, |(_, iana)| *iana);

    resolved
        .parse::<Tz>()
        .map_err(|e| TunelogError::timezone(format!("unknown timezone '{name}': {e}")))
}

/// Expresses a UTC instant in `tz`.
pub fn to_local(instant: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    tz.from_utc_datetime(&instant.naive_utc())
}

/// Converts a local time back to the UTC instant it denotes.
pub fn to_utc(local: &DateTime<Tz>) -> DateTime<Utc> {
    local.with_timezone(&Utc)
}

/// Calendar fields of an event in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    /// Local calendar date
    pub date: NaiveDate,
    /// Local hour, 0-23
    pub hour: u32,
    /// Local day of week
    pub weekday: Weekday,
}

impl LocalTime {
    /// Converts `instant` into `tz` and captures its calendar fields.
    pub fn from_instant(instant: DateTime<Utc>, tz: Tz) -> Self {
        let local = to_local(instant, tz);
        Self {
            date: local.date_naive(),
            hour: local.hour(),
            weekday: local.weekday(),
        }
    }

    /// Local year
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Local month, 1-12
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Local day of month, 1-31
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Days since Monday, 0-6
    pub fn weekday_index(&self) -> u32 {
        self.weekday.num_days_from_monday()
    }

    /// Saturday or Sunday
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday, Weekday::Sat | Weekday::Sun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_timezone_names_and_aliases() {
        assert_eq!(parse_timezone("America/Los_Angeles").unwrap(), Tz::America__Los_Angeles);
        assert_eq!(parse_timezone("pst").unwrap(), Tz::America__Los_Angeles);
        assert_eq!(parse_timezone(" UTC ").unwrap(), Tz::UTC);
        assert!(matches!(
            parse_timezone("Mars/Olympus_Mons"),
            Err(TunelogError::Timezone { .. })
        ));
    }

    #[test]
    fn test_local_fields_cross_midnight() {
        // 2025-01-01 05:30 UTC is still New Year's Eve in Los Angeles.
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 5, 30, 0).unwrap();
        let local = LocalTime::from_instant(instant, Tz::America__Los_Angeles);

        assert_eq!(local.year(), 2024);
        assert_eq!(local.month(), 12);
        assert_eq!(local.day(), 31);
        assert_eq!(local.hour, 21);
        assert_eq!(local.weekday, Weekday::Tue);
        assert_eq!(local.weekday_index(), 1);
        assert!(!local.is_weekend());
    }

    #[test]
    fn test_dst_offsets() {
        let tz = Tz::America__Los_Angeles;
        // PST (UTC-8) in January, PDT (UTC-7) in July.
        let winter = LocalTime::from_instant(Utc.with_ymd_and_hms(2025, 1, 15, 20, 0, 0).unwrap(), tz);
        let summer = LocalTime::from_instant(Utc.with_ymd_and_hms(2025, 7, 15, 20, 0, 0).unwrap(), tz);
        assert_eq!(winter.hour, 12);
        assert_eq!(summer.hour, 13);
    }

    #[test]
    fn test_fall_back_hour_round_trips() {
        // 01:30 happens twice on 2025-11-02 in Los Angeles.
        let tz = Tz::America__Los_Angeles;
        let first = Utc.with_ymd_and_hms(2025, 11, 2, 8, 30, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2025, 11, 2, 9, 30, 0).unwrap();

        assert_eq!(to_local(first, tz).hour(), 1);
        assert_eq!(to_local(second, tz).hour(), 1);
        assert_eq!(to_utc(&to_local(first, tz)), first);
        assert_eq!(to_utc(&to_local(second, tz)), second);
    }

    proptest! {
        #[test]
        fn prop_conversion_is_reversible(secs in 0i64..4_102_444_800, tz_index in 0usize..4) {
            let zones = [
                Tz::America__Los_Angeles,
                Tz::America__Mexico_City,
                Tz::Europe__Madrid,
                Tz::Australia__Lord_Howe,
            ];
            let instant = DateTime::from_timestamp(secs, 0).unwrap();
            let local = to_local(instant, zones[tz_index]);
            prop_assert_eq!(to_utc(&local), instant);
        }
    }
}
