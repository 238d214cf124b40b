//! Validation functions and regex patterns used by the schema.

use crate::schema::SpecialDay;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing_subscriber::EnvFilter;
use tunelog_common::LoggingConfig;
use validator::{ValidationError, ValidationErrors};

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #1DB954)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Validate a timezone name against the tz database.
pub fn validate_timezone(timezone: &str) -> Result<(), ValidationError> {
    if timezone.trim().is_empty() {
        return Err(ValidationError::new("empty_timezone"));
    }

    tunelog_common::parse_timezone(timezone)
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_timezone"))
}

/// Validate a log level or filter directives.
///
/// Uses the same parser as logging setup, so anything `EnvFilter` accepts
/// passes: plain levels, `target=level` pairs and bare targets.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if level.trim().is_empty() {
        return Err(ValidationError::new("empty_log_level"));
    }

    EnvFilter::try_new(level).map(|_| ()).map_err(|e| {
        let mut error = ValidationError::new("invalid_log_level");
        error.message = Some(format!("invalid log filter '{level}': {e}").into());
        error
    })
}

/// Checks the logging section, which lives in `tunelog-common` and has no derive.
pub fn validate_log_settings(logging: &LoggingConfig) -> Result<(), ValidationErrors> {
    validate_log_level(&logging.level).map_err(|e| single_error("level", e))
}

/// Every special day must exist in a leap year and keys must be unique.
pub fn validate_special_days(days: &[SpecialDay]) -> Result<(), ValidationErrors> {
    let mut seen = HashSet::new();

    for day in days {
        // 2024 is a leap year, so 29 February is accepted.
        if NaiveDate::from_ymd_opt(2024, day.month, day.day).is_none() {
            let mut error = ValidationError::new("invalid_calendar_day");
            error.message = Some(format!("{} is not a calendar day: {}/{}", day.key, day.month, day.day).into());
            return Err(single_error("special_days", error));
        }
        if !seen.insert(day.key.as_str()) {
            let mut error = ValidationError::new("duplicate_special_day");
            error.message = Some(format!("duplicate special day key '{}'", day.key).into());
            return Err(single_error("special_days", error));
        }
    }

    Ok(())
}

fn single_error(field: &'static str, error: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}
