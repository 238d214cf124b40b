//! Default configuration values.

use crate::schema::{
    AggregationSettings, ImageFormat, InputConfig, OutputConfig, RenderSettings, SpecialDay,
};
use std::path::PathBuf;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "tunelog.yaml";
/// Alternate spelling of [`DEFAULT_CONFIG_FILE`]
pub const DEFAULT_CONFIG_FILE_ALT: &str = "tunelog.yml";

/// Default timezone for local-time buckets
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";
/// Default length of the ranking lists
pub const DEFAULT_TOP_LIMIT: usize = 5;
/// Default number of artists per weekday/weekend bucket
pub const DEFAULT_BUCKET_TOP_ARTISTS: usize = 3;
/// Default minimum plays for a skip rate
pub const DEFAULT_SKIP_MIN_PLAYS: u32 = 10;
/// Default skip rate a track must exceed to be listed
pub const DEFAULT_SKIP_MIN_RATE: f64 = 0.3;
/// Default length of the skip rate list
pub const DEFAULT_SKIP_LIMIT: usize = 10;
/// Default number of hours in the peak hour summary
pub const DEFAULT_PEAK_HOURS: usize = 5;
/// Default data source label
pub const DEFAULT_DATA_SOURCE: &str = "Spotify Extended Streaming History";

/// Mexican public holidays plus a birthday, as `(key, label, month, day)`.
const DEFAULT_SPECIAL_DAYS: &[(&str, &str, u32, u32)] = &[
    ("birthday", "Birthday", 4, 6),
    ("mx_1_1", "Año Nuevo", 1, 1),
    ("mx_2_5", "Día de la Constitución", 2, 5),
    ("mx_3_21", "Natalicio de Benito Juárez", 3, 21),
    ("mx_5_1", "Día del Trabajo", 5, 1),
    ("mx_5_5", "Cinco de Mayo", 5, 5),
    ("mx_9_16", "Día de la Independencia", 9, 16),
    ("mx_11_2", "Día de los Muertos", 11, 2),
    ("mx_11_20", "Revolución Mexicana", 11, 20),
    ("mx_12_25", "Navidad", 12, 25),
];

/// The built-in special day list.
pub fn default_special_days() -> Vec<SpecialDay> {
    DEFAULT_SPECIAL_DAYS
        .iter()
        .map(|&(key, label, month, day)| SpecialDay {
            key: key.to_string(),
            label: label.to_string(),
            month,
            day,
        })
        .collect()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("history.json"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from("data.json"),
        }
    }
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            top_limit: DEFAULT_TOP_LIMIT,
            bucket_top_artists: DEFAULT_BUCKET_TOP_ARTISTS,
            skip_min_plays: DEFAULT_SKIP_MIN_PLAYS,
            skip_min_rate: DEFAULT_SKIP_MIN_RATE,
            skip_limit: DEFAULT_SKIP_LIMIT,
            peak_hours: DEFAULT_PEAK_HOURS,
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            special_days: default_special_days(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
            format: ImageFormat::Png,
            width: 1200,
            height: 700,
            background_color: "#FFFFFF".to_string(),
            primary_color: "#1DB954".to_string(),
            highlight_color: "#FF6B6B".to_string(),
            text_color: "#333333".to_string(),
            font_family: "sans-serif".to_string(),
            title_font_size: 28,
            label_font_size: 16,
            max_label_chars: 28,
            summary_file: "summary.txt".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Config;

    #[test]
    fn test_defaults_are_valid() {
        Config::default().validate_all().unwrap();
    }

    #[test]
    fn test_default_special_days() {
        let days = default_special_days();
        assert_eq!(days.len(), 10);
        assert_eq!(days[0].key, "birthday");
        assert_eq!((days[0].month, days[0].day), (4, 6));
        assert!(days.iter().any(|d| d.key == "mx_9_16" && d.label == "Día de la Independencia"));
    }
}
