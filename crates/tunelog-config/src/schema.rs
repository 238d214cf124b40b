//! Configuration schema.
//!
//! Every section carries `#[serde(default)]`, so an empty or partial YAML
//! file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tunelog_common::LoggingConfig;
use validator::{Validate, ValidationErrors};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Where the streaming history export is read from
    pub input: InputConfig,

    /// Where the aggregated report is written
    pub output: OutputConfig,

    /// Aggregation settings
    pub aggregation: AggregationSettings,

    /// Chart rendering settings
    pub render: RenderSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Input file settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InputConfig {
    /// Path of the JSON history export
    pub history_path: PathBuf,
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the aggregated JSON report
    pub report_path: PathBuf,
}

/// A calendar day called out in the report, such as a birthday or holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SpecialDay {
    /// Stable key used in the report, e.g. `birthday` or `mx_9_16`
    #[validate(length(min = 1, message = "Special day key cannot be empty"))]
    pub key: String,

    /// Human readable label
    #[validate(length(min = 1, message = "Special day label cannot be empty"))]
    pub label: String,

    /// Month, 1-12
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: u32,

    /// Day of month, 1-31
    #[validate(range(min = 1, max = 31, message = "Day must be between 1 and 31"))]
    pub day: u32,
}

/// Settings for every aggregation in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AggregationSettings {
    /// IANA timezone all buckets are computed in
    #[validate(custom(function = "crate::validation::validate_timezone", message = "Unknown timezone"))]
    pub timezone: String,

    /// Length of the top artists and top tracks lists
    #[validate(range(min = 1, max = 100, message = "Top limit must be between 1 and 100"))]
    pub top_limit: usize,

    /// Artists listed per weekday/weekend bucket
    #[validate(range(min = 1, max = 20, message = "Bucket artist limit must be between 1 and 20"))]
    pub bucket_top_artists: usize,

    /// Minimum plays before a track's skip rate is considered
    #[validate(range(min = 1, max = 10000, message = "Skip minimum plays must be between 1 and 10000"))]
    pub skip_min_plays: u32,

    /// Tracks are listed only when their skip rate exceeds this fraction
    #[validate(range(min = 0.0, max = 1.0, message = "Skip minimum rate must be between 0 and 1"))]
    pub skip_min_rate: f64,

    /// Length of the skip rate list
    #[validate(range(min = 1, max = 100, message = "Skip limit must be between 1 and 100"))]
    pub skip_limit: usize,

    /// Hours listed in the peak hour summary
    #[validate(range(min = 1, max = 24, message = "Peak hours must be between 1 and 24"))]
    pub peak_hours: usize,

    /// Name of the export, copied into the report metadata
    #[validate(length(min = 1, message = "Data source cannot be empty"))]
    pub data_source: String,

    /// Calendar days tracked in the special days section
    pub special_days: Vec<SpecialDay>,
}

/// Output image format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Raster output through the bitmap backend
    #[default]
    Png,
    /// Vector output through the SVG backend
    Svg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unsupported image format '{other}', expected png or svg")),
        }
    }
}

/// Chart rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RenderSettings {
    /// Directory the charts and summary are written to
    pub output_dir: PathBuf,

    /// Image format for every chart
    pub format: ImageFormat,

    /// Chart width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be valid hex color"))]
    pub background_color: String,

    /// Bar and line color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Primary color must be valid hex color"))]
    pub primary_color: String,

    /// Color for highlighted peaks (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Highlight color must be valid hex color"))]
    pub highlight_color: String,

    /// Title and label color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Text color must be valid hex color"))]
    pub text_color: String,

    /// Font family for text rendering
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,

    /// Font size for chart titles
    #[validate(range(min = 8, max = 72, message = "Title font size must be between 8 and 72"))]
    pub title_font_size: u32,

    /// Font size for axis labels
    #[validate(range(min = 8, max = 72, message = "Label font size must be between 8 and 72"))]
    pub label_font_size: u32,

    /// Longest axis label before it is shortened
    #[validate(range(min = 4, max = 200, message = "Label length must be between 4 and 200"))]
    pub max_label_chars: usize,

    /// File name of the plain-text summary
    #[validate(length(min = 1, message = "Summary file name cannot be empty"))]
    pub summary_file: String,
}

impl Config {
    /// Validates every section, including checks the derive cannot express.
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.input.validate()?;
        self.output.validate()?;
        self.aggregation.validate()?;
        self.render.validate()?;

        for day in &self.aggregation.special_days {
            day.validate()?;
        }
        crate::validation::validate_special_days(&self.aggregation.special_days)?;
        crate::validation::validate_log_settings(&self.logging)?;

        Ok(())
    }
}
