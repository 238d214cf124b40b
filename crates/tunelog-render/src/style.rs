//! Colors, fonts and sizes for every chart.

use plotters::style::RGBColor;
use tunelog_common::{Result, TunelogError};
use tunelog_config::RenderSettings;

/// Parse a `#RRGGBB` color string.
pub fn parse_color(color_str: &str) -> Result<RGBColor> {
    let invalid = || TunelogError::validation_field(format!("invalid hex color '{color_str}'"), "color");

    let hex = color_str.trim().strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());

    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Linear blend from `from` (t = 0) to `to` (t = 1).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blend(from: RGBColor, to: RGBColor, t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f64::from(b) - f64::from(a)).mul_add(t, f64::from(a)).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Resolved chart styling.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Canvas fill
    pub background: RGBColor,
    /// Bars, lines and the hot end of heatmaps
    pub primary: RGBColor,
    /// Peak and otherwise marked values
    pub highlight: RGBColor,
    /// Captions and axis labels
    pub text: RGBColor,
    /// Font family for all text
    pub font_family: String,
    /// Caption size
    pub title_font_size: u32,
    /// Axis label size
    pub label_font_size: u32,
}

impl ChartStyle {
    /// Resolves the hex colors in `settings`.
    pub fn from_settings(settings: &RenderSettings) -> Result<Self> {
        Ok(Self {
            width: settings.width,
            height: settings.height,
            background: parse_color(&settings.background_color)?,
            primary: parse_color(&settings.primary_color)?,
            highlight: parse_color(&settings.highlight_color)?,
            text: parse_color(&settings.text_color)?,
            font_family: settings.font_family.clone(),
            title_font_size: settings.title_font_size,
            label_font_size: settings.label_font_size,
        })
    }

    /// Pixels reserved for the value axis labels.
    pub const fn label_area(&self) -> u32 {
        self.label_font_size * 4
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            background: RGBColor(255, 255, 255),
            primary: RGBColor(29, 185, 84),
            highlight: RGBColor(255, 107, 107),
            text: RGBColor(51, 51, 51),
            font_family: "sans-serif".to_string(),
            title_font_size: 28,
            label_font_size: 16,
        }
    }
}
