//! Mapping report sections to chart descriptions.
//!
//! Nothing here is computed beyond formatting: every value comes straight
//! from the report.

use tracing::info;
use tunelog_common::truncate_label;
use tunelog_stats::monthly_trends::month_abbr;
use tunelog_stats::AggregatedReport;

/// One bar or line point
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Axis label
    pub label: String,
    /// Plotted value
    pub value: f64,
    /// Drawn in the highlight color
    pub highlighted: bool,
}

impl Bar {
    fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            highlighted: false,
        }
    }

    fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }
}

/// One heatmap cell; `row` indexes [`ChartKind::Heatmap::rows`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatCell {
    /// Row index
    pub row: usize,
    /// Column index
    pub column: u32,
    /// Count shown by the cell's shade
    pub value: u64,
}

/// Shape of a chart
#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    /// Vertical bars, one per category
    Columns(Vec<Bar>),
    /// Horizontal bars, first entry on top
    Ranking(Vec<Bar>),
    /// Line through the points, highlighted points marked
    Line(Vec<Bar>),
    /// Rows of cells over `columns` columns
    Heatmap {
        /// Row labels, top to bottom
        rows: Vec<String>,
        /// Number of columns
        columns: u32,
        /// Non-empty cells
        cells: Vec<HeatCell>,
    },
}

impl ChartKind {
    /// Largest plotted value, 0 when empty.
    pub fn max_value(&self) -> f64 {
        match self {
            Self::Columns(bars) | Self::Ranking(bars) | Self::Line(bars) => {
                bars.iter().map(|b| b.value).fold(0.0, f64::max)
            }
            #[allow(clippy::cast_precision_loss)]
            Self::Heatmap { cells, .. } => cells.iter().map(|c| c.value).max().unwrap_or(0) as f64,
        }
    }
}

/// A chart to draw and the file stem it is written to
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// File stem, e.g. `top_artists`
    pub name: &'static str,
    /// Caption
    pub title: String,
    /// Horizontal axis description
    pub x_desc: String,
    /// Vertical axis description
    pub y_desc: String,
    /// What is drawn
    pub kind: ChartKind,
}

impl ChartSpec {
    fn new(name: &'static str, title: &str, x_desc: &str, y_desc: &str, kind: ChartKind) -> Self {
        Self {
            name,
            title: title.to_string(),
            x_desc: x_desc.to_string(),
            y_desc: y_desc.to_string(),
            kind,
        }
    }
}

/// Every chart the report has data for, in display order.
///
/// Empty sections are skipped.
#[allow(clippy::cast_precision_loss)]
pub fn chart_specs(report: &AggregatedReport, max_label_chars: usize) -> Vec<ChartSpec> {
    let label = |text: &str| truncate_label(text, max_label_chars);
    let mut specs = Vec::new();

    let mut push = |section: &str, spec: ChartSpec| {
        let empty = match &spec.kind {
            ChartKind::Columns(bars) | ChartKind::Ranking(bars) | ChartKind::Line(bars) => bars.is_empty(),
            ChartKind::Heatmap { cells, .. } => cells.is_empty(),
        };
        if empty {
            info!("Skipping {section} chart: no data");
        } else {
            specs.push(spec);
        }
    };

    push(
        "top artists",
        ChartSpec::new(
            "top_artists",
            "Top artists",
            "Minutes",
            "Artist",
            ChartKind::Ranking(
                report
                    .top_artists
                    .iter()
                    .map(|a| Bar::new(label(&a.artist), a.minutes as f64))
                    .collect(),
            ),
        ),
    );

    push(
        "top tracks",
        ChartSpec::new(
            "top_tracks",
            "Top tracks",
            "Minutes",
            "Track",
            ChartKind::Ranking(
                report
                    .top_tracks
                    .iter()
                    .map(|t| Bar::new(label(&format!("{} · {}", t.track, t.artist)), t.minutes as f64))
                    .collect(),
            ),
        ),
    );

    // Every hour gets a column so the axis always reads 0-23.
    let hourly = if report.hourly_distribution.is_empty() {
        Vec::new()
    } else {
        (0..24u32)
            .map(|hour| {
                let plays = report
                    .hourly_distribution
                    .iter()
                    .find(|p| p.hour == hour)
                    .map_or(0, |p| p.plays);
                Bar::new(hour.to_string(), plays as f64).highlighted(hour == report.peak_hours.peak_hour)
            })
            .collect()
    };
    push(
        "hourly distribution",
        ChartSpec::new("hourly_distribution", "Plays by hour of day", "Hour", "Plays", ChartKind::Columns(hourly)),
    );

    push(
        "monthly trend",
        ChartSpec::new(
            "monthly_trend",
            "Hours per month",
            "Month",
            "Hours",
            ChartKind::Line(
                report
                    .monthly_trend
                    .iter()
                    .map(|m| {
                        Bar::new(format!("{} {}", m.month_name, m.year), m.hours)
                            .highlighted(m.is_peak || m.is_inflection)
                    })
                    .collect(),
            ),
        ),
    );

    let split = &report.weekday_vs_weekend;
    let averages = if split.weekday.total_plays + split.weekend.total_plays == 0 {
        Vec::new()
    } else {
        vec![
            Bar::new("Weekday", split.weekday.avg_hours_per_day),
            Bar::new("Weekend", split.weekend.avg_hours_per_day),
        ]
    };
    push(
        "weekday vs weekend",
        ChartSpec::new(
            "weekday_vs_weekend",
            "Average hours per day",
            "",
            "Hours per day",
            ChartKind::Columns(averages),
        ),
    );

    push(
        "skipped tracks",
        ChartSpec::new(
            "skipped_tracks",
            "Most skipped tracks",
            "Skip rate (%)",
            "Track",
            ChartKind::Ranking(
                report
                    .skipped_tracks
                    .iter()
                    .map(|t| Bar::new(label(&format!("{} · {}", t.track, t.artist)), t.skip_rate as f64))
                    .collect(),
            ),
        ),
    );

    let mut months: Vec<u32> = report.hourly_heatmap.iter().map(|c| c.month).collect();
    months.dedup();
    let cells = report
        .hourly_heatmap
        .iter()
        .filter_map(|c| {
            months.iter().position(|&m| m == c.month).map(|row| HeatCell {
                row,
                column: c.hour,
                value: c.plays,
            })
        })
        .collect();
    push(
        "hourly heatmap",
        ChartSpec::new(
            "hourly_heatmap",
            "Plays by month and hour",
            "Hour",
            "Month",
            ChartKind::Heatmap {
                rows: months.iter().map(|&m| month_abbr(m).to_string()).collect(),
                columns: 24,
                cells,
            },
        ),
    );

    specs
}
