//! Draws [`ChartSpec`]s with plotters.

use crate::charts::{chart_specs, Bar, ChartKind, ChartSpec, HeatCell};
use crate::style::{blend, ChartStyle};
use crate::summary::write_summary;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use tunelog_common::{Result, TunelogError};
use tunelog_config::{ImageFormat, RenderSettings};
use tunelog_stats::AggregatedReport;

const CHART_MARGIN: u32 = 20;
const BAR_GAP: u32 = 4;
const POINT_RADIUS: u32 = 5;

/// Draws charts to image files in one style and format.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    style: ChartStyle,
    format: ImageFormat,
}

impl ChartRenderer {
    /// Renderer with an already resolved style.
    pub const fn new(style: ChartStyle, format: ImageFormat) -> Self {
        Self { style, format }
    }

    /// Renderer for the configured style; fails on malformed colors.
    pub fn from_settings(settings: &RenderSettings) -> Result<Self> {
        Ok(Self::new(ChartStyle::from_settings(settings)?, settings.format))
    }

    /// Resolved style.
    pub const fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Output image format.
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// Draws every spec into `dir` as `<name>.<ext>`.
    #[instrument(skip(self, specs), fields(charts = specs.len(), format = %self.format))]
    pub fn render_all(&self, specs: &[ChartSpec], dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(|e| {
            TunelogError::with_source(format!("failed to create chart directory {}", dir.display()), e)
        })?;

        let mut written = Vec::with_capacity(specs.len());
        for spec in specs {
            let path = dir.join(format!("{}.{}", spec.name, self.format.extension()));
            self.render_to_file(spec, &path)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Draws a single chart to `path`.
    pub fn render_to_file(&self, spec: &ChartSpec, path: &Path) -> Result<()> {
        let size = (self.style.width, self.style.height);
        if size.0 == 0 || size.1 == 0 {
            return Err(TunelogError::render(format!(
                "cannot draw {} on a {}x{} canvas",
                spec.name, size.0, size.1
            )));
        }
        match self.format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                self.draw(&root, spec)?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                self.draw(&root, spec)?;
            }
        }
        debug!("Rendered {} to {}", spec.name, path.display());
        Ok(())
    }

    /// Draws `spec` on any plotters backend.
    pub fn draw<DB>(&self, root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&self.style.background)?;

        match &spec.kind {
            ChartKind::Columns(bars) => self.draw_columns(root, spec, bars)?,
            ChartKind::Ranking(bars) => self.draw_ranking(root, spec, bars)?,
            ChartKind::Line(points) => self.draw_line(root, spec, points)?,
            ChartKind::Heatmap { rows, columns, cells } => {
                self.draw_heatmap(root, spec, rows, *columns, cells)?;
            }
        }

        root.present()?;
        Ok(())
    }

    fn bar_color(&self, bar: &Bar) -> RGBColor {
        if bar.highlighted {
            self.style.highlight
        } else {
            self.style.primary
        }
    }

    /// Value axis upper bound with some headroom above the tallest bar.
    fn value_range(spec: &ChartSpec) -> std::ops::Range<f64> {
        let max = spec.kind.max_value();
        if max > 0.0 {
            0.0..max * 1.1
        } else {
            0.0..1.0
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_columns<DB>(&self, root: &DrawingArea<DB, Shift>, spec: &ChartSpec, bars: &[Bar]) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let style = &self.style;
        let count = bars.len() as u32;

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (style.font_family.as_str(), style.title_font_size, &style.text))
            .margin(CHART_MARGIN)
            .x_label_area_size(style.label_area())
            .y_label_area_size(style.label_area())
            .build_cartesian_2d((0..count).into_segmented(), Self::value_range(spec))?;

        let label_of = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(i) => bars.get(*i as usize).map(|b| b.label.clone()).unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len())
            .x_label_formatter(&label_of)
            .x_desc(spec.x_desc.as_str())
            .y_desc(spec.y_desc.as_str())
            .label_style((style.font_family.as_str(), style.label_font_size, &style.text))
            .axis_desc_style((style.font_family.as_str(), style.label_font_size, &style.text))
            .draw()?;

        chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
            let i = i as u32;
            let mut rect = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), bar.value)],
                self.bar_color(bar).filled(),
            );
            rect.set_margin(0, 0, BAR_GAP, BAR_GAP);
            rect
        }))?;
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_ranking<DB>(&self, root: &DrawingArea<DB, Shift>, spec: &ChartSpec, bars: &[Bar]) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let style = &self.style;
        let count = bars.len() as u32;
        // The first entry sits on the top row.
        let row_of = |index: usize| count - 1 - index as u32;
        let bar_at = |row: u32| bars.get(count.checked_sub(row + 1)? as usize);

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (style.font_family.as_str(), style.title_font_size, &style.text))
            .margin(CHART_MARGIN)
            .x_label_area_size(style.label_area())
            .y_label_area_size(style.label_font_size * 16)
            .build_cartesian_2d(Self::value_range(spec), (0..count).into_segmented())?;

        let label_of = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(row) => bar_at(*row).map(|b| b.label.clone()).unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(bars.len())
            .y_label_formatter(&label_of)
            .x_desc(spec.x_desc.as_str())
            .label_style((style.font_family.as_str(), style.label_font_size, &style.text))
            .axis_desc_style((style.font_family.as_str(), style.label_font_size, &style.text))
            .draw()?;

        chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
            let row = row_of(i);
            let mut rect = Rectangle::new(
                [(0.0, SegmentValue::Exact(row)), (bar.value, SegmentValue::Exact(row + 1))],
                self.bar_color(bar).filled(),
            );
            rect.set_margin(BAR_GAP, BAR_GAP, 0, 0);
            rect
        }))?;
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_line<DB>(&self, root: &DrawingArea<DB, Shift>, spec: &ChartSpec, points: &[Bar]) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let style = &self.style;
        let count = points.len() as u32;

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (style.font_family.as_str(), style.title_font_size, &style.text))
            .margin(CHART_MARGIN)
            .x_label_area_size(style.label_area())
            .y_label_area_size(style.label_area())
            .build_cartesian_2d((0..count).into_segmented(), Self::value_range(spec))?;

        let label_of = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(i) => points.get(*i as usize).map(|p| p.label.clone()).unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .x_labels(points.len())
            .x_label_formatter(&label_of)
            .x_desc(spec.x_desc.as_str())
            .y_desc(spec.y_desc.as_str())
            .label_style((style.font_family.as_str(), style.label_font_size, &style.text))
            .axis_desc_style((style.font_family.as_str(), style.label_font_size, &style.text))
            .draw()?;

        chart.draw_series(LineSeries::new(
            points
                .iter()
                .enumerate()
                .map(|(i, p)| (SegmentValue::CenterOf(i as u32), p.value)),
            style.primary.stroke_width(3),
        ))?;

        chart.draw_series(points.iter().enumerate().map(|(i, p)| {
            Circle::new(
                (SegmentValue::CenterOf(i as u32), p.value),
                POINT_RADIUS,
                self.bar_color(p).filled(),
            )
        }))?;
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn draw_heatmap<DB>(
        &self,
        root: &DrawingArea<DB, Shift>,
        spec: &ChartSpec,
        rows: &[String],
        columns: u32,
        cells: &[HeatCell],
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let style = &self.style;
        let row_count = rows.len() as u32;
        let max = spec.kind.max_value().max(1.0);
        // First row on top, as in a calendar.
        let row_at = |row: u32| rows.get(row_count.checked_sub(row + 1)? as usize);

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (style.font_family.as_str(), style.title_font_size, &style.text))
            .margin(CHART_MARGIN)
            .x_label_area_size(style.label_area())
            .y_label_area_size(style.label_area())
            .build_cartesian_2d((0..columns).into_segmented(), (0..row_count).into_segmented())?;

        let column_label = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(column) => column.to_string(),
            _ => String::new(),
        };
        let row_label = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(row) => row_at(*row).cloned().unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(columns as usize)
            .y_labels(rows.len())
            .x_label_formatter(&column_label)
            .y_label_formatter(&row_label)
            .x_desc(spec.x_desc.as_str())
            .y_desc(spec.y_desc.as_str())
            .label_style((style.font_family.as_str(), style.label_font_size, &style.text))
            .axis_desc_style((style.font_family.as_str(), style.label_font_size, &style.text))
            .draw()?;

        chart.draw_series(cells.iter().map(|cell| {
            let row = row_count - 1 - cell.row as u32;
            let color = blend(style.background, style.primary, cell.value as f64 / max);
            Rectangle::new(
                [
                    (SegmentValue::Exact(cell.column), SegmentValue::Exact(row)),
                    (SegmentValue::Exact(cell.column + 1), SegmentValue::Exact(row + 1)),
                ],
                color.filled(),
            )
        }))?;
        Ok(())
    }
}

/// Renders every chart the report has data for, then the text summary.
///
/// Returns the paths written, charts first.
#[instrument(skip(report, settings), fields(dir = %settings.output_dir.display()))]
pub fn render_report(report: &AggregatedReport, settings: &RenderSettings) -> Result<Vec<PathBuf>> {
    let renderer = ChartRenderer::from_settings(settings)?;
    let specs = chart_specs(report, settings.max_label_chars);

    let mut written = renderer.render_all(&specs, &settings.output_dir)?;

    let summary_path = settings.output_dir.join(&settings.summary_file);
    write_summary(report, &summary_path)?;
    written.push(summary_path);

    info!("Rendered {} charts to {}", specs.len(), settings.output_dir.display());
    Ok(written)
}
