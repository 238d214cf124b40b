//! # tunelog render
//!
//! Presentation of the aggregated report.
//!
//! [`chart_specs`] maps report sections to chart descriptions without
//! touching plotters; [`ChartRenderer`] draws those descriptions to PNG or
//! SVG files, and [`write_summary`] writes the text-only sections.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod charts;
pub mod renderer;
pub mod style;
pub mod summary;

pub use charts::{chart_specs, Bar, ChartKind, ChartSpec, HeatCell};
pub use renderer::{render_report, ChartRenderer};
pub use style::{parse_color, ChartStyle};
pub use summary::{render_summary, write_summary};
