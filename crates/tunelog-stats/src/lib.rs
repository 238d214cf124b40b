//! # tunelog stats
//!
//! Turns a list of play events into the aggregated report document.
//!
//! Each report section has its own [`DataAggregator`]. All of them read the
//! same [`AggregationContext`], which converts every event into the target
//! timezone once, and [`build_report`] runs them in order.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod day_of_week;
pub mod heatmap;
pub mod hourly_distribution;
pub mod monthly_trends;
pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod special_days;
pub mod types;

pub use aggregator::*;
pub use day_of_week::WeekdayWeekendAggregator;
pub use heatmap::{DayHourHeatmapAggregator, MonthHourHeatmapAggregator, WeekdayHourHeatmapAggregator};
pub use hourly_distribution::{HourlyDistributionAggregator, PeakHoursAggregator};
pub use monthly_trends::MonthlyTrendAggregator;
pub use pipeline::build_report;
pub use report::AggregatedReport;
pub use special_days::SpecialDaysAggregator;
pub use types::*;
