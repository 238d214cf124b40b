//! # tunelog common
//!
//! Shared types, errors, logging and time helpers for tunelog.
//!
//! This crate provides the foundational pieces used across all other crates
//! in the workspace: the play-event model read from a streaming history
//! export, the workspace error type and the timezone conversions every
//! aggregation is bucketed by.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod history;
pub mod logging;
pub mod timezone;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{Result, TunelogError};
pub use history::{parse_history, read_history};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use timezone::{parse_timezone, to_local, to_utc, LocalTime};
pub use types::*;
pub use utils::*;
