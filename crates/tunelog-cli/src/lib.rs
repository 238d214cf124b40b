//! # tunelog
//!
//! The `tunelog` command: aggregates a streaming history export into a JSON
//! report and renders the report as charts and a text summary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Command};
pub use commands::{execute, resolve_config};
pub use error::*;
