//! # tunelog config
//!
//! Type-safe configuration for tunelog.
//!
//! Settings come from an optional YAML file, are overridden by `TUNELOG_*`
//! environment variables and validated before any work starts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::*;
pub use schema::*;
pub use validation::*;
