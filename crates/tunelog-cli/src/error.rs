//! Application-wide error types using thiserror.

use tunelog_common::TunelogError;
use tunelog_config::ConfigError;

/// Error of a `tunelog` command.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading, aggregating or rendering failed.
    #[error(transparent)]
    Tunelog(#[from] TunelogError),
}

/// Result type for the command layer.
pub type CliResult<T> = Result<T, CliError>;
