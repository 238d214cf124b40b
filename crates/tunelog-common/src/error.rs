//! Error types and utilities for tunelog

use thiserror::Error;

/// Result type alias for tunelog operations
pub type Result<T> = std::result::Result<T, TunelogError>;

/// Main error type for tunelog operations
#[derive(Error, Debug)]
pub enum TunelogError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
        /// Underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A play event in the history export could not be read
    #[error("Malformed play event at index {index}: {message}")]
    Input {
        /// Position of the record in the export array
        index: usize,
        /// What is wrong with the record
        message: String,
        /// Offending field, when known
        field: Option<String>,
    },

    /// Unknown or unusable timezone name
    #[error("Timezone error: {message}")]
    Timezone {
        /// What went wrong
        message: String,
    },

    /// Errors raised while computing the aggregated report
    #[error("Aggregation error: {message}")]
    Aggregation {
        /// What went wrong
        message: String,
    },

    /// Chart drawing errors
    #[error("Render error: {message}")]
    Render {
        /// What went wrong
        message: String,
        /// Underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for settings or report data
    #[error("Validation error: {message}")]
    Validation {
        /// What is invalid
        message: String,
        /// Offending field, when known
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        /// What went wrong
        message: String,
        /// Underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TunelogError {
    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new malformed-input error for the record at `index`
    pub fn input(index: usize, msg: impl Into<String>) -> Self {
        Self::Input {
            index,
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new malformed-input error naming the offending field
    pub fn input_field(index: usize, msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Input {
            index,
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new timezone error
    pub fn timezone(msg: impl Into<String>) -> Self {
        Self::Timezone {
            message: msg.into(),
        }
    }

    /// Create a new aggregation error
    pub fn aggregation(msg: impl Into<String>) -> Self {
        Self::Aggregation {
            message: msg.into(),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

/// Convert from serde_yaml::Error to TunelogError
impl From<serde_yaml::Error> for TunelogError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to TunelogError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for TunelogError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::render_with_source("Chart rendering failed", err)
    }
}
