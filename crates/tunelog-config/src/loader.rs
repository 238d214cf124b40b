//! Configuration loading utilities

use crate::defaults::{DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_FILE_ALT};
use crate::schema::Config;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};
use tunelog_common::Result as TunelogResult;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "TUNELOG_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An explicitly requested configuration file does not exist
    #[error("Configuration file not found: {0}")]
    MissingConfig(PathBuf),
}

impl From<ConfigError> for tunelog_common::TunelogError {
    fn from(err: ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::MissingConfig(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse_yaml(&content)?;
        debug!("Parsed configuration file {}", path.display());

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Parses YAML without applying overrides or validating.
    ///
    /// An empty document yields the defaults.
    pub fn parse_yaml(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from an explicit path, `TUNELOG_CONFIG_PATH`,
    /// `tunelog.yaml`/`tunelog.yml` in the working directory, or defaults.
    pub fn load(explicit: Option<&Path>) -> TunelogResult<Config> {
        let config = if let Some(path) = explicit {
            Self::load_config(path)?
        } else if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            Self::load_config(&config_path)?
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::load_config(DEFAULT_CONFIG_FILE)?
        } else if Path::new(DEFAULT_CONFIG_FILE_ALT).exists() {
            Self::load_config(DEFAULT_CONFIG_FILE_ALT)?
        } else {
            info!("No configuration file found, using defaults");
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all().map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }

    /// Apply `TUNELOG_*` environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides using `lookup` in place of the process environment.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(input) = lookup("TUNELOG_INPUT") {
            config.input.history_path = PathBuf::from(input);
        }

        if let Some(output) = lookup("TUNELOG_OUTPUT") {
            config.output.report_path = PathBuf::from(output);
        }

        if let Some(timezone) = lookup("TUNELOG_TIMEZONE") {
            config.aggregation.timezone = timezone;
        }

        if let Some(limit) = lookup("TUNELOG_TOP_LIMIT") {
            config.aggregation.top_limit = parse_var("TUNELOG_TOP_LIMIT", &limit)?;
        }

        if let Some(min_plays) = lookup("TUNELOG_SKIP_MIN_PLAYS") {
            config.aggregation.skip_min_plays = parse_var("TUNELOG_SKIP_MIN_PLAYS", &min_plays)?;
        }

        if let Some(dir) = lookup("TUNELOG_RENDER_DIR") {
            config.render.output_dir = PathBuf::from(dir);
        }

        if let Some(format) = lookup("TUNELOG_RENDER_FORMAT") {
            config.render.format = parse_var("TUNELOG_RENDER_FORMAT", &format)?;
        }

        if let Some(level) = lookup("TUNELOG_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParseError {
        var: var.to_string(),
        source: e.into(),
    })
}
