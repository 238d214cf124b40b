//! The work behind each subcommand.

use crate::cli::{Cli, Command};
use crate::error::CliResult;
use std::path::PathBuf;
use tracing::{info, instrument};
use tunelog_common::read_history;
use tunelog_config::{Config, ConfigError, ConfigLoader};
use tunelog_render::render_report;
use tunelog_stats::{build_report, AggregatedReport};

/// Loads the configuration `cli` points at and applies its flags.
///
/// Flags are validated together with the file and environment settings.
pub fn resolve_config(cli: &Cli) -> CliResult<Config> {
    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate_all().map_err(ConfigError::ValidationError)?;
    Ok(config)
}

/// Reads the history export, aggregates it and writes the report file.
#[instrument(skip(config), fields(input = %config.input.history_path.display()))]
pub fn aggregate(config: &Config) -> CliResult<AggregatedReport> {
    let events = read_history(&config.input.history_path)?;
    let report = build_report(&events, &config.aggregation)?;
    report.write_to(&config.output.report_path)?;
    Ok(report)
}

/// Draws charts and the summary for `report`.
pub fn render(config: &Config, report: &AggregatedReport) -> CliResult<Vec<PathBuf>> {
    Ok(render_report(report, &config.render)?)
}

/// Reads the stored report and renders it.
#[instrument(skip(config), fields(report = %config.output.report_path.display()))]
pub fn render_stored(config: &Config) -> CliResult<Vec<PathBuf>> {
    let report = AggregatedReport::read_from(&config.output.report_path)?;
    render(config, &report)
}

/// Runs `command` with a fully resolved configuration.
pub fn execute(command: &Command, config: &Config) -> CliResult<()> {
    match command {
        Command::Aggregate(_) => {
            aggregate(config)?;
        }
        Command::Render(_) => {
            let written = render_stored(config)?;
            info!("Wrote {} files", written.len());
        }
        Command::Run { .. } => {
            let report = aggregate(config)?;
            let written = render(config, &report)?;
            info!("Wrote {} files", written.len());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::AggregateArgs;
    use crate::error::CliError;
    use clap::Parser;
    use std::fs;
    use tunelog_common::test_utils::{create_temp_dir, history_json, sample_history};
    use tunelog_common::TunelogError;

    fn config_in(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.input.history_path = dir.join("history.json");
        config.output.report_path = dir.join("out").join("data.json");
        config.render.output_dir = dir.join("charts");
        config
    }

    #[test]
    fn test_aggregate_writes_report() {
        let dir = create_temp_dir();
        let config = config_in(dir.path());
        fs::write(&config.input.history_path, history_json(&sample_history())).unwrap();

        let report = aggregate(&config).unwrap();

        let stored = AggregatedReport::read_from(&config.output.report_path).unwrap();
        assert_eq!(stored, report);
        assert_eq!(stored.overview.total_plays, 6);
    }

    #[test]
    fn test_aggregate_reports_missing_input() {
        let dir = create_temp_dir();
        let config = config_in(dir.path());

        let err = execute(&Command::Aggregate(AggregateArgs::default()), &config).unwrap_err();
        assert!(matches!(err, CliError::Tunelog(TunelogError::Generic { .. })));
        assert!(!config.output.report_path.exists());
    }

    #[test]
    fn test_resolve_config_validates_flags() {
        let dir = create_temp_dir();
        let config_path = dir.path().join("tunelog.yaml");
        fs::write(&config_path, "aggregation:\n  top_limit: 3\n").unwrap();
        let config_arg = config_path.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from(["tunelog", "--config", config_arg.as_str(), "aggregate", "--timezone", "UTC"])
            .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.aggregation.top_limit, 3);
        assert_eq!(config.aggregation.timezone, "UTC");

        let cli = Cli::try_parse_from([
            "tunelog",
            "--config",
            config_arg.as_str(),
            "aggregate",
            "--timezone",
            "Mars/Olympus_Mons",
        ])
        .unwrap();
        assert!(matches!(
            resolve_config(&cli),
            Err(CliError::Config(ConfigError::ValidationError(_)))
        ));
    }

    #[test]
    fn test_malformed_record_names_index() {
        let dir = create_temp_dir();
        let config = config_in(dir.path());
        fs::write(&config.input.history_path, r#"[{"ts": "yesterday", "ms_played": 1}]"#).unwrap();

        let err = aggregate(&config).unwrap_err();
        assert!(err.to_string().contains("at index 0"));
    }
}
