//! Command line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tunelog_config::{Config, ImageFormat};

/// Builds a listening dashboard from a streaming history export.
#[derive(Parser, Debug)]
#[command(name = "tunelog", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level or filter directives, e.g. "debug" or "tunelog_stats=trace"
    #[arg(short, long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// What to do.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Aggregate the history export into the JSON report
    Aggregate(AggregateArgs),

    /// Draw charts and the text summary from a stored report
    Render(RenderArgs),

    /// Aggregate, then render
    Run {
        /// Aggregation overrides
        #[command(flatten)]
        aggregate: AggregateArgs,

        /// Chart output overrides
        #[command(flatten)]
        output: ChartOutputArgs,
    },
}

/// Overrides for the aggregation step.
#[derive(Args, Debug, Clone, Default)]
pub struct AggregateArgs {
    /// History export (JSON array of play events)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Where to write the aggregated report
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Target timezone, e.g. "America/Mexico_City"
    #[arg(short, long, value_name = "TZ")]
    pub timezone: Option<String>,
}

/// Overrides for the render step.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Aggregated report to draw
    #[arg(short, long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Chart output overrides
    #[command(flatten)]
    pub output: ChartOutputArgs,
}

/// Where and how charts are written.
#[derive(Args, Debug, Clone, Default)]
pub struct ChartOutputArgs {
    /// Directory for charts and the summary
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Image format
    #[arg(short, long, value_name = "png|svg")]
    pub format: Option<ImageFormat>,
}

impl AggregateArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input.history_path.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output.report_path.clone_from(output);
        }
        if let Some(timezone) = &self.timezone {
            config.aggregation.timezone.clone_from(timezone);
        }
    }
}

impl ChartOutputArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.out_dir {
            config.render.output_dir.clone_from(dir);
        }
        if let Some(format) = self.format {
            config.render.format = format;
        }
    }
}

impl Cli {
    /// Applies flags on top of file and environment settings.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }

        match &self.command {
            Command::Aggregate(args) => args.apply(config),
            Command::Render(args) => {
                if let Some(report) = &args.report {
                    config.output.report_path.clone_from(report);
                }
                args.output.apply(config);
            }
            Command::Run { aggregate, output } => {
                aggregate.apply(config);
                output.apply(config);
            }
        }
    }
}
