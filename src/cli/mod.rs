pub mod config;
pub mod run;
pub mod runtime;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use config::{cmd_config, ConfigArgs};
pub use run::{cmd_run, run_journeys, JourneyPlan, JourneySummary, RunArgs};
pub use runtime::{init_logging, load_config, LoadedConfig, LogFormat};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Enable debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit pages once per navigation context and print category scores
    Run(RunArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}
