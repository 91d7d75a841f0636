use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use journey_audit_cli::cli::{cmd_config, cmd_run, init_logging, load_config, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.debug, cli.log_format)?;
    info!("Starting journey-audit v{}", env!("CARGO_PKG_VERSION"));

    let loaded = load_config(cli.config.as_deref()).await?;

    let result = match cli.command {
        Commands::Run(args) => cmd_run(args, &loaded.config).await,
        Commands::Config(args) => cmd_config(args, &loaded),
    };

    if let Err(err) = &result {
        error!("Command failed: {err:#}");
    }
    result
}
