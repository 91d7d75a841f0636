use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::runtime::LoadedConfig;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration as YAML
    Show,

    /// Print the config file location
    Path,
}

pub fn cmd_config(args: ConfigArgs, loaded: &LoadedConfig) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let source = if loaded.from_file {
                loaded.path.display().to_string()
            } else {
                "defaults".to_string()
            };
            println!("# source: {source}");
            print!("{}", loaded.config.to_yaml()?);
        }
        ConfigAction::Path => {
            println!("{}", loaded.path.display());
        }
    }
    Ok(())
}
