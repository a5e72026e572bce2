use clap::{Args, Subcommand};

use crate::config::env::EnvVars;
use crate::config::Config as AppConfig;
use crate::error::Result;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (the token is never printed)
    Show,

    /// Show configuration file path
    Path,
}

pub async fn execute(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let token = if config.genius_token.is_some() { "set" } else { "not set" };
            println!("# {}: {}", EnvVars::GENIUS_TOKEN, token);
            println!("{}", config.to_toml()?);
        }

        ConfigCommands::Path => match AppConfig::default_config_path() {
            Some(path) => {
                let status = if path.exists() { "" } else { " (not created)" };
                println!("{}{}", path.display(), status);
            }
            None => println!("No configuration directory available on this platform"),
        },
    }

    Ok(())
}
