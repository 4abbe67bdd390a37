//! Command routing

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;
use crate::logging;
use anyhow::Result;
use csat_core::config::{ConfigLoader, ConfigOverrides, CsatConfig};

/// Load configuration for the parsed command line: defaults, then the config
/// file, then `CSAT_*` variables, then flags.
pub fn load_config(cli: &Cli) -> Result<CsatConfig> {
    let flags = ConfigOverrides {
        base_url: cli.base_url.clone(),
        ..Default::default()
    };

    let config = ConfigLoader::new()
        .with_defaults()
        .with_file(&cli.config_file)
        .with_env()
        .with_overrides(flags)
        .load()?;
    Ok(config)
}

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> Result<()> {
    match &cli.command {
        // Must work even when the existing file is broken
        Commands::Config {
            action: ConfigAction::Init { force },
        } => commands::config::init(&cli.config_file, *force).await,
        command => {
            let config = load_config(&cli)?;
            logging::init(&config.logging, cli.verbose);
            tracing::debug!(config_file = %cli.config_file, "configuration ready");

            match command {
                Commands::Register { login } => commands::register::execute(&config, login).await,
                Commands::Take { login } => commands::take::execute(&config, login).await,
                Commands::View { login } => commands::view::execute(&config, login).await,
                Commands::Questions { json } => commands::questions::execute(*json),
                Commands::Config { .. } => commands::config::show(&cli.config_file, &config),
            }
        }
    }
}
