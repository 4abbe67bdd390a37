//! Configuration management commands

use crate::console::CliConsole;
use anyhow::{Context, Result, bail};
use colored::*;
use csat_core::CsatConfig;
use std::path::Path;

/// Show the effective configuration
pub fn show(config_file: &str, config: &CsatConfig) -> Result<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration");

    if Path::new(config_file).exists() {
        console.success(&format!("Loaded configuration from: {config_file}"));
    } else {
        console.warn(&format!("Configuration file not found: {config_file}"));
        console.info("Using defaults and environment overrides");
    }

    print_config(&console, config);
    Ok(())
}

/// Write a default configuration file
pub async fn init(config_file: &str, force: bool) -> Result<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Initialization");

    if Path::new(config_file).exists() && !force {
        console.error(&format!("Configuration file already exists: {config_file}"));
        console.info("Use --force to overwrite");
        bail!("Configuration file already exists: {config_file}");
    }

    let config_json = serde_json::to_string_pretty(&CsatConfig::default())
        .context("Failed to serialize configuration")?;

    tokio::fs::write(config_file, config_json)
        .await
        .with_context(|| format!("Failed to write configuration file: {config_file}"))?;

    console.success(&format!("Created configuration file: {config_file}"));
    console.info("Edit backend.base_url to point at your survey server");

    Ok(())
}

fn print_config(console: &CliConsole, config: &CsatConfig) {
    let backend = &config.backend;
    console.info(&format!("Base URL: {}", backend.base_url.green()));
    console.info(&format!("Connect Timeout: {}s", backend.connect_timeout_secs));
    console.info(&format!("Request Timeout: {}s", backend.request_timeout_secs));

    console.print_header("Endpoints");
    let endpoints = &backend.endpoints;
    console.info(&format!("Login: {}", endpoints.login.cyan()));
    console.info(&format!("Register: {}", endpoints.register.cyan()));
    console.info(&format!("Submit: {}", endpoints.submit_survey.cyan()));
    console.info(&format!("Update: {}", endpoints.update_survey.cyan()));
    console.info(&format!("Responses: {}", endpoints.get_responses.cyan()));

    console.print_header("Logging");
    console.info(&format!("Level: {}", config.logging.level.yellow()));
    console.info(&format!("Format: {}", config.logging.format));
}

#[cfg(test)]
mod tests {
    use super::*;
    use csat_core::config::load_config_from_file;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_init_writes_loadable_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("csat_config.json");
        let path = path.to_str().unwrap();

        init(path, false).await.unwrap();
        let loaded = load_config_from_file(path).unwrap();
        assert_eq!(loaded.backend.base_url, CsatConfig::default().backend.base_url);
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("csat_config.json");
        std::fs::write(&path, "{}").unwrap();
        let path = path.to_str().unwrap();

        assert!(init(path, false).await.is_err());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");

        init(path, true).await.unwrap();
        assert!(load_config_from_file(path).is_ok());
    }
}
