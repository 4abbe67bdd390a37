//! CLI argument definitions using clap
//!
//! - csat take --email <e>      # Answer and submit the survey
//! - csat view --email <e>      # Review and edit a submitted survey
//! - csat register --email <e>  # Create an account (password from prompt or CSAT_PASSWORD)
//! - csat questions             # Print the questionnaire
//! - csat config show|init      # Configuration helpers

use clap::{Parser, Subcommand};
use csat_core::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "csat")]
#[command(about = "Customer satisfaction survey client")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,

    /// Survey backend base URL (overrides the configuration file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable verbose output and debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Login details shared by commands that act for a user
#[derive(clap::Args, Clone)]
pub struct LoginArgs {
    /// Account email address
    #[arg(long, short)]
    pub email: String,

    /// Account password (prompted for when omitted)
    #[arg(long, env = "CSAT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new account
    Register {
        #[command(flatten)]
        login: LoginArgs,
    },

    /// Answer the questionnaire and submit it
    Take {
        #[command(flatten)]
        login: LoginArgs,
    },

    /// Show the submitted answers and optionally edit them
    View {
        #[command(flatten)]
        login: LoginArgs,
    },

    /// Print the questionnaire
    Questions {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration
    Show,

    /// Create a new configuration file with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
