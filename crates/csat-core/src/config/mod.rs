//! Configuration management for the survey client

mod loader;
mod logging_config;
mod model;

pub use loader::{ConfigLoader, ConfigOverrides, ConfigSource, DEFAULT_CONFIG_FILE, load_config_from_file};
pub use logging_config::{LogFormat, LoggingConfig};
pub use model::{BackendConfig, CsatConfig, EndpointPaths};
