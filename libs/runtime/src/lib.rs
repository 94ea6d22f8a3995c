//! Process bootstrap shared by the server binary: layered configuration,
//! logging initialization and shutdown signal handling.

pub mod config;
pub mod logging;
pub mod paths;
pub mod shutdown;

pub use config::{AppConfig, CliArgs, LoggingConfig, Section, ServerConfig};
