//! Library root for gposwitch
pub mod error;
pub mod models;

pub mod commands;
pub mod config;
pub mod filter;
pub mod logging;

// Convenience re-exports
pub use config::Config;
pub use error::{ConfigError, ConfigField, IndexError, LoadError, SaveError};
pub use models::{DeviceEndpoint, OutputTable, RawConfig, TimingPolicy};
