//! Error types for loading and querying a controller configuration.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fields of a raw configuration record, named as they appear in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Address,
    Port,
    Path,
    NetworkTimeoutMs,
    PollIntervalMs,
    OutputNames,
}

impl ConfigField {
    pub const ALL: [ConfigField; 6] = [
        ConfigField::Address,
        ConfigField::Port,
        ConfigField::Path,
        ConfigField::NetworkTimeoutMs,
        ConfigField::PollIntervalMs,
        ConfigField::OutputNames,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigField::Address => "address",
            ConfigField::Port => "port",
            ConfigField::Path => "path",
            ConfigField::NetworkTimeoutMs => "networkTimeoutMs",
            ConfigField::PollIntervalMs => "pollIntervalMs",
            ConfigField::OutputNames => "outputNames",
        }
    }

    /// Key used by the browser demo page's `config.js`.
    pub fn legacy_key(self) -> &'static str {
        match self {
            ConfigField::Address => "ipaddr",
            ConfigField::Port => "port",
            ConfigField::Path => "switchurl",
            ConfigField::NetworkTimeoutMs => "net_timeout",
            ConfigField::PollIntervalMs => "poll_interval",
            ConfigField::OutputNames => "output_names",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure. Construction aborts on the first one found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ConfigError {
    pub field: ConfigField,
    pub reason: String,
}

impl ConfigError {
    pub fn new(field: ConfigField, reason: impl Into<String>) -> Self {
        Self { field, reason: reason.into() }
    }
}

/// Lookup of an output channel outside `1..len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Index 0 is present in storage but never addressable.
    #[error("output index 0 is reserved")]
    Reserved,
    #[error("output index {index} is out of range (valid: 1..={max})")]
    OutOfRange { index: i64, max: usize },
}

/// Failure to obtain a validated config from a file or string.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config root must be a table/object")]
    NotATable,

    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

/// Failure to persist a config.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("serialization failed: {0}")]
    Toml(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display_names_field() {
        let err = ConfigError::new(ConfigField::Port, "must be in 1..=65535, got 70000");
        assert_eq!(err.to_string(), "port: must be in 1..=65535, got 70000");
    }

    #[test]
    fn index_error_messages() {
        assert_eq!(IndexError::Reserved.to_string(), "output index 0 is reserved");
        let e = IndexError::OutOfRange { index: 9, max: 8 };
        assert_eq!(e.to_string(), "output index 9 is out of range (valid: 1..=8)");
    }

    #[test]
    fn field_names_are_distinct() {
        let mut names: Vec<_> = ConfigField::ALL.iter().map(|f| f.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ConfigField::ALL.len());
    }
}
