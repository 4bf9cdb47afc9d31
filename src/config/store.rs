use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigField, IndexError};
use crate::models::{DeviceEndpoint, OutputTable, RawConfig, TimingPolicy};

/// Validated, immutable controller configuration.
///
/// Only obtainable through [`Config::load`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    endpoint: DeviceEndpoint,
    timing: TimingPolicy,
    outputs: OutputTable,
}

impl Config {
    /// Validate `raw` and build a config. Fields are checked in declaration
    /// order and the first violation is returned.
    pub fn load(raw: &RawConfig) -> Result<Self, ConfigError> {
        let address = check_address(&raw.address)?;
        let port = check_port(raw.port)?;
        let path = check_path(&raw.path)?;
        let network_timeout_ms = check_positive(ConfigField::NetworkTimeoutMs, raw.network_timeout_ms)?;
        let poll_interval_ms = check_positive(ConfigField::PollIntervalMs, raw.poll_interval_ms)?;
        check_output_names(&raw.output_names)?;

        let timing = TimingPolicy::new(network_timeout_ms, poll_interval_ms);
        if timing.may_overlap() {
            warn!(
                poll_interval_ms,
                network_timeout_ms,
                "poll interval is shorter than the network timeout; requests may overlap"
            );
        }

        let config = Config {
            endpoint: DeviceEndpoint::new(address, port, path),
            timing,
            outputs: OutputTable::new(raw.output_names.clone()),
        };
        debug!(
            url = %config.endpoint.url(),
            channels = config.outputs.channel_count(),
            "config loaded"
        );
        Ok(config)
    }

    pub fn endpoint(&self) -> &DeviceEndpoint { &self.endpoint }

    pub fn timing(&self) -> &TimingPolicy { &self.timing }

    pub fn outputs(&self) -> &OutputTable { &self.outputs }

    /// Label of output channel `index`. Index 0 is reserved.
    pub fn output_label(&self, index: i64) -> Result<&str, IndexError> {
        self.outputs.label(index)
    }

    /// The raw record this config was built from.
    pub fn to_raw(&self) -> RawConfig {
        RawConfig {
            address: self.endpoint.address().to_string(),
            port: i64::from(self.endpoint.port()),
            path: self.endpoint.path().to_string(),
            network_timeout_ms: self.timing.network_timeout_ms() as i64,
            poll_interval_ms: self.timing.poll_interval_ms() as i64,
            output_names: self.outputs.as_slice().to_vec(),
        }
    }
}

fn check_address(address: &str) -> Result<String, ConfigError> {
    if address.is_empty() {
        return Err(ConfigError::new(ConfigField::Address, "must not be empty"));
    }
    Ok(address.to_string())
}

fn check_port(port: i64) -> Result<u16, ConfigError> {
    match u16::try_from(port) {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(ConfigError::new(
            ConfigField::Port,
            format!("must be in 1..=65535, got {port}"),
        )),
    }
}

fn check_path(path: &str) -> Result<String, ConfigError> {
    if path.is_empty() {
        return Err(ConfigError::new(ConfigField::Path, "must not be empty"));
    }
    if !path.starts_with('/') {
        return Err(ConfigError::new(
            ConfigField::Path,
            format!("must start with '/', got {path:?}"),
        ));
    }
    Ok(path.to_string())
}

fn check_positive(field: ConfigField, value: i64) -> Result<u64, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::new(field, format!("must be positive, got {value}")));
    }
    Ok(value as u64)
}

fn check_output_names(names: &[String]) -> Result<(), ConfigError> {
    if names.len() < 2 {
        return Err(ConfigError::new(
            ConfigField::OutputNames,
            format!("needs a placeholder and at least one label, got {} entries", names.len()),
        ));
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for (i, name) in names.iter().enumerate().skip(1) {
        if name.is_empty() {
            return Err(ConfigError::new(
                ConfigField::OutputNames,
                format!("label {i} is empty"),
            ));
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::new(
                ConfigField::OutputNames,
                format!("label {i} duplicates {name:?}"),
            ));
        }
    }
    Ok(())
}
