use serde::Serialize;
use std::time::Duration;

use crate::error::IndexError;

/// Unvalidated configuration record, as read from a file or built in code.
///
/// Integers are kept wide and signed so that out-of-range values reach
/// validation. Files are read through `RawConfig::from_value`, not serde.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    /// IPv4 literal or hostname of the controller
    pub address: String,
    pub port: i64,
    /// Request path on the controller, e.g. `/gpiswitch/out`
    pub path: String,
    pub network_timeout_ms: i64,
    pub poll_interval_ms: i64,
    /// Channel labels; entry 0 is a placeholder and never addressed
    pub output_names: Vec<String>,
}

impl Default for RawConfig {
    /// The record shipped with the browser demo page.
    fn default() -> Self {
        Self {
            address: "192.168.42.201".to_string(),
            port: 2000,
            path: "/gpiswitch/out".to_string(),
            network_timeout_ms: 500,
            poll_interval_ms: 1000,
            output_names: [
                "", "Relay 1", "Relay 2", "Relay 3", "Relay 4", "TX", "REH", "Phone 1", "Phone 2",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Where poll requests are sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceEndpoint {
    address: String,
    port: u16,
    path: String,
}

impl DeviceEndpoint {
    pub(crate) fn new(address: String, port: u16, path: String) -> Self {
        Self { address, port, path }
    }

    pub fn address(&self) -> &str { &self.address }
    pub fn port(&self) -> u16 { self.port }
    pub fn path(&self) -> &str { &self.path }

    /// Full request target, e.g. `http://192.168.42.201:2000/gpiswitch/out`.
    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.address, self.port, self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimingPolicy {
    network_timeout_ms: u64,
    poll_interval_ms: u64,
}

impl TimingPolicy {
    pub(crate) fn new(network_timeout_ms: u64, poll_interval_ms: u64) -> Self {
        Self { network_timeout_ms, poll_interval_ms }
    }

    pub fn network_timeout_ms(&self) -> u64 { self.network_timeout_ms }
    pub fn poll_interval_ms(&self) -> u64 { self.poll_interval_ms }

    pub fn network_timeout(&self) -> Duration {
        Duration::from_millis(self.network_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// True when a new poll may start while the previous request is still in flight.
    pub fn may_overlap(&self) -> bool {
        self.poll_interval_ms < self.network_timeout_ms
    }
}

/// Fixed table of output channel labels, addressed 1..N.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputTable {
    names: Vec<String>,
}

impl OutputTable {
    pub(crate) fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Storage length, including the reserved slot 0.
    pub fn storage_len(&self) -> usize { self.names.len() }

    /// Number of addressable channels (N).
    pub fn channel_count(&self) -> usize { self.names.len().saturating_sub(1) }

    pub fn label(&self, index: i64) -> Result<&str, IndexError> {
        if index == 0 {
            return Err(IndexError::Reserved);
        }
        usize::try_from(index)
            .ok()
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
            .ok_or(IndexError::OutOfRange { index, max: self.channel_count() })
    }

    /// Index of the channel carrying exactly `label`.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.iter().find(|(_, l)| *l == label).map(|(i, _)| i)
    }

    /// `(index, label)` for every addressable channel, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.names.iter().enumerate().skip(1).map(|(i, s)| (i, s.as_str()))
    }

    /// Raw storage, placeholder included.
    pub fn as_slice(&self) -> &[String] { &self.names }
}
