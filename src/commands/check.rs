use std::path::Path;

use crate::config::{load_config, Config};
use crate::error::LoadError;

/// Validate the config at `path` and summarise it.
pub fn check_file(path: &Path) -> Result<String, LoadError> {
    let cfg = load_config(path)?;
    Ok(summary(&cfg))
}

pub fn summary(cfg: &Config) -> String {
    let mut out = format!(
        "OK: {} ({} outputs, timeout {} ms, poll every {} ms)\n",
        cfg.endpoint().url(),
        cfg.outputs().channel_count(),
        cfg.timing().network_timeout_ms(),
        cfg.timing().poll_interval_ms(),
    );
    if cfg.timing().may_overlap() {
        out.push_str("warning: poll interval is shorter than the network timeout; requests may overlap\n");
    }
    out
}
