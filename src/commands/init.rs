use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::{write_config, Config};
use crate::models::RawConfig;

/// Write the demo config to `path`. Refuses to replace an existing file unless `force`.
pub fn init_config(path: &Path, force: bool) -> Result<String> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let cfg = Config::load(&RawConfig::default()).context("built-in default config is invalid")?;
    write_config(path, &cfg).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "default config written");
    Ok(format!("Created default config at {}\n", path.display()))
}
