use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the default config location.
pub const CONFIG_ENV: &str = "GPOSWITCH_CONFIG";

pub fn config_path() -> PathBuf {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        if !p.trim().is_empty() {
            return expand(&p);
        }
    }
    let base = dirs::config_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
    });
    base.join("gposwitch/config.json")
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).into_owned())
}

pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
