pub mod schema;
pub mod watcher;

pub use schema::{
    DashConfig, GlobalConfig, PaletteConfig, SourceConfig, ThemeConfig, WindowConfig,
};
pub use watcher::ConfigWatcher;

use dash_core::{DashError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `DashConfig::default()` if
/// the file doesn't exist so the dashboard always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<DashConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(DashConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| DashError::Config(format!("cannot read '{}': {e}", path.display())))?;

    toml::from_str(&raw).map_err(|e| DashError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path.
///
/// `$DASH_CONFIG` overrides everything (handy for pointing a second
/// instance at a different endpoint); otherwise `$XDG_CONFIG_HOME` is
/// honoured with the usual `~/.config` fallback.
pub fn default_path() -> PathBuf {
    if let Ok(path) = std::env::var("DASH_CONFIG") {
        return PathBuf::from(path);
    }

    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("dash").join("config.toml")
}
