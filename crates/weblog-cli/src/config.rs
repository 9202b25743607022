//! CLI configuration.
//!
//! A small TOML file naming the data directory and the listing page size.
//! Everything has a default, so running without a config file works.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Page size used when a list command gives no `--limit`.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;

/// Data directory used when neither flag, env, nor config names one.
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Serialize, Deserialize)]
pub struct WeblogConfig {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    pub data_dir: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UiSection {
    pub items_per_page: usize,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl Default for WeblogConfig {
    fn default() -> Self {
        Self {
            store: StoreSection::default(),
            ui: UiSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("weblog").join("config.toml"))
}

/// Load the config at `override_path`, or the default location. A missing
/// file yields the defaults; a present-but-broken file is an error.
pub fn load(override_path: Option<&str>) -> anyhow::Result<WeblogConfig> {
    let path = match override_path {
        Some(path) => PathBuf::from(path),
        None => default_config_path()?,
    };
    if !path.exists() {
        return Ok(WeblogConfig::default());
    }
    read_config(&path)
}

pub fn read_config(path: &Path) -> anyhow::Result<WeblogConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &WeblogConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))
}

fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("Neither XDG_CONFIG_HOME nor HOME is set"))?;
    Ok(PathBuf::from(home).join(".config"))
}
