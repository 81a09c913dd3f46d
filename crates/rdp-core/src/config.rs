use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Lookup;
use crate::planner::Planner;
use crate::search::SearchOptions;

/// Global configuration loaded from `~/.config/rdp/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdpConfig {
    /// Decimal places of the printed download time.
    pub precision: usize,
    /// File extension (without dot) that `rdp batch` treats as a problem file.
    pub input_extension: String,
    /// Catalog lookup strategy: "indexed" (default) or "linear".
    #[serde(default)]
    pub lookup: Option<Lookup>,
    /// Optional pruning switches; if missing, both are on.
    #[serde(default)]
    pub search: Option<SearchOptions>,
}

impl Default for RdpConfig {
    fn default() -> Self {
        Self {
            precision: 3,
            input_extension: "input".to_string(),
            lookup: None,
            search: None,
        }
    }
}

impl RdpConfig {
    pub fn planner(&self) -> Planner {
        Planner::new(
            self.search.unwrap_or_default(),
            self.lookup.unwrap_or_default(),
        )
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rdp")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RdpConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<RdpConfig> {
    if !path.exists() {
        let default_cfg = RdpConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: RdpConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
