use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/mdr/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MdrConfig {
    /// Base URL of the remote processing service.
    pub service_url: String,
    /// Optional path to the catalog file; defaults to `catalog.toml` in the
    /// config directory.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Transport connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Transport total timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    15
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for MdrConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:8080".to_string(),
            catalog_path: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Strips trailing slashes from a service base URL so composed endpoint
/// paths never double a `/`.
pub fn normalize_service_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mdr")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Default catalog file location, next to the config file.
pub fn default_catalog_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mdr")?;
    Ok(xdg_dirs.get_config_home().join("catalog.toml"))
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MdrConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MdrConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, format!("# MDR configuration\n{toml}"))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: MdrConfig = toml::from_str(&data)?;
    Ok(cfg)
}
