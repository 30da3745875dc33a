//! Configuration for the planner CLI.
//! Reads config.json from ~/.config/planner/config.json (or platform equivalent).

use std::fs;
use std::path::{Path, PathBuf};

use planner_core::StoreConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    #[serde(default)]
    pub store: StoreConfig,
    /// Answer every confirmation with yes, as `--yes` does.
    #[serde(default)]
    pub assume_yes: bool,
}

/// Default config path: ~/.config/planner/config.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("planner")
        .join("config.json")
}

/// Load config from path. Returns defaults if the file is missing or broken.
pub fn load_config(path: &Path) -> CliConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("[planner.cli.config] Failed to parse config {}: {}", path.display(), e);
            CliConfig::default()
        }),
        Err(_) => {
            log::info!("[planner.cli.config] No config at {}, using defaults", path.display());
            CliConfig::default()
        }
    }
}
