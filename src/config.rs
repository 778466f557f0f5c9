use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Terminal width (in columns) below which projects render as cards
pub const DEFAULT_CARD_BREAKPOINT: u16 = 110;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Project list file (.json, .yaml or .yml)
    pub projects_path: String,
    /// Directory CSV exports are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_card_breakpoint")]
    pub card_breakpoint: u16,
}

fn default_export_dir() -> String {
    ".".to_string()
}

fn default_card_breakpoint() -> u16 {
    DEFAULT_CARD_BREAKPOINT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            projects_path: "projects.json".to_string(),
            export_dir: default_export_dir(),
            card_breakpoint: DEFAULT_CARD_BREAKPOINT,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".nccr-review"))
    }

    pub fn logs_dir() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("logs"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring unreadable config {}: {}", config_path.display(), e);
                None
            }
        }
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}
