//! Configuration handling for the rule engine

use crate::error::ConfigError;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "FIELDWIRE_CONFIG";

/// User configuration for the engine and the terminal host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Debounce window for continuous input, in milliseconds
    pub debounce_ms: u64,
    /// Payment labels containing one of these need no payment reference
    pub no_reference_keywords: Vec<String>,
    /// Payment labels containing one of these need bank account details
    pub bank_transfer_keywords: Vec<String>,
    /// Symbol shown beside fixed-amount margins
    pub currency_symbol: String,
    /// Terminal width (columns) below which the compact layout is used
    pub compact_breakpoint: u16,
    /// How many derived writes may chain off a single event
    pub max_cascade_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            no_reference_keywords: vec![
                "espèces".to_string(),
                "especes".to_string(),
                "liquide".to_string(),
                "cash".to_string(),
            ],
            bank_transfer_keywords: vec!["virement".to_string(), "transfer".to_string()],
            currency_symbol: "€".to_string(),
            compact_breakpoint: 100,
            max_cascade_depth: 8,
        }
    }
}

impl EngineConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("io", "fieldwire", "fieldwire")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, falling back to defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Write configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::InvalidWindow);
        }
        if self.no_reference_keywords.is_empty() {
            return Err(ConfigError::EmptyKeywords {
                list: "no_reference_keywords",
            });
        }
        if self.bank_transfer_keywords.is_empty() {
            return Err(ConfigError::EmptyKeywords {
                list: "bank_transfer_keywords",
            });
        }
        if self.max_cascade_depth == 0 {
            return Err(ConfigError::InvalidCascadeDepth);
        }
        Ok(())
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
