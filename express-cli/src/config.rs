//! Configuration loading and parsing

use anyhow::{Context, Result};
use express_chain::ChainConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Callback names to queue, in order; unset means the built-in sequence
    #[serde(default)]
    pub callbacks: Option<Vec<String>>,
    /// Number of execute passes
    #[serde(default = "default_runs")]
    pub runs: usize,
    #[serde(default)]
    pub chain: ChainConfig,
}

fn default_runs() -> usize {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            callbacks: None,
            runs: default_runs(),
            chain: ChainConfig::default(),
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .chain
        .validate()
        .with_context(|| format!("Invalid [chain] section in {:?}", path))?;

    Ok(config)
}
