use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::transactions::Transaction;

/// Backend assumed when the config names no provider, matching the demo
/// server's default port.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Budget {
    pub category: String,
    pub limit: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    pub backend: Option<BackendProviderConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Inline transaction records, used when no backend user is configured.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Display currency.
    pub currency: String,
    /// Currency the transaction amounts are recorded in.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// When set, transactions are fetched from the backend for this user.
    #[serde(default)]
    pub user: Option<u64>,
}

fn default_base_currency() -> String {
    "USD".to_string()
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "kosi", "fintrack")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
