//! Persisted settings record
//!
//! Stored as pretty-printed JSON at [`default_settings_path`](super::default_settings_path)
//! unless another path is given.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use super::coins::{default_coins, CoinConfig};
use super::paths::default_backup_dir;
use crate::error::{Result, WalletError};

/// Coin selected when nothing else is configured.
pub const DEFAULT_COIN: &str = "Bitcoin";

fn default_current_coin() -> String {
    DEFAULT_COIN.to_string()
}

fn default_auto_backup() -> bool {
    true
}

fn default_backup_dir_string() -> String {
    default_backup_dir().to_string_lossy().into_owned()
}

/// The settings record: coin name → tooling, plus a few scalar settings.
///
/// Coin names are unique keys and list in name order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSettings {
    /// Coin name to tool configuration
    #[serde(default)]
    pub coins: BTreeMap<String, CoinConfig>,

    /// Coin used when no coin is given explicitly
    #[serde(default = "default_current_coin")]
    pub current_coin: String,

    /// Back up wallets when leaving the interactive console
    #[serde(default = "default_auto_backup")]
    pub auto_backup: bool,

    /// Destination directory for wallet backups
    #[serde(default = "default_backup_dir_string")]
    pub backup_dir: String,
}

impl Default for WalletSettings {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| ".".into());
        Self {
            coins: default_coins(&home),
            current_coin: default_current_coin(),
            auto_backup: default_auto_backup(),
            backup_dir: default_backup_dir_string(),
        }
    }
}

impl WalletSettings {
    /// Load settings from `path`, writing the defaults there first if the
    /// file does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let settings = Self::from_json(&content).map_err(|e| {
                WalletError::Config(format!("Failed to parse {}: {}", path.display(), e))
            })?;
            debug!(
                "Loaded {} coin(s) from {}",
                settings.coins.len(),
                path.display()
            );
            Ok(settings)
        } else {
            let settings = Self::default();
            settings.save(path)?;
            info!("Created default settings at {}", path.display());
            Ok(settings)
        }
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Parse settings from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize settings to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a coin by name.
    pub fn coin(&self, name: &str) -> Result<&CoinConfig> {
        self.coins
            .get(name)
            .ok_or_else(|| WalletError::CoinNotConfigured(name.to_string()))
    }

    /// The configuration of the current coin.
    pub fn current(&self) -> Result<&CoinConfig> {
        self.coin(&self.current_coin)
    }

    /// Add a coin, replacing any existing entry of the same name.
    ///
    /// Returns `true` if an existing entry was replaced.
    pub fn add_coin(&mut self, name: &str, config: CoinConfig) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() || config.cli.trim().is_empty() {
            return Err(WalletError::InvalidInput(
                "Name and CLI command are required".to_string(),
            ));
        }
        let config = CoinConfig {
            cli: config.cli.trim().to_string(),
            daemon: config.daemon.trim().to_string(),
            datadir: config.datadir.trim().to_string(),
            port: config.port,
        };
        Ok(self.coins.insert(name.to_string(), config).is_some())
    }

    /// Remove a coin. The current coin cannot be removed.
    pub fn remove_coin(&mut self, name: &str) -> Result<CoinConfig> {
        self.check_removable(name)?;
        self.coins
            .remove(name)
            .ok_or_else(|| WalletError::CoinNotConfigured(name.to_string()))
    }

    /// Check that `name` exists and is not the current coin.
    pub fn check_removable(&self, name: &str) -> Result<()> {
        if !self.coins.contains_key(name) {
            return Err(WalletError::CoinNotConfigured(name.to_string()));
        }
        if self.current_coin == name {
            return Err(WalletError::CoinInUse(name.to_string()));
        }
        Ok(())
    }

    /// Make `name` the current coin.
    pub fn select_coin(&mut self, name: &str) -> Result<()> {
        if !self.coins.contains_key(name) {
            return Err(WalletError::CoinNotConfigured(name.to_string()));
        }
        self.current_coin = name.to_string();
        Ok(())
    }

    /// Coin names in listing order.
    pub fn coin_names(&self) -> impl Iterator<Item = &str> {
        self.coins.keys().map(String::as_str)
    }
}
