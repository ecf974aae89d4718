//! CLI configuration management
//!
//! Presentation preferences for `walletctl` (output format, verbosity,
//! command timeout, settings location). The coin table itself lives in the
//! JSON settings file managed by `wallet_core`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::runner::DEFAULT_TIMEOUT_SECS;

/// Upper bound on the command timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Default output format
    pub output_format: String,

    /// Enable verbose logging by default
    pub verbose: bool,

    /// Wallet command timeout in seconds
    pub timeout: u64,

    /// Settings file to use instead of `~/.wallet_gui_config.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output_format: "table".to_string(),
            verbose: false,
            timeout: DEFAULT_TIMEOUT_SECS,
            settings_path: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`, creating it with defaults if missing.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read CLI config file")?;

            toml::from_str(&content).context("Failed to parse CLI config file")
        } else {
            let config = Self::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize CLI config")?;

        std::fs::write(path, content).context("Failed to write CLI config file")?;

        Ok(())
    }

    /// Settings file in effect: the configured one or the default.
    pub fn settings_path(&self) -> PathBuf {
        self.settings_path
            .clone()
            .unwrap_or_else(wallet_core::default_settings_path)
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Priority chain (lowest to highest):
/// 1. Defaults
/// 2. Config file
/// 3. Environment variables
/// 4. CLI arguments
///
/// Setters are applied highest priority first; a value already set is never
/// overwritten by a lower-priority source.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    output_format: Option<String>,
    verbose: Option<bool>,
    timeout: Option<u64>,
    settings_path: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output format (with validation)
    pub fn with_output_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        Self::validate_output_format(&format)?;
        self.output_format = Some(format);
        Ok(self)
    }

    /// Set verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Set timeout (with validation)
    pub fn with_timeout(mut self, timeout: u64) -> Result<Self> {
        Self::validate_timeout(timeout)?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Set the settings file path
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Fill unset values from a config file.
    ///
    /// A missing or unreadable file leaves the builder unchanged.
    pub fn with_config_file(self, path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return self;
        };

        match CliConfig::load(path) {
            Ok(config) => Self {
                output_format: self.output_format.or(Some(config.output_format)),
                verbose: self.verbose.or(Some(config.verbose)),
                timeout: self.timeout.or(Some(config.timeout)),
                settings_path: self.settings_path.or(config.settings_path),
            },
            Err(e) => {
                tracing::debug!("Ignoring CLI config {}: {:#}", path.display(), e);
                self
            }
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if self.output_format.is_none() {
            if let Ok(format) = std::env::var("WALLETCTL_FORMAT") {
                if Self::validate_output_format(&format).is_ok() {
                    self.output_format = Some(format);
                }
            }
        }

        if self.verbose.is_none() {
            if let Ok(verbose) = std::env::var("WALLETCTL_VERBOSE") {
                self.verbose = Some(verbose.to_lowercase() == "true" || verbose == "1");
            }
        }

        if self.timeout.is_none() {
            if let Ok(timeout) = std::env::var("WALLETCTL_TIMEOUT") {
                if let Ok(timeout) = timeout.parse() {
                    if Self::validate_timeout(timeout).is_ok() {
                        self.timeout = Some(timeout);
                    }
                }
            }
        }

        if self.settings_path.is_none() {
            if let Ok(path) = std::env::var("WALLETCTL_SETTINGS") {
                if !path.trim().is_empty() {
                    self.settings_path = Some(PathBuf::from(path));
                }
            }
        }

        self
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig> {
        let defaults = CliConfig::default();

        let output_format = self.output_format.unwrap_or(defaults.output_format);
        let timeout = self.timeout.unwrap_or(defaults.timeout);

        Self::validate_output_format(&output_format)?;
        Self::validate_timeout(timeout)?;

        Ok(CliConfig {
            output_format,
            verbose: self.verbose.unwrap_or(defaults.verbose),
            timeout,
            settings_path: self.settings_path,
        })
    }

    /// Validate output format
    pub(crate) fn validate_output_format(format: &str) -> Result<()> {
        match format {
            "table" | "json" => Ok(()),
            _ => Err(anyhow::anyhow!(
                "Invalid output format '{}'. Must be 'table' or 'json'",
                format
            )),
        }
    }

    /// Validate timeout value
    pub(crate) fn validate_timeout(timeout: u64) -> Result<()> {
        if timeout == 0 {
            return Err(anyhow::anyhow!("Timeout must be greater than 0"));
        }

        if timeout > MAX_TIMEOUT_SECS {
            return Err(anyhow::anyhow!(
                "Timeout must be less than or equal to {} seconds",
                MAX_TIMEOUT_SECS
            ));
        }

        Ok(())
    }
}
