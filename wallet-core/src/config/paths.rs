//! Default path resolution for settings and preference files
//!
//! Uses the home and XDG config directories when available, with fallbacks
//! for environments where neither can be determined.

use std::path::PathBuf;

/// File name of the settings record inside the home directory.
const SETTINGS_FILE_NAME: &str = ".wallet_gui_config.json";

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default path of the JSON settings file.
///
/// - `~/.wallet_gui_config.json`
/// - Fallback: `./.wallet_gui_config.json` when no home directory exists
pub fn default_settings_path() -> PathBuf {
    home_dir().join(SETTINGS_FILE_NAME)
}

/// Returns the default directory for wallet backups (`~/wallet_backups`).
pub fn default_backup_dir() -> PathBuf {
    home_dir().join("wallet_backups")
}

/// Returns the default path of the CLI preferences file.
///
/// Uses XDG config directory if available:
/// - Linux: `~/.config/walletctl/cli.toml`
/// - Fallback: `./.config/walletctl/cli.toml`
pub fn default_cli_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| home_dir().join(".config"))
        .join("walletctl")
        .join("cli.toml")
}
