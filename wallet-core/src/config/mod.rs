//! Configuration types for walletctl
//!
//! # Architecture
//!
//! - [`CoinConfig`] - how to reach one coin's wallet CLI and daemon
//! - [`WalletSettings`] - the persisted settings record, keyed by coin name
//!
//! Settings are stored as a single JSON file, `~/.wallet_gui_config.json`
//! by default. CLI presentation preferences live separately in the
//! `walletctl` crate.

mod coins;
mod paths;
mod settings;

pub use coins::{default_coins, CoinConfig};
pub use paths::{default_backup_dir, default_cli_config_path, default_settings_path};
pub use settings::{WalletSettings, DEFAULT_COIN};
