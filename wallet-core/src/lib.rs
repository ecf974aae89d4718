//! walletctl Core Library
//!
//! Shared types, settings, and utilities for the walletctl front-end.
//! Nothing in here spawns processes; that lives in the `walletctl` crate.

pub mod backup;
pub mod config;
pub mod error;
pub mod seed;
pub mod types;

// Re-export commonly used types
pub use config::{
    default_backup_dir, default_cli_config_path, default_coins, default_settings_path,
    CoinConfig, WalletSettings, DEFAULT_COIN,
};
pub use error::*;
pub use types::*;
