//! Wallet file backup across all configured coins

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::CoinConfig;
use crate::error::Result;

/// Wallet file name inside a coin's data directory.
pub const WALLET_FILE: &str = "wallet.dat";

/// One wallet file copied by [`backup_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackedUpWallet {
    pub coin: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Result of a [`backup_all`] run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BackupReport {
    pub destination_dir: PathBuf,
    pub backed_up: Vec<BackedUpWallet>,
}

impl BackupReport {
    pub fn count(&self) -> usize {
        self.backed_up.len()
    }
}

/// Path of a coin's wallet file, if the coin has a data directory.
pub fn wallet_file(coin: &CoinConfig) -> Option<PathBuf> {
    coin.datadir().map(|dir| dir.join(WALLET_FILE))
}

/// Backup file name for a coin (`<coin>_wallet.dat`).
pub fn backup_file_name(coin: &str) -> String {
    format!("{}_{}", coin, WALLET_FILE)
}

/// Copy every existing `wallet.dat` into `destination_dir`.
///
/// Coins without a data directory, or whose data directory holds no wallet
/// file, are skipped. The destination directory is created if missing.
pub fn backup_all(
    coins: &BTreeMap<String, CoinConfig>,
    destination_dir: &Path,
) -> Result<BackupReport> {
    std::fs::create_dir_all(destination_dir)?;

    let mut report = BackupReport {
        destination_dir: destination_dir.to_path_buf(),
        backed_up: Vec::new(),
    };

    for (name, coin) in coins {
        let Some(source) = wallet_file(coin) else {
            continue;
        };
        if !source.is_file() {
            debug!("No wallet file for {} at {}", name, source.display());
            continue;
        }

        let destination = destination_dir.join(backup_file_name(name));
        std::fs::copy(&source, &destination)?;
        info!("Backed up {} wallet to {}", name, destination.display());

        report.backed_up.push(BackedUpWallet {
            coin: name.clone(),
            source,
            destination,
        });
    }

    Ok(report)
}

/// Manual steps for putting a wallet file back into a coin's data directory.
///
/// Replacing `wallet.dat` under a running daemon corrupts it, so this is
/// only ever described, never done.
pub fn restore_instructions(coin_name: &str, coin: &CoinConfig, wallet: &Path) -> Vec<String> {
    let target = wallet_file(coin)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| format!("<{} data directory>/{}", coin_name, WALLET_FILE));
    vec![
        format!("Stop the {} daemon ({})", coin_name, display_or_unknown(&coin.daemon)),
        format!("Copy {}", wallet.display()),
        format!("   to {}", target),
        "Restart the daemon".to_string(),
    ]
}

fn display_or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        "daemon not configured"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin_with_datadir(dir: &Path) -> CoinConfig {
        CoinConfig::new("x-cli").with_datadir(dir.to_string_lossy())
    }

    #[test]
    fn test_backup_all_copies_existing_wallets() {
        let root = tempfile::tempdir().unwrap();
        let btc_dir = root.path().join("btc");
        let ltc_dir = root.path().join("ltc");
        std::fs::create_dir_all(&btc_dir).unwrap();
        std::fs::create_dir_all(&ltc_dir).unwrap();
        std::fs::write(btc_dir.join(WALLET_FILE), b"btc-wallet").unwrap();

        let mut coins = BTreeMap::new();
        coins.insert("Bitcoin".to_string(), coin_with_datadir(&btc_dir));
        coins.insert("Litecoin".to_string(), coin_with_datadir(&ltc_dir));
        coins.insert("NoDir".to_string(), CoinConfig::new("nodir-cli"));

        let dest = root.path().join("backups");
        let report = backup_all(&coins, &dest).unwrap();

        assert_eq!(report.count(), 1);
        assert_eq!(report.backed_up[0].coin, "Bitcoin");
        let copied = std::fs::read(dest.join("Bitcoin_wallet.dat")).unwrap();
        assert_eq!(copied, b"btc-wallet");
        assert!(!dest.join("Litecoin_wallet.dat").exists());
    }

    #[test]
    fn test_backup_all_empty() {
        let root = tempfile::tempdir().unwrap();
        let dest = root.path().join("out");
        let report = backup_all(&BTreeMap::new(), &dest).unwrap();
        assert_eq!(report.count(), 0);
        assert!(dest.is_dir());
    }

    #[test]
    fn test_backup_file_name() {
        assert_eq!(backup_file_name("Bitcoin Cash"), "Bitcoin Cash_wallet.dat");
    }

    #[test]
    fn test_restore_instructions() {
        let coin = CoinConfig::new("bitcoin-cli")
            .with_daemon("bitcoind")
            .with_datadir("/data/btc");
        let steps = restore_instructions("Bitcoin", &coin, Path::new("/tmp/w.dat"));
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0], "Stop the Bitcoin daemon (bitcoind)");
        assert_eq!(steps[2], "   to /data/btc/wallet.dat");

        let steps = restore_instructions("Odd", &CoinConfig::new("odd"), Path::new("w.dat"));
        assert!(steps[0].contains("daemon not configured"));
        assert!(steps[2].contains("<Odd data directory>/wallet.dat"));
    }
}
