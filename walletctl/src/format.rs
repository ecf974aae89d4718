//! Output formatting utilities for the CLI
//!
//! Provides table and JSON formatting with colors.

use anyhow::Result;
use colored::*;
use std::collections::BTreeMap;
use wallet_core::backup::BackupReport;
use wallet_core::seed::SeedCheck;
use wallet_core::{format_unix_time, CoinConfig, ReceivedAddress, WalletSettings, WalletTransaction};

use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// Format the coin table, marking the current coin
pub fn format_coins(
    coins: &BTreeMap<String, CoinConfig>,
    current: &str,
    format: &OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(coins)?),
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct CoinRow {
                #[tabled(rename = "")]
                marker: String,
                #[tabled(rename = "Coin")]
                name: String,
                #[tabled(rename = "CLI")]
                cli: String,
                #[tabled(rename = "Daemon")]
                daemon: String,
                #[tabled(rename = "Data Directory")]
                datadir: String,
                #[tabled(rename = "Port")]
                port: String,
            }

            let rows: Vec<CoinRow> = coins
                .iter()
                .map(|(name, coin)| {
                    let is_current = name == current;
                    CoinRow {
                        marker: if is_current {
                            "*".green().bold().to_string()
                        } else {
                            String::new()
                        },
                        name: if is_current {
                            name.cyan().bold().to_string()
                        } else {
                            name.clone()
                        },
                        cli: coin.cli.clone(),
                        daemon: or_dash(&coin.daemon),
                        datadir: or_dash(&coin.datadir),
                        port: if coin.port == 0 {
                            "-".to_string()
                        } else {
                            coin.port.to_string()
                        },
                    }
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Configured Coins:".bold(), table))
        }
    }
}

/// Format a single coin's configuration
pub fn format_coin(name: &str, coin: &CoinConfig, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "name": name,
            "config": coin,
        }))?),
        OutputFormat::Table => {
            let mut output = String::new();
            output.push_str(&format!("{}\n", name.bold()));
            output.push_str(&format!("CLI: {}\n", coin.cli.cyan()));
            output.push_str(&format!("Daemon: {}\n", or_dash(&coin.daemon).cyan()));
            output.push_str(&format!("Data Directory: {}\n", or_dash(&coin.datadir)));
            output.push_str(&format!(
                "RPC Port: {}",
                if coin.port == 0 {
                    "-".to_string()
                } else {
                    coin.port.to_string().yellow().to_string()
                }
            ));
            Ok(output)
        }
    }
}

/// Format the transaction history
pub fn format_transactions(
    transactions: &[WalletTransaction],
    format: &OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(transactions)?),
        OutputFormat::Table => {
            if transactions.is_empty() {
                return Ok("No transactions.".to_string());
            }

            #[derive(Tabled)]
            struct TransactionRow {
                #[tabled(rename = "Transaction ID")]
                txid: String,
                #[tabled(rename = "Amount")]
                amount: String,
                #[tabled(rename = "Confirmations")]
                confirmations: String,
                #[tabled(rename = "Time")]
                time: String,
            }

            let rows: Vec<TransactionRow> = transactions
                .iter()
                .map(|tx| TransactionRow {
                    txid: tx.txid.clone(),
                    amount: if tx.amount < 0.0 {
                        format!("{:.8}", tx.amount).red().to_string()
                    } else {
                        format!("{:.8}", tx.amount).green().to_string()
                    },
                    confirmations: if tx.confirmations > 0 {
                        tx.confirmations.to_string()
                    } else {
                        tx.confirmations.to_string().yellow().to_string()
                    },
                    time: tx.time.map(format_unix_time).unwrap_or_default(),
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Transaction History:".bold(), table))
        }
    }
}

/// Format received-by-address rows
pub fn format_addresses(addresses: &[ReceivedAddress], format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(addresses)?),
        OutputFormat::Table => {
            if addresses.is_empty() {
                return Ok("No addresses.".to_string());
            }

            #[derive(Tabled)]
            struct AddressRow {
                #[tabled(rename = "Address")]
                address: String,
                #[tabled(rename = "Label")]
                label: String,
                #[tabled(rename = "Amount")]
                amount: String,
                #[tabled(rename = "Confirmations")]
                confirmations: i64,
            }

            let rows: Vec<AddressRow> = addresses
                .iter()
                .map(|a| AddressRow {
                    address: a.address.cyan().to_string(),
                    label: or_dash(&a.label),
                    amount: format!("{:.8}", a.amount),
                    confirmations: a.confirmations,
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Addresses:".bold(), table))
        }
    }
}

/// Format the scalar settings (coins are listed separately)
pub fn format_settings(settings: &WalletSettings, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "current_coin": settings.current_coin,
            "auto_backup": settings.auto_backup,
            "backup_dir": settings.backup_dir,
            "coins": settings.coins.len(),
        }))?),
        OutputFormat::Table => {
            let mut output = String::new();
            output.push_str(&format!("{}\n", "Wallet Settings:".bold()));
            output.push_str(&format!("{:<20} Value\n", "Setting"));
            output.push_str(&format!("{}\n", "-".repeat(40)));
            output.push_str(&format!(
                "{:<20} {}\n",
                "Current Coin",
                settings.current_coin.cyan()
            ));
            output.push_str(&format!("{:<20} {}\n", "Auto Backup", settings.auto_backup));
            output.push_str(&format!("{:<20} {}\n", "Backup Directory", settings.backup_dir));
            output.push_str(&format!("{:<20} {}", "Coins", settings.coins.len()));
            Ok(output)
        }
    }
}

/// Format a wallet balance the way the balance panel shows it
pub fn format_balance(coin: &str, balance: &str, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "coin": coin,
            "balance": balance,
        }))?),
        OutputFormat::Table => Ok(format!(
            "{} {}",
            format!("{} balance:", coin).bold(),
            balance.cyan().bold()
        )),
    }
}

/// Format the outcome of a seed phrase check
pub fn format_seed_check(check: &SeedCheck, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(check)?),
        OutputFormat::Table => {
            if !check.format_ok {
                Ok(format_error(&format!(
                    "Seed phrase should be 12, 15, 18, 21, or 24 words. Found {} words.",
                    check.word_count
                )))
            } else if !check.checksum_ok {
                Ok(format_error(&format!(
                    "Seed phrase has {} words but fails the BIP-39 wordlist/checksum check",
                    check.word_count
                )))
            } else {
                Ok(format_success(&format!(
                    "Seed phrase format is valid ({} words)",
                    check.word_count
                )))
            }
        }
    }
}

/// Format a backup-all report
pub fn format_backup_report(report: &BackupReport, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            let mut output = String::new();
            for wallet in &report.backed_up {
                output.push_str(&format!("Backed up {} wallet\n", wallet.coin.cyan()));
            }
            output.push_str(&format_success(&format!(
                "Backed up {} wallet(s) to: {}",
                report.count(),
                report.destination_dir.display()
            )));
            Ok(output)
        }
    }
}

/// Format numbered manual steps
pub fn format_steps(title: &str, steps: &[String]) -> String {
    let mut output = format!("{}", title.bold());
    for (i, step) in steps.iter().enumerate() {
        output.push_str(&format!("\n{}. {}", i + 1, step));
    }
    output
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}

/// Format error message
pub fn format_error(message: &str) -> String {
    format!("{} {}", "✗".red().bold(), message.red())
}

/// Format a warning that needs the user's attention
pub fn format_warning(message: &str) -> String {
    format!("{} {}", "!".yellow().bold(), message.yellow())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use wallet_core::backup::BackedUpWallet;

    fn sample_coins() -> BTreeMap<String, CoinConfig> {
        let mut coins = BTreeMap::new();
        coins.insert(
            "Bitcoin".to_string(),
            CoinConfig::new("bitcoin-cli")
                .with_daemon("bitcoind")
                .with_datadir("/data/btc")
                .with_port(8332),
        );
        coins.insert("Custom".to_string(), CoinConfig::new("custom-cli"));
        coins
    }

    #[test]
    fn test_format_success() {
        let message = format_success("Operation completed");
        assert!(message.contains("✓"));
        assert!(message.contains("Operation completed"));
    }

    #[test]
    fn test_format_error() {
        let message = format_error("CLI not found: bitcoin-cli");
        assert!(message.contains("✗"));
        assert!(message.contains("CLI not found: bitcoin-cli"));
    }

    #[test]
    fn test_format_coins_json() {
        let result = format_coins(&sample_coins(), "Bitcoin", &OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["Bitcoin"]["cli"], "bitcoin-cli");
        assert_eq!(value["Custom"]["port"], 0);
    }

    #[test]
    fn test_format_coins_table() {
        colored::control::set_override(false);
        let result = format_coins(&sample_coins(), "Bitcoin", &OutputFormat::Table).unwrap();
        assert!(result.contains("Configured Coins:"));
        assert!(result.contains("bitcoin-cli"));
        assert!(result.contains("8332"));
        assert!(result.contains("custom-cli"));
        assert!(result.contains('*'));
    }

    #[test]
    fn test_format_transactions() {
        colored::control::set_override(false);
        let txs = vec![WalletTransaction {
            txid: "abc123".to_string(),
            amount: -0.5,
            confirmations: 3,
            time: Some(0),
            category: Some("send".to_string()),
            address: None,
        }];

        let table = format_transactions(&txs, &OutputFormat::Table).unwrap();
        assert!(table.contains("Transaction ID"));
        assert!(table.contains("abc123"));
        assert!(table.contains("-0.50000000"));
        assert!(table.contains("1970-01-01 00:00:00"));

        let json = format_transactions(&txs, &OutputFormat::Json).unwrap();
        assert!(json.contains("\"txid\": \"abc123\""));

        assert_eq!(
            format_transactions(&[], &OutputFormat::Table).unwrap(),
            "No transactions."
        );
    }

    #[test]
    fn test_format_addresses_table() {
        colored::control::set_override(false);
        let rows = vec![ReceivedAddress {
            address: "bc1qxyz".to_string(),
            amount: 1.25,
            confirmations: 6,
            label: String::new(),
        }];
        let table = format_addresses(&rows, &OutputFormat::Table).unwrap();
        assert!(table.contains("bc1qxyz"));
        assert!(table.contains("1.25000000"));
    }

    #[test]
    fn test_format_seed_check() {
        colored::control::set_override(false);
        let bad = SeedCheck {
            word_count: 3,
            format_ok: false,
            checksum_ok: false,
        };
        let text = format_seed_check(&bad, &OutputFormat::Table).unwrap();
        assert!(text.contains("Found 3 words"));

        let good = SeedCheck {
            word_count: 24,
            format_ok: true,
            checksum_ok: true,
        };
        let text = format_seed_check(&good, &OutputFormat::Table).unwrap();
        assert!(text.contains("valid (24 words)"));
    }

    #[test]
    fn test_format_backup_report() {
        colored::control::set_override(false);
        let report = BackupReport {
            destination_dir: PathBuf::from("/backups"),
            backed_up: vec![BackedUpWallet {
                coin: "Bitcoin".to_string(),
                source: PathBuf::from("/data/btc/wallet.dat"),
                destination: PathBuf::from("/backups/Bitcoin_wallet.dat"),
            }],
        };
        let text = format_backup_report(&report, &OutputFormat::Table).unwrap();
        assert!(text.contains("Backed up Bitcoin wallet"));
        assert!(text.contains("Backed up 1 wallet(s) to: /backups"));
    }

    #[test]
    fn test_format_steps() {
        let text = format_steps("To restore:", &["one".to_string(), "two".to_string()]);
        assert!(text.ends_with("1. one\n2. two"));
    }
}
