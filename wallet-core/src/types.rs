//! Structured rows parsed from wallet CLI output

use serde::{Deserialize, Serialize};

use crate::error::{Result, WalletError};

/// One entry of `listtransactions` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    /// Transaction ID
    #[serde(default)]
    pub txid: String,

    /// Signed amount in coin units
    #[serde(default)]
    pub amount: f64,

    /// Number of confirmations (negative for conflicted transactions)
    #[serde(default)]
    pub confirmations: i64,

    /// Transaction time as a Unix timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,

    /// `send`, `receive`, `generate`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Counterparty address, when the wallet reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// One entry of `listreceivedbyaddress` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedAddress {
    pub address: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub confirmations: i64,
    #[serde(default)]
    pub label: String,
}

/// Parse `listtransactions` output, newest first.
///
/// Wallets report transactions oldest first; the list is reversed so the most
/// recent transaction is shown at the top.
pub fn parse_transactions(output: &str) -> Result<Vec<WalletTransaction>> {
    let mut transactions: Vec<WalletTransaction> = serde_json::from_str(output.trim())
        .map_err(|e| WalletError::Parse(format!("transaction list: {}", e)))?;
    transactions.reverse();
    Ok(transactions)
}

/// Parse `listreceivedbyaddress` output.
pub fn parse_received(output: &str) -> Result<Vec<ReceivedAddress>> {
    serde_json::from_str(output.trim())
        .map_err(|e| WalletError::Parse(format!("address list: {}", e)))
}

/// Render a Unix timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_unix_time(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}
