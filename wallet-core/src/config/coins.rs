//! Per-coin tool configuration and the built-in coin table

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// How to reach one coin's wallet tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinConfig {
    /// Wallet CLI executable (name on `PATH` or absolute path)
    pub cli: String,

    /// Daemon executable, informational
    #[serde(default)]
    pub daemon: String,

    /// Data directory passed as `-datadir=`; empty means "let the CLI decide"
    #[serde(default)]
    pub datadir: String,

    /// RPC port, `0` when unknown
    #[serde(default, deserialize_with = "lenient_port")]
    pub port: u16,
}

/// Read a stored port; values that are not a valid port load as `0`.
fn lenient_port<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let port = match &value {
        Value::Null => Some(0),
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u16>().ok(),
        _ => None,
    };
    Ok(port.unwrap_or_else(|| {
        warn!("Ignoring invalid RPC port {} in settings", value);
        0
    }))
}

impl CoinConfig {
    /// Create a coin config with the given CLI and no daemon, datadir or port.
    pub fn new(cli: impl Into<String>) -> Self {
        Self {
            cli: cli.into(),
            daemon: String::new(),
            datadir: String::new(),
            port: 0,
        }
    }

    /// Set the daemon executable.
    pub fn with_daemon(mut self, daemon: impl Into<String>) -> Self {
        self.daemon = daemon.into();
        self
    }

    /// Set the data directory.
    pub fn with_datadir(mut self, datadir: impl Into<String>) -> Self {
        self.datadir = datadir.into();
        self
    }

    /// Set the RPC port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Data directory, if one is configured.
    pub fn datadir(&self) -> Option<&Path> {
        let trimmed = self.datadir.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Path::new(trimmed))
        }
    }

    /// The `-datadir=<dir>` argument, if a data directory is configured.
    pub fn datadir_arg(&self) -> Option<String> {
        self.datadir()
            .map(|dir| format!("-datadir={}", dir.display()))
    }
}

// (name, cli, daemon, data dir under $HOME, rpc port)
const BUILTIN_COINS: &[(&str, &str, &str, &str, u16)] = &[
    ("Bitcoin", "bitcoin-cli", "bitcoind", ".bitcoin", 8332),
    ("Litecoin", "litecoin-cli", "litecoind", ".litecoin", 9332),
    ("Dogecoin", "dogecoin-cli", "dogecoind", ".dogecoin", 22555),
    ("Ethereum", "geth", "geth", ".ethereum", 8545),
    ("Monero", "monero-wallet-cli", "monerod", ".monero", 18081),
    ("Zcash", "zcash-cli", "zcashd", ".zcash", 8232),
    ("Dash", "dash-cli", "dashd", ".dash", 9998),
    ("Bitcoin Cash", "bitcoin-cash-cli", "bitcoin-cashd", ".bitcoincash", 8332),
    ("Ravencoin", "raven-cli", "ravend", ".raven", 8766),
    ("Vertcoin", "vertcoin-cli", "vertcoind", ".vertcoin", 5888),
    ("Groestlcoin", "groestlcoin-cli", "groestlcoind", ".groestlcoin", 1441),
    ("Digibyte", "digibyte-cli", "digibyted", ".digibyte", 14022),
    ("Aleo", "aleo", "snarkos", ".aleo", 3032),
    ("Cardano", "cardano-cli", "cardano-node", ".cardano", 3001),
    ("Solana", "solana", "solana-validator", ".solana", 8899),
    ("Polkadot", "polkadot", "polkadot", ".polkadot", 9933),
    ("Avalanche", "avalanche-cli", "avalanchego", ".avalanche", 9650),
    ("Cosmos", "gaiad", "gaiad", ".gaia", 26657),
    ("Algorand", "goal", "algod", ".algorand", 8080),
    ("Tezos", "tezos-client", "tezos-node", ".tezos", 8732),
    ("Stellar", "stellar-core", "stellar-core", ".stellar", 11626),
    ("Kaspa", "kaspactl", "kaspad", ".kaspa", 16110),
    ("Ergo", "ergo-cli", "ergo", ".ergo", 9053),
];

/// Built-in coin table, with data directories rooted at `home`.
pub fn default_coins(home: &Path) -> BTreeMap<String, CoinConfig> {
    BUILTIN_COINS
        .iter()
        .map(|(name, cli, daemon, dir, port)| {
            let config = CoinConfig::new(*cli)
                .with_daemon(*daemon)
                .with_datadir(home.join(dir).to_string_lossy())
                .with_port(*port);
            (name.to_string(), config)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_coins_table() {
        let coins = default_coins(Path::new("/home/alice"));
        assert_eq!(coins.len(), 23);

        let btc = &coins["Bitcoin"];
        assert_eq!(btc.cli, "bitcoin-cli");
        assert_eq!(btc.daemon, "bitcoind");
        assert_eq!(btc.datadir, "/home/alice/.bitcoin");
        assert_eq!(btc.port, 8332);

        assert_eq!(coins["Cosmos"].datadir, "/home/alice/.gaia");
        assert_eq!(coins["Kaspa"].daemon, "kaspad");
    }

    #[test]
    fn test_datadir_arg() {
        let coin = CoinConfig::new("bitcoin-cli").with_datadir("/data/btc");
        assert_eq!(coin.datadir_arg().as_deref(), Some("-datadir=/data/btc"));

        let coin = CoinConfig::new("bitcoin-cli").with_datadir("   ");
        assert_eq!(coin.datadir_arg(), None);
        assert_eq!(coin.datadir(), None);
    }

    #[test]
    fn test_coin_deserialization_defaults() {
        let coin: CoinConfig = serde_json::from_str(r#"{"cli": "foo-cli"}"#).unwrap();
        assert_eq!(coin, CoinConfig::new("foo-cli"));
    }

    #[test]
    fn test_port_outside_range_loads_as_zero() {
        for raw in [r#"70000"#, r#"-1"#, r#""abc""#, r#"8332.5"#, r#"null"#] {
            let json = format!(r#"{{"cli": "foo-cli", "port": {}}}"#, raw);
            let coin: CoinConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(coin.port, 0, "port {}", raw);
        }

        let coin: CoinConfig =
            serde_json::from_str(r#"{"cli": "foo-cli", "port": "9332"}"#).unwrap();
        assert_eq!(coin.port, 9332);
    }

    #[test]
    fn test_coin_json_field_names() {
        let coin = CoinConfig::new("dash-cli")
            .with_daemon("dashd")
            .with_datadir("/d")
            .with_port(9998);
        let value = serde_json::to_value(&coin).unwrap();
        assert_eq!(value["cli"], "dash-cli");
        assert_eq!(value["daemon"], "dashd");
        assert_eq!(value["datadir"], "/d");
        assert_eq!(value["port"], 9998);
    }
}
