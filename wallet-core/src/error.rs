//! Error types for walletctl

use thiserror::Error;

/// Core error type for walletctl operations
#[derive(Error, Debug)]
pub enum WalletError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Coin missing from the settings file
    #[error("Coin not configured: {0}")]
    CoinNotConfigured(String),

    /// The currently selected coin cannot be removed
    #[error("Cannot remove the current coin: {0}")]
    CoinInUse(String),

    /// Parsing errors (wallet output that is not what we expected)
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for walletctl operations
pub type Result<T> = std::result::Result<T, WalletError>;

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Serialization(err.to_string())
    }
}
