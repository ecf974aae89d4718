//! walletctl Library
//!
//! Runs cryptocurrency wallet command-line tools and presents their output
//! in the terminal.
//!
//! # Public API
//!
//! [`runner::CliRunner`] spawns a coin's wallet CLI with a timeout and
//! classifies the outcome; [`actions::WalletAction`] builds the argument list
//! for each wallet operation.
//!
//! ```no_run
//! use walletctl::actions::WalletAction;
//! use walletctl::runner::CliRunner;
//! use wallet_core::CoinConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let runner = CliRunner::default();
//! let coin = CoinConfig::new("bitcoin-cli").with_datadir("/data/bitcoin");
//!
//! let balance = runner.run_action(&coin, &WalletAction::GetBalance).await?;
//! println!("Balance: {}", balance);
//! # Ok(())
//! # }
//! ```

/// Wallet operations and their argument lists.
pub mod actions;

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// Configuration types for the CLI tool.
pub mod config;

/// Interactive console and its deferred-task queue.
pub mod console;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

#[doc(hidden)]
pub mod prompt;

/// QR code rendering.
pub mod qr;

/// Process runner for wallet CLIs.
pub mod runner;
