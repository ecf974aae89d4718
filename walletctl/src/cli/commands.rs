//! CLI command and subcommand definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::actions::{DEFAULT_TRANSACTION_COUNT, DEFAULT_UNLOCK_SECS};

/// Wallet CLI front-end
#[derive(Parser, Debug)]
#[command(name = "walletctl")]
#[command(
    version,
    about = "Drive cryptocurrency wallet command-line tools from one place",
    long_about = None
)]
pub struct Cli {
    /// Coin to act on (overrides the current coin for this invocation)
    #[arg(short, long, global = true)]
    pub coin: Option<String>,

    /// Output format (overrides config file)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging (overrides config file)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Seconds a wallet command may run before it is killed
    #[arg(short, long, global = true)]
    pub timeout: Option<u64>,

    /// Settings file (default: ~/.wallet_gui_config.json)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Don't load config file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Config file path (default: ~/.config/walletctl/cli.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Table => crate::format::OutputFormat::Table,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configured coins
    Coins {
        #[command(subcommand)]
        command: CoinCommands,
    },

    /// Wallet operations on the current coin
    Wallet {
        #[command(subcommand)]
        command: WalletCommands,
    },

    /// Send funds and list transactions
    Tx {
        #[command(subcommand)]
        command: TxCommands,
    },

    /// Start, stop, or inspect mining
    Mining {
        #[command(subcommand)]
        command: MiningCommands,
    },

    /// Seed phrases, address checks, and QR codes
    Tools {
        #[command(subcommand)]
        command: ToolsCommands,
    },

    /// Back up or restore wallet files
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },

    /// Show balance and recent transactions for the current coin
    Refresh,

    /// Run a custom wallet command, e.g. `walletctl exec getblockcount`
    Exec {
        /// Command and arguments passed to the wallet CLI
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Interactive console for the current coin
    Console,

    /// Show or change wallet settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },

    /// Show or manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// About this program
    About,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum CoinCommands {
    /// List configured coins
    List,

    /// Show one coin's configuration (default: current coin)
    Show {
        /// Coin name
        name: Option<String>,
    },

    /// Add a coin, or replace an existing one
    Add {
        /// Coin name
        name: String,

        /// Wallet CLI executable
        #[arg(long)]
        cli: String,

        /// Daemon executable
        #[arg(long, default_value = "")]
        daemon: String,

        /// Data directory passed as -datadir
        #[arg(long, default_value = "")]
        datadir: String,

        /// RPC port
        #[arg(long, default_value_t = 0)]
        port: u16,
    },

    /// Remove a coin
    Remove {
        /// Coin name
        name: String,
    },

    /// Make a coin current
    Use {
        /// Coin name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum WalletCommands {
    /// Show the wallet balance
    Balance,

    /// List receiving addresses
    Addresses,

    /// Generate a new receiving address
    NewAddress {
        /// Optional label
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Import a watch-only address
    ImportAddress {
        /// Address to import
        address: String,

        /// Optional label
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Encrypt the wallet (passphrase is prompted)
    Encrypt,

    /// Unlock the wallet (passphrase is prompted)
    Unlock {
        /// Seconds to stay unlocked
        #[arg(short, long, default_value_t = DEFAULT_UNLOCK_SECS)]
        seconds: u64,
    },

    /// Lock the wallet
    Lock,

    /// Back up the wallet through the wallet CLI
    Backup {
        /// Destination file
        destination: String,
    },

    /// Show the private key of an address
    DumpPrivkey {
        /// Address
        address: String,
    },

    /// Import a private key (key is prompted)
    ImportPrivkey {
        /// Optional label
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Create a new wallet
    Create {
        /// Wallet name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TxCommands {
    /// Send funds to an address
    Send {
        /// Recipient address
        address: String,

        /// Amount to send
        amount: String,

        /// Optional comment
        #[arg(long)]
        comment: Option<String>,
    },

    /// List recent transactions, newest first
    List {
        /// Number of transactions to fetch
        #[arg(short = 'n', long, default_value_t = DEFAULT_TRANSACTION_COUNT)]
        count: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiningCommands {
    /// Start mining
    Start {
        /// Mining threads
        #[arg(long, default_value_t = 1)]
        threads: u32,
    },

    /// Stop mining
    Stop,

    /// Show mining information
    Info,
}

#[derive(Subcommand, Debug)]
pub enum ToolsCommands {
    /// Generate a BIP-39 seed phrase
    SeedGenerate {
        /// Number of words (12, 15, 18, 21, or 24)
        #[arg(short, long, default_value_t = wallet_core::seed::DEFAULT_WORD_COUNT)]
        words: usize,
    },

    /// Check a seed phrase (prompted when no words are given)
    SeedValidate {
        /// Seed words
        words: Vec<String>,
    },

    /// Explain how to restore a wallet from a seed phrase
    SeedRestore,

    /// Validate an address
    ValidateAddress {
        /// Address
        address: String,
    },

    /// Show address details
    AddressInfo {
        /// Address
        address: String,
    },

    /// Show a QR code for an address
    Qr {
        /// Address to encode
        address: String,

        /// Also save the code as an SVG file
        #[arg(long)]
        save: bool,

        /// Directory the SVG file is saved in
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Copy every coin's wallet.dat into one directory
    All {
        /// Destination directory (default: settings backup_dir)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Restore a wallet from a backup file
    Restore {
        /// Backup file
        file: PathBuf,
    },

    /// Import a wallet file from another installation
    Import {
        /// Wallet file
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show wallet settings
    Show,

    /// Set a setting (backup_dir, auto_backup, current_coin)
    Set {
        /// Setting name
        key: String,

        /// Setting value
        value: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (output_format, verbose, timeout, settings_path)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Reset configuration to defaults
    Reset,
}
