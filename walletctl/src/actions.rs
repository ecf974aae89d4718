//! Wallet actions and the argument lists they map to.
//!
//! Every button or form in the front-end resolves to one [`WalletAction`].
//! The action knows how to validate its fields and which arguments to pass to
//! the coin's wallet CLI; it knows nothing about which CLI that is.

use wallet_core::WalletError;
use zeroize::Zeroizing;

/// Transactions fetched by `listtransactions` when no count is given.
pub const DEFAULT_TRANSACTION_COUNT: u32 = 50;

/// Seconds a wallet stays unlocked when no timeout is given.
pub const DEFAULT_UNLOCK_SECS: u64 = 60;

/// Commands offered as one-click shortcuts in the console.
pub const QUICK_COMMANDS: [&str; 5] = [
    "getinfo",
    "getblockcount",
    "getpeerinfo",
    "getmininginfo",
    "help",
];

const REDACTED: &str = "********";

/// Wallet RPCs whose first argument is a passphrase or private key.
const SECRET_COMMANDS: [&str; 3] = ["encryptwallet", "walletpassphrase", "importprivkey"];

/// An operation the user can trigger against the current coin's wallet.
#[derive(Debug, Clone, PartialEq)]
pub enum WalletAction {
    GetBalance,
    ListAddresses,
    NewAddress {
        label: Option<String>,
    },
    ImportAddress {
        address: String,
        label: Option<String>,
    },
    EncryptWallet {
        passphrase: Zeroizing<String>,
    },
    UnlockWallet {
        passphrase: Zeroizing<String>,
        timeout_secs: u64,
    },
    LockWallet,
    BackupWallet {
        destination: String,
    },
    DumpPrivkey {
        address: String,
    },
    ImportPrivkey {
        key: Zeroizing<String>,
        label: Option<String>,
    },
    SendToAddress {
        address: String,
        amount: String,
        comment: Option<String>,
    },
    ListTransactions {
        count: u32,
    },
    StartMining {
        threads: u32,
    },
    StopMining,
    MiningInfo,
    ValidateAddress {
        address: String,
    },
    AddressInfo {
        address: String,
    },
    CreateWallet {
        name: String,
    },
    /// Arguments typed by the user, passed through untouched
    Raw {
        args: Vec<String>,
    },
}

/// Trimmed label, or `None` when blank.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn require(value: &str, what: &str) -> Result<(), WalletError> {
    if value.trim().is_empty() {
        Err(WalletError::InvalidInput(format!("{} is required", what)))
    } else {
        Ok(())
    }
}

impl WalletAction {
    /// Build a raw action from a console line, splitting on whitespace.
    pub fn from_command_line(line: &str) -> Self {
        WalletAction::Raw {
            args: line.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Check required fields before anything is spawned.
    pub fn validate(&self) -> Result<(), WalletError> {
        match self {
            WalletAction::ImportAddress { address, .. }
            | WalletAction::DumpPrivkey { address }
            | WalletAction::ValidateAddress { address }
            | WalletAction::AddressInfo { address } => require(address, "Address"),
            WalletAction::EncryptWallet { passphrase } => require(passphrase, "Passphrase"),
            WalletAction::UnlockWallet {
                passphrase,
                timeout_secs,
            } => {
                require(passphrase, "Passphrase")?;
                if *timeout_secs == 0 {
                    return Err(WalletError::InvalidInput(
                        "Unlock timeout must be greater than 0".to_string(),
                    ));
                }
                Ok(())
            }
            WalletAction::BackupWallet { destination } => {
                require(destination, "Backup destination")
            }
            WalletAction::ImportPrivkey { key, .. } => require(key, "Private key"),
            WalletAction::SendToAddress {
                address, amount, ..
            } => {
                if address.trim().is_empty() || amount.trim().is_empty() {
                    return Err(WalletError::InvalidInput(
                        "Address and amount are required".to_string(),
                    ));
                }
                Ok(())
            }
            WalletAction::StartMining { threads } if *threads == 0 => Err(
                WalletError::InvalidInput("Mining threads must be greater than 0".to_string()),
            ),
            WalletAction::ListTransactions { count } if *count == 0 => Err(
                WalletError::InvalidInput("Transaction count must be greater than 0".to_string()),
            ),
            WalletAction::CreateWallet { name } => require(name, "Wallet name"),
            WalletAction::Raw { args } if args.is_empty() => {
                Err(WalletError::InvalidInput("Command is empty".to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Arguments passed to the wallet CLI, after any `-datadir=` flag.
    pub fn args(&self) -> Vec<String> {
        match self {
            WalletAction::GetBalance => owned(&["getbalance"]),
            WalletAction::ListAddresses => owned(&["listreceivedbyaddress", "0", "true"]),
            WalletAction::NewAddress { label } => match non_blank(label) {
                Some(label) => owned(&["getnewaddress", label]),
                None => owned(&["getnewaddress"]),
            },
            WalletAction::ImportAddress { address, label } => owned(&[
                "importaddress",
                address.trim(),
                non_blank(label).unwrap_or(""),
                "false",
            ]),
            WalletAction::EncryptWallet { passphrase } => {
                owned(&["encryptwallet", passphrase.as_str()])
            }
            WalletAction::UnlockWallet {
                passphrase,
                timeout_secs,
            } => vec![
                "walletpassphrase".to_string(),
                passphrase.to_string(),
                timeout_secs.to_string(),
            ],
            WalletAction::LockWallet => owned(&["walletlock"]),
            WalletAction::BackupWallet { destination } => {
                owned(&["backupwallet", destination.trim()])
            }
            WalletAction::DumpPrivkey { address } => owned(&["dumpprivkey", address.trim()]),
            WalletAction::ImportPrivkey { key, label } => owned(&[
                "importprivkey",
                key.trim(),
                non_blank(label).unwrap_or(""),
                "false",
            ]),
            WalletAction::SendToAddress {
                address,
                amount,
                comment,
            } => {
                let mut args = owned(&["sendtoaddress", address.trim(), amount.trim()]);
                if let Some(comment) = non_blank(comment) {
                    args.push(comment.to_string());
                }
                args
            }
            WalletAction::ListTransactions { count } => {
                vec!["listtransactions".to_string(), "*".to_string(), count.to_string()]
            }
            WalletAction::StartMining { threads } => {
                vec!["setgenerate".to_string(), "true".to_string(), threads.to_string()]
            }
            WalletAction::StopMining => owned(&["setgenerate", "false"]),
            WalletAction::MiningInfo => owned(&["getmininginfo"]),
            WalletAction::ValidateAddress { address } => {
                owned(&["validateaddress", address.trim()])
            }
            WalletAction::AddressInfo { address } => owned(&["getaddressinfo", address.trim()]),
            WalletAction::CreateWallet { name } => owned(&["createwallet", name.trim()]),
            WalletAction::Raw { args } => args.clone(),
        }
    }

    /// Arguments safe to write to logs: secrets are masked.
    pub fn display_args(&self) -> Vec<String> {
        let mut args = self.args();
        if let Some(index) = self.secret_index() {
            if let Some(arg) = args.get_mut(index) {
                *arg = REDACTED.to_string();
            }
        }
        args
    }

    fn secret_index(&self) -> Option<usize> {
        match self {
            WalletAction::EncryptWallet { .. }
            | WalletAction::UnlockWallet { .. }
            | WalletAction::ImportPrivkey { .. } => Some(1),
            WalletAction::Raw { args } => {
                let command = args.first()?.to_lowercase();
                SECRET_COMMANDS.contains(&command.as_str()).then_some(1)
            }
            _ => None,
        }
    }

    /// Status line shown while the action runs.
    pub fn status(&self) -> &'static str {
        match self {
            WalletAction::GetBalance => "Getting balance...",
            WalletAction::ListAddresses => "Listing addresses...",
            WalletAction::NewAddress { .. } => "Generating address...",
            WalletAction::ImportAddress { .. } => "Importing address...",
            WalletAction::EncryptWallet { .. } => "Encrypting wallet...",
            WalletAction::UnlockWallet { .. } => "Unlocking wallet...",
            WalletAction::LockWallet => "Locking wallet...",
            WalletAction::BackupWallet { .. } => "Backing up wallet...",
            WalletAction::DumpPrivkey { .. } => "Dumping private key...",
            WalletAction::ImportPrivkey { .. } => "Importing private key...",
            WalletAction::SendToAddress { .. } => "Sending transaction...",
            WalletAction::ListTransactions { .. } => "Loading transactions...",
            WalletAction::StartMining { .. } => "Starting mining...",
            WalletAction::StopMining => "Stopping mining...",
            WalletAction::MiningInfo => "Getting mining info...",
            WalletAction::ValidateAddress { .. } => "Validating address...",
            WalletAction::AddressInfo { .. } => "Getting address info...",
            WalletAction::CreateWallet { .. } => "Creating wallet...",
            WalletAction::Raw { .. } => "Executing command...",
        }
    }

    /// Action to retry with when this one fails, for daemons that predate
    /// the preferred RPC.
    pub fn fallback(&self) -> Option<WalletAction> {
        match self {
            WalletAction::AddressInfo { address } => Some(WalletAction::ValidateAddress {
                address: address.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(action: WalletAction) -> Vec<String> {
        action.args()
    }

    #[test]
    fn test_simple_actions() {
        assert_eq!(args(WalletAction::GetBalance), ["getbalance"]);
        assert_eq!(
            args(WalletAction::ListAddresses),
            ["listreceivedbyaddress", "0", "true"]
        );
        assert_eq!(args(WalletAction::LockWallet), ["walletlock"]);
        assert_eq!(args(WalletAction::StopMining), ["setgenerate", "false"]);
        assert_eq!(args(WalletAction::MiningInfo), ["getmininginfo"]);
    }

    #[test]
    fn test_new_address_label_is_optional() {
        assert_eq!(
            args(WalletAction::NewAddress { label: None }),
            ["getnewaddress"]
        );
        assert_eq!(
            args(WalletAction::NewAddress {
                label: Some("  ".to_string())
            }),
            ["getnewaddress"]
        );
        assert_eq!(
            args(WalletAction::NewAddress {
                label: Some("savings".to_string())
            }),
            ["getnewaddress", "savings"]
        );
    }

    #[test]
    fn test_import_address_passes_empty_label() {
        assert_eq!(
            args(WalletAction::ImportAddress {
                address: "bc1qabc".to_string(),
                label: None,
            }),
            ["importaddress", "bc1qabc", "", "false"]
        );
        assert_eq!(
            args(WalletAction::ImportPrivkey {
                key: "L1key".to_string().into(),
                label: Some("cold".to_string()),
            }),
            ["importprivkey", "L1key", "cold", "false"]
        );
    }

    #[test]
    fn test_send_comment_is_optional() {
        let send = |comment: Option<&str>| WalletAction::SendToAddress {
            address: " bc1qdest ".to_string(),
            amount: "0.25".to_string(),
            comment: comment.map(str::to_string),
        };
        assert_eq!(args(send(None)), ["sendtoaddress", "bc1qdest", "0.25"]);
        assert_eq!(
            args(send(Some("rent"))),
            ["sendtoaddress", "bc1qdest", "0.25", "rent"]
        );
    }

    #[test]
    fn test_numeric_arguments() {
        assert_eq!(
            args(WalletAction::ListTransactions { count: 50 }),
            ["listtransactions", "*", "50"]
        );
        assert_eq!(
            args(WalletAction::StartMining { threads: 4 }),
            ["setgenerate", "true", "4"]
        );
        assert_eq!(
            args(WalletAction::UnlockWallet {
                passphrase: "hunter2".to_string().into(),
                timeout_secs: 60,
            }),
            ["walletpassphrase", "hunter2", "60"]
        );
    }

    #[test]
    fn test_raw_from_command_line() {
        let action = WalletAction::from_command_line("  getblock   abc 2 ");
        assert_eq!(args(action), ["getblock", "abc", "2"]);

        let empty = WalletAction::from_command_line("   ");
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_validation() {
        assert!(WalletAction::SendToAddress {
            address: "".to_string(),
            amount: "1".to_string(),
            comment: None,
        }
        .validate()
        .is_err());
        assert!(WalletAction::SendToAddress {
            address: "bc1q".to_string(),
            amount: " ".to_string(),
            comment: None,
        }
        .validate()
        .is_err());
        assert!(WalletAction::UnlockWallet {
            passphrase: "pw".to_string().into(),
            timeout_secs: 0,
        }
        .validate()
        .is_err());
        assert!(WalletAction::StartMining { threads: 0 }.validate().is_err());
        assert!(WalletAction::CreateWallet {
            name: "".to_string()
        }
        .validate()
        .is_err());

        assert!(WalletAction::GetBalance.validate().is_ok());
        assert!(WalletAction::DumpPrivkey {
            address: "bc1q".to_string()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_secrets_are_redacted() {
        let action = WalletAction::UnlockWallet {
            passphrase: "hunter2".to_string().into(),
            timeout_secs: 30,
        };
        assert_eq!(action.display_args(), ["walletpassphrase", "********", "30"]);

        let action = WalletAction::ImportPrivkey {
            key: "L1secret".to_string().into(),
            label: None,
        };
        assert_eq!(
            action.display_args(),
            ["importprivkey", "********", "", "false"]
        );

        assert_eq!(WalletAction::GetBalance.display_args(), ["getbalance"]);
    }

    #[test]
    fn test_typed_secret_commands_are_redacted() {
        let action = WalletAction::from_command_line("walletpassphrase hunter2 60");
        assert_eq!(action.args(), ["walletpassphrase", "hunter2", "60"]);
        assert_eq!(action.display_args(), ["walletpassphrase", "********", "60"]);

        let action = WalletAction::from_command_line("encryptwallet s3cret");
        assert_eq!(action.display_args(), ["encryptwallet", "********"]);

        let action = WalletAction::from_command_line("ImportPrivKey L1secret cold false");
        assert_eq!(
            action.display_args(),
            ["ImportPrivKey", "********", "cold", "false"]
        );

        // Nothing to hide when the secret is missing
        let action = WalletAction::from_command_line("walletpassphrase");
        assert_eq!(action.display_args(), ["walletpassphrase"]);

        let action = WalletAction::from_command_line("getblockhash 100");
        assert_eq!(action.display_args(), ["getblockhash", "100"]);
    }

    #[test]
    fn test_address_info_falls_back_to_validate() {
        let action = WalletAction::AddressInfo {
            address: "bc1q".to_string(),
        };
        assert_eq!(
            action.fallback(),
            Some(WalletAction::ValidateAddress {
                address: "bc1q".to_string()
            })
        );
        assert_eq!(WalletAction::GetBalance.fallback(), None);
    }
}
