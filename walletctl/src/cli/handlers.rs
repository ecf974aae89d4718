//! Command execution handlers

use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};
use tracing::info;
use wallet_core::{backup, parse_received, parse_transactions, seed, CoinConfig, WalletSettings};

use crate::actions::WalletAction;
use crate::config::CliConfig;
use crate::console::{self, Session, TaskQueue};
use crate::format::{format_success, format_warning};
use crate::prompt;
use crate::qr;
use crate::runner::CliRunner;

use super::commands::*;

/// Everything a handler needs: settings, where they live, and how to run
/// wallet commands.
pub struct AppContext {
    pub settings: WalletSettings,
    pub settings_path: PathBuf,
    pub runner: CliRunner,
    /// Coin given with `--coin`, overriding the current coin
    pub coin_override: Option<String>,
    /// Skip confirmations (`--yes`)
    pub assume_yes: bool,
}

impl AppContext {
    pub fn new(settings: WalletSettings, settings_path: PathBuf, runner: CliRunner) -> Self {
        Self {
            settings,
            settings_path,
            runner,
            coin_override: None,
            assume_yes: false,
        }
    }

    /// Name of the coin commands act on.
    pub fn coin_name(&self) -> &str {
        self.coin_override
            .as_deref()
            .unwrap_or(&self.settings.current_coin)
    }

    pub fn coin(&self) -> Result<&CoinConfig> {
        Ok(self.settings.coin(self.coin_name())?)
    }

    /// Run an action against the selected coin and return its output.
    pub async fn run(&self, action: &WalletAction) -> Result<String> {
        let coin = self.coin()?;
        Ok(self.runner.run_action(coin, action).await?)
    }

    fn save_settings(&self) -> Result<()> {
        self.settings
            .save(&self.settings_path)
            .with_context(|| format!("Failed to save {}", self.settings_path.display()))
    }
}

/// Handle coin management commands
pub async fn handle_coins(
    ctx: &mut AppContext,
    command: CoinCommands,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        CoinCommands::List => {
            let formatted = crate::format::format_coins(
                &ctx.settings.coins,
                ctx.coin_name(),
                &format.into(),
            )?;
            println!("{}", formatted);
        }
        CoinCommands::Show { name } => {
            let name = name.unwrap_or_else(|| ctx.coin_name().to_string());
            let coin = ctx.settings.coin(&name)?;
            println!(
                "{}",
                crate::format::format_coin(&name, coin, &format.into())?
            );
        }
        CoinCommands::Add {
            name,
            cli,
            daemon,
            datadir,
            port,
        } => {
            let config = CoinConfig::new(cli)
                .with_daemon(daemon)
                .with_datadir(datadir)
                .with_port(port);
            let replaced = ctx.settings.add_coin(&name, config)?;
            ctx.save_settings()?;
            let verb = if replaced { "updated" } else { "added" };
            println!(
                "{}",
                format_success(&format!("Coin '{}' {} successfully", name.trim(), verb))
            );
        }
        CoinCommands::Remove { name } => {
            // Fail before asking if the removal cannot happen.
            ctx.settings.check_removable(&name)?;
            if !prompt::confirm(&format!("Remove coin '{}'?", name), ctx.assume_yes)? {
                println!("Cancelled");
                return Ok(());
            }
            ctx.settings.remove_coin(&name)?;
            ctx.save_settings()?;
            println!("{}", format_success(&format!("Coin '{}' removed", name)));
        }
        CoinCommands::Use { name } => {
            ctx.settings.select_coin(&name)?;
            ctx.save_settings()?;
            info!("Switched to {}", name);
            println!("{}", format_success(&format!("Switched to {}", name)));
        }
    }

    Ok(())
}

/// Handle wallet commands
pub async fn handle_wallet(
    ctx: &AppContext,
    command: WalletCommands,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        WalletCommands::Balance => {
            let balance = ctx.run(&WalletAction::GetBalance).await?;
            println!(
                "{}",
                crate::format::format_balance(ctx.coin_name(), &balance, &format.into())?
            );
        }
        WalletCommands::Addresses => {
            let output = ctx.run(&WalletAction::ListAddresses).await?;
            let addresses = parse_received(&output)?;
            println!(
                "{}",
                crate::format::format_addresses(&addresses, &format.into())?
            );
        }
        WalletCommands::NewAddress { label } => {
            let address = ctx.run(&WalletAction::NewAddress { label }).await?;
            match format {
                OutputFormat::Json => {
                    let response = serde_json::json!({ "address": address });
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                OutputFormat::Table => {
                    println!("{}", format_success(&format!("Address: {}", address.cyan())));
                }
            }
        }
        WalletCommands::ImportAddress { address, label } => {
            ctx.run(&WalletAction::ImportAddress { address, label })
                .await?;
            println!("{}", format_success("Address imported successfully"));
        }
        WalletCommands::Encrypt => {
            let passphrase = prompt::ask_secret_required("Enter passphrase", "Passphrase")?;
            let confirmation = prompt::ask_secret_required("Confirm passphrase", "Passphrase")?;
            if passphrase != confirmation {
                anyhow::bail!("Passphrases do not match");
            }
            ctx.run(&WalletAction::EncryptWallet { passphrase }).await?;
            println!("{}", format_success("Wallet encrypted. Daemon will restart."));
        }
        WalletCommands::Unlock { seconds } => {
            let passphrase = prompt::ask_secret_required("Enter passphrase", "Passphrase")?;
            ctx.run(&WalletAction::UnlockWallet {
                passphrase,
                timeout_secs: seconds,
            })
            .await?;
            println!(
                "{}",
                format_success(&format!("Wallet unlocked for {} seconds", seconds))
            );
        }
        WalletCommands::Lock => {
            ctx.run(&WalletAction::LockWallet).await?;
            println!("{}", format_success("Wallet locked"));
        }
        WalletCommands::Backup { destination } => {
            ctx.run(&WalletAction::BackupWallet {
                destination: destination.clone(),
            })
            .await?;
            println!(
                "{}",
                format_success(&format!("Wallet backed up to: {}", destination))
            );
        }
        WalletCommands::DumpPrivkey { address } => {
            let key = ctx.run(&WalletAction::DumpPrivkey { address }).await?;
            match format {
                OutputFormat::Json => {
                    let response = serde_json::json!({ "private_key": key });
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                OutputFormat::Table => {
                    println!("Private key: {}", key.bold());
                    println!("{}", format_warning("KEEP THIS SAFE!"));
                }
            }
        }
        WalletCommands::ImportPrivkey { label } => {
            let key = prompt::ask_secret_required("Enter private key", "Private key")?;
            ctx.run(&WalletAction::ImportPrivkey { key, label }).await?;
            println!("{}", format_success("Private key imported successfully"));
        }
        WalletCommands::Create { name } => {
            ctx.run(&WalletAction::CreateWallet { name: name.clone() })
                .await?;
            println!(
                "{}",
                format_success(&format!("Wallet '{}' created successfully", name.trim()))
            );
        }
    }

    Ok(())
}

/// Handle transaction commands
pub async fn handle_tx(ctx: &AppContext, command: TxCommands, format: &OutputFormat) -> Result<()> {
    match command {
        TxCommands::Send {
            address,
            amount,
            comment,
        } => {
            let action = WalletAction::SendToAddress {
                address: address.trim().to_string(),
                amount: amount.trim().to_string(),
                comment,
            };
            action.validate()?;

            let question = format!("Send {} to {}?", amount.trim(), address.trim());
            if !prompt::confirm(&question, ctx.assume_yes)? {
                println!("Cancelled");
                return Ok(());
            }

            let txid = ctx.run(&action).await?;
            info!("Transaction sent: {}", txid);
            match format {
                OutputFormat::Json => {
                    let response = serde_json::json!({ "txid": txid });
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                OutputFormat::Table => {
                    println!("{}", format_success(&format!("Transaction ID: {}", txid)));
                }
            }
        }
        TxCommands::List { count } => {
            let output = ctx.run(&WalletAction::ListTransactions { count }).await?;
            let transactions = parse_transactions(&output)?;
            println!(
                "{}",
                crate::format::format_transactions(&transactions, &format.into())?
            );
        }
    }

    Ok(())
}

/// Handle mining commands
pub async fn handle_mining(
    ctx: &AppContext,
    command: MiningCommands,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        MiningCommands::Start { threads } => {
            ctx.run(&WalletAction::StartMining { threads }).await?;
            println!(
                "{}",
                format_success(&format!("Mining started with {} thread(s)", threads))
            );
        }
        MiningCommands::Stop => {
            ctx.run(&WalletAction::StopMining).await?;
            println!("{}", format_success("Mining stopped"));
        }
        MiningCommands::Info => {
            let output = ctx.run(&WalletAction::MiningInfo).await?;
            print_raw_output(&output, format)?;
        }
    }

    Ok(())
}

/// Handle tools commands
pub async fn handle_tools(
    ctx: &AppContext,
    command: ToolsCommands,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        ToolsCommands::SeedGenerate { words } => {
            let phrase = seed::generate(words)?;
            info!("Seed phrase generated");
            match format {
                OutputFormat::Json => {
                    let response = serde_json::json!({
                        "words": words,
                        "seed_phrase": phrase.as_str(),
                    });
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                OutputFormat::Table => {
                    println!("{}", phrase.as_str().bold());
                    println!(
                        "{}",
                        format_warning(&format!(
                            "{}-word seed phrase generated. KEEP THIS SAFE!",
                            words
                        ))
                    );
                }
            }
        }
        ToolsCommands::SeedValidate { words } => {
            let phrase = if words.is_empty() {
                prompt::ask_required("Enter seed phrase", "Seed phrase")?
            } else {
                words.join(" ")
            };
            let check = seed::validate(&phrase)?;
            println!(
                "{}",
                crate::format::format_seed_check(&check, &format.into())?
            );
            if !check.is_valid() {
                anyhow::bail!("Invalid seed phrase");
            }
        }
        ToolsCommands::SeedRestore => {
            let Some(phrase) = prompt::ask("Enter seed phrase")? else {
                return Ok(());
            };
            let check = seed::validate(&phrase)?;
            if !check.is_valid() {
                println!(
                    "{}",
                    crate::format::format_seed_check(&check, &crate::format::OutputFormat::Table)?
                );
            }
            info!("Seed restoration requested for {}", ctx.coin_name());
            println!(
                "Seed phrase restoration requires coin-specific implementation.\n\
                 Please refer to the {} documentation for seed restoration.",
                ctx.coin_name()
            );
        }
        ToolsCommands::ValidateAddress { address } => {
            let output = ctx.run(&WalletAction::ValidateAddress { address }).await?;
            print_raw_output(&output, format)?;
        }
        ToolsCommands::AddressInfo { address } => {
            let output = ctx.run(&WalletAction::AddressInfo { address }).await?;
            print_raw_output(&output, format)?;
        }
        ToolsCommands::Qr { address, save, dir } => {
            println!("{}", qr::render_terminal(&address)?);
            println!("{}", address.trim().cyan());
            if save {
                let path = qr::save_svg(&address, &dir)?;
                println!(
                    "{}",
                    format_success(&format!("QR code saved to: {}", path.display()))
                );
            }
        }
    }

    Ok(())
}

/// Handle backup commands
pub async fn handle_backup(
    ctx: &AppContext,
    command: BackupCommands,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        BackupCommands::All { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&ctx.settings.backup_dir));
            let report = backup::backup_all(&ctx.settings.coins, &dir)
                .with_context(|| format!("Backup to {} failed", dir.display()))?;
            println!(
                "{}",
                crate::format::format_backup_report(&report, &format.into())?
            );
        }
        BackupCommands::Restore { file } => {
            require_file(&file)?;
            let question = "This will replace your current wallet. \
                            Make sure you have a backup! Continue?";
            if !prompt::confirm(question, ctx.assume_yes)? {
                println!("Cancelled");
                return Ok(());
            }
            let steps = backup::restore_instructions(ctx.coin_name(), ctx.coin()?, &file);
            println!("{}", crate::format::format_steps("To restore wallet:", &steps));
        }
        BackupCommands::Import { file } => {
            require_file(&file)?;
            let steps = backup::restore_instructions(ctx.coin_name(), ctx.coin()?, &file);
            println!("{}", crate::format::format_steps("To import wallet:", &steps));
        }
    }

    Ok(())
}

fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(anyhow::anyhow!("File not found: {}", path.display()))
    }
}

/// Handle refresh: balance, then transaction history
pub async fn handle_refresh(ctx: &AppContext, format: &OutputFormat) -> Result<()> {
    let balance = ctx.run(&WalletAction::GetBalance).await?;
    let output = ctx
        .run(&WalletAction::ListTransactions {
            count: crate::actions::DEFAULT_TRANSACTION_COUNT,
        })
        .await?;
    let transactions = parse_transactions(&output)?;

    match format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "coin": ctx.coin_name(),
                "balance": balance,
                "transactions": transactions,
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Table => {
            println!(
                "{}",
                crate::format::format_balance(ctx.coin_name(), &balance, &format.into())?
            );
            println!(
                "{}",
                crate::format::format_transactions(&transactions, &format.into())?
            );
        }
    }

    Ok(())
}

/// Handle a custom wallet command
pub async fn handle_exec(ctx: &AppContext, args: Vec<String>, format: &OutputFormat) -> Result<()> {
    let output = ctx.run(&WalletAction::Raw { args }).await?;
    print_raw_output(&output, format)
}

/// Print wallet output as-is, or wrapped in JSON when it is not JSON already.
fn print_raw_output(output: &str, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::from_str::<serde_json::Value>(output)
                .unwrap_or_else(|_| serde_json::json!({ "output": output }));
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => println!("{}", output),
    }
    Ok(())
}

/// Start the interactive console
pub async fn handle_console(ctx: AppContext) -> Result<()> {
    let mut settings = ctx.settings;
    if let Some(coin) = ctx.coin_override.as_deref() {
        settings.coin(coin)?;
        settings.current_coin = coin.to_string();
    }

    let queue = TaskQueue::new();
    let session = Session::new(settings, ctx.settings_path, ctx.runner, queue.handle());
    console::run_interactive(session, queue).await
}

/// Handle wallet settings commands
pub async fn handle_settings(
    ctx: &mut AppContext,
    command: SettingsCommands,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        SettingsCommands::Show => {
            println!(
                "{}",
                crate::format::format_settings(&ctx.settings, &format.into())?
            );
        }
        SettingsCommands::Set { key, value } => {
            match key.as_str() {
                "backup_dir" => {
                    if value.trim().is_empty() {
                        anyhow::bail!("Backup directory cannot be empty");
                    }
                    ctx.settings.backup_dir = value.trim().to_string();
                }
                "auto_backup" => {
                    ctx.settings.auto_backup = parse_bool(&value)?;
                }
                "current_coin" => ctx.settings.select_coin(value.trim())?,
                _ => return Err(anyhow::anyhow!("Unknown setting: {}", key)),
            }
            ctx.save_settings()?;
            println!("{}", format_success("Settings saved"));
        }
    }

    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "Invalid boolean '{}'. Use true or false",
            value
        )),
    }
}

/// Handle config commands
pub async fn handle_config(
    command: ConfigCommands,
    current_config: &CliConfig,
    config_path: &Path,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        ConfigCommands::Show => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(current_config)?);
            }
            OutputFormat::Table => {
                println!("CLI Configuration:");
                println!("{:<20} Value", "Setting");
                println!("{}", "-".repeat(40));
                println!("{:<20} {}", "Output Format", current_config.output_format);
                println!("{:<20} {}", "Verbose", current_config.verbose);
                println!("{:<20} {}s", "Timeout", current_config.timeout);
                println!(
                    "{:<20} {}",
                    "Settings File",
                    current_config.settings_path().display()
                );
                println!("{:<20} {}", "Config File", config_path.display());
            }
        },
        ConfigCommands::Set { key, value } => {
            // Edit what is on disk, not the merged view with env and flags.
            let mut config = CliConfig::load(config_path)?;
            match key.as_str() {
                "output_format" => {
                    crate::config::ConfigBuilder::validate_output_format(&value)?;
                    config.output_format = value.clone();
                }
                "verbose" => {
                    config.verbose = value.to_lowercase() == "true" || value == "1";
                }
                "timeout" => {
                    let timeout = value
                        .parse()
                        .map_err(|_| anyhow::anyhow!("Invalid timeout value. Must be a number"))?;
                    crate::config::ConfigBuilder::validate_timeout(timeout)?;
                    config.timeout = timeout;
                }
                "settings_path" => {
                    config.settings_path = if value.trim().is_empty() {
                        None
                    } else {
                        Some(PathBuf::from(value.trim()))
                    };
                }
                _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
            }

            config.save(config_path)?;
            println!("{}", format_success(&format!("Set {} = {}", key, value)));
        }
        ConfigCommands::Reset => {
            CliConfig::default().save(config_path)?;
            println!("{}", format_success("Configuration reset to defaults"));
        }
    }

    Ok(())
}

/// Print program information
pub fn handle_about(ctx: &AppContext, format: &OutputFormat) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    match format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "name": "walletctl",
                "version": version,
                "coins": ctx.settings.coins.len(),
                "current_coin": ctx.settings.current_coin,
                "settings": ctx.settings_path,
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Table => {
            println!("{} {}", "walletctl".bold(), version);
            println!("A multi-coin wallet manager for any cryptocurrency with a CLI.");
            println!();
            println!(
                "{} coins configured, current: {}",
                ctx.settings.coins.len(),
                ctx.settings.current_coin.cyan()
            );
            println!("Settings: {}", ctx.settings_path.display());
        }
    }
    Ok(())
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn context(dir: &Path) -> AppContext {
        AppContext::new(
            WalletSettings::default(),
            dir.join("settings.json"),
            CliRunner::new(Duration::from_secs(5)),
        )
    }

    #[test]
    fn test_coin_override() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        assert_eq!(ctx.coin_name(), "Bitcoin");

        ctx.coin_override = Some("Litecoin".to_string());
        assert_eq!(ctx.coin_name(), "Litecoin");
        assert_eq!(ctx.coin().unwrap().cli, "litecoin-cli");

        ctx.coin_override = Some("Nope".to_string());
        assert!(ctx.coin().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[tokio::test]
    async fn test_coins_add_use_remove_persist() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        ctx.assume_yes = true;

        handle_coins(
            &mut ctx,
            CoinCommands::Add {
                name: "Testcoin".to_string(),
                cli: "testcoin-cli".to_string(),
                daemon: String::new(),
                datadir: String::new(),
                port: 0,
            },
            &OutputFormat::Table,
        )
        .await
        .unwrap();

        handle_coins(
            &mut ctx,
            CoinCommands::Use {
                name: "Testcoin".to_string(),
            },
            &OutputFormat::Table,
        )
        .await
        .unwrap();

        let saved = WalletSettings::load_or_create(&ctx.settings_path).unwrap();
        assert_eq!(saved.current_coin, "Testcoin");
        assert_eq!(saved.coins["Testcoin"].cli, "testcoin-cli");

        // The current coin cannot be removed.
        let err = handle_coins(
            &mut ctx,
            CoinCommands::Remove {
                name: "Testcoin".to_string(),
            },
            &OutputFormat::Table,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Testcoin"));

        handle_coins(
            &mut ctx,
            CoinCommands::Remove {
                name: "Dogecoin".to_string(),
            },
            &OutputFormat::Table,
        )
        .await
        .unwrap();
        let saved = WalletSettings::load_or_create(&ctx.settings_path).unwrap();
        assert!(!saved.coins.contains_key("Dogecoin"));
    }

    #[tokio::test]
    async fn test_settings_set() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());

        handle_settings(
            &mut ctx,
            SettingsCommands::Set {
                key: "auto_backup".to_string(),
                value: "false".to_string(),
            },
            &OutputFormat::Table,
        )
        .await
        .unwrap();
        assert!(!ctx.settings.auto_backup);

        let err = handle_settings(
            &mut ctx,
            SettingsCommands::Set {
                key: "theme".to_string(),
                value: "dark".to_string(),
            },
            &OutputFormat::Table,
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown setting: theme");

        let saved = WalletSettings::load_or_create(&ctx.settings_path).unwrap();
        assert!(!saved.auto_backup);
    }

    #[tokio::test]
    async fn test_config_set_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.toml");
        let current = CliConfig::default();

        handle_config(
            ConfigCommands::Set {
                key: "timeout".to_string(),
                value: "90".to_string(),
            },
            &current,
            &path,
            &OutputFormat::Table,
        )
        .await
        .unwrap();
        assert_eq!(CliConfig::load(&path).unwrap().timeout, 90);

        assert!(handle_config(
            ConfigCommands::Set {
                key: "timeout".to_string(),
                value: "0".to_string(),
            },
            &current,
            &path,
            &OutputFormat::Table,
        )
        .await
        .is_err());

        handle_config(ConfigCommands::Reset, &current, &path, &OutputFormat::Table)
            .await
            .unwrap();
        assert_eq!(CliConfig::load(&path).unwrap(), CliConfig::default());
    }

    #[tokio::test]
    async fn test_backup_restore_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let err = handle_backup(
            &ctx,
            BackupCommands::Import {
                file: dir.path().join("missing.dat"),
            },
            &OutputFormat::Table,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }

    #[tokio::test]
    async fn test_send_validates_before_confirming() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        let err = handle_tx(
            &ctx,
            TxCommands::Send {
                address: "bc1qaddress".to_string(),
                amount: "  ".to_string(),
                comment: None,
            },
            &OutputFormat::Table,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("required"));
    }
}
