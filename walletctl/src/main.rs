//! walletctl
//!
//! Command-line front-end for cryptocurrency wallet CLIs.

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::time::Duration;
use tracing::debug;
use wallet_core::WalletSettings;
use walletctl::cli::{
    generate_completion, handle_about, handle_backup, handle_coins, handle_config,
    handle_console, handle_exec, handle_mining, handle_refresh, handle_settings, handle_tools,
    handle_tx, handle_wallet, AppContext, Cli, Commands, OutputFormat,
};
use walletctl::config::CliConfig;
use walletctl::runner::CliRunner;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build configuration using priority chain: CLI args → env → file → defaults.
    // Each source only fills what a higher-priority one left unset.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(wallet_core::default_cli_config_path);

    let config = match build_config(&cli, &config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Configuration error:".red(), e);
            std::process::exit(1);
        }
    };

    init_tracing(config.verbose);

    let output_format = match config.output_format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };
    debug!("Output format: {:?}", output_format);
    debug!("Command timeout: {}s", config.timeout);

    let settings_path = config.settings_path();
    debug!("Settings file: {}", settings_path.display());

    // Completion and config commands work without a readable settings file.
    let result = match cli.command {
        Commands::Completion { shell } => {
            generate_completion(shell);
            Ok(())
        }
        Commands::Config { command } => {
            handle_config(command, &config, &config_path, &output_format).await
        }
        command => match WalletSettings::load_or_create(&settings_path) {
            Ok(settings) => {
                let runner = CliRunner::new(Duration::from_secs(config.timeout));
                let mut ctx = AppContext::new(settings, settings_path, runner);
                ctx.coin_override = cli.coin;
                ctx.assume_yes = cli.yes;
                dispatch(ctx, command, &output_format).await
            }
            Err(e) => Err(e.into()),
        },
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), format!("{:#}", e).red());
        if config.verbose {
            eprintln!("Error details: {:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn build_config(cli: &Cli, config_path: &std::path::Path) -> Result<CliConfig> {
    let mut builder = CliConfig::builder();

    if let Some(ref format) = cli.format {
        builder = builder.with_output_format(format.as_str())?;
    }
    if cli.verbose {
        builder = builder.with_verbose(true);
    }
    if let Some(timeout) = cli.timeout {
        builder = builder.with_timeout(timeout)?;
    }
    if let Some(ref settings) = cli.settings {
        builder = builder.with_settings_path(settings);
    }

    builder = builder.with_env_overrides();

    // Load config file (unless --no-config is specified)
    if !cli.no_config {
        builder = builder.with_config_file(Some(config_path));
    }

    builder.build()
}

async fn dispatch(mut ctx: AppContext, command: Commands, format: &OutputFormat) -> Result<()> {
    match command {
        Commands::Coins { command } => handle_coins(&mut ctx, command, format).await,
        Commands::Wallet { command } => handle_wallet(&ctx, command, format).await,
        Commands::Tx { command } => handle_tx(&ctx, command, format).await,
        Commands::Mining { command } => handle_mining(&ctx, command, format).await,
        Commands::Tools { command } => handle_tools(&ctx, command, format).await,
        Commands::Backup { command } => handle_backup(&ctx, command, format).await,
        Commands::Refresh => handle_refresh(&ctx, format).await,
        Commands::Exec { args } => handle_exec(&ctx, args, format).await,
        Commands::Console => handle_console(ctx).await,
        Commands::Settings { command } => handle_settings(&mut ctx, command, format).await,
        Commands::About => handle_about(&ctx, format),
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}

/// Initialize tracing/logging, on stderr so it never mixes with command output.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
