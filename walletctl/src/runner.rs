//! Process runner for wallet command-line tools.

use std::io::ErrorKind;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};
use wallet_core::{CoinConfig, WalletError};

use crate::actions::WalletAction;

/// Default time a wallet command may run before it is killed.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Why a wallet command did not produce a usable result.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The executable does not exist
    #[error("CLI not found: {program}")]
    NotFound { program: String },

    /// The command outlived the runner's timeout and was killed
    #[error("Command timed out after {}s", .timeout.as_secs())]
    TimedOut { program: String, timeout: Duration },

    /// Nonzero exit, or anything written to stderr
    #[error("{message}")]
    Failed {
        status: Option<i32>,
        message: String,
    },

    /// Any other failure to launch the process
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The action's own fields were rejected before spawning
    #[error(transparent)]
    Invalid(#[from] WalletError),
}

/// A fully resolved command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// `<cli> [-datadir=<dir>] <args...>` for a coin.
    pub fn for_coin(coin: &CoinConfig, args: Vec<String>) -> Self {
        let mut full_args = Vec::with_capacity(args.len() + 1);
        if let Some(datadir) = coin.datadir_arg() {
            full_args.push(datadir);
        }
        full_args.extend(args);

        Self {
            program: coin.cli.trim().to_string(),
            args: full_args,
        }
    }

    /// Full command line as one string.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs wallet CLIs with a timeout and classifies the outcome.
///
/// Each call blocks the caller until the process exits or the timeout fires;
/// a timed-out process is killed. Nothing is retried.
#[derive(Debug, Clone)]
pub struct CliRunner {
    timeout: Duration,
}

impl Default for CliRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl CliRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run an invocation and return its trimmed stdout.
    ///
    /// # Errors
    ///
    /// - [`CommandError::NotFound`] if the executable does not exist
    /// - [`CommandError::TimedOut`] if it runs longer than the timeout
    /// - [`CommandError::Failed`] on nonzero exit or non-empty stderr
    /// - [`CommandError::Spawn`] for other launch failures
    pub async fn run(&self, invocation: &Invocation) -> Result<String, CommandError> {
        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CommandError::NotFound {
                    program: invocation.program.clone(),
                },
                _ => CommandError::Spawn {
                    program: invocation.program.clone(),
                    source: e,
                },
            })?;

        // Dropping the output future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| CommandError::Spawn {
                program: invocation.program.clone(),
                source: e,
            })?,
            Err(_) => {
                return Err(CommandError::TimedOut {
                    program: invocation.program.clone(),
                    timeout: self.timeout,
                })
            }
        };

        classify(
            output.status,
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )
    }

    /// Validate an action, then run it against a coin.
    ///
    /// If the action fails and has a fallback (e.g. `getaddressinfo` →
    /// `validateaddress`), the fallback is tried once.
    pub async fn run_action(
        &self,
        coin: &CoinConfig,
        action: &WalletAction,
    ) -> Result<String, CommandError> {
        action.validate()?;

        let invocation = Invocation::for_coin(coin, action.args());
        debug!(
            "{} ({})",
            action.status(),
            Invocation::for_coin(coin, action.display_args()).command_line()
        );

        match self.run(&invocation).await {
            Ok(output) => Ok(output),
            Err(e) => {
                warn!("{} failed: {}", invocation.program, e);
                match action.fallback() {
                    Some(fallback) => {
                        let invocation = Invocation::for_coin(coin, fallback.args());
                        debug!("Retrying with {}", invocation.command_line());
                        self.run(&invocation).await
                    }
                    None => Err(e),
                }
            }
        }
    }
}

/// Decide success or failure from a finished process.
fn classify(status: ExitStatus, stdout: &str, stderr: &str) -> Result<String, CommandError> {
    let stderr = stderr.trim();

    if !status.success() {
        let message = if stderr.is_empty() {
            match status.code() {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            }
        } else {
            stderr.to_string()
        };
        return Err(CommandError::Failed {
            status: status.code(),
            message,
        });
    }

    if !stderr.is_empty() {
        return Err(CommandError::Failed {
            status: status.code(),
            message: stderr.to_string(),
        });
    }

    Ok(stdout.trim().to_string())
}
