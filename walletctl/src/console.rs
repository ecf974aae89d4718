//! Interactive console: a log pane, a command line, and a deferred-task queue.
//!
//! Everything runs on one task. Input lines are handled as they arrive, and a
//! fixed tick drains the [`TaskQueue`] so work deferred by a command (such as
//! a refresh after switching coins) runs after the command's own output.

use anyhow::Result;
use colored::*;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use wallet_core::{backup, parse_transactions, WalletSettings};

use crate::actions::{WalletAction, DEFAULT_TRANSACTION_COUNT, QUICK_COMMANDS};
use crate::format::{format_transactions, OutputFormat};
use crate::runner::CliRunner;

/// How often the task queue is drained.
pub const DRAIN_INTERVAL: Duration = Duration::from_millis(100);

/// One line (or block) in the console log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub is_error: bool,
}

/// Append-only console output, with a cursor for what has been printed.
#[derive(Debug, Default)]
pub struct ConsoleLog {
    entries: Vec<LogEntry>,
    flushed: usize,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.entries.push(LogEntry {
            message: message.into(),
            is_error: false,
        });
    }

    /// Log an error line; rendered in red.
    pub fn error(&mut self, message: impl Into<String>) {
        self.entries.push(LogEntry {
            message: message.into(),
            is_error: true,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.flushed = 0;
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    fn render_entry(entry: &LogEntry) -> String {
        if entry.is_error {
            entry.message.red().to_string()
        } else {
            entry.message.clone()
        }
    }

    /// Write entries added since the previous flush.
    pub fn flush<W: Write>(&mut self, writer: &mut W) -> std::io::Result<()> {
        for entry in &self.entries[self.flushed..] {
            writeln!(writer, "{}", Self::render_entry(entry))?;
        }
        self.flushed = self.entries.len();
        writer.flush()
    }
}

/// Work deferred to the next queue drain.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Balance, then transaction history, for the current coin
    Refresh,
    /// Make a coin current and persist it; defers a [`Task::Refresh`]
    SwitchCoin(String),
    /// Run an action against the current coin and log its output
    Run(WalletAction),
}

/// Handle used to defer tasks; cheap to clone.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    tx: mpsc::UnboundedSender<Task>,
}

impl TaskHandle {
    pub fn defer(&self, task: Task) {
        // The receiver lives as long as the console; a send after shutdown is dropped.
        if self.tx.send(task).is_err() {
            debug!("Task queue closed; dropping deferred task");
        }
    }
}

/// Single FIFO queue of deferred tasks.
#[derive(Debug)]
pub struct TaskQueue {
    tx: mpsc::UnboundedSender<Task>,
    rx: mpsc::UnboundedReceiver<Task>,
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn handle(&self) -> TaskHandle {
        TaskHandle {
            tx: self.tx.clone(),
        }
    }

    /// Run pending tasks in order until the queue is empty.
    ///
    /// Tasks deferred by a task run in the same drain. Returns how many ran.
    pub async fn drain(&mut self, session: &mut Session) -> usize {
        let mut count = 0;
        while let Ok(task) = self.rx.try_recv() {
            session.apply(task).await;
            count += 1;
        }
        count
    }
}

/// What the loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Quit,
}

/// State of an interactive session.
pub struct Session {
    pub settings: WalletSettings,
    settings_path: PathBuf,
    runner: CliRunner,
    tasks: TaskHandle,
    pub log: ConsoleLog,
}

impl Session {
    pub fn new(
        settings: WalletSettings,
        settings_path: PathBuf,
        runner: CliRunner,
        tasks: TaskHandle,
    ) -> Self {
        Self {
            settings,
            settings_path,
            runner,
            tasks,
            log: ConsoleLog::new(),
        }
    }

    pub fn current_coin(&self) -> &str {
        &self.settings.current_coin
    }

    /// Handle one line of input.
    pub async fn handle_line(&mut self, line: &str) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Continue;
        }

        if let Some(builtin) = line.strip_prefix(':') {
            return self.handle_builtin(builtin);
        }

        let action = WalletAction::from_command_line(line);
        self.log.log(format!("$ {}", action.display_args().join(" ")));
        self.run_and_log(&action).await;
        LineOutcome::Continue
    }

    fn handle_builtin(&mut self, builtin: &str) -> LineOutcome {
        let mut parts = builtin.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let rest = parts.next().map(str::trim).unwrap_or_default();

        match name {
            "quit" | "exit" | "q" => return LineOutcome::Quit,
            "clear" => self.log.clear(),
            "use" => {
                if rest.is_empty() {
                    self.log.error("Usage: :use <coin>");
                } else {
                    self.tasks.defer(Task::SwitchCoin(rest.to_string()));
                }
            }
            "coins" => {
                let names: Vec<String> = self
                    .settings
                    .coin_names()
                    .map(|name| {
                        if name == self.settings.current_coin {
                            format!("* {}", name)
                        } else {
                            format!("  {}", name)
                        }
                    })
                    .collect();
                self.log.log(names.join("\n"));
            }
            "quick" => self.quick(rest),
            "refresh" => self.tasks.defer(Task::Refresh),
            "help" => self.log.log(HELP_TEXT),
            other => self
                .log
                .error(format!("Unknown console command ':{}' (try :help)", other)),
        }
        LineOutcome::Continue
    }

    /// List the quick commands, or schedule the one numbered `choice`.
    fn quick(&mut self, choice: &str) {
        if choice.is_empty() {
            let listing: Vec<String> = QUICK_COMMANDS
                .iter()
                .enumerate()
                .map(|(i, command)| format!("  {}. {}", i + 1, command))
                .collect();
            self.log
                .log(format!("Quick commands:\n{}", listing.join("\n")));
            return;
        }

        match choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| QUICK_COMMANDS.get(i))
        {
            Some(command) => {
                self.log.log(format!("$ {}", command));
                self.tasks
                    .defer(Task::Run(WalletAction::from_command_line(command)));
            }
            None => self.log.error(format!(
                "No quick command '{}' (1-{})",
                choice,
                QUICK_COMMANDS.len()
            )),
        }
    }

    /// Make `coin` current, persist it, and schedule a refresh.
    pub fn switch_coin(&mut self, coin: &str) {
        if let Err(e) = self.settings.select_coin(coin) {
            self.log.error(format!("Error: {}", e));
            return;
        }
        if let Err(e) = self.settings.save(&self.settings_path) {
            self.log.error(format!("Error: {}", e));
        }
        info!("Switched to {}", coin);
        self.log.log(format!("Switched to {}", coin));
        self.tasks.defer(Task::Refresh);
    }

    /// Execute a deferred task.
    pub async fn apply(&mut self, task: Task) {
        match task {
            Task::Refresh => self.refresh().await,
            Task::SwitchCoin(coin) => self.switch_coin(&coin),
            Task::Run(action) => self.run_and_log(&action).await,
        }
    }

    /// Run an action against the current coin; output and errors go to the log.
    async fn run_and_log(&mut self, action: &WalletAction) {
        let coin = match self.settings.current() {
            Ok(coin) => coin.clone(),
            Err(e) => {
                self.log.error(format!("Error: {}", e));
                return;
            }
        };

        match self.runner.run_action(&coin, action).await {
            Ok(output) if output.is_empty() => {}
            Ok(output) => self.log.log(output),
            Err(e) => self.log.error(format!("Error: {}", e)),
        }
    }

    async fn refresh(&mut self) {
        let coin_name = self.settings.current_coin.clone();
        let coin = match self.settings.current() {
            Ok(coin) => coin.clone(),
            Err(e) => {
                self.log.error(format!("Error: {}", e));
                return;
            }
        };

        match self.runner.run_action(&coin, &WalletAction::GetBalance).await {
            Ok(balance) => self.log.log(format!("Balance: {} ({})", balance, coin_name)),
            Err(e) => self.log.error(format!("Error: {}", e)),
        }

        let action = WalletAction::ListTransactions {
            count: DEFAULT_TRANSACTION_COUNT,
        };
        let output = match self.runner.run_action(&coin, &action).await {
            Ok(output) => output,
            Err(e) => {
                self.log.error(format!("Error: {}", e));
                return;
            }
        };

        match parse_transactions(&output) {
            Ok(transactions) => {
                match format_transactions(&transactions, &OutputFormat::Table) {
                    Ok(table) => self.log.log(table),
                    Err(e) => self.log.error(format!("Error: {}", e)),
                }
                self.log
                    .log(format!("Loaded {} transactions", transactions.len()));
            }
            Err(e) => self
                .log
                .error(format!("Error parsing transactions: {}", e)),
        }
    }

    /// Leave the session, backing up wallets first if auto-backup is on.
    pub fn shutdown(&mut self) {
        if !self.settings.auto_backup {
            return;
        }
        let dir = PathBuf::from(&self.settings.backup_dir);
        match backup::backup_all(&self.settings.coins, &dir) {
            Ok(report) => self.log.log(format!(
                "Auto-backup: {} wallet(s) saved to {}",
                report.count(),
                dir.display()
            )),
            Err(e) => {
                warn!("Auto-backup failed: {}", e);
                self.log.error(format!("Auto-backup failed: {}", e));
            }
        }
    }
}

const HELP_TEXT: &str = "\
Type a wallet command (e.g. getblockcount) to run it against the current coin.
Console commands:
  :use <coin>   switch coin and refresh
  :coins        list configured coins
  :refresh      show balance and recent transactions
  :quick [n]    list quick commands, or run number n
  :clear        clear the console
  :quit         leave the console";

/// Run the interactive console on stdin/stdout until `:quit` or end of input.
pub async fn run_interactive(mut session: Session, mut queue: TaskQueue) -> Result<()> {
    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tick = tokio::time::interval(DRAIN_INTERVAL);

    let banner = format!(
        "{} Current coin: {}. Type :help for console commands.",
        "walletctl console.".bold(),
        session.current_coin().cyan()
    );
    session.log.log(banner);
    session.log.flush(&mut stdout)?;
    print_prompt(&session, &mut stdout)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let outcome = session.handle_line(&line).await;
                session.log.flush(&mut stdout)?;
                if outcome == LineOutcome::Quit {
                    break;
                }
                print_prompt(&session, &mut stdout)?;
            }
            _ = tick.tick() => {
                if queue.drain(&mut session).await > 0 {
                    session.log.flush(&mut stdout)?;
                    print_prompt(&session, &mut stdout)?;
                }
            }
        }
    }

    queue.drain(&mut session).await;
    session.shutdown();
    session.log.flush(&mut stdout)?;
    Ok(())
}

fn print_prompt<W: Write>(session: &Session, writer: &mut W) -> std::io::Result<()> {
    write!(writer, "{}> ", session.current_coin().cyan())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallet_core::CoinConfig;

    fn session_with(settings: WalletSettings) -> (Session, TaskQueue, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let queue = TaskQueue::new();
        let session = Session::new(
            settings,
            dir.path().join("settings.json"),
            CliRunner::new(Duration::from_secs(5)),
            queue.handle(),
        );
        (session, queue, dir)
    }

    fn missing_cli_settings() -> WalletSettings {
        let mut settings = WalletSettings::default();
        settings
            .add_coin("Ghost", CoinConfig::new("walletctl-ghost-cli"))
            .unwrap();
        settings.select_coin("Ghost").unwrap();
        settings
    }

    #[test]
    fn test_console_log_flush_only_new_entries() {
        colored::control::set_override(false);
        let mut log = ConsoleLog::new();
        log.log("first");
        let mut out = Vec::new();
        log.flush(&mut out).unwrap();
        log.error("Error: second");
        log.flush(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "first\nError: second\n");
        assert_eq!(log.entries().len(), 2);
        assert!(log.entries()[1].is_error);

        log.clear();
        assert!(log.entries().is_empty());
        let mut out = Vec::new();
        log.flush(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_drain_runs_tasks_in_order() {
        let (mut session, mut queue, _dir) = session_with(WalletSettings::default());
        let handle = queue.handle();
        handle.defer(Task::SwitchCoin("First".to_string()));
        handle.defer(Task::SwitchCoin("Second".to_string()));

        assert_eq!(queue.drain(&mut session).await, 2);
        let messages: Vec<&str> = session
            .log
            .entries()
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(
            messages,
            [
                "Error: Coin not configured: First",
                "Error: Coin not configured: Second"
            ]
        );
        assert_eq!(queue.drain(&mut session).await, 0);
    }

    #[tokio::test]
    async fn test_use_switches_coin_and_defers_refresh() {
        let (mut session, mut queue, dir) = session_with(missing_cli_settings());

        let outcome = session.handle_line(":use Litecoin").await;
        assert_eq!(outcome, LineOutcome::Continue);
        // Nothing happens until the queue is drained.
        assert_eq!(session.current_coin(), "Ghost");

        // The switch defers a refresh, which runs in the same drain.
        assert_eq!(queue.drain(&mut session).await, 2);
        assert_eq!(session.current_coin(), "Litecoin");
        assert_eq!(session.log.entries()[0].message, "Switched to Litecoin");

        let saved =
            WalletSettings::load_or_create(&dir.path().join("settings.json")).unwrap();
        assert_eq!(saved.current_coin, "Litecoin");
    }

    #[tokio::test]
    async fn test_use_unknown_coin_is_error() {
        let (mut session, mut queue, _dir) = session_with(WalletSettings::default());
        session.handle_line(":use Nope").await;
        assert_eq!(queue.drain(&mut session).await, 1);

        let last = session.log.entries().last().unwrap();
        assert!(last.is_error);
        assert!(last.message.contains("Coin not configured: Nope"));
        assert_eq!(session.current_coin(), "Bitcoin");

        session.handle_line(":use").await;
        assert_eq!(session.log.entries().last().unwrap().message, "Usage: :use <coin>");
        assert_eq!(queue.drain(&mut session).await, 0);
    }

    #[tokio::test]
    async fn test_raw_command_with_missing_cli_logs_red_error() {
        let (mut session, _queue, _dir) = session_with(missing_cli_settings());

        session.handle_line("getblockcount").await;

        let entries = session.log.entries();
        assert_eq!(entries[0].message, "$ getblockcount");
        assert!(entries[1].is_error);
        assert_eq!(entries[1].message, "Error: CLI not found: walletctl-ghost-cli");
    }

    #[tokio::test]
    async fn test_quick_command_is_deferred() {
        let (mut session, mut queue, _dir) = session_with(missing_cli_settings());

        session.handle_line(":quick 2").await;
        assert_eq!(session.log.entries().len(), 1);
        assert_eq!(session.log.entries()[0].message, "$ getblockcount");

        assert_eq!(queue.drain(&mut session).await, 1);
        assert!(session.log.entries()[1].is_error);
    }

    #[tokio::test]
    async fn test_refresh_reports_balance_and_history_failures() {
        let (mut session, mut queue, _dir) = session_with(missing_cli_settings());
        queue.handle().defer(Task::Refresh);
        queue.drain(&mut session).await;

        // A failed balance does not stop the history load.
        let errors: Vec<_> = session.log.entries().iter().filter(|e| e.is_error).collect();
        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn test_builtins() {
        let (mut session, _queue, _dir) = session_with(WalletSettings::default());

        assert_eq!(session.handle_line(":quit").await, LineOutcome::Quit);
        assert_eq!(session.handle_line(":exit").await, LineOutcome::Quit);
        assert_eq!(session.handle_line("   ").await, LineOutcome::Continue);

        session.handle_line(":quick").await;
        assert!(session
            .log
            .entries()
            .last()
            .unwrap()
            .message
            .contains("2. getblockcount"));

        session.handle_line(":quick 9").await;
        assert!(session.log.entries().last().unwrap().is_error);

        session.handle_line(":coins").await;
        assert!(session.log.entries().last().unwrap().message.contains("* Bitcoin"));

        session.handle_line(":bogus").await;
        assert!(session.log.entries().last().unwrap().is_error);

        session.handle_line(":clear").await;
        assert!(session.log.entries().is_empty());
    }

    #[test]
    fn test_shutdown_auto_backup() {
        let root = tempfile::tempdir().unwrap();
        let datadir = root.path().join("data");
        std::fs::create_dir_all(&datadir).unwrap();
        std::fs::write(datadir.join("wallet.dat"), b"w").unwrap();

        let mut settings = WalletSettings::default();
        settings.coins.clear();
        settings
            .add_coin(
                "Bitcoin",
                CoinConfig::new("bitcoin-cli").with_datadir(datadir.to_string_lossy()),
            )
            .unwrap();
        settings.backup_dir = root.path().join("backups").to_string_lossy().into_owned();

        let (mut session, _queue, _dir) = session_with(settings);
        session.shutdown();

        assert!(root.path().join("backups").join("Bitcoin_wallet.dat").exists());
        assert!(session
            .log
            .entries()
            .last()
            .unwrap()
            .message
            .starts_with("Auto-backup: 1 wallet(s)"));

        session.settings.auto_backup = false;
        session.log.clear();
        session.shutdown();
        assert!(session.log.entries().is_empty());
    }
}
