//! Terminal prompts standing in for input and confirmation dialogs.
//!
//! The `*_with` variants take explicit reader/writer handles so they can be
//! driven from tests; the plain variants use stdin/stderr. Secrets are read
//! without echo when stdin is a terminal, and come back as [`Zeroizing`]
//! strings.

use anyhow::{Context, Result};
use std::io::{BufRead, IsTerminal, Write};
use zeroize::Zeroizing;

/// Ask for a line of input. Returns `None` on empty input or end of input.
pub fn ask_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
) -> Result<Option<String>> {
    write!(writer, "{}: ", question)?;
    writer.flush()?;

    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("Failed to read from terminal")?;
    if read == 0 {
        return Ok(None);
    }

    let answer = line.trim_end_matches(['\r', '\n']).to_string();
    if answer.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer))
    }
}

/// Ask for a secret from `reader`. Returns `None` on empty input or end of input.
///
/// The line is read into a buffer that is wiped on drop.
pub fn ask_secret_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
) -> Result<Option<Zeroizing<String>>> {
    write!(writer, "{}: ", question)?;
    writer.flush()?;

    let mut line = Zeroizing::new(String::new());
    let read = reader
        .read_line(&mut line)
        .context("Failed to read from terminal")?;
    if read == 0 {
        return Ok(None);
    }

    Ok(non_blank_secret(line.trim_end_matches(['\r', '\n'])))
}

fn non_blank_secret(secret: &str) -> Option<Zeroizing<String>> {
    if secret.trim().is_empty() {
        None
    } else {
        Some(Zeroizing::new(secret.to_string()))
    }
}

/// Ask a yes/no question; anything other than `y`/`yes` is "no".
pub fn confirm_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
) -> Result<bool> {
    let answer = ask_with(reader, writer, &format!("{} [y/N]", question))?;
    Ok(matches!(
        answer.as_deref().map(|a| a.trim().to_lowercase()).as_deref(),
        Some("y") | Some("yes")
    ))
}

/// Ask for a line of input on the terminal.
pub fn ask(question: &str) -> Result<Option<String>> {
    let stdin = std::io::stdin();
    ask_with(&mut stdin.lock(), &mut std::io::stderr(), question)
}

/// Ask for a required value, failing when the user gives none.
pub fn ask_required(question: &str, what: &str) -> Result<String> {
    ask(question)?.ok_or_else(|| anyhow::anyhow!("{} is required", what))
}

/// Ask for a secret on the terminal, without echoing what is typed.
///
/// When stdin is not a terminal (piped input), the secret is read as a plain
/// line instead.
pub fn ask_secret(question: &str) -> Result<Option<Zeroizing<String>>> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return ask_secret_with(&mut stdin.lock(), &mut std::io::stderr(), question);
    }

    let secret = Zeroizing::new(
        rpassword::prompt_password(format!("{}: ", question))
            .context("Failed to read from terminal")?,
    );
    Ok(non_blank_secret(&secret))
}

/// Ask for a required secret, failing when the user gives none.
pub fn ask_secret_required(question: &str, what: &str) -> Result<Zeroizing<String>> {
    ask_secret(question)?.ok_or_else(|| anyhow::anyhow!("{} is required", what))
}

/// Ask a yes/no question on the terminal. `assume_yes` skips the prompt.
pub fn confirm(question: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let stdin = std::io::stdin();
    confirm_with(&mut stdin.lock(), &mut std::io::stderr(), question)
}
