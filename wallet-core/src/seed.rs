//! Seed phrase tools (BIP-39)
//!
//! Generation and validation only. Restoring a wallet from a seed is
//! coin-specific and left to each coin's own tooling.

use bip39::{Language, Mnemonic};
use serde::Serialize;
use zeroize::Zeroizing;

use crate::error::{Result, WalletError};

/// Word counts a BIP-39 mnemonic may have.
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Word count used when none is requested.
pub const DEFAULT_WORD_COUNT: usize = 12;

/// Outcome of checking a seed phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedCheck {
    pub word_count: usize,
    /// Word count is one of [`VALID_WORD_COUNTS`]
    pub format_ok: bool,
    /// Every word is in the English wordlist and the checksum matches
    pub checksum_ok: bool,
}

impl SeedCheck {
    pub fn is_valid(&self) -> bool {
        self.format_ok && self.checksum_ok
    }
}

/// Generate a fresh English mnemonic with `word_count` words.
///
/// The phrase is wiped from memory when the returned value is dropped.
pub fn generate(word_count: usize) -> Result<Zeroizing<String>> {
    if !VALID_WORD_COUNTS.contains(&word_count) {
        return Err(WalletError::InvalidInput(format!(
            "Seed phrase should be 12, 15, 18, 21, or 24 words, not {}",
            word_count
        )));
    }
    let mnemonic = Mnemonic::generate_in(Language::English, word_count)
        .map_err(|e| WalletError::Other(format!("Failed to generate seed phrase: {}", e)))?;
    Ok(Zeroizing::new(mnemonic.to_string()))
}

/// Collapse whitespace and lowercase a user-entered phrase.
pub fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check a seed phrase's shape and checksum.
///
/// An empty phrase is an input error rather than an invalid seed.
pub fn validate(phrase: &str) -> Result<SeedCheck> {
    let normalized = normalize(phrase);
    if normalized.is_empty() {
        return Err(WalletError::InvalidInput(
            "Please enter a seed phrase".to_string(),
        ));
    }

    let word_count = normalized.split(' ').count();
    let format_ok = VALID_WORD_COUNTS.contains(&word_count);
    let checksum_ok =
        format_ok && Mnemonic::parse_in_normalized(Language::English, &normalized).is_ok();

    Ok(SeedCheck {
        word_count,
        format_ok,
        checksum_ok,
    })
}
