//! # Search Classification
//!
//! Maps the free-text search box to a [`SearchType`]. Classification is
//! total: every string lands in exactly one bucket and nothing fails.
//!
//! Rules are tried in order, first match wins:
//!
//! | Rule | Result |
//! |------|--------|
//! | empty string | `Empty` |
//! | starts with a recognized address prefix | `Address` |
//! | starts with `0x` | `TxHash` |
//! | exactly `YYYY-MM-DD` | `Date` |
//! | digits, optionally with a leading minus | `Amount` |
//! | anything else | `Unknown` |
//!
//! Digits are ASCII `0-9` only. The date rule matches the whole string, so
//! text merely containing a date (`"2020-01-01 "`, `"on 2020-01-01"`) is
//! `Unknown` rather than a date search with trailing noise.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref DATE_PATTERN: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex");
    static ref AMOUNT_PATTERN: Regex = Regex::new(r"^-?[0-9]+$").expect("valid regex");
}

/// Kind of value typed into the history search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchType {
    Address,
    TxHash,
    Date,
    Amount,
    Empty,
    Unknown,
}

impl SearchType {
    /// Stable label for metrics and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::TxHash => "tx_hash",
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Empty => "empty",
            Self::Unknown => "unknown",
        }
    }

    /// Whether answering this search reads the store at all.
    pub fn needs_lookup(&self) -> bool {
        !matches!(self, Self::Amount | Self::Unknown)
    }
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify search text.
pub fn classify<S: AsRef<str>>(text: &str, address_prefixes: &[S]) -> SearchType {
    if text.is_empty() {
        return SearchType::Empty;
    }
    if address_prefixes
        .iter()
        .any(|prefix| text.starts_with(prefix.as_ref()))
    {
        return SearchType::Address;
    }
    if text.starts_with("0x") {
        return SearchType::TxHash;
    }
    if DATE_PATTERN.is_match(text) {
        return SearchType::Date;
    }
    if AMOUNT_PATTERN.is_match(text) {
        return SearchType::Amount;
    }
    SearchType::Unknown
}
