//! # Error Types
//!
//! Defines error types used across crates.

use thiserror::Error;

/// Errors produced when decoding `0x`-prefixed hex hashes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    /// The value does not start with `0x`.
    #[error("Missing 0x prefix")]
    MissingPrefix,

    /// The value contains non-hex characters or has odd length.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// The decoded value has the wrong number of bytes.
    #[error("Invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}
