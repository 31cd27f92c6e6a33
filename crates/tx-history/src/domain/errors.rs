//! # Domain Errors
//!
//! Error types for the history engine.
//!
//! Not-found is never an error: lookups return `Ok(None)`. Searches the
//! engine deliberately does not run (amount, unrecognized text, addresses
//! outside the owner's identity) return `Ok` with an empty page.

use thiserror::Error;

/// Failure reported by a transaction store or cell index backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not serve the request (I/O, connection, lock).
    #[error("Store backend error: {message}")]
    Backend { message: String },

    /// A row could not be encoded or decoded.
    #[error("Store serialization error: {message}")]
    Serialization { message: String },
}

/// Failure reported while turning addresses or pubkeys into lock hashes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid public key: {0}")]
    InvalidPubkey(String),

    /// The node or script registry behind the resolver is unreachable.
    #[error("Lock hash resolver unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the history engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// A date-shaped search value is not a calendar date.
    #[error("Invalid date {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },

    /// Page number or size out of range.
    #[error("Invalid page: page_no={page_no}, page_size={page_size} (max page size {max_page_size})")]
    InvalidPage {
        page_no: usize,
        page_size: usize,
        max_page_size: usize,
    },

    /// Engine configuration cannot be applied (e.g. UTC offset out of range).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Resolver(#[from] ResolverError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HistoryError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDate { .. } => "invalid_date",
            Self::InvalidPage { .. } => "invalid_page",
            Self::InvalidConfig(_) => "invalid_config",
            Self::Resolver(_) => "resolver",
            Self::Store(_) => "store",
        }
    }

    /// Whether the error was caused by the caller's input rather than a
    /// failing collaborator.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate { .. } | Self::InvalidPage { .. } | Self::InvalidConfig(_)
        )
    }
}
