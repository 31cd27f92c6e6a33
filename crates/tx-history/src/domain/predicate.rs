//! # Query Predicates
//!
//! Storage-agnostic filters, one variant per search shape. A store only
//! needs [`QueryPredicate::lock_hashes`] (the ownership intersection) and
//! [`QueryPredicate::admits`] (the per-transaction condition) to evaluate
//! any of them.

use std::collections::BTreeSet;

use chrono::{FixedOffset, NaiveDate};
use shared_types::{hash_from_hex, Hash, TransactionStatus};

use super::entities::TransactionSummary;
use super::errors::HistoryError;
use super::search::SearchType;

/// Length of a calendar day in milliseconds.
pub const DAY_MS: i64 = 86_400_000;

/// Half-open `[begin_ms, end_ms)` interval of epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub begin_ms: i64,
    pub end_ms: i64,
}

impl TimeWindow {
    /// The calendar day `YYYY-MM-DD`, starting at midnight in the given
    /// fixed UTC offset.
    pub fn for_date(value: &str, utc_offset_secs: i32) -> Result<Self, HistoryError> {
        let offset = FixedOffset::east_opt(utc_offset_secs).ok_or_else(|| {
            HistoryError::InvalidConfig(format!("UTC offset out of range: {utc_offset_secs}s"))
        })?;

        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
            HistoryError::InvalidDate {
                value: value.to_string(),
                reason: e.to_string(),
            }
        })?;

        let begin_ms = date
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| midnight.and_local_timezone(offset).single())
            .map(|start| start.timestamp_millis())
            .ok_or_else(|| HistoryError::InvalidDate {
                value: value.to_string(),
                reason: "no start of day".to_string(),
            })?;

        Ok(Self {
            begin_ms,
            end_ms: begin_ms + DAY_MS,
        })
    }

    /// Whether a millisecond timestamp falls inside the window.
    pub fn contains(&self, timestamp_ms: u64) -> bool {
        i64::try_from(timestamp_ms).is_ok_and(|ts| ts >= self.begin_ms && ts < self.end_ms)
    }
}

/// Why a query was answered with an empty page without touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmptyReason {
    /// Amount search would need every transaction materialized.
    AmountUnsupported,
    /// Search text matched no known shape.
    UnknownSearch,
    /// Searched address does not belong to the owner.
    AddressNotOwned,
    /// `0x` text that is not a 32-byte hash cannot equal any transaction hash.
    MalformedHash,
}

impl EmptyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AmountUnsupported => "amount_unsupported",
            Self::UnknownSearch => "unknown_search",
            Self::AddressNotOwned => "address_not_owned",
            Self::MalformedHash => "malformed_hash",
        }
    }
}

/// Filter over transactions touching an ownership set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPredicate {
    /// Every transaction touching the set.
    Owned { lock_hashes: BTreeSet<Hash> },
    /// Narrowed to the lock hashes of one searched address.
    OwnedByAddress {
        address: String,
        lock_hashes: BTreeSet<Hash>,
    },
    /// A single transaction, if it touches the set.
    OwnedWithHash {
        lock_hashes: BTreeSet<Hash>,
        tx_hash: Hash,
    },
    /// Transactions within one calendar day.
    OwnedWithin {
        lock_hashes: BTreeSet<Hash>,
        window: TimeWindow,
    },
    /// Transactions in one of the given statuses (count queries).
    OwnedWithStatus {
        lock_hashes: BTreeSet<Hash>,
        statuses: BTreeSet<TransactionStatus>,
    },
    /// Matches nothing.
    Nothing(EmptyReason),
}

impl QueryPredicate {
    /// Ownership set a matching transaction must intersect, or `None` when
    /// nothing can match.
    pub fn lock_hashes(&self) -> Option<&BTreeSet<Hash>> {
        match self {
            Self::Owned { lock_hashes }
            | Self::OwnedByAddress { lock_hashes, .. }
            | Self::OwnedWithHash { lock_hashes, .. }
            | Self::OwnedWithin { lock_hashes, .. }
            | Self::OwnedWithStatus { lock_hashes, .. } => Some(lock_hashes),
            Self::Nothing(_) => None,
        }
    }

    /// Condition on the transaction header, applied on top of ownership.
    pub fn admits(&self, summary: &TransactionSummary) -> bool {
        match self {
            Self::Owned { .. } | Self::OwnedByAddress { .. } => true,
            Self::OwnedWithHash { tx_hash, .. } => summary.hash == *tx_hash,
            Self::OwnedWithin { window, .. } => window.contains(summary.timestamp),
            Self::OwnedWithStatus { statuses, .. } => statuses.contains(&summary.status),
            Self::Nothing(_) => false,
        }
    }

    /// Reason for an empty result, if this predicate can never match.
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        match self {
            Self::Nothing(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Inputs to [`build_predicate`].
#[derive(Debug, Clone)]
pub struct SearchContext<'a> {
    pub search_type: SearchType,
    pub value: &'a str,
    /// Lock hashes of the caller's identity.
    pub owned: BTreeSet<Hash>,
    /// Lock hashes of the searched address; only read for `Address`.
    pub address_lock_hashes: Option<BTreeSet<Hash>>,
    pub utc_offset_secs: i32,
}

/// Turn a classified search into a predicate.
///
/// An address search narrows to that address's lock hashes only when they
/// share at least one hash with the caller's set. Otherwise the result is
/// `Nothing`, so history of unrelated identities is never disclosed.
pub fn build_predicate(ctx: SearchContext<'_>) -> Result<QueryPredicate, HistoryError> {
    let SearchContext {
        search_type,
        value,
        owned,
        address_lock_hashes,
        utc_offset_secs,
    } = ctx;

    let predicate = match search_type {
        SearchType::Empty => QueryPredicate::Owned { lock_hashes: owned },
        SearchType::Address => {
            let resolved = address_lock_hashes.unwrap_or_default();
            if resolved.is_disjoint(&owned) {
                QueryPredicate::Nothing(EmptyReason::AddressNotOwned)
            } else {
                QueryPredicate::OwnedByAddress {
                    address: value.to_string(),
                    lock_hashes: resolved,
                }
            }
        }
        SearchType::TxHash => match hash_from_hex(value) {
            Ok(tx_hash) => QueryPredicate::OwnedWithHash {
                lock_hashes: owned,
                tx_hash,
            },
            Err(_) => QueryPredicate::Nothing(EmptyReason::MalformedHash),
        },
        SearchType::Date => QueryPredicate::OwnedWithin {
            lock_hashes: owned,
            window: TimeWindow::for_date(value, utc_offset_secs)?,
        },
        SearchType::Amount => QueryPredicate::Nothing(EmptyReason::AmountUnsupported),
        SearchType::Unknown => QueryPredicate::Nothing(EmptyReason::UnknownSearch),
    };

    Ok(predicate)
}
