//! # Core Domain Entities
//!
//! Cell-model primitives shared by every crate in the workspace.

use serde::{Deserialize, Serialize};

/// A 32-byte hash (transaction hash, block hash or lock hash).
pub type Hash = [u8; 32];

/// Length in bytes of every [`Hash`].
pub const HASH_LENGTH: usize = 32;

/// Reference to the output a transaction input spends.
///
/// This is a back-reference, never an ownership relation: the referenced
/// output may have been pruned from the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// Hash of the transaction that created the output.
    #[serde(with = "crate::codec::hex_hash")]
    pub tx_hash: Hash,
    /// Position of the output within that transaction.
    pub index: u32,
}

impl OutPoint {
    /// Create a new out-point.
    pub fn new(tx_hash: Hash, index: u32) -> Self {
        Self { tx_hash, index }
    }
}

/// Lifecycle status of a persisted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Seen but not yet committed in a block.
    Pending,
    /// Committed in a block.
    Confirmed,
    /// Rejected or dropped.
    Failed,
}

impl TransactionStatus {
    /// All statuses, in declaration order.
    pub const ALL: [TransactionStatus; 3] = [Self::Pending, Self::Confirmed, Self::Failed];
}
