//! # Domain Entities
//!
//! Persisted transaction rows and the view model produced for callers.
//!
//! Capacities are unsigned 64-bit on every row. Signed net values are
//! computed in `i128` so that no sum of owned capacities can overflow.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use shared_types::codec::{hex_hash, hex_hash_opt};
use shared_types::{Hash, OutPoint, TransactionStatus};

/// A persisted transaction with its cells.
///
/// The transaction owns its inputs and outputs; they are never shared
/// between records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique transaction hash.
    #[serde(with = "hex_hash")]
    pub hash: Hash,
    /// Transaction format version.
    pub version: u32,
    /// Milliseconds since epoch.
    pub timestamp: u64,
    /// Absent while pending.
    pub block_number: Option<u64>,
    /// Absent while pending.
    #[serde(with = "hex_hash_opt")]
    pub block_hash: Option<Hash>,
    pub status: TransactionStatus,
    /// Free text, the only field this engine writes.
    pub description: String,
    pub created_at: u64,
    pub updated_at: u64,
    pub inputs: Vec<InputRecord>,
    pub outputs: Vec<OutputRecord>,
}

impl TransactionRecord {
    /// Header-only copy of this record.
    pub fn summary(&self) -> TransactionSummary {
        TransactionSummary {
            hash: self.hash,
            version: self.version,
            timestamp: self.timestamp,
            block_number: self.block_number,
            block_hash: self.block_hash,
            status: self.status,
            description: self.description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Transaction header without cells, as returned by list queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    #[serde(with = "hex_hash")]
    pub hash: Hash,
    pub version: u32,
    pub timestamp: u64,
    pub block_number: Option<u64>,
    #[serde(with = "hex_hash_opt")]
    pub block_hash: Option<Hash>,
    pub status: TransactionStatus,
    pub description: String,
    pub created_at: u64,
    pub updated_at: u64,
}

/// A cell created by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Creating transaction and position within it.
    pub out_point: OutPoint,
    #[serde(with = "hex_hash")]
    pub lock_hash: Hash,
    pub capacity: u64,
    /// Present on DAO deposit cells. Content is opaque here.
    pub dao_data: Option<Vec<u8>>,
}

impl OutputRecord {
    /// Hash of the transaction that created this output.
    pub fn tx_hash(&self) -> &Hash {
        &self.out_point.tx_hash
    }

    /// Whether this output is tagged as a DAO cell.
    pub fn has_dao_data(&self) -> bool {
        self.dao_data.is_some()
    }
}

/// A cell consumed by a transaction.
///
/// `lock_hash` and `capacity` are denormalized copies of the spent output.
/// Both are absent when the spent cell was never indexed locally; such an
/// input contributes nothing to a balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Spending transaction.
    #[serde(with = "hex_hash")]
    pub tx_hash: Hash,
    /// Position within the spending transaction.
    pub index: u32,
    /// Absent for cellbase inputs.
    pub previous_output: Option<OutPoint>,
    #[serde(with = "hex_hash_opt")]
    pub lock_hash: Option<Hash>,
    pub capacity: Option<u64>,
}

/// Direction of a transaction relative to an ownership set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    Send,
    Receive,
}

/// One row of a history page.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionView {
    #[serde(with = "hex_hash")]
    pub hash: Hash,
    pub version: u32,
    pub timestamp: u64,
    pub block_number: Option<u64>,
    pub status: TransactionStatus,
    pub description: String,
    pub created_at: u64,
    pub updated_at: u64,
    /// Signed net capacity for the owner, as a decimal string on the wire.
    #[serde_as(as = "DisplayFromStr")]
    pub value: i128,
    #[serde(rename = "type")]
    pub kind: TransferKind,
    pub nervos_dao: bool,
}

/// How the caller identifies the owner whose history is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "values")]
pub enum OwnershipCriteria {
    /// Encoded addresses, each resolved to every lock hash it stands for.
    Addresses(Vec<String>),
    /// Hex public keys, converted to addresses first.
    Pubkeys(Vec<String>),
    /// Lock hashes used as-is.
    LockHashes(Vec<Hash>),
}
