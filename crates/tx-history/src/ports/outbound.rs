//! # Outbound Ports (Driven Ports)
//!
//! Collaborators the history engine consumes: persisted transactions,
//! the cell index, ownership resolution and a clock.
//!
//! Every call may fail; the engine propagates failures unchanged and never
//! retries.

use std::collections::BTreeSet;

use async_trait::async_trait;
use shared_types::Hash;

use crate::domain::{
    InputRecord, OutputRecord, QueryPredicate, TransactionRecord, TransactionSummary,
};

pub use crate::domain::{ResolverError, StoreError};

/// Persisted transaction headers and full records.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Every transaction matching the predicate, deduplicated, in history
    /// order (timestamp descending, hash ascending).
    ///
    /// The whole candidate list is materialized per call. Memory therefore
    /// grows with the owner's total matching transactions, not page size.
    async fn matching_hashes(&self, predicate: &QueryPredicate) -> Result<Vec<Hash>, StoreError>;

    /// Number of distinct transactions matching the predicate.
    async fn count(&self, predicate: &QueryPredicate) -> Result<u64, StoreError>;

    /// Headers for the given hashes. Unknown hashes are skipped; order is
    /// unspecified.
    async fn summaries(&self, hashes: &[Hash]) -> Result<Vec<TransactionSummary>, StoreError>;

    /// Full record with inputs and outputs ordered by index.
    async fn get_by_hash(&self, hash: &Hash) -> Result<Option<TransactionRecord>, StoreError>;

    /// Insert or replace a record, returning what was stored.
    async fn save(&self, record: TransactionRecord) -> Result<TransactionRecord, StoreError>;
}

/// Filter over indexed cells. Empty sets do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellFilter {
    pub lock_hashes: BTreeSet<Hash>,
    pub tx_hashes: BTreeSet<Hash>,
    /// Only outputs carrying DAO data. Ignored for inputs.
    pub dao_only: bool,
}

impl CellFilter {
    /// Cells of the given transactions.
    pub fn for_transactions(tx_hashes: impl IntoIterator<Item = Hash>) -> Self {
        Self {
            tx_hashes: tx_hashes.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Restrict to cells locked by the given lock hashes.
    pub fn with_lock_hashes(mut self, lock_hashes: impl IntoIterator<Item = Hash>) -> Self {
        self.lock_hashes = lock_hashes.into_iter().collect();
        self
    }

    /// Restrict to DAO-tagged outputs.
    pub fn dao_only(mut self) -> Self {
        self.dao_only = true;
        self
    }

    pub fn admits_output(&self, output: &OutputRecord) -> bool {
        (self.tx_hashes.is_empty() || self.tx_hashes.contains(output.tx_hash()))
            && (self.lock_hashes.is_empty() || self.lock_hashes.contains(&output.lock_hash))
            && (!self.dao_only || output.has_dao_data())
    }

    pub fn admits_input(&self, input: &InputRecord) -> bool {
        (self.tx_hashes.is_empty() || self.tx_hashes.contains(&input.tx_hash))
            && (self.lock_hashes.is_empty()
                || input.lock_hash.is_some_and(|h| self.lock_hashes.contains(&h)))
    }
}

/// Indexed inputs and outputs.
#[async_trait]
pub trait CellIndex: Send + Sync {
    async fn query_outputs(&self, filter: &CellFilter) -> Result<Vec<OutputRecord>, StoreError>;

    async fn query_inputs(&self, filter: &CellFilter) -> Result<Vec<InputRecord>, StoreError>;
}

/// Address and pubkey to lock hash resolution.
#[async_trait]
pub trait LockHashResolver: Send + Sync {
    /// Every lock hash the address stands for.
    async fn address_to_lock_hashes(&self, address: &str)
        -> Result<BTreeSet<Hash>, ResolverError>;

    /// Union over several addresses.
    async fn addresses_to_lock_hashes(
        &self,
        addresses: &[String],
    ) -> Result<BTreeSet<Hash>, ResolverError> {
        let mut all = BTreeSet::new();
        for address in addresses {
            all.extend(self.address_to_lock_hashes(address).await?);
        }
        Ok(all)
    }

    /// Encode a hex public key as an address.
    async fn pubkey_to_address(&self, pubkey: &str) -> Result<String, ResolverError>;
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since epoch.
    fn now_ms(&self) -> u64;
}
