//! # Inbound Ports (Driving Ports)
//!
//! API offered to the application layer.

use std::collections::BTreeSet;

use async_trait::async_trait;
use shared_types::{Hash, TransactionStatus};

use crate::domain::{
    HistoryError, OwnershipCriteria, PageRequest, PaginationResult, TransactionRecord,
    TransactionView,
};

/// Read-side transaction history API.
#[async_trait]
pub trait TransactionHistoryApi: Send + Sync {
    /// One page of annotated history for the owner, filtered by free-text
    /// search.
    ///
    /// Amount searches, unrecognized text and addresses outside the owner's
    /// identity yield an empty page, not an error.
    async fn get_transactions(
        &self,
        criteria: &OwnershipCriteria,
        page: PageRequest,
        search: &str,
    ) -> Result<PaginationResult<TransactionView>, HistoryError>;

    /// Full record, or `None` when the hash is unknown.
    async fn get_transaction(&self, hash: &Hash) -> Result<Option<TransactionRecord>, HistoryError>;

    /// Overwrite the description. `None` when the hash is unknown; nothing
    /// is created in that case.
    async fn update_description(
        &self,
        hash: &Hash,
        description: &str,
    ) -> Result<Option<TransactionRecord>, HistoryError>;

    /// Distinct transactions touching the lock hashes with one of the
    /// statuses.
    async fn count_by_lock_hashes_and_status(
        &self,
        lock_hashes: &BTreeSet<Hash>,
        statuses: &BTreeSet<TransactionStatus>,
    ) -> Result<u64, HistoryError>;

    /// As above, for the lock hashes of one address.
    async fn count_by_address_and_status(
        &self,
        address: &str,
        statuses: &BTreeSet<TransactionStatus>,
    ) -> Result<u64, HistoryError>;

    /// Resolve ownership criteria to lock hashes.
    async fn lock_hashes_of(&self, criteria: &OwnershipCriteria)
        -> Result<BTreeSet<Hash>, HistoryError>;
}
