//! # In-Memory Ledger Store
//!
//! Reference implementation of [`TransactionStore`] and [`CellIndex`] over
//! a single map of records. Useful for tests and for embedding the engine
//! over data already loaded in memory.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::Hash;

use crate::domain::{
    history_order, InputRecord, OutputRecord, QueryPredicate, TransactionRecord,
    TransactionSummary,
};
use crate::ports::{CellFilter, CellIndex, StoreError, TransactionStore};

/// Transactions with their cells, keyed by hash.
///
/// The lock is never held across an await point.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    records: RwLock<HashMap<Hash, TransactionRecord>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-loaded with records.
    pub fn with_records(records: impl IntoIterator<Item = TransactionRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Insert or replace a record.
    pub fn insert(&self, record: TransactionRecord) {
        self.records.write().insert(record.hash, record);
    }

    /// Remove a record and, with it, its cells.
    pub fn remove(&self, hash: &Hash) -> Option<TransactionRecord> {
        self.records.write().remove(hash)
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn matching(&self, predicate: &QueryPredicate) -> Vec<(u64, Hash)> {
        let owned_cells = match predicate.lock_hashes() {
            Some(lock_hashes) if !lock_hashes.is_empty() => {
                CellFilter::default().with_lock_hashes(lock_hashes.iter().copied())
            }
            _ => return Vec::new(),
        };

        self.records
            .read()
            .values()
            .filter(|record| {
                owns_cell(record, &owned_cells) && predicate.admits(&record.summary())
            })
            .map(|record| (record.timestamp, record.hash))
            .collect()
    }

    /// Records selected by the filter's transaction set, or all records.
    fn scan<T>(
        &self,
        filter: &CellFilter,
        mut pick: impl FnMut(&TransactionRecord) -> Vec<T>,
    ) -> Vec<T> {
        let records = self.records.read();
        if filter.tx_hashes.is_empty() {
            records.values().flat_map(&mut pick).collect()
        } else {
            filter
                .tx_hashes
                .iter()
                .filter_map(|hash| records.get(hash))
                .flat_map(&mut pick)
                .collect()
        }
    }
}

/// Any output, or any indexed input, admitted by the lock filter.
fn owns_cell(record: &TransactionRecord, cells: &CellFilter) -> bool {
    record.outputs.iter().any(|o| cells.admits_output(o))
        || record.inputs.iter().any(|i| cells.admits_input(i))
}

fn ordered(mut record: TransactionRecord) -> TransactionRecord {
    record.inputs.sort_by_key(|i| i.index);
    record.outputs.sort_by_key(|o| o.out_point.index);
    record
}

#[async_trait]
impl TransactionStore for InMemoryLedgerStore {
    async fn matching_hashes(&self, predicate: &QueryPredicate) -> Result<Vec<Hash>, StoreError> {
        let mut matches = self.matching(predicate);
        matches.sort_by(|a, b| history_order((a.0, &a.1), (b.0, &b.1)));
        Ok(matches.into_iter().map(|(_, hash)| hash).collect())
    }

    async fn count(&self, predicate: &QueryPredicate) -> Result<u64, StoreError> {
        Ok(self.matching(predicate).len() as u64)
    }

    async fn summaries(&self, hashes: &[Hash]) -> Result<Vec<TransactionSummary>, StoreError> {
        let records = self.records.read();
        Ok(hashes
            .iter()
            .filter_map(|hash| records.get(hash))
            .map(TransactionRecord::summary)
            .collect())
    }

    async fn get_by_hash(&self, hash: &Hash) -> Result<Option<TransactionRecord>, StoreError> {
        Ok(self.records.read().get(hash).cloned().map(ordered))
    }

    async fn save(&self, record: TransactionRecord) -> Result<TransactionRecord, StoreError> {
        let record = ordered(record);
        self.insert(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl CellIndex for InMemoryLedgerStore {
    async fn query_outputs(&self, filter: &CellFilter) -> Result<Vec<OutputRecord>, StoreError> {
        Ok(self.scan(filter, |record| {
            record
                .outputs
                .iter()
                .filter(|o| filter.admits_output(o))
                .cloned()
                .collect()
        }))
    }

    async fn query_inputs(&self, filter: &CellFilter) -> Result<Vec<InputRecord>, StoreError> {
        Ok(self.scan(filter, |record| {
            record
                .inputs
                .iter()
                .filter(|i| filter.admits_input(i))
                .cloned()
                .collect()
        }))
    }
}
