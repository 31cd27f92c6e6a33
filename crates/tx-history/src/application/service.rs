//! # History Service
//!
//! Application service answering history queries over the outbound ports.
//!
//! Every request runs one pipeline regardless of how the owner is
//! identified:
//!
//! ```text
//! classify → resolve ownership → build predicate → candidate hashes
//!          → paginate → fetch page cells → balance + DAO → views
//! ```
//!
//! The service keeps no state between calls and holds no lock across an
//! await point. Description updates are last-write-wins.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use history_telemetry::{
    time_histogram, BACKEND_FAILURES, CANDIDATE_SET_SIZE, DESCRIPTION_UPDATES,
    EMPTY_POLICY_RESULTS, QUERIES_SERVED, QUERY_DURATION,
};
use shared_bus::{EventPublisher, HistoryEvent, NoopPublisher};
use shared_types::{to_hex, Hash, TransactionStatus};

use crate::adapters::SystemTimeSource;
use crate::config::HistoryConfig;
use crate::domain::{
    assemble_view, build_predicate, classify, paginate, previous_tx_hashes, DaoIndex,
    HistoryError, InputRecord, OutputRecord, OwnershipCriteria, PageRequest, PaginationResult,
    QueryPredicate, SearchContext, SearchType, TransactionRecord, TransactionView,
};
use crate::ports::{
    CellFilter, CellIndex, LockHashResolver, TimeSource, TransactionHistoryApi, TransactionStore,
};

/// History Service - orchestrates queries over store, cell index and resolver.
pub struct HistoryService<S, C, R>
where
    S: TransactionStore,
    C: CellIndex,
    R: LockHashResolver,
{
    config: HistoryConfig,
    store: Arc<S>,
    cells: Arc<C>,
    resolver: Arc<R>,
    time: Arc<dyn TimeSource>,
    events: Arc<dyn EventPublisher>,
}

impl<S, C, R> HistoryService<S, C, R>
where
    S: TransactionStore,
    C: CellIndex,
    R: LockHashResolver,
{
    /// Create a service using the system clock and no event publishing.
    pub fn new(config: HistoryConfig, store: Arc<S>, cells: Arc<C>, resolver: Arc<R>) -> Self {
        Self {
            config,
            store,
            cells,
            resolver,
            time: Arc::new(SystemTimeSource),
            events: Arc::new(NoopPublisher::default()),
        }
    }

    /// Replace the clock used to stamp `updated_at`.
    pub fn with_time_source(mut self, time: Arc<dyn TimeSource>) -> Self {
        self.time = time;
        self
    }

    /// Publish description updates and backend failures to this bus.
    pub fn with_publisher(mut self, events: Arc<dyn EventPublisher>) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Log, count and broadcast a failed operation, then hand the result back.
    async fn report<T>(
        &self,
        operation: &'static str,
        result: Result<T, HistoryError>,
    ) -> Result<T, HistoryError> {
        if let Err(err) = &result {
            if err.is_validation() {
                tracing::debug!(operation, error = %err, "Rejected history request");
            } else {
                tracing::warn!(operation, error = %err, "History backend call failed");
                BACKEND_FAILURES.with_label_values(&[operation]).inc();
                self.events
                    .publish(HistoryEvent::BackendFailure {
                        operation: operation.to_string(),
                        error: err.to_string(),
                    })
                    .await;
            }
        }
        result
    }

    async fn resolve_ownership(
        &self,
        criteria: &OwnershipCriteria,
    ) -> Result<BTreeSet<Hash>, HistoryError> {
        let lock_hashes = match criteria {
            OwnershipCriteria::LockHashes(hashes) => hashes.iter().copied().collect(),
            OwnershipCriteria::Addresses(addresses) => {
                self.resolver.addresses_to_lock_hashes(addresses).await?
            }
            OwnershipCriteria::Pubkeys(pubkeys) => {
                let mut addresses = Vec::with_capacity(pubkeys.len());
                for pubkey in pubkeys {
                    addresses.push(self.resolver.pubkey_to_address(pubkey).await?);
                }
                self.resolver.addresses_to_lock_hashes(&addresses).await?
            }
        };
        Ok(lock_hashes)
    }

    async fn query_history(
        &self,
        criteria: &OwnershipCriteria,
        page: PageRequest,
        search: &str,
    ) -> Result<PaginationResult<TransactionView>, HistoryError> {
        page.validate(self.config.max_page_size)?;

        let search_type = classify(search, &self.config.address_prefixes);
        QUERIES_SERVED.with_label_values(&[search_type.as_str()]).inc();

        let owned = if search_type.needs_lookup() {
            self.resolve_ownership(criteria).await?
        } else {
            BTreeSet::new()
        };
        let address_lock_hashes = if search_type == SearchType::Address {
            Some(self.resolver.address_to_lock_hashes(search).await?)
        } else {
            None
        };

        let predicate = build_predicate(SearchContext {
            search_type,
            value: search,
            owned,
            address_lock_hashes,
            utc_offset_secs: self.config.utc_offset_secs,
        })?;

        let lock_hashes = match predicate.lock_hashes() {
            Some(lock_hashes) => lock_hashes.clone(),
            None => {
                let reason = predicate.empty_reason().map_or("unmatchable", |r| r.as_str());
                EMPTY_POLICY_RESULTS.with_label_values(&[reason]).inc();
                tracing::debug!(
                    search_type = %search_type,
                    reason,
                    "Answering history search with an empty page"
                );
                return Ok(PaginationResult::empty());
            }
        };

        let candidates = self.store.matching_hashes(&predicate).await?;
        CANDIDATE_SET_SIZE.observe(candidates.len() as f64);

        let page_hashes = paginate(&candidates, &page);
        let items = if page_hashes.items.is_empty() {
            Vec::new()
        } else {
            self.load_page(&page_hashes.items, &lock_hashes).await?
        };

        tracing::debug!(
            search_type = %search_type,
            page_no = page.page_no,
            page_size = page.page_size,
            total_count = page_hashes.total_count,
            returned = items.len(),
            "History page served"
        );

        Ok(PaginationResult {
            total_count: page_hashes.total_count,
            items,
        })
    }

    /// Fetch headers and every cell of the page's transactions and annotate
    /// them. DAO correlation is scoped to outputs the page's inputs spend.
    async fn load_page(
        &self,
        page_hashes: &[Hash],
        lock_hashes: &BTreeSet<Hash>,
    ) -> Result<Vec<TransactionView>, HistoryError> {
        let filter = CellFilter::for_transactions(page_hashes.iter().copied());

        let summaries = self.store.summaries(page_hashes).await?;
        let inputs = self.cells.query_inputs(&filter).await?;
        let outputs = self.cells.query_outputs(&filter).await?;

        let mut dao = DaoIndex::from_outputs(&outputs);
        let spent_txs = previous_tx_hashes(&inputs);
        // An empty transaction filter is unconstrained.
        if !spent_txs.is_empty() {
            let tagged = self
                .cells
                .query_outputs(&CellFilter::for_transactions(spent_txs).dao_only())
                .await?;
            dao.extend(&tagged);
        }

        let mut inputs_by_tx: HashMap<Hash, Vec<InputRecord>> = HashMap::new();
        for input in inputs {
            inputs_by_tx.entry(input.tx_hash).or_default().push(input);
        }
        let mut outputs_by_tx: HashMap<Hash, Vec<OutputRecord>> = HashMap::new();
        for output in outputs {
            outputs_by_tx.entry(*output.tx_hash()).or_default().push(output);
        }
        let summaries: HashMap<Hash, _> = summaries.into_iter().map(|s| (s.hash, s)).collect();

        let views = page_hashes
            .iter()
            .filter_map(|hash| summaries.get(hash))
            .map(|summary| {
                let inputs = inputs_by_tx.get(&summary.hash).map_or(&[][..], Vec::as_slice);
                let outputs = outputs_by_tx.get(&summary.hash).map_or(&[][..], Vec::as_slice);
                assemble_view(summary, inputs, outputs, lock_hashes, &dao)
            })
            .collect();

        Ok(views)
    }

    async fn overwrite_description(
        &self,
        hash: &Hash,
        description: &str,
    ) -> Result<Option<TransactionRecord>, HistoryError> {
        let Some(mut record) = self.store.get_by_hash(hash).await? else {
            DESCRIPTION_UPDATES.with_label_values(&["not_found"]).inc();
            tracing::debug!(tx_hash = %to_hex(hash), "Description update for unknown transaction");
            return Ok(None);
        };

        record.description = description.to_string();
        record.updated_at = self.time.now_ms();
        let saved = self.store.save(record).await?;

        DESCRIPTION_UPDATES.with_label_values(&["updated"]).inc();
        tracing::info!(tx_hash = %to_hex(hash), "Transaction description updated");

        self.events
            .publish(HistoryEvent::DescriptionUpdated {
                tx_hash: saved.hash,
                description: saved.description.clone(),
                updated_at: saved.updated_at,
            })
            .await;

        Ok(Some(saved))
    }

    async fn count_with_status(
        &self,
        lock_hashes: &BTreeSet<Hash>,
        statuses: &BTreeSet<TransactionStatus>,
    ) -> Result<u64, HistoryError> {
        let predicate = QueryPredicate::OwnedWithStatus {
            lock_hashes: lock_hashes.clone(),
            statuses: statuses.clone(),
        };
        Ok(self.store.count(&predicate).await?)
    }
}

#[async_trait]
impl<S, C, R> TransactionHistoryApi for HistoryService<S, C, R>
where
    S: TransactionStore + 'static,
    C: CellIndex + 'static,
    R: LockHashResolver + 'static,
{
    async fn get_transactions(
        &self,
        criteria: &OwnershipCriteria,
        page: PageRequest,
        search: &str,
    ) -> Result<PaginationResult<TransactionView>, HistoryError> {
        let _timer = time_histogram!(QUERY_DURATION, &["get_transactions"]);
        let result = self.query_history(criteria, page, search).await;
        self.report("get_transactions", result).await
    }

    async fn get_transaction(&self, hash: &Hash) -> Result<Option<TransactionRecord>, HistoryError> {
        let _timer = time_histogram!(QUERY_DURATION, &["get_transaction"]);
        let result = self.store.get_by_hash(hash).await.map_err(HistoryError::from);
        self.report("get_transaction", result).await
    }

    async fn update_description(
        &self,
        hash: &Hash,
        description: &str,
    ) -> Result<Option<TransactionRecord>, HistoryError> {
        let _timer = time_histogram!(QUERY_DURATION, &["update_description"]);
        let result = self.overwrite_description(hash, description).await;
        self.report("update_description", result).await
    }

    async fn count_by_lock_hashes_and_status(
        &self,
        lock_hashes: &BTreeSet<Hash>,
        statuses: &BTreeSet<TransactionStatus>,
    ) -> Result<u64, HistoryError> {
        let _timer = time_histogram!(QUERY_DURATION, &["count_by_lock_hashes"]);
        let result = self.count_with_status(lock_hashes, statuses).await;
        self.report("count_by_lock_hashes_and_status", result).await
    }

    async fn count_by_address_and_status(
        &self,
        address: &str,
        statuses: &BTreeSet<TransactionStatus>,
    ) -> Result<u64, HistoryError> {
        let _timer = time_histogram!(QUERY_DURATION, &["count_by_address"]);
        let result = match self.resolver.address_to_lock_hashes(address).await {
            Ok(lock_hashes) => self.count_with_status(&lock_hashes, statuses).await,
            Err(err) => Err(err.into()),
        };
        self.report("count_by_address_and_status", result).await
    }

    async fn lock_hashes_of(
        &self,
        criteria: &OwnershipCriteria,
    ) -> Result<BTreeSet<Hash>, HistoryError> {
        let result = self.resolve_ownership(criteria).await;
        self.report("lock_hashes_of", result).await
    }
}
