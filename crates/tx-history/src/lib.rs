//! # Transaction History Engine
//!
//! Read-side query engine turning persisted cell transactions into
//! paginated, classified, balance-annotated history for an owner.
//!
//! ## Responsibilities
//!
//! - Resolve ownership (addresses, pubkeys or lock hashes) to lock hashes
//! - Classify free-text search and build a storage-agnostic predicate
//! - Materialize the ordered candidate hash list and slice one page
//! - Compute the signed net value of each transaction for the owner
//! - Flag DAO deposits and withdrawals by correlating spent outputs
//! - Overwrite transaction descriptions and announce the change on the bus
//!
//! ## Search Semantics
//!
//! | Search text | Behavior |
//! |-------------|----------|
//! | empty | every transaction touching the owner |
//! | address | narrowed to that address, empty page if not the owner's |
//! | `0x…` | the owner's transaction with that hash |
//! | `YYYY-MM-DD` | the owner's transactions on that day, error if not a date |
//! | amount | empty page (unsupported) |
//! | other | empty page |
//!
//! ## Scaling
//!
//! Each page request materializes the full list of matching hashes before
//! slicing. Memory is proportional to the owner's matching transaction
//! count, not the page size. Cell rows and DAO lookups are fetched for the
//! current page only.
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): Pure search, predicate, balance, DAO and
//!   pagination logic
//! - **Ports Layer** (`ports/`): Inbound API trait, outbound store, cell
//!   index, resolver and clock traits
//! - **Application Layer** (`application/`): `HistoryService`
//! - **Adapters Layer** (`adapters/`): In-memory store, static resolver,
//!   clocks, JSON API handler

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-export main types for convenience
pub use adapters::{
    handle_api_query, ApiQueryError, InMemoryLedgerStore, ManualTimeSource,
    StaticLockHashResolver, SystemTimeSource,
};
pub use application::HistoryService;
pub use config::HistoryConfig;
pub use domain::{
    assemble_view, build_predicate, classify, paginate, transaction_value, transfer_kind,
    DaoIndex, EmptyReason, HistoryError, InputRecord, OutputRecord, OwnershipCriteria,
    PageRequest, PaginationResult, QueryPredicate, ResolverError, SearchContext, SearchType,
    StoreError, TimeWindow, TransactionRecord, TransactionSummary, TransactionView, TransferKind,
};
pub use ports::{
    CellFilter, CellIndex, LockHashResolver, TimeSource, TransactionHistoryApi, TransactionStore,
};
