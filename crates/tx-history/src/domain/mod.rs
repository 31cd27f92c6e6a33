//! # Domain Layer
//!
//! Pure history logic with no I/O: search classification, predicate
//! construction, balance and DAO annotation, pagination.

pub mod assembler;
pub mod balance;
pub mod dao;
pub mod entities;
pub mod errors;
pub mod pagination;
pub mod predicate;
pub mod search;

pub use assembler::assemble_view;
pub use balance::{transaction_value, transfer_kind};
pub use dao::{previous_tx_hashes, DaoIndex};
pub use entities::{
    InputRecord, OutputRecord, OwnershipCriteria, TransactionRecord, TransactionSummary,
    TransactionView, TransferKind,
};
pub use errors::{HistoryError, ResolverError, StoreError};
pub use pagination::{history_order, paginate, PageRequest, PaginationResult};
pub use predicate::{build_predicate, EmptyReason, QueryPredicate, SearchContext, TimeWindow, DAY_MS};
pub use search::{classify, SearchType};
