//! # Ports Layer
//!
//! Inbound API and outbound collaborator traits.

pub mod inbound;
pub mod outbound;

pub use inbound::TransactionHistoryApi;
pub use outbound::{
    CellFilter, CellIndex, LockHashResolver, ResolverError, StoreError, TimeSource,
    TransactionStore,
};
