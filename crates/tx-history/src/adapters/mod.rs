//! # Adapters Layer
//!
//! Reference implementations of the outbound ports and the JSON API entry
//! point.

pub mod api_handler;
pub mod memory_store;
pub mod resolver;
pub mod time;

pub use api_handler::{handle_api_query, ApiQueryError};
pub use memory_store::InMemoryLedgerStore;
pub use resolver::StaticLockHashResolver;
pub use time::{ManualTimeSource, SystemTimeSource};
