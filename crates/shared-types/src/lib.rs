//! # Shared Types Crate
//!
//! Primitives used across the Cell History workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: hashes, out-points and transaction status
//!   are defined once here and re-used by the engine and the event bus.
//! - **Hex at the edges**: hashes are raw 32-byte arrays in memory and
//!   `0x`-prefixed lowercase hex whenever they cross a text boundary.

pub mod codec;
pub mod entities;
pub mod errors;

pub use codec::{hash_from_hex, to_hex};
pub use entities::*;
pub use errors::*;
