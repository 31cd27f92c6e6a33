//! # Cell History Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Synthetic ledgers shared by tests and benches
//! └── integration/      # Engine + bus + telemetry flows, properties
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p history-tests
//!
//! # By category
//! cargo test -p history-tests integration::
//!
//! # Benchmarks
//! cargo bench -p history-tests
//! ```

pub mod fixtures;
pub mod integration;
