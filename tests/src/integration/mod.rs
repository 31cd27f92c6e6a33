//! # Integration Tests
//!
//! Flows spanning the engine, the shared bus and telemetry.

pub mod flows;
pub mod properties;
pub mod telemetry;
