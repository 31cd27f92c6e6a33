//! # Shared Bus - Event Bus for History Notifications
//!
//! The query engine answers requests with plain call/return. Anything that
//! must be *pushed* to an outer layer (a UI refreshing a transaction list, an
//! audit log) goes through this bus instead of a global broadcast subject.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ HistoryService│                   │  UI / Audit  │
//! │              │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Publishing never blocks the publisher: a bus with no subscribers drops
//! the event and reports zero receivers.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, HistoryEvent};
pub use publisher::{EventPublisher, InMemoryEventBus, NoopPublisher};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
