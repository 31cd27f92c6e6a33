//! # History Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::codec::hex_hash;
use shared_types::Hash;

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// The free-text description of a transaction was overwritten.
    DescriptionUpdated {
        /// The transaction whose description changed.
        #[serde(with = "hex_hash")]
        tx_hash: Hash,
        /// The new description.
        description: String,
        /// Update time in milliseconds since epoch.
        updated_at: u64,
    },

    /// A store or resolver call failed while serving a request.
    ///
    /// The error is still returned to the caller; this event only makes the
    /// failure visible to operators.
    BackendFailure {
        /// Engine operation that was running (e.g. `get_transactions`).
        operation: String,
        /// Rendered error.
        error: String,
    },
}

impl HistoryEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::DescriptionUpdated { .. } => EventTopic::Transactions,
            Self::BackendFailure { .. } => EventTopic::DeadLetterQueue,
        }
    }

    /// The transaction this event concerns, if any.
    #[must_use]
    pub fn tx_hash(&self) -> Option<&Hash> {
        match self {
            Self::DescriptionUpdated { tx_hash, .. } => Some(tx_hash),
            Self::BackendFailure { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Changes to persisted transactions.
    Transactions,
    /// Failures routed for operator attention.
    DeadLetterQueue,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Transactions to include. Empty means all transactions; events that
    /// carry no transaction hash only pass an empty list.
    pub tx_hashes: Vec<Hash>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            tx_hashes: Vec::new(),
        }
    }

    /// Create a filter for events about specific transactions.
    #[must_use]
    pub fn for_transactions(tx_hashes: Vec<Hash>) -> Self {
        Self {
            topics: vec![EventTopic::Transactions],
            tx_hashes,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &HistoryEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let tx_match = self.tx_hashes.is_empty()
            || event
                .tx_hash()
                .map_or(false, |hash| self.tx_hashes.contains(hash));

        topic_match && tx_match
    }
}
