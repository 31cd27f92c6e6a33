//! # Event Subscriber
//!
//! Receiving side of the bus. A [`Subscription`] pulls events one at a time;
//! an [`EventStream`] adapts the same receiver to `tokio_stream::Stream` and
//! only wakes its task when the channel has something for it.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

use crate::events::{EventFilter, EventTopic, HistoryEvent};

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("Event bus closed")]
    Closed,
}

/// Anything events can be subscribed from.
pub trait EventSubscriber: Send + Sync {
    fn subscribe(&self, filter: EventFilter) -> Subscription;
}

/// Live subscription counts keyed by topic list.
pub(crate) type Registry = Arc<Mutex<HashMap<String, usize>>>;

pub(crate) fn registry_key(topics: &[EventTopic]) -> String {
    format!("{topics:?}")
}

/// Counts one live subscriber in the bus registry until dropped.
pub(crate) struct Registration {
    registry: Registry,
    key: String,
}

impl Registration {
    pub(crate) fn new(registry: Registry, key: String) -> Self {
        *registry.lock().entry(key.clone()).or_insert(0) += 1;
        Self { registry, key }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        let mut registry = self.registry.lock();
        if let Some(count) = registry.get_mut(&self.key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                registry.remove(&self.key);
            }
        }
        debug!(topics = %self.key, "Subscription dropped");
    }
}

/// Filtered handle on the bus. Dropping it unregisters the subscriber.
pub struct Subscription {
    receiver: broadcast::Receiver<HistoryEvent>,
    filter: EventFilter,
    _registration: Registration,
}

impl Subscription {
    pub(crate) fn new(
        receiver: broadcast::Receiver<HistoryEvent>,
        filter: EventFilter,
        registration: Registration,
    ) -> Self {
        Self {
            receiver,
            filter,
            _registration: registration,
        }
    }

    /// Next matching event, or `None` once the bus is gone.
    ///
    /// A lagging subscriber skips the events it missed and keeps going.
    pub async fn recv(&mut self) -> Option<HistoryEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Subscriber lagged, some events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    ///
    /// `Ok(None)` means nothing matching is queued right now.
    pub fn try_recv(&mut self) -> Result<Option<HistoryEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
            }
        }
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Turn this subscription into a stream of matching events.
    #[must_use]
    pub fn into_stream(self) -> EventStream {
        EventStream::new(self)
    }
}

/// Stream of events matching a filter.
///
/// Ends when the bus is dropped. Lagged gaps are skipped.
pub struct EventStream {
    events: Pin<Box<dyn Stream<Item = HistoryEvent> + Send>>,
    filter: EventFilter,
    _registration: Registration,
}

impl EventStream {
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        let Subscription {
            receiver,
            filter,
            _registration: registration,
        } = subscription;

        let matcher = filter.clone();
        let events = BroadcastStream::new(receiver).filter_map(move |item| match item {
            Ok(event) => matcher.matches(&event).then_some(event),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                debug!(skipped, "Event stream lagged, some events dropped");
                None
            }
        });

        Self {
            events: Box::pin(events),
            filter,
            _registration: registration,
        }
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Stream for EventStream {
    type Item = HistoryEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.as_mut().poll_next(cx)
    }
}
