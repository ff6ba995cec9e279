//! Fan-out of domain events to external subscribers.
//!
//! `EventBus` hands each subscriber its own unbounded channel. Publishing
//! never blocks on a slow subscriber, and a subscriber that has dropped its
//! receiver is pruned on the next publish.
//!
//! `FanoutSink` combines several sinks (e.g. the audit trail and a bus) into
//! the single `EventSink` the registry is constructed with.

use std::sync::{
    mpsc::{self, Receiver, Sender},
    Arc, Mutex,
};

use tracing::{debug, warn};

use medcase_contracts::event::PublishedEvent;
use medcase_core::traits::EventSink;

/// Channel-per-subscriber event bus.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Sender<PublishedEvent>>>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber and return its receiving end.
    ///
    /// The subscriber sees every event published after this call.
    pub fn subscribe(&self) -> Receiver<PublishedEvent> {
        let (tx, rx) = mpsc::channel();
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(tx),
            Err(e) => warn!(error = %e, "event bus lock poisoned; subscriber not registered"),
        }
        rx
    }

    /// Number of live subscribers as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl EventSink for EventBus {
    fn publish(&self, event: &PublishedEvent) {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            warn!(case_id = %event.event.case_id(), "event bus lock poisoned; event dropped");
            return;
        };

        let before = subscribers.len();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        let pruned = before - subscribers.len();

        debug!(
            kind = event.event.kind(),
            case_id = %event.event.case_id(),
            delivered = subscribers.len(),
            pruned,
            "event fanned out"
        );
    }
}

/// Publishes each event to every inner sink, in order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    /// Create an empty fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink; returns `self` for chaining.
    pub fn with(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl EventSink for FanoutSink {
    fn publish(&self, event: &PublishedEvent) {
        for sink in &self.sinks {
            sink.publish(event);
        }
    }
}
