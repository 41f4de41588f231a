//! The event bus behind the realtime channel.
//!
//! After any successful write to products, orders, or reviews the handler
//! publishes a typed [`ChangeEvent`]. Delivery is fire-and-forget and
//! at-most-once: there is no retry, no acknowledgment, and no replay for
//! subscribers that connect later (they do the initial REST fetch instead).

use namo_core::ChangeEvent;
use tokio::sync::broadcast;

/// Buffered events per subscriber before the oldest are dropped.
const CHANNEL_CAPACITY: usize = 64;

/// Fan-out bus for entity change events.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    /// Create a bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish a change to all current subscribers.
    ///
    /// A publish with no subscribers is a no-op, not an error.
    pub fn publish(&self, event: ChangeEvent) {
        let delivered = self.tx.send(event).unwrap_or(0);
        tracing::debug!(channel = event.channel(), delivered, "published change event");
    }

    /// Open a new subscription. Only events published after this call are
    /// delivered.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
