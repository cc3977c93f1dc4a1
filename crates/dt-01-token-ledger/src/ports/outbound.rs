//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the ledger service calls out to.

use crate::domain::events::LedgerEvent;
use std::sync::Arc;

/// Receiver of ledger notifications.
///
/// Called once per emitted event, in apply order, while the ledger's write
/// lock is held. Implementations must not call back into the ledger.
pub trait EventSink: Send + Sync {
    /// Deliver one event. Returns the number of consumers that received it.
    fn publish(&self, event: &LedgerEvent) -> usize;

    /// Total events delivered to this sink.
    fn events_published(&self) -> u64;
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn publish(&self, _event: &LedgerEvent) -> usize {
        0
    }

    fn events_published(&self) -> u64 {
        0
    }
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn publish(&self, event: &LedgerEvent) -> usize {
        (**self).publish(event)
    }

    fn events_published(&self) -> u64 {
        (**self).events_published()
    }
}
