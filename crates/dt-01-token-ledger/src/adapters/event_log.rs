//! # In-Memory Event Log
//!
//! Records every ledger notification so consumers can locate one by type
//! and field equality after the mutating call completes.

use crate::domain::events::{EventKind, LedgerEvent};
use crate::domain::value_objects::{Address, U256};
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;

/// Append-only record of published events.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: RwLock<Vec<LedgerEvent>>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every recorded event, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.read().clone()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// First event of `kind` that satisfies `predicate`.
    pub fn find<F>(&self, kind: EventKind, predicate: F) -> Option<LedgerEvent>
    where
        F: Fn(&LedgerEvent) -> bool,
    {
        self.events
            .read()
            .iter()
            .find(|event| event.kind() == kind && predicate(event))
            .cloned()
    }

    /// First `Transfer(from, to, value)`.
    #[must_use]
    pub fn find_transfer(&self, from: Address, to: Address, value: U256) -> Option<LedgerEvent> {
        self.find(EventKind::Transfer, |event| event.is_transfer(from, to, value))
    }

    /// First `Approval(owner, spender, value)`.
    #[must_use]
    pub fn find_approval(
        &self,
        owner: Address,
        spender: Address,
        value: U256,
    ) -> Option<LedgerEvent> {
        self.find(EventKind::Approval, |event| {
            event.is_approval(owner, spender, value)
        })
    }
}

impl EventSink for InMemoryEventLog {
    fn publish(&self, event: &LedgerEvent) -> usize {
        self.events.write().push(event.clone());
        1
    }

    fn events_published(&self) -> u64 {
        self.events.read().len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(value: u64) -> LedgerEvent {
        LedgerEvent::Transfer {
            from: Address::new([1; 20]),
            to: Address::new([2; 20]),
            value: U256::from(value),
        }
    }

    #[test]
    fn test_publish_records_in_order() {
        let log = InMemoryEventLog::new();
        assert!(log.is_empty());

        assert_eq!(log.publish(&transfer(1)), 1);
        log.publish(&transfer(2));

        assert_eq!(log.len(), 2);
        assert_eq!(log.events_published(), 2);
        assert_eq!(log.events(), vec![transfer(1), transfer(2)]);
    }

    #[test]
    fn test_find_by_fields() {
        let log = InMemoryEventLog::new();
        log.publish(&transfer(7));
        log.publish(&LedgerEvent::Approval {
            owner: Address::new([1; 20]),
            spender: Address::new([3; 20]),
            value: U256::from(7u64),
        });

        assert!(log
            .find_transfer(Address::new([1; 20]), Address::new([2; 20]), U256::from(7u64))
            .is_some());
        assert!(log
            .find_transfer(Address::new([1; 20]), Address::new([3; 20]), U256::from(7u64))
            .is_none());
        assert!(log
            .find_approval(Address::new([1; 20]), Address::new([3; 20]), U256::from(7u64))
            .is_some());
    }
}
