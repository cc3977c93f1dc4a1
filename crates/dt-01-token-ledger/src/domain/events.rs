//! # Ledger Events
//!
//! Typed notifications produced by successful mutations. They are returned
//! in every [`LedgerReceipt`] and forwarded to the configured event sink.

use crate::domain::value_objects::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a [`LedgerEvent`], used to look events up by type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Balance movement.
    Transfer,
    /// Allowance set.
    Approval,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => write!(f, "Transfer"),
            Self::Approval => write!(f, "Approval"),
        }
    }
}

/// A notification emitted by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// `value` smallest units moved from `from` to `to`.
    Transfer {
        from: Address,
        to: Address,
        value: U256,
    },
    /// `owner` allowed `spender` to move up to `value`.
    Approval {
        owner: Address,
        spender: Address,
        value: U256,
    },
}

impl LedgerEvent {
    /// Returns the event kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Transfer { .. } => EventKind::Transfer,
            Self::Approval { .. } => EventKind::Approval,
        }
    }

    /// The amount carried by the event.
    #[must_use]
    pub fn value(&self) -> U256 {
        match self {
            Self::Transfer { value, .. } | Self::Approval { value, .. } => *value,
        }
    }

    /// True if this is a `Transfer` with exactly these fields.
    #[must_use]
    pub fn is_transfer(&self, from: Address, to: Address, value: U256) -> bool {
        *self
            == Self::Transfer {
                from,
                to,
                value,
            }
    }

    /// True if this is an `Approval` with exactly these fields.
    #[must_use]
    pub fn is_approval(&self, owner: Address, spender: Address, value: U256) -> bool {
        *self
            == Self::Approval {
                owner,
                spender,
                value,
            }
    }
}

/// Outcome of a successful mutation.
///
/// A rejected mutation never produces a receipt; it returns a
/// [`LedgerError`](crate::errors::LedgerError) instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReceipt {
    /// Always true for a receipt that exists.
    pub success: bool,
    /// Events emitted by the mutation, in emission order.
    pub events: Vec<LedgerEvent>,
}

impl LedgerReceipt {
    /// Receipt for a mutation that emitted a single event.
    #[must_use]
    pub fn with_event(event: LedgerEvent) -> Self {
        Self {
            success: true,
            events: vec![event],
        }
    }

    /// First event of the given kind.
    #[must_use]
    pub fn find(&self, kind: EventKind) -> Option<&LedgerEvent> {
        self.events.iter().find(|event| event.kind() == kind)
    }
}
