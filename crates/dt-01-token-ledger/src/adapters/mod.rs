//! # Adapters (Outer Hexagon)
//!
//! Event sink implementations:
//!
//! - `InMemoryEventLog`: append-only log, queryable by type and fields
//! - `BroadcastEventBus`: fan-out to async subscribers over `tokio::sync::broadcast`

pub mod event_bus;
pub mod event_log;

pub use event_bus::*;
pub use event_log::*;
