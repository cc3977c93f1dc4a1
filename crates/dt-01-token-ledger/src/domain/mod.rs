//! # Domain Layer (Inner Hexagon)
//!
//! Pure ledger logic. NO I/O, NO locking, NO logging.
//!
//! Adapters and the service depend on this module, never the reverse.

pub mod entities;
pub mod events;
pub mod invariants;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use events::*;
pub use invariants::*;
pub use services::*;
pub use value_objects::*;
