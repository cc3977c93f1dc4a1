//! # Ports
//!
//! - `inbound`: the API callers drive the ledger through
//! - `outbound`: what the ledger needs from its environment

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
