//! # DT-01 Token Ledger
//!
//! Fixed-supply fungible token ledger with owner balances and delegated
//! spending allowances (ERC-20 semantics).
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Supply conservation | `domain/entities.rs` - `move_balance()`, checked by `check_conservation_invariant()` |
//! | No negative amounts | `U256` + compare-before-subtract in `domain/entities.rs` |
//! | Zero address never receives | `transfer()` / `transfer_from()` - `InvalidRecipient` |
//! | Zero address never approved | `approve()` - `InvalidSpender` |
//! | Failed call leaves state untouched | all checks precede the first write |
//!
//! ## Rejection Order
//!
//! | Operation | Checks (in order) |
//! |-----------|-------------------|
//! | `transfer` | `InvalidRecipient`, `InsufficientBalance` |
//! | `approve` | `InvalidSpender` |
//! | `transfer_from` | `InsufficientBalance`, `InsufficientAllowance`, `InvalidRecipient` |
//!
//! ## Module Structure
//!
//! ```text
//! dt-01-token-ledger/
//! ├── domain/      # TokenLedger, LedgerEvent, invariants, U256 helpers
//! ├── ports/       # TokenLedgerApi (inbound), EventSink (outbound)
//! ├── adapters/    # InMemoryEventLog, BroadcastEventBus
//! └── service.rs   # Lock-guarded TokenLedgerService
//! ```
//!
//! ## Usage Example
//!
//! ```ignore
//! use dt_01_token_ledger::prelude::*;
//!
//! let service = TokenLedgerService::deploy(
//!     deployer, "Dapp University", "DAPP", U256::from(1_000_000u64),
//!     InMemoryEventLog::new(),
//! )?;
//! let receipt = service.transfer(deployer, receiver, tokens(100))?;
//! assert!(receipt.success);
//! ```

#![warn(missing_docs)]
#![allow(missing_docs)] // Enum fields are self-describing
#![warn(clippy::all)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::entities::{
        AllowanceEntry, BalanceEntry, LedgerSnapshot, TokenLedger,
    };
    pub use crate::domain::events::{EventKind, LedgerEvent, LedgerReceipt};
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };
    pub use crate::domain::services::{to_smallest_units, tokens, unit_scale};
    pub use crate::domain::value_objects::{
        Address, AddressParseError, TokenMetadata, TOKEN_DECIMALS, U256,
    };

    pub use crate::ports::inbound::TokenLedgerApi;
    pub use crate::ports::outbound::{EventSink, NoopEventSink};

    pub use crate::adapters::{BroadcastEventBus, InMemoryEventLog};

    pub use crate::errors::LedgerError;

    pub use crate::service::{LedgerStats, Operation, TokenLedgerService};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Token Ledger";
