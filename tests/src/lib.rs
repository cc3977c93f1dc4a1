//! # Dapp-Token Test Suite
//!
//! Cross-crate scenarios for the token ledger and its deployment driver.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── ledger_flows.rs      # Transfer, approve, delegated transfer scenarios
//!     └── deployment_flows.rs  # Deploy driver + broadcast bus delivery
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dt-tests
//! cargo test -p dt-tests integration::ledger_flows
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
