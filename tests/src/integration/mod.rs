//! Cross-crate integration scenarios.

pub mod deployment_flows;
pub mod ledger_flows;
