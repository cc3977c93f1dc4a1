//! # Dapp-Token Deploy Runtime
//!
//! Deployment driver for the token ledger.
//!
//! ## Modular Structure
//!
//! - `config/` - Deployment parameters loaded from the environment
//! - `accounts/` - Deterministic secp256k1 development accounts
//! - `deployment/` - Contract address derivation and the deployer
//!
//! ## Deployment Sequence
//!
//! 1. Load and validate configuration
//! 2. Generate development accounts (account 0 deploys)
//! 3. Deploy the token ledger at `(deployer, nonce 0)`
//! 4. Deploy the exchange record at `(deployer, nonce 1)`
//! 5. Print both handles

pub mod accounts;
pub mod config;
pub mod deployment;

pub use accounts::{DevAccount, DevAccounts};
pub use config::{DeployConfig, DeployError};
pub use deployment::{
    compute_contract_address, DeployedExchange, DeployedToken, Deployer, ExchangeConfig,
    LedgerHandle,
};
