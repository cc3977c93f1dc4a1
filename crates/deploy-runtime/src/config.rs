//! # Deployment Configuration
//!
//! Parameters of a deployment run. Defaults match the local development
//! deployment; every field can be overridden from the environment.

use dapp_telemetry::parse_flag;
use dt_01_token_ledger::prelude::{LedgerError, U256};
use thiserror::Error;

/// Deployment errors.
#[derive(Debug, Error)]
pub enum DeployError {
    /// A configuration value is unusable.
    #[error("Invalid deploy configuration: {0}")]
    InvalidConfig(String),

    /// An environment variable could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    /// A development key could not be derived.
    #[error("Failed to derive key for account {index}: {reason}")]
    KeyDerivation { index: usize, reason: String },

    /// The requested account does not exist.
    #[error("Account index {index} out of range (have {available})")]
    UnknownAccount { index: usize, available: usize },

    /// The ledger refused to construct.
    #[error("Ledger construction failed: {0}")]
    Ledger(#[from] LedgerError),
}

/// Complete deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    /// Token name.
    pub token_name: String,
    /// Token symbol.
    pub token_symbol: String,
    /// Total supply in whole tokens.
    pub total_supply_whole: u64,
    /// Index of the dev account that receives exchange fees.
    pub fee_account_index: usize,
    /// Exchange fee percent, 0 to 100.
    pub fee_percent: u8,
    /// Number of development accounts to generate.
    pub dev_accounts: usize,
    /// Print the ledger snapshot as JSON after deployment.
    pub dump_state: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            token_name: "Dapp University".to_string(),
            token_symbol: "DAPP".to_string(),
            total_supply_whole: 1_000_000,
            fee_account_index: 1,
            fee_percent: 10,
            dev_accounts: 10,
            dump_state: false,
        }
    }
}

impl DeployConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    ///
    /// # Errors
    ///
    /// [`DeployError::InvalidEnv`] when a set variable does not parse.
    pub fn from_env() -> Result<Self, DeployError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub(crate) fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, DeployError> {
        let mut config = Self::default();

        if let Some(name) = lookup("DT_TOKEN_NAME") {
            config.token_name = name;
        }
        if let Some(symbol) = lookup("DT_TOKEN_SYMBOL") {
            config.token_symbol = symbol;
        }
        if let Some(value) = lookup("DT_TOKEN_SUPPLY") {
            config.total_supply_whole = parse_var("DT_TOKEN_SUPPLY", value)?;
        }
        if let Some(value) = lookup("DT_FEE_ACCOUNT_INDEX") {
            config.fee_account_index = parse_var("DT_FEE_ACCOUNT_INDEX", value)?;
        }
        if let Some(value) = lookup("DT_FEE_PERCENT") {
            config.fee_percent = parse_var("DT_FEE_PERCENT", value)?;
        }
        if let Some(value) = lookup("DT_DEV_ACCOUNTS") {
            config.dev_accounts = parse_var("DT_DEV_ACCOUNTS", value)?;
        }
        if let Some(value) = lookup("DT_DUMP_STATE") {
            config.dump_state = parse_flag(&value);
        }

        Ok(config)
    }

    /// Validate the configuration before deploying anything.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::InvalidConfig`] if:
    /// - name or symbol is empty
    /// - total supply is zero
    /// - fee percent exceeds 100
    /// - the fee account index is not a generated account
    pub fn validate(&self) -> Result<(), DeployError> {
        if self.token_name.trim().is_empty() {
            return Err(DeployError::InvalidConfig("token name is empty".into()));
        }
        if self.token_symbol.trim().is_empty() {
            return Err(DeployError::InvalidConfig("token symbol is empty".into()));
        }
        if self.total_supply_whole == 0 {
            return Err(DeployError::InvalidConfig("total supply is zero".into()));
        }
        if self.fee_percent > 100 {
            return Err(DeployError::InvalidConfig(format!(
                "fee percent {} exceeds 100",
                self.fee_percent
            )));
        }
        if self.fee_account_index >= self.dev_accounts {
            return Err(DeployError::InvalidConfig(format!(
                "fee account index {} outside {} dev accounts",
                self.fee_account_index, self.dev_accounts
            )));
        }
        Ok(())
    }

    /// Total supply as a ledger amount (whole tokens).
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        U256::from(self.total_supply_whole)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, DeployError> {
    value
        .trim()
        .parse()
        .map_err(|_| DeployError::InvalidEnv { var, value })
}
