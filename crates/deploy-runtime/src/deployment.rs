//! # Deployment
//!
//! Deploys the token ledger and the exchange record, assigning each a
//! contract address derived from the deployer and its nonce.

use std::collections::HashMap;
use std::sync::Arc;

use dapp_telemetry::log_ledger_event;
use dt_01_token_ledger::prelude::{Address, BroadcastEventBus, TokenLedgerApi, TokenLedgerService};
use serde::Serialize;
use sha3::{Digest, Keccak256};

use crate::config::{DeployConfig, DeployError};

/// Ledger service as deployed: events fan out on a broadcast bus.
pub type LedgerHandle = TokenLedgerService<Arc<BroadcastEventBus>>;

// =============================================================================
// ADDRESS DERIVATION
// =============================================================================

/// Computes the contract address for a deployment.
///
/// Address = keccak256(rlp(\[sender, nonce\]))\[12:\]
#[must_use]
pub fn compute_contract_address(sender: Address, nonce: u64) -> Address {
    let mut content = Vec::with_capacity(32);

    // RLP encode address (20 bytes, 0x80 + 20 = 0x94)
    content.push(0x94);
    content.extend_from_slice(sender.as_bytes());

    // RLP encode nonce
    if nonce == 0 {
        content.push(0x80);
    } else if nonce < 0x80 {
        content.push(nonce as u8);
    } else {
        let nonce_bytes = minimal_be_bytes(nonce);
        content.push(0x80 + nonce_bytes.len() as u8);
        content.extend_from_slice(&nonce_bytes);
    }

    // Content is at most 1 + 20 + 9 bytes, always a short list
    let mut rlp_data = Vec::with_capacity(content.len() + 1);
    rlp_data.push(0xc0 + content.len() as u8);
    rlp_data.extend_from_slice(&content);

    let hash = Keccak256::digest(&rlp_data);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..32]);
    Address::new(addr)
}

/// Big-endian bytes without leading zeros.
fn minimal_be_bytes(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(7);
    bytes[start..].to_vec()
}

// =============================================================================
// DEPLOYED ARTIFACTS
// =============================================================================

/// Exchange parameters. The exchange has no behavior beyond these.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExchangeConfig {
    /// Account receiving trading fees.
    pub fee_account: Address,
    /// Fee percent, 0 to 100.
    pub fee_percent: u8,
}

/// A deployed token ledger.
pub struct DeployedToken {
    /// Contract address.
    pub address: Address,
    /// Live ledger service.
    pub service: Arc<LedgerHandle>,
    /// Bus the service publishes to.
    pub bus: Arc<BroadcastEventBus>,
}

/// A deployed exchange record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeployedExchange {
    /// Contract address.
    pub address: Address,
    /// Exchange parameters.
    pub config: ExchangeConfig,
}

// =============================================================================
// DEPLOYER
// =============================================================================

/// Tracks account nonces and performs deployments.
#[derive(Debug, Default)]
pub struct Deployer {
    nonces: HashMap<Address, u64>,
}

impl Deployer {
    /// Fresh deployer, every account at nonce 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce for `account`.
    pub fn nonce(&self, account: Address) -> u64 {
        self.nonces.get(&account).copied().unwrap_or(0)
    }

    /// Consume the next nonce of `from` and return the derived address.
    fn next_address(&mut self, from: Address) -> Address {
        let nonce = self.nonces.entry(from).or_insert(0);
        let address = compute_contract_address(from, *nonce);
        *nonce += 1;
        address
    }

    /// Deploy the token ledger with the whole supply credited to `from`.
    ///
    /// The nonce is consumed only when construction succeeds.
    ///
    /// # Errors
    ///
    /// [`DeployError::Ledger`] when the ledger rejects its parameters.
    pub fn deploy_token(
        &mut self,
        from: Address,
        config: &DeployConfig,
    ) -> Result<DeployedToken, DeployError> {
        let bus = Arc::new(BroadcastEventBus::new());
        let service = TokenLedgerService::deploy(
            from,
            &config.token_name,
            &config.token_symbol,
            config.total_supply(),
            Arc::clone(&bus),
        )?;
        let address = self.next_address(from);

        dapp_telemetry::metrics::CONTRACTS_DEPLOYED
            .with_label_values(&["token"])
            .inc();

        log_ledger_event!(
            info,
            "deploy",
            "Token deployed",
            %address,
            deployer = %from,
            symbol = %service.symbol()
        );

        Ok(DeployedToken {
            address,
            service: Arc::new(service),
            bus,
        })
    }

    /// Deploy the exchange record.
    ///
    /// # Errors
    ///
    /// [`DeployError::InvalidConfig`] when `fee_percent` exceeds 100.
    pub fn deploy_exchange(
        &mut self,
        from: Address,
        fee_account: Address,
        fee_percent: u8,
    ) -> Result<DeployedExchange, DeployError> {
        if fee_percent > 100 {
            return Err(DeployError::InvalidConfig(format!(
                "fee percent {fee_percent} exceeds 100"
            )));
        }
        let address = self.next_address(from);

        dapp_telemetry::metrics::CONTRACTS_DEPLOYED
            .with_label_values(&["exchange"])
            .inc();

        log_ledger_event!(
            info,
            "deploy",
            "Exchange deployed",
            %address,
            %fee_account,
            fee_percent
        );

        Ok(DeployedExchange {
            address,
            config: ExchangeConfig {
                fee_account,
                fee_percent,
            },
        })
    }
}
