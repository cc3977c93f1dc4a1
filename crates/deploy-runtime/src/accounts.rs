//! # Development Accounts
//!
//! Deterministic secp256k1 accounts for local deployments.
//!
//! Account `i` uses the signing key `keccak256("dapp-token/dev-account/{i}")`.
//! Its address is the last 20 bytes of the keccak256 hash of the
//! uncompressed public key without the `0x04` prefix.

use dt_01_token_ledger::prelude::Address;
use k256::ecdsa::{SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};

use crate::config::DeployError;

/// Seed prefix for development keys.
pub const DEV_ACCOUNT_SEED: &str = "dapp-token/dev-account";

/// One development account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DevAccount {
    index: usize,
    address: Address,
}

impl DevAccount {
    /// Derive account `index`.
    ///
    /// # Errors
    ///
    /// [`DeployError::KeyDerivation`] if the seed hash is not a valid scalar.
    pub fn derive(index: usize) -> Result<Self, DeployError> {
        let signing_key = dev_signing_key(index)?;
        Ok(Self {
            index,
            address: address_from_pubkey(signing_key.verifying_key()),
        })
    }

    /// Position in the account list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Account address.
    pub fn address(&self) -> Address {
        self.address
    }
}

/// Signing key of development account `index`.
fn dev_signing_key(index: usize) -> Result<SigningKey, DeployError> {
    let seed = Keccak256::digest(format!("{DEV_ACCOUNT_SEED}/{index}").as_bytes());
    SigningKey::from_slice(&seed).map_err(|e| DeployError::KeyDerivation {
        index,
        reason: e.to_string(),
    })
}

/// Ethereum-style address of a public key.
#[must_use]
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let pubkey_slice = pubkey_bytes.as_bytes();

    // Keccak256 hash of public key (without 0x04 prefix)
    let hash = Keccak256::digest(&pubkey_slice[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Address::new(address)
}

/// Ordered set of development accounts. Account 0 is the deployer.
#[derive(Clone, Debug)]
pub struct DevAccounts {
    accounts: Vec<DevAccount>,
}

impl DevAccounts {
    /// Generate `count` accounts.
    ///
    /// # Errors
    ///
    /// Propagates [`DevAccount::derive`] failures.
    pub fn generate(count: usize) -> Result<Self, DeployError> {
        let accounts = (0..count)
            .map(DevAccount::derive)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { accounts })
    }

    /// Account at `index`.
    ///
    /// # Errors
    ///
    /// [`DeployError::UnknownAccount`] when out of range.
    pub fn get(&self, index: usize) -> Result<&DevAccount, DeployError> {
        self.accounts.get(index).ok_or(DeployError::UnknownAccount {
            index,
            available: self.accounts.len(),
        })
    }

    /// The deploying account.
    ///
    /// # Errors
    ///
    /// [`DeployError::UnknownAccount`] when no accounts were generated.
    pub fn deployer(&self) -> Result<&DevAccount, DeployError> {
        self.get(0)
    }

    /// All addresses in order.
    pub fn addresses(&self) -> Vec<Address> {
        self.accounts.iter().map(DevAccount::address).collect()
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no accounts were generated.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterate over the accounts.
    pub fn iter(&self) -> impl Iterator<Item = &DevAccount> {
        self.accounts.iter()
    }
}
