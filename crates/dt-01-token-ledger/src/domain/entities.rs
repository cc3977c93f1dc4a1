//! # Domain Entities
//!
//! The [`TokenLedger`] aggregate: one fixed-supply asset, its balances and
//! its allowances.
//!
//! ## Atomicity
//!
//! Each mutation runs every precondition and every checked addition before
//! its first write. A mutation that returns `Err` has not modified the
//! ledger.

use crate::domain::events::LedgerEvent;
use crate::domain::services::{checked_add, to_smallest_units};
use crate::domain::value_objects::{Address, TokenMetadata, U256};
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// TOKEN LEDGER
// =============================================================================

/// Balances and allowances of a single fixed-supply token.
///
/// Zero entries are never stored: an absent balance or allowance reads as 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenLedger {
    metadata: TokenMetadata,
    total_supply: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

impl TokenLedger {
    /// Creates the ledger and credits the whole supply to `deployer`.
    ///
    /// `total_supply_whole` is in whole tokens and is scaled by `10^18`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidRecipient`] if `deployer` is the zero address
    /// - [`LedgerError::InvalidMetadata`] if `name` or `symbol` is blank
    /// - [`LedgerError::InvalidSupply`] if `total_supply_whole` is zero
    /// - [`LedgerError::ArithmeticOverflow`] if the scaled supply exceeds 256 bits
    pub fn new(
        deployer: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        total_supply_whole: U256,
    ) -> Result<Self, LedgerError> {
        // The initial credit is a transfer to the deployer.
        if deployer.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }
        let metadata = TokenMetadata::new(name, symbol);
        if metadata.name.trim().is_empty() {
            return Err(LedgerError::InvalidMetadata("name must not be empty".into()));
        }
        if metadata.symbol.trim().is_empty() {
            return Err(LedgerError::InvalidMetadata(
                "symbol must not be empty".into(),
            ));
        }
        if total_supply_whole.is_zero() {
            return Err(LedgerError::InvalidSupply);
        }

        let total_supply = to_smallest_units(total_supply_whole, metadata.decimals)?;

        let mut balances = HashMap::new();
        balances.insert(deployer, total_supply);

        Ok(Self {
            metadata,
            total_supply,
            balances,
            allowances: HashMap::new(),
        })
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Token symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Decimal places (always 18).
    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Immutable metadata block.
    #[must_use]
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Total supply in smallest units.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Balance of `account`, 0 if it never held tokens.
    #[must_use]
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Remaining amount `spender` may move out of `owner`'s balance.
    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Accounts holding a non-zero balance, in address order.
    #[must_use]
    pub fn holders(&self) -> Vec<Address> {
        let mut holders: Vec<Address> = self.balances.keys().copied().collect();
        holders.sort_unstable();
        holders
    }

    /// Sum of every stored balance. `None` on overflow, which the
    /// conservation invariant rules out.
    #[must_use]
    pub fn circulating_sum(&self) -> Option<U256> {
        self.balances
            .values()
            .try_fold(U256::zero(), |acc, balance| acc.checked_add(*balance))
    }

    /// Deterministic, serializable copy of the full state.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut balances: Vec<BalanceEntry> = self
            .balances
            .iter()
            .map(|(account, balance)| BalanceEntry {
                account: *account,
                balance: *balance,
            })
            .collect();
        balances.sort_unstable_by_key(|entry| entry.account);

        let mut allowances: Vec<AllowanceEntry> = self
            .allowances
            .iter()
            .map(|((owner, spender), value)| AllowanceEntry {
                owner: *owner,
                spender: *spender,
                value: *value,
            })
            .collect();
        allowances.sort_unstable_by_key(|entry| (entry.owner, entry.spender));

        LedgerSnapshot {
            metadata: self.metadata.clone(),
            total_supply: self.total_supply,
            balances,
            allowances,
        }
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Moves `value` from `caller` to `to`.
    ///
    /// # Errors
    ///
    /// Checked in order:
    /// 1. [`LedgerError::InvalidRecipient`] if `to` is the zero address
    /// 2. [`LedgerError::InsufficientBalance`] if `caller` holds less than `value`
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        value: U256,
    ) -> Result<LedgerEvent, LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }
        self.move_balance(caller, to, value)?;

        Ok(LedgerEvent::Transfer {
            from: caller,
            to,
            value,
        })
    }

    /// Sets the allowance of `spender` over `caller`'s balance to `value`.
    ///
    /// The new value replaces the old one; it is not added to it.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidSpender`] if `spender` is the zero address.
    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        value: U256,
    ) -> Result<LedgerEvent, LedgerError> {
        if spender.is_zero() {
            return Err(LedgerError::InvalidSpender);
        }
        self.set_allowance(caller, spender, value);

        Ok(LedgerEvent::Approval {
            owner: caller,
            spender,
            value,
        })
    }

    /// Moves `value` from `from` to `to`, spending `caller`'s allowance.
    ///
    /// # Errors
    ///
    /// Checked in order:
    /// 1. [`LedgerError::InsufficientBalance`] if `from` holds less than `value`
    /// 2. [`LedgerError::InsufficientAllowance`] if `caller` may spend less than `value`
    /// 3. [`LedgerError::InvalidRecipient`] if `to` is the zero address
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<LedgerEvent, LedgerError> {
        let available = self.balance_of(from);
        if available < value {
            return Err(LedgerError::InsufficientBalance {
                required: value,
                available,
            });
        }

        let allowance = self.allowance(from, caller);
        if allowance < value {
            return Err(LedgerError::InsufficientAllowance {
                required: value,
                available: allowance,
            });
        }

        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }

        self.move_balance(from, to, value)?;
        self.set_allowance(from, caller, allowance - value);

        Ok(LedgerEvent::Transfer { from, to, value })
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    /// Debits `from` and credits `to`. All checks run before either write.
    fn move_balance(&mut self, from: Address, to: Address, value: U256) -> Result<(), LedgerError> {
        let available = self.balance_of(from);
        if available < value {
            return Err(LedgerError::InsufficientBalance {
                required: value,
                available,
            });
        }

        // Self-transfer: net zero.
        if from == to {
            return Ok(());
        }

        let debited = available - value;
        let credited = checked_add(self.balance_of(to), value)?;

        self.set_balance(from, debited);
        self.set_balance(to, credited);
        Ok(())
    }

    fn set_balance(&mut self, account: Address, balance: U256) {
        if balance.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance);
        }
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, value: U256) {
        if value.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), value);
        }
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// One balance row of a [`LedgerSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub account: Address,
    pub balance: U256,
}

/// One allowance row of a [`LedgerSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceEntry {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
}

/// Sorted, serializable image of a [`TokenLedger`].
///
/// Two snapshots of the same state compare equal, which makes them suitable
/// for before/after comparisons around a rejected mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub metadata: TokenMetadata,
    pub total_supply: U256,
    pub balances: Vec<BalanceEntry>,
    pub allowances: Vec<AllowanceEntry>,
}
