//! # Driving Ports (API - Inbound)
//!
//! The interface exposed to deployment drivers, tests and any host that
//! routes authenticated calls to the ledger.
//!
//! Caller identity is always an explicit parameter. The ledger trusts it;
//! authenticating the caller is the host's job.

use crate::domain::events::LedgerReceipt;
use crate::domain::value_objects::{Address, U256};
use crate::errors::LedgerError;

/// Primary API of a token ledger.
pub trait TokenLedgerApi: Send + Sync {
    // === Queries ===

    /// Token name.
    fn name(&self) -> String;

    /// Token symbol.
    fn symbol(&self) -> String;

    /// Decimal places.
    fn decimals(&self) -> u8;

    /// Total supply in smallest units.
    fn total_supply(&self) -> U256;

    /// Balance of `account`.
    fn balance_of(&self, account: Address) -> U256;

    /// Allowance of `spender` over `owner`'s balance.
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    // === Mutations ===

    /// Move `value` from `caller` to `to`.
    ///
    /// # Errors
    ///
    /// `InvalidRecipient`, then `InsufficientBalance`.
    fn transfer(&self, caller: Address, to: Address, value: U256)
        -> Result<LedgerReceipt, LedgerError>;

    /// Set `spender`'s allowance over `caller`'s balance to `value`.
    ///
    /// # Errors
    ///
    /// `InvalidSpender`.
    fn approve(
        &self,
        caller: Address,
        spender: Address,
        value: U256,
    ) -> Result<LedgerReceipt, LedgerError>;

    /// Move `value` from `from` to `to` on `caller`'s allowance.
    ///
    /// # Errors
    ///
    /// `InsufficientBalance`, then `InsufficientAllowance`, then
    /// `InvalidRecipient`.
    fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<LedgerReceipt, LedgerError>;
}
