//! # Domain Services
//!
//! Pure amount arithmetic shared by the ledger and its callers.

use crate::domain::value_objects::{TOKEN_DECIMALS, U256};
use crate::errors::LedgerError;

/// `10^decimals`, the number of smallest units in one whole token.
#[must_use]
pub fn unit_scale(decimals: u8) -> U256 {
    U256::exp10(usize::from(decimals))
}

/// Converts a whole-token amount to smallest units.
///
/// # Errors
///
/// Returns [`LedgerError::ArithmeticOverflow`] if the result does not fit in
/// 256 bits.
pub fn to_smallest_units(whole: U256, decimals: u8) -> Result<U256, LedgerError> {
    whole
        .checked_mul(unit_scale(decimals))
        .ok_or(LedgerError::ArithmeticOverflow)
}

/// `n` whole tokens at [`TOKEN_DECIMALS`], in smallest units.
///
/// A `u64` times `10^18` is below `2^124`, so this never overflows.
#[must_use]
pub fn tokens(n: u64) -> U256 {
    U256::from(n) * unit_scale(TOKEN_DECIMALS)
}

/// Checked addition mapped into the ledger error space.
pub(crate) fn checked_add(a: U256, b: U256) -> Result<U256, LedgerError> {
    a.checked_add(b).ok_or(LedgerError::ArithmeticOverflow)
}
