//! # Error Types
//!
//! Rejections raised by the token ledger. Every variant is a refusal of the
//! attempted mutation; none of them means the ledger state was touched.

use crate::domain::value_objects::U256;
use thiserror::Error;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors returned by ledger construction and mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Destination of a transfer is the zero address.
    #[error("invalid recipient: zero address")]
    InvalidRecipient,

    /// Spender of an approval is the zero address.
    #[error("invalid spender: zero address")]
    InvalidSpender,

    /// Source balance is below the requested amount.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// Spender allowance is below the requested amount.
    #[error("insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance { required: U256, available: U256 },

    /// Checked 256-bit arithmetic overflowed.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    /// Name or symbol rejected at construction.
    #[error("invalid token metadata: {0}")]
    InvalidMetadata(String),

    /// Initial supply must be positive.
    #[error("invalid supply: total supply must be greater than zero")]
    InvalidSupply,
}

impl LedgerError {
    /// Stable machine-readable code, used as a log field and metric label.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRecipient => "invalid_recipient",
            Self::InvalidSpender => "invalid_spender",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::InsufficientAllowance { .. } => "insufficient_allowance",
            Self::ArithmeticOverflow => "arithmetic_overflow",
            Self::InvalidMetadata(_) => "invalid_metadata",
            Self::InvalidSupply => "invalid_supply",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_balance_message() {
        let err = LedgerError::InsufficientBalance {
            required: U256::from(500u64),
            available: U256::from(100u64),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            LedgerError::InvalidRecipient,
            LedgerError::InvalidSpender,
            LedgerError::InsufficientBalance {
                required: U256::one(),
                available: U256::zero(),
            },
            LedgerError::InsufficientAllowance {
                required: U256::one(),
                available: U256::zero(),
            },
            LedgerError::ArithmeticOverflow,
            LedgerError::InvalidMetadata("name".into()),
            LedgerError::InvalidSupply,
        ];
        let mut codes: Vec<_> = errors.iter().map(LedgerError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
