//! # Domain Invariants
//!
//! Properties that MUST hold for every reachable ledger state.
//!
//! - Conservation: stored balances sum to the total supply
//! - No zero-address holdings: the zero address never holds a balance
//!   and is never an approved spender
//!
//! Non-negativity needs no runtime check: amounts are unsigned and every
//! subtraction is guarded by a comparison.

use crate::domain::entities::TokenLedger;
use crate::domain::value_objects::{Address, U256};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Conservation: the sum of all balances equals the total supply.
#[must_use]
pub fn check_conservation_invariant(ledger: &TokenLedger) -> bool {
    ledger.circulating_sum() == Some(ledger.total_supply())
}

/// The zero address holds nothing and spends nothing.
#[must_use]
pub fn check_zero_address_invariant(ledger: &TokenLedger) -> bool {
    let snapshot = ledger.snapshot();
    ledger.balance_of(Address::ZERO).is_zero()
        && snapshot
            .allowances
            .iter()
            .all(|entry| !entry.spender.is_zero())
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(ledger: &TokenLedger) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_conservation_invariant(ledger) {
        violations.push(InvariantViolation::SupplyNotConserved {
            expected: ledger.total_supply(),
            actual: ledger.circulating_sum(),
        });
    }

    if !check_zero_address_invariant(ledger) {
        violations.push(InvariantViolation::ZeroAddressHolding);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Balances do not add up to the total supply. `actual` is `None` when
    /// the sum itself overflowed.
    SupplyNotConserved {
        expected: U256,
        actual: Option<U256>,
    },
    /// The zero address holds a balance or is an approved spender.
    ZeroAddressHolding,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SupplyNotConserved { expected, actual } => match actual {
                Some(actual) => {
                    write!(f, "supply not conserved: expected {expected}, got {actual}")
                }
                None => write!(f, "supply not conserved: balance sum overflowed"),
            },
            Self::ZeroAddressHolding => {
                write!(f, "zero address holds a balance or allowance")
            }
        }
    }
}
