//! # Token Ledger Service
//!
//! Shared handle over one [`TokenLedger`].
//!
//! ## Concurrency
//!
//! The ledger sits behind a single `parking_lot::RwLock`. Every mutation
//! holds the write lock across check, apply and event publication, so no
//! reader ever sees a debit without its credit, an allowance decrement
//! without its balance movement, or events out of apply order. Queries take
//! the read lock.

use crate::domain::entities::{LedgerSnapshot, TokenLedger};
use crate::domain::events::{LedgerEvent, LedgerReceipt};
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::value_objects::{Address, U256};
use crate::errors::LedgerError;
use crate::ports::inbound::TokenLedgerApi;
use crate::ports::outbound::EventSink;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

/// Mutating operation, used for logging and statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Transfer,
    Approve,
    TransferFrom,
}

impl Operation {
    /// Label used in logs and metrics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Approve => "approve",
            Self::TransferFrom => "transfer_from",
        }
    }
}

/// Counters kept by the service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    /// Successful `transfer` and `transfer_from` calls.
    pub transfers_applied: u64,
    /// Successful `approve` calls.
    pub approvals_applied: u64,
    /// Rejected mutations of any kind.
    pub rejected: u64,
    /// Events handed to the sink.
    pub events_published: u64,
}

/// Lock-guarded ledger with an attached event sink.
pub struct TokenLedgerService<S: EventSink> {
    ledger: RwLock<TokenLedger>,
    sink: S,
    stats: Mutex<LedgerStats>,
}

impl<S: EventSink> TokenLedgerService<S> {
    /// Wrap an existing ledger.
    pub fn new(ledger: TokenLedger, sink: S) -> Self {
        Self {
            ledger: RwLock::new(ledger),
            sink,
            stats: Mutex::new(LedgerStats::default()),
        }
    }

    /// Construct a fresh ledger owned by `deployer` and wrap it.
    ///
    /// # Errors
    ///
    /// Any construction error from [`TokenLedger::new`].
    pub fn deploy(
        deployer: Address,
        name: &str,
        symbol: &str,
        total_supply_whole: U256,
        sink: S,
    ) -> Result<Self, LedgerError> {
        let ledger = TokenLedger::new(deployer, name, symbol, total_supply_whole)?;
        info!(
            token_name = name,
            token_symbol = symbol,
            deployer = %deployer,
            total_supply = %ledger.total_supply(),
            "Token ledger constructed"
        );
        Ok(Self::new(ledger, sink))
    }

    /// The attached sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Current statistics.
    pub fn stats(&self) -> LedgerStats {
        self.stats.lock().clone()
    }

    /// Deterministic copy of the current state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.read().snapshot()
    }

    /// Run the domain invariant checks against the current state.
    pub fn check_invariants(&self) -> InvariantCheckResult {
        check_all_invariants(&self.ledger.read())
    }

    /// Run `f` against the ledger under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&TokenLedger) -> R) -> R {
        f(&self.ledger.read())
    }

    /// Record the outcome of a mutation. Called with the write lock held.
    fn settle(
        &self,
        operation: Operation,
        outcome: Result<LedgerEvent, LedgerError>,
    ) -> Result<LedgerReceipt, LedgerError> {
        match outcome {
            Ok(event) => {
                let receivers = self.sink.publish(&event);
                {
                    let mut stats = self.stats.lock();
                    match operation {
                        Operation::Approve => stats.approvals_applied += 1,
                        Operation::Transfer | Operation::TransferFrom => {
                            stats.transfers_applied += 1;
                        }
                    }
                    stats.events_published += 1;
                }
                #[cfg(feature = "metrics")]
                record_applied(operation);

                debug!(
                    operation = operation.as_str(),
                    kind = %event.kind(),
                    receivers,
                    "Ledger mutation applied"
                );
                Ok(LedgerReceipt::with_event(event))
            }
            Err(error) => {
                self.stats.lock().rejected += 1;
                #[cfg(feature = "metrics")]
                record_rejected(operation, &error);

                warn!(
                    operation = operation.as_str(),
                    error = error.code(),
                    reason = %error,
                    "Ledger mutation rejected"
                );
                Err(error)
            }
        }
    }
}

impl<S: EventSink> TokenLedgerApi for TokenLedgerService<S> {
    fn name(&self) -> String {
        self.ledger.read().name().to_string()
    }

    fn symbol(&self) -> String {
        self.ledger.read().symbol().to_string()
    }

    fn decimals(&self) -> u8 {
        self.ledger.read().decimals()
    }

    fn total_supply(&self) -> U256 {
        self.ledger.read().total_supply()
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.ledger.read().balance_of(account)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.ledger.read().allowance(owner, spender)
    }

    #[instrument(level = "debug", skip(self))]
    fn transfer(
        &self,
        caller: Address,
        to: Address,
        value: U256,
    ) -> Result<LedgerReceipt, LedgerError> {
        let mut ledger = self.ledger.write();
        let outcome = ledger.transfer(caller, to, value);
        self.settle(Operation::Transfer, outcome)
    }

    #[instrument(level = "debug", skip(self))]
    fn approve(
        &self,
        caller: Address,
        spender: Address,
        value: U256,
    ) -> Result<LedgerReceipt, LedgerError> {
        let mut ledger = self.ledger.write();
        let outcome = ledger.approve(caller, spender, value);
        self.settle(Operation::Approve, outcome)
    }

    #[instrument(level = "debug", skip(self))]
    fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<LedgerReceipt, LedgerError> {
        let mut ledger = self.ledger.write();
        let outcome = ledger.transfer_from(caller, from, to, value);
        self.settle(Operation::TransferFrom, outcome)
    }
}

#[cfg(feature = "metrics")]
fn record_applied(operation: Operation) {
    use dapp_telemetry::metrics::{LEDGER_APPROVALS, LEDGER_EVENTS_PUBLISHED, LEDGER_TRANSFERS};

    match operation {
        Operation::Approve => LEDGER_APPROVALS.inc(),
        Operation::Transfer | Operation::TransferFrom => LEDGER_TRANSFERS.inc(),
    }
    LEDGER_EVENTS_PUBLISHED.inc();
}

#[cfg(feature = "metrics")]
fn record_rejected(operation: Operation, error: &LedgerError) {
    dapp_telemetry::metrics::LEDGER_REJECTIONS
        .with_label_values(&[operation.as_str(), error.code()])
        .inc();
}
