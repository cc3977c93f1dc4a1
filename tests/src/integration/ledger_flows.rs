//! # Ledger Flows
//!
//! Token ledger scenarios driven through the service API with an in-memory
//! event log attached, mirroring how a wallet or exchange uses the token:
//!
//! 1. **Deployment**: metadata and full supply credited to the deployer
//! 2. **Direct transfer**: balances move, `Transfer` notification emitted
//! 3. **Delegated transfer**: approve, then spend through `transfer_from`
//! 4. **Rejections**: ordered checks, state left untouched

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dt_01_token_ledger::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const DEPLOYER: Address = Address::new([0x01; 20]);
    const RECEIVER: Address = Address::new([0x02; 20]);
    const EXCHANGE: Address = Address::new([0x03; 20]);

    type Ledger = TokenLedgerService<Arc<InMemoryEventLog>>;

    fn deploy() -> Ledger {
        TokenLedgerService::deploy(
            DEPLOYER,
            "Dapp University",
            "DAPP",
            U256::from(1_000_000u64),
            Arc::new(InMemoryEventLog::new()),
        )
        .unwrap()
    }

    // =============================================================================
    // DEPLOYMENT
    // =============================================================================

    #[test]
    fn test_deployment_tracks_metadata() {
        let token = deploy();

        assert_eq!(token.name(), "Dapp University");
        assert_eq!(token.symbol(), "DAPP");
        assert_eq!(token.decimals(), 18);
        assert_eq!(
            token.total_supply().to_string(),
            "1000000000000000000000000"
        );
        assert_eq!(token.balance_of(DEPLOYER), token.total_supply());
        assert!(token.sink().is_empty());
    }

    // =============================================================================
    // DIRECT TRANSFERS
    // =============================================================================

    #[test]
    fn test_transfer_success() {
        let token = deploy();
        let amount = tokens(100);

        let receipt = token.transfer(DEPLOYER, RECEIVER, amount).unwrap();

        assert!(receipt.success);
        assert_eq!(token.balance_of(DEPLOYER), tokens(999_900));
        assert_eq!(token.balance_of(RECEIVER), tokens(100));

        let event = receipt.find(EventKind::Transfer).unwrap();
        assert!(event.is_transfer(DEPLOYER, RECEIVER, amount));
        assert!(token.sink().find_transfer(DEPLOYER, RECEIVER, amount).is_some());
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let token = deploy();
        let before = token.snapshot();

        let err = token
            .transfer(DEPLOYER, RECEIVER, tokens(1_000_000_000))
            .unwrap_err();

        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                required: tokens(1_000_000_000),
                available: tokens(1_000_000),
            }
        );
        assert_eq!(token.snapshot(), before);
        assert!(token.sink().is_empty());
    }

    #[test]
    fn test_receiver_without_funds_cannot_send() {
        let token = deploy();
        let err = token.transfer(RECEIVER, DEPLOYER, tokens(10)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    }

    #[test]
    fn test_transfer_to_zero_address() {
        let token = deploy();
        let before = token.snapshot();

        let err = token
            .transfer(DEPLOYER, Address::ZERO, tokens(100))
            .unwrap_err();

        assert_eq!(err, LedgerError::InvalidRecipient);
        assert_eq!(token.snapshot(), before);
    }

    #[test]
    fn test_zero_recipient_checked_before_balance() {
        let token = deploy();
        let err = token
            .transfer(RECEIVER, Address::ZERO, tokens(1_000_000_000))
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidRecipient);
    }

    // =============================================================================
    // APPROVALS AND DELEGATED TRANSFERS
    // =============================================================================

    #[test]
    fn test_approve_emits_approval() {
        let token = deploy();
        let receipt = token.approve(DEPLOYER, EXCHANGE, tokens(100)).unwrap();

        assert!(receipt.success);
        assert_eq!(token.allowance(DEPLOYER, EXCHANGE), tokens(100));
        assert!(token
            .sink()
            .find_approval(DEPLOYER, EXCHANGE, tokens(100))
            .is_some());
    }

    #[test]
    fn test_approve_zero_spender() {
        let token = deploy();
        let err = token
            .approve(DEPLOYER, Address::ZERO, tokens(100))
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidSpender);
        assert!(token.sink().is_empty());
    }

    #[test]
    fn test_approve_is_absolute() {
        let token = deploy();
        token.approve(DEPLOYER, EXCHANGE, tokens(100)).unwrap();
        token.approve(DEPLOYER, EXCHANGE, tokens(30)).unwrap();
        assert_eq!(token.allowance(DEPLOYER, EXCHANGE), tokens(30));
    }

    #[test]
    fn test_delegated_transfer_success() {
        let token = deploy();
        let amount = tokens(100);
        token.approve(DEPLOYER, EXCHANGE, amount).unwrap();

        let receipt = token
            .transfer_from(EXCHANGE, DEPLOYER, RECEIVER, amount)
            .unwrap();

        assert!(receipt.success);
        assert_eq!(token.balance_of(DEPLOYER), tokens(999_900));
        assert_eq!(token.balance_of(RECEIVER), amount);
        assert_eq!(token.allowance(DEPLOYER, EXCHANGE), U256::zero());
        assert!(receipt
            .find(EventKind::Transfer)
            .unwrap()
            .is_transfer(DEPLOYER, RECEIVER, amount));
    }

    #[test]
    fn test_partial_spend_leaves_remainder() {
        let token = deploy();
        token.approve(DEPLOYER, EXCHANGE, tokens(100)).unwrap();
        token
            .transfer_from(EXCHANGE, DEPLOYER, RECEIVER, tokens(40))
            .unwrap();
        assert_eq!(token.allowance(DEPLOYER, EXCHANGE), tokens(60));
    }

    #[test]
    fn test_delegated_transfer_exceeding_allowance() {
        let token = deploy();
        token.approve(DEPLOYER, EXCHANGE, tokens(100)).unwrap();
        let before = token.snapshot();

        let err = token
            .transfer_from(EXCHANGE, DEPLOYER, RECEIVER, tokens(100_000_000))
            .unwrap_err();

        // Deployer holds only 1M, so the balance check fires first
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(token.snapshot(), before);
    }

    #[test]
    fn test_delegated_transfer_over_allowance_within_balance() {
        let token = deploy();
        token.approve(DEPLOYER, EXCHANGE, tokens(100)).unwrap();

        let err = token
            .transfer_from(EXCHANGE, DEPLOYER, RECEIVER, tokens(101))
            .unwrap_err();

        assert_eq!(
            err,
            LedgerError::InsufficientAllowance {
                required: tokens(101),
                available: tokens(100),
            }
        );
        assert_eq!(token.allowance(DEPLOYER, EXCHANGE), tokens(100));
    }

    #[test]
    fn test_delegated_transfer_to_zero_checked_last() {
        let token = deploy();
        token.approve(DEPLOYER, EXCHANGE, tokens(100)).unwrap();

        let err = token
            .transfer_from(EXCHANGE, DEPLOYER, Address::ZERO, tokens(10))
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidRecipient);

        // Without allowance the allowance check wins over the zero recipient
        let err = token
            .transfer_from(RECEIVER, DEPLOYER, Address::ZERO, tokens(10))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
    }

    // =============================================================================
    // WHOLE-LEDGER PROPERTIES
    // =============================================================================

    #[test]
    fn test_supply_conserved_across_activity() {
        let token = deploy();
        let accounts: Vec<Address> = (10u8..20).map(|i| Address::new([i; 20])).collect();

        for (i, account) in accounts.iter().enumerate() {
            token
                .transfer(DEPLOYER, *account, tokens(1_000 * (i as u64 + 1)))
                .unwrap();
        }
        for pair in accounts.windows(2) {
            token.approve(pair[0], pair[1], tokens(500)).unwrap();
            token
                .transfer_from(pair[1], pair[0], DEPLOYER, tokens(250))
                .unwrap();
        }
        let _ = token.transfer(accounts[0], RECEIVER, tokens(1_000_000_000));

        assert!(token.check_invariants().is_valid());
        let snapshot = token.snapshot();
        let sum = snapshot
            .balances
            .iter()
            .fold(U256::zero(), |acc, entry| acc + entry.balance);
        assert_eq!(sum, token.total_supply());
    }

    #[test]
    fn test_events_follow_apply_order() {
        let token = deploy();
        token.transfer(DEPLOYER, RECEIVER, tokens(5)).unwrap();
        token.approve(RECEIVER, EXCHANGE, tokens(5)).unwrap();
        token
            .transfer_from(EXCHANGE, RECEIVER, DEPLOYER, tokens(5))
            .unwrap();

        let kinds: Vec<EventKind> = token.sink().events().iter().map(LedgerEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Transfer, EventKind::Approval, EventKind::Transfer]
        );
        assert_eq!(token.stats().events_published, 3);
    }

    #[test]
    fn test_snapshot_serializes() {
        let token = deploy();
        token.transfer(DEPLOYER, RECEIVER, tokens(1)).unwrap();

        let json = serde_json::to_value(token.snapshot()).unwrap();
        assert_eq!(json["metadata"]["symbol"], "DAPP");
        assert_eq!(json["balances"].as_array().unwrap().len(), 2);
        assert_eq!(json["balances"][0]["account"], DEPLOYER.to_hex());
        assert_eq!(json["balances"][1]["account"], RECEIVER.to_hex());
    }
}
