//! # Deployment Flows
//!
//! Tests the deploy driver end to end: development accounts, token and
//! exchange deployment, and notification delivery over the broadcast bus.
//!
//! ## Flow Tested:
//!
//! 1. **Accounts → Deployer**: account 0 deploys, account 1 collects fees
//! 2. **Deployer → Ledger**: full supply credited to the deployer
//! 3. **Ledger → Event Bus**: subscribers observe notifications in order

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    use deploy_runtime::{compute_contract_address, DeployConfig, Deployer, DevAccounts};
    use dt_01_token_ledger::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Deployment {
        accounts: DevAccounts,
        token: deploy_runtime::DeployedToken,
        exchange: deploy_runtime::DeployedExchange,
    }

    fn deploy_default() -> Deployment {
        let config = DeployConfig::default();
        let accounts = DevAccounts::generate(config.dev_accounts).unwrap();
        let deployer_address = accounts.deployer().unwrap().address();
        let fee_account = accounts.get(config.fee_account_index).unwrap().address();

        let mut deployer = Deployer::new();
        let token = deployer.deploy_token(deployer_address, &config).unwrap();
        let exchange = deployer
            .deploy_exchange(deployer_address, fee_account, config.fee_percent)
            .unwrap();

        Deployment {
            accounts,
            token,
            exchange,
        }
    }

    // =============================================================================
    // INTEGRATION TESTS: DEPLOYMENT
    // =============================================================================

    #[test]
    fn test_default_deployment() {
        let d = deploy_default();
        let deployer = d.accounts.deployer().unwrap().address();

        assert_eq!(d.token.address, compute_contract_address(deployer, 0));
        assert_eq!(d.exchange.address, compute_contract_address(deployer, 1));
        assert_ne!(d.token.address, d.exchange.address);

        assert_eq!(d.token.service.balance_of(deployer), tokens(1_000_000));
        assert_eq!(
            d.exchange.config.fee_account,
            d.accounts.get(1).unwrap().address()
        );
        assert_eq!(d.exchange.config.fee_percent, 10);
    }

    #[test]
    fn test_deployment_is_reproducible() {
        let first = deploy_default();
        let second = deploy_default();
        assert_eq!(first.token.address, second.token.address);
        assert_eq!(first.exchange.address, second.exchange.address);
    }

    #[test]
    fn test_exchange_spends_through_allowance() {
        let d = deploy_default();
        let deployer = d.accounts.deployer().unwrap().address();
        let receiver = d.accounts.get(2).unwrap().address();
        let exchange = d.exchange.address;
        let service = &d.token.service;

        service.approve(deployer, exchange, tokens(100)).unwrap();
        service
            .transfer_from(exchange, deployer, receiver, tokens(100))
            .unwrap();

        assert_eq!(service.allowance(deployer, exchange), U256::zero());
        assert_eq!(service.balance_of(receiver), tokens(100));
        assert!(service.check_invariants().is_valid());
    }

    // =============================================================================
    // INTEGRATION TESTS: LEDGER → EVENT BUS
    // =============================================================================

    #[tokio::test]
    async fn test_bus_delivers_notifications_in_order() {
        let d = deploy_default();
        let deployer = d.accounts.deployer().unwrap().address();
        let receiver = d.accounts.get(2).unwrap().address();
        let spender = d.accounts.get(3).unwrap().address();

        let mut rx = d.token.bus.subscribe();
        let service = Arc::clone(&d.token.service);

        let writer = tokio::spawn(async move {
            service.transfer(deployer, receiver, tokens(100)).unwrap();
            service.approve(receiver, spender, tokens(40)).unwrap();
            service
                .transfer_from(spender, receiver, deployer, tokens(40))
                .unwrap();
        });
        writer.await.unwrap();

        let first = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        let second = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        let third = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();

        assert!(first.is_transfer(deployer, receiver, tokens(100)));
        assert!(second.is_approval(receiver, spender, tokens(40)));
        assert!(third.is_transfer(receiver, deployer, tokens(40)));
        assert_eq!(d.token.bus.events_published(), 3);
    }

    #[tokio::test]
    async fn test_rejections_publish_nothing() {
        let d = deploy_default();
        let deployer = d.accounts.deployer().unwrap().address();
        let mut rx = d.token.bus.subscribe();

        let err = d
            .token
            .service
            .transfer(deployer, Address::ZERO, tokens(1))
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidRecipient);

        let nothing = timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(nothing.is_err());
        assert_eq!(d.token.service.stats().rejected, 1);
    }

    #[tokio::test]
    async fn test_concurrent_writers_keep_supply() {
        let d = deploy_default();
        let deployer = d.accounts.deployer().unwrap().address();
        let recipients = d.accounts.addresses()[1..].to_vec();

        let mut handles = Vec::new();
        for recipient in recipients.clone() {
            let service = Arc::clone(&d.token.service);
            handles.push(tokio::spawn(async move {
                for _ in 0..25 {
                    service.transfer(deployer, recipient, tokens(2)).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for recipient in &recipients {
            assert_eq!(d.token.service.balance_of(*recipient), tokens(50));
        }
        assert!(d.token.service.check_invariants().is_valid());
        assert_eq!(d.token.service.stats().transfers_applied, 225);
    }
}
