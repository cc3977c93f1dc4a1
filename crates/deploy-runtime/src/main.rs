//! # Dapp-Token Deploy Runtime
//!
//! Deploys the token ledger and the exchange record against deterministic
//! development accounts and prints both handles.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logging + metrics)
//! 2. Load and validate configuration (from env)
//! 3. Generate development accounts
//! 4. Deploy token ledger, then exchange
//! 5. Start the audit task on the ledger's event bus
//! 6. Print handles, optionally dump ledger state

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use dapp_telemetry::{encode_metrics, init_telemetry, log_amount_event, TelemetryConfig};
use deploy_runtime::{DeployConfig, Deployer, DevAccounts};
use dt_01_token_ledger::prelude::{BroadcastEventBus, LedgerEvent};

/// Log every ledger notification until the bus closes. Returns the count.
fn spawn_audit(bus: &BroadcastEventBus) -> tokio::task::JoinHandle<u64> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        let mut seen = 0u64;
        loop {
            match rx.recv().await {
                Ok(LedgerEvent::Transfer { from, to, value }) => {
                    seen += 1;
                    log_amount_event!(info, "audit", "Transfer", value, %from, %to);
                }
                Ok(LedgerEvent::Approval {
                    owner,
                    spender,
                    value,
                }) => {
                    seen += 1;
                    log_amount_event!(info, "audit", "Approval", value, %owner, %spender);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Audit task lagged behind the event bus");
                }
                Err(RecvError::Closed) => break,
            }
        }
        seen
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::for_component("deploy"))
        .context("Failed to initialize telemetry")?;

    let config = DeployConfig::from_env().context("Failed to load deploy configuration")?;
    config.validate()?;

    info!("===========================================");
    info!("  Dapp-Token Deploy Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let accounts = DevAccounts::generate(config.dev_accounts)
        .context("Failed to generate development accounts")?;
    let deployer_account = accounts.deployer()?.address();
    let fee_account = accounts.get(config.fee_account_index)?.address();
    info!(
        accounts = accounts.len(),
        deployer = %deployer_account,
        "Development accounts ready"
    );

    let mut deployer = Deployer::new();
    let token = deployer
        .deploy_token(deployer_account, &config)
        .context("Token deployment failed")?;
    let audit = spawn_audit(&token.bus);

    let exchange = deployer
        .deploy_exchange(deployer_account, fee_account, config.fee_percent)
        .context("Exchange deployment failed")?;

    println!("Token deployed to: {}", token.address);
    println!("Exchange deployed to: {}", exchange.address);

    if config.dump_state {
        let state = serde_json::json!({
            "token": token.address,
            "exchange": exchange,
            "ledger": token.service.snapshot(),
        });
        let rendered =
            serde_json::to_string_pretty(&state).context("Failed to serialize ledger state")?;
        println!("{rendered}");
    }

    if !token.service.check_invariants().is_valid() {
        anyhow::bail!("Ledger invariants violated after deployment");
    }

    // Dropping the last bus handles closes the channel and ends the audit task
    drop(token);
    let audited = audit.await.context("Audit task panicked")?;
    info!(events = audited, "Deployment complete");

    match encode_metrics() {
        Ok(text) => debug!(metrics = %text, "Final metrics"),
        Err(e) => warn!(error = %e, "Failed to encode metrics"),
    }

    Ok(())
}
