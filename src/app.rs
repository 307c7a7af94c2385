//! The bridge test procedure
//!
//! `launch` resolves settings, loads the artifact and connects; `Runner`
//! then walks allowance -> approve -> bridge -> receipt against any
//! [`BridgeChain`].

use std::time::Duration;

use alloy::primitives::{Address, B256, U256};
use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::config::{self, Args, Settings};
use crate::domain::{format_units, BridgePlan, RunOutcome, TxOutcome, TxStatus};
use crate::error::BridgeTestError;
use crate::infrastructure::abi::erc20;
use crate::infrastructure::{connect, BridgeArtifact, BridgeChain};

/// Drives one bridge test against a chain
pub struct Runner<'a> {
    chain: &'a dyn BridgeChain,
    artifact: &'a BridgeArtifact,
    bridge_layer: Address,
    poll_interval: Duration,
    expected_chain_id: Option<u64>,
}

impl<'a> Runner<'a> {
    pub fn new(
        chain: &'a dyn BridgeChain,
        artifact: &'a BridgeArtifact,
        bridge_layer: Address,
    ) -> Self {
        Self {
            chain,
            artifact,
            bridge_layer,
            poll_interval: Duration::from_millis(config::DEFAULT_POLL_INTERVAL_MS),
            expected_chain_id: None,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Fail the approve and bridge steps unless the node reports `chain_id`
    pub fn with_expected_chain_id(mut self, chain_id: u64) -> Self {
        self.expected_chain_id = Some(chain_id);
        self
    }

    /// Run the procedure.
    ///
    /// A failed allowance read is returned as `Err`. Approval and bridge
    /// failures, including a chain-id mismatch before either is sent, are
    /// logged and end the run with the matching [`RunOutcome`].
    pub async fn run(&self, plan: &BridgePlan) -> Result<RunOutcome> {
        let token = plan.token.address;
        info!("Checking allowance for {}...", token);
        let allowance = self.allowance(token).await?;
        debug!(
            "Allowance {} / requested {}",
            format_units(allowance, plan.token.decimals),
            format_units(plan.amount, plan.token.decimals)
        );

        if allowance < plan.amount {
            info!("Approving token {}...", token);
            if let Err(err) = self.approve(token, plan.amount).await {
                error!("Approval failed: {:#}", err);
                return Ok(RunOutcome::ApprovalFailed {
                    reason: format!("{:#}", err),
                });
            }
            info!("Token approved.");
        } else {
            info!("Token already approved.");
        }

        info!("Calling bridge...");
        match self.bridge(plan).await {
            Ok(receipt) => {
                match receipt.block_number {
                    Some(block) => info!("Transaction confirmed in block {}", block),
                    None => info!("Transaction confirmed"),
                }
                info!("Status: {}", receipt.status);
                Ok(RunOutcome::Bridged(receipt))
            }
            Err(err) => {
                error!("Bridge call failed: {:#}", err);
                Ok(RunOutcome::BridgeFailed {
                    reason: format!("{:#}", err),
                })
            }
        }
    }

    async fn check_chain(&self) -> Result<()> {
        let Some(expected) = self.expected_chain_id else {
            return Ok(());
        };
        let actual = self.chain.chain_id().await?;
        if actual != expected {
            return Err(BridgeTestError::ChainMismatch { expected, actual }.into());
        }
        debug!("Chain id {} confirmed", actual);
        Ok(())
    }

    /// Allowance granted by the signer to the bridge layer
    async fn allowance(&self, token: Address) -> Result<U256> {
        let calldata = erc20::encode_allowance(self.chain.signer_address(), self.bridge_layer);
        let data = self
            .chain
            .call(token, calldata)
            .await
            .with_context(|| format!("allowance query on {} failed", token))?;
        erc20::decode_allowance(&data)
    }

    async fn approve(&self, token: Address, amount: U256) -> Result<()> {
        let calldata = erc20::encode_approve(self.bridge_layer, amount);
        self.check_chain().await?;
        let hash = self
            .chain
            .send_transaction(token, calldata, U256::ZERO)
            .await?;
        info!("Approve Tx Hash: {}", hash);

        let receipt = self.wait_for_receipt(hash).await?;
        if receipt.status == TxStatus::Revert {
            anyhow::bail!("approve transaction {} reverted", hash);
        }
        Ok(())
    }

    async fn bridge(&self, plan: &BridgePlan) -> Result<TxOutcome> {
        let calldata = self.artifact.encode_bridge(plan)?;
        debug!("Bridge calldata: 0x{}", hex::encode(&calldata));
        self.check_chain().await?;
        let hash = self
            .chain
            .send_transaction(self.bridge_layer, calldata, plan.fee)
            .await?;
        info!("Bridge Tx Hash: {}", hash);

        self.wait_for_receipt(hash).await
    }

    /// Poll until the transaction is mined
    async fn wait_for_receipt(&self, hash: B256) -> Result<TxOutcome> {
        loop {
            if let Some(receipt) = self.chain.get_receipt(hash).await? {
                return Ok(receipt);
            }
            debug!("Waiting for {}...", hash);
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Resolve settings, load the artifact, connect, and run.
///
/// Configuration is validated and the artifact read before any connection
/// is made, so a bad setup fails without touching the network.
pub async fn launch(args: Args, config: &config::Config) -> Result<RunOutcome> {
    let settings = Settings::resolve(args, &config.known_tokens())?;
    let artifact = BridgeArtifact::load(&settings.artifact)?;

    let signer = settings.signer_address();
    info!("Running test with account: {}", signer);
    info!("BridgeLayer Address: {}", settings.bridge_layer);
    if let Some(adapter) = settings.axelar_adapter {
        info!("AxelarAdapter Address: {}", adapter);
    }

    let Some(token) = settings.token.clone() else {
        info!(
            "No address found for {} (and TOKEN_ADDRESS not set).",
            settings.token_symbol
        );
        info!("Please set MIDRX_ADDRESS, MUSDT_ADDRESS, MUSDC_ADDRESS, or TOKEN_ADDRESS in .env");
        return Ok(RunOutcome::NoToken {
            symbol: settings.token_symbol,
        });
    };

    info!(
        "Testing with Token: {} ({}) Decimals: {}",
        token.symbol, token.address, token.decimals
    );

    let recipient = settings.recipient.unwrap_or(signer);
    let plan = BridgePlan::new(
        token,
        &settings.amount,
        settings.dst_chain_id,
        recipient,
        settings.fee,
    )?;

    let chain = connect(&settings.rpc_url, settings.signer.clone())?;
    debug!("Connected to {}", chain.endpoint_name());

    Runner::new(&chain, &artifact, settings.bridge_layer)
        .with_poll_interval(settings.poll_interval)
        .with_expected_chain_id(settings.chain_id)
        .run(&plan)
        .await
}
