//! Chain access for the bridge run and its Alloy implementation

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};

use crate::domain::{TxOutcome, TxStatus};

/// Operations the run needs from a node.
///
/// Every state-changing call is signed by the account returned from
/// [`BridgeChain::signer_address`].
#[async_trait::async_trait]
pub trait BridgeChain: Send + Sync {
    /// Address of the signing account
    fn signer_address(&self) -> Address;

    /// Get endpoint display name
    fn endpoint_name(&self) -> String;

    /// Chain id reported by the node
    async fn chain_id(&self) -> Result<u64>;

    /// Execute a call (eth_call)
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes>;

    /// Sign and submit a transaction, returning its hash without waiting
    async fn send_transaction(&self, to: Address, input: Bytes, value: U256) -> Result<B256>;

    /// Receipt for `hash`, or `None` while it is still pending
    async fn get_receipt(&self, hash: B256) -> Result<Option<TxOutcome>>;
}

/// HTTP provider with a local signer; nonce, gas and chain id are filled in
/// by the provider
pub struct AlloyChain {
    provider: DynProvider,
    signer: Address,
    endpoint: String,
}

/// Create a signing provider for `rpc_url`
pub fn connect(rpc_url: &str, signer: PrivateKeySigner) -> Result<AlloyChain> {
    let url = rpc_url.parse().context("Invalid HTTP URL")?;
    let address = signer.address();
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(url)
        .erased();

    Ok(AlloyChain {
        provider,
        signer: address,
        endpoint: rpc_url.to_string(),
    })
}

#[async_trait::async_trait]
impl BridgeChain for AlloyChain {
    fn signer_address(&self) -> Address {
        self.signer
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }

    async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .context("eth_chainId failed")
    }

    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes> {
        let request = TransactionRequest::default()
            .from(self.signer)
            .to(to)
            .input(input.into());
        Ok(self.provider.call(request).await?)
    }

    async fn send_transaction(&self, to: Address, input: Bytes, value: U256) -> Result<B256> {
        let request = TransactionRequest::default()
            .from(self.signer)
            .to(to)
            .input(input.into())
            .value(value);
        let pending = self.provider.send_transaction(request).await?;
        Ok(*pending.tx_hash())
    }

    async fn get_receipt(&self, hash: B256) -> Result<Option<TxOutcome>> {
        let receipt = self.provider.get_transaction_receipt(hash).await?;
        Ok(receipt.as_ref().map(convert_receipt))
    }
}

fn convert_receipt(receipt: &TransactionReceipt) -> TxOutcome {
    TxOutcome {
        hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        status: if receipt.status() {
            TxStatus::Success
        } else {
            TxStatus::Revert
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_connect_keeps_signer_and_endpoint() {
        let signer: PrivateKeySigner = KEY.parse().unwrap();
        let expected = signer.address();
        let chain = connect("http://127.0.0.1:8545", signer).unwrap();
        assert_eq!(chain.signer_address(), expected);
        assert_eq!(chain.endpoint_name(), "http://127.0.0.1:8545");
    }

    #[test]
    fn test_connect_rejects_bad_url() {
        let signer: PrivateKeySigner = KEY.parse().unwrap();
        assert!(connect("not a url", signer).is_err());
    }
}
