use std::{marker::PhantomData, time::Duration};

use alloy::{
    eips::eip2718::Encodable2718,
    network::{EthereumWallet, Network, NetworkWallet, ReceiptResponse, TransactionBuilder},
    primitives::{Address, B256},
    providers::Provider,
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use eyre::eyre;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::{
    bindings::{Destination, Source},
    chain::ChainSide,
    event::{BridgeEvent, RelayCall, RelayMethod},
};

/// Added on top of the node's gas estimate.
pub const GAS_MARGIN: u64 = 10_000;

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

/// The RPC surface the relayer needs from one chain.
#[async_trait(?Send)]
pub trait BridgeChain {
    /// Height of the chain tip.
    async fn latest_block(&self) -> eyre::Result<u64>;

    /// Bridge events emitted by this chain's contract in `[from, to]`, in log order.
    async fn bridge_events(&self, from: u64, to: u64) -> eyre::Result<Vec<BridgeEvent>>;

    /// Signs `call` with `signer`, submits it and waits for the receipt.
    async fn submit(&self, call: &RelayCall, signer: &PrivateKeySigner) -> eyre::Result<B256>;
}

/// A bridge contract reached through an alloy provider.
pub struct EvmChain<P, N> {
    provider: P,
    side: ChainSide,
    contract: Address,
    _phantom: PhantomData<N>,
}

impl<P, N> EvmChain<P, N>
where
    P: Provider<N>,
    N: Network,
{
    pub fn new(provider: P, side: ChainSide, contract: Address) -> Self {
        Self {
            provider,
            side,
            contract,
            _phantom: PhantomData,
        }
    }

    async fn wait_for_receipt(&self, tx_hash: B256) -> eyre::Result<N::ReceiptResponse> {
        let deadline = Instant::now() + RECEIPT_TIMEOUT;
        loop {
            if let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? {
                return Ok(receipt);
            }
            if Instant::now() >= deadline {
                return Err(eyre!(
                    "no receipt for {tx_hash} after {}s",
                    RECEIPT_TIMEOUT.as_secs()
                ));
            }
            sleep(RECEIPT_POLL_INTERVAL).await;
        }
    }
}

#[async_trait(?Send)]
impl<P, N> BridgeChain for EvmChain<P, N>
where
    P: Provider<N>,
    N: Network,
    EthereumWallet: NetworkWallet<N>,
{
    async fn latest_block(&self) -> eyre::Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    async fn bridge_events(&self, from: u64, to: u64) -> eyre::Result<Vec<BridgeEvent>> {
        let events = match self.side {
            ChainSide::Source => Source::new(self.contract, &self.provider)
                .Deposit_filter()
                .from_block(from)
                .to_block(to)
                .query()
                .await?
                .into_iter()
                .map(BridgeEvent::from)
                .collect(),
            ChainSide::Destination => Destination::new(self.contract, &self.provider)
                .Unwrap_filter()
                .from_block(from)
                .to_block(to)
                .query()
                .await?
                .into_iter()
                .map(BridgeEvent::from)
                .collect(),
        };

        Ok(events)
    }

    async fn submit(&self, call: &RelayCall, signer: &PrivateKeySigner) -> eyre::Result<B256> {
        let from = signer.address();
        let request = match call.method {
            RelayMethod::Wrap => Destination::new(self.contract, &self.provider)
                .wrap(call.token, call.recipient, call.amount)
                .into_transaction_request(),
            RelayMethod::Withdraw => Source::new(self.contract, &self.provider)
                .withdraw(call.token, call.recipient, call.amount)
                .into_transaction_request(),
        }
        .with_from(from);

        let gas = self.provider.estimate_gas(request.clone()).await?;
        let nonce = self.provider.get_transaction_count(from).pending().await?;
        let gas_price = self.provider.get_gas_price().await?;
        let chain_id = self.provider.get_chain_id().await?;
        debug!(
            method = %call.method,
            %from,
            gas,
            nonce,
            %gas_price,
            chain_id,
            "prepared relay transaction"
        );

        let envelope = request
            .with_nonce(nonce)
            .with_gas_limit(gas + GAS_MARGIN)
            .with_gas_price(gas_price)
            .with_chain_id(chain_id)
            .build(&EthereumWallet::from(signer.clone()))
            .await
            .map_err(|e| eyre!("signing {} transaction: {e}", call.method))?;

        let pending = self
            .provider
            .send_raw_transaction(&envelope.encoded_2718())
            .await?;
        let receipt = self.wait_for_receipt(*pending.tx_hash()).await?;

        let tx_hash = receipt.transaction_hash();
        if !receipt.status() {
            return Err(eyre!("{} transaction {tx_hash} reverted", call.method));
        }

        Ok(tx_hash)
    }
}
