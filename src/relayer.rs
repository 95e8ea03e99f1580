use alloy::primitives::B256;
use tracing::{debug, error, info, warn};

use crate::{
    chain::{ChainSide, Connector},
    directory::{resolve_warden, ContractDirectory, ContractInfo, ContractMetadata},
    errors::{RelayError, ScanError},
    event::{BridgeEvent, RelayCall},
};

/// Trailing blocks scanned below the tip.
pub const DEFAULT_SCAN_WINDOW: u64 = 50;

/// Outcome of a completed scan. Individual relay failures are counted, not raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub chain: ChainSide,
    pub from_block: u64,
    pub to_block: u64,
    pub events: usize,
    pub relayed: usize,
    pub failed: usize,
}

pub struct Relayer<C> {
    connector: C,
    directory: ContractDirectory,
    warden_key: Option<String>,
    window: u64,
}

impl<C: Connector> Relayer<C> {
    pub fn new(
        connector: C,
        directory: ContractDirectory,
        warden_key: Option<String>,
        window: u64,
    ) -> Self {
        Self {
            connector,
            directory,
            warden_key,
            window,
        }
    }

    /// Scans the chain called `chain` and relays every event found.
    pub async fn scan_blocks(&self, chain: &str) -> Result<ScanReport, ScanError> {
        let side: ChainSide = chain.parse()?;

        // Both descriptors must resolve before anything is relayed.
        let metadata = self.directory.load()?;
        let contract = metadata.contract(side)?;
        let counterpart = metadata.contract(side.counterpart())?;

        let handle = self.connector.connect(side, contract);
        let to_block = handle.latest_block().await.map_err(ScanError::Rpc)?;
        let from_block = to_block.saturating_sub(self.window);
        info!(%side, from_block, to_block, "scanning blocks");

        let events = handle
            .bridge_events(from_block, to_block)
            .await
            .map_err(ScanError::Rpc)?;
        info!(%side, count = events.len(), "found bridge events");

        let mut report = ScanReport {
            chain: side,
            from_block,
            to_block,
            events: events.len(),
            relayed: 0,
            failed: 0,
        };

        for event in &events {
            debug!(?event, "handling bridge event");
            match self.relay(side.counterpart(), counterpart, &metadata, event).await {
                Ok(tx_hash) => {
                    report.relayed += 1;
                    info!(
                        target_chain = %side.counterpart(),
                        %tx_hash,
                        origin_tx = ?event.tx_hash(),
                        "relay confirmed"
                    );
                }
                Err(err) => {
                    report.failed += 1;
                    error!(
                        target_chain = %side.counterpart(),
                        origin_tx = ?event.tx_hash(),
                        origin_block = ?event.block(),
                        %err,
                        "relay failed"
                    );
                }
            }
        }

        Ok(report)
    }

    async fn relay(
        &self,
        target: ChainSide,
        contract: &ContractInfo,
        metadata: &ContractMetadata,
        event: &BridgeEvent,
    ) -> Result<B256, RelayError> {
        let handle = self.connector.connect(target, contract);
        let signer = resolve_warden(self.warden_key.as_deref(), metadata)?;
        let call = RelayCall::from(event);
        info!(
            %target,
            method = %call.method,
            token = %call.token,
            recipient = %call.recipient,
            amount = %call.amount,
            "submitting relay"
        );

        handle.submit(&call, &signer).await.map_err(RelayError::Rpc)
    }

    /// Scans `source`, then `destination`. Returns whether both scans completed.
    pub async fn run_once(&self) -> bool {
        let mut ok = true;
        for chain in [ChainSide::Source, ChainSide::Destination] {
            match self.scan_blocks(chain.name()).await {
                Ok(report) => {
                    if report.failed > 0 {
                        warn!(?report, "scan finished with failed relays");
                    } else {
                        info!(?report, "scan finished");
                    }
                }
                Err(err) => {
                    error!(%chain, %err, "scan failed");
                    ok = false;
                }
            }
        }
        ok
    }
}
