use std::{fmt, str::FromStr};

use alloy::{
    network::AnyNetwork, providers::ProviderBuilder, transports::http::reqwest::Url,
};
use tracing::debug;

use crate::{
    directory::ContractInfo,
    errors::ChainError,
    evm::{BridgeChain, EvmChain},
};

/// One of the two chains the bridge spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainSide {
    /// Holds the original assets and emits `Deposit`.
    Source,
    /// Holds the wrapped assets and emits `Unwrap`.
    Destination,
}

impl ChainSide {
    pub fn name(&self) -> &'static str {
        match self {
            ChainSide::Source => "source",
            ChainSide::Destination => "destination",
        }
    }

    /// The chain on which events from this side are answered.
    pub fn counterpart(&self) -> ChainSide {
        match self {
            ChainSide::Source => ChainSide::Destination,
            ChainSide::Destination => ChainSide::Source,
        }
    }
}

impl fmt::Display for ChainSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChainSide {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(ChainSide::Source),
            "destination" => Ok(ChainSide::Destination),
            other => Err(ChainError::InvalidChain(other.to_string())),
        }
    }
}

/// Endpoint settings for one chain.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub rpc_url: Url,
    /// Decode blocks, transactions and receipts with the permissive `AnyNetwork`
    /// types, for chains whose RPC responses carry non-standard fields.
    pub any_network: bool,
}

/// Produces RPC handles bound to a chain's bridge contract.
pub trait Connector {
    fn connect(&self, side: ChainSide, contract: &ContractInfo) -> Box<dyn BridgeChain>;
}

/// Connects over HTTP JSON-RPC using the configured endpoints.
#[derive(Debug, Clone)]
pub struct RpcConnector {
    source: ChainConfig,
    destination: ChainConfig,
}

impl RpcConnector {
    pub fn new(source: ChainConfig, destination: ChainConfig) -> Self {
        Self {
            source,
            destination,
        }
    }

    fn config(&self, side: ChainSide) -> &ChainConfig {
        match side {
            ChainSide::Source => &self.source,
            ChainSide::Destination => &self.destination,
        }
    }
}

impl Connector for RpcConnector {
    fn connect(&self, side: ChainSide, contract: &ContractInfo) -> Box<dyn BridgeChain> {
        let config = self.config(side);
        debug!(chain = %side, url = %config.rpc_url, any_network = config.any_network, "connecting");

        if config.any_network {
            let provider = ProviderBuilder::new()
                .disable_recommended_fillers()
                .network::<AnyNetwork>()
                .connect_http(config.rpc_url.clone());
            Box::new(EvmChain::new(provider, side, contract.address))
        } else {
            let provider = ProviderBuilder::new()
                .disable_recommended_fillers()
                .connect_http(config.rpc_url.clone());
            Box::new(EvmChain::new(provider, side, contract.address))
        }
    }
}
