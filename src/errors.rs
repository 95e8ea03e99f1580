use std::path::PathBuf;

use thiserror::Error;

use crate::chain::ChainSide;

#[derive(Debug, Clone, Error)]
pub enum ChainError {
    #[error("invalid chain name, expected: source or destination, got: {0}")]
    InvalidChain(String),
}

/// Errors raised while resolving contract metadata.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("reading contract metadata from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing contract metadata from {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no contract metadata for the {0} chain")]
    MissingEntry(ChainSide),

    /// The entry's ABI lacks an event or function the relayer relies on, or
    /// declares it with a different indexed layout.
    #[error("contract abi for the {chain} chain has no compatible {item}")]
    IncompatibleAbi { chain: ChainSide, item: &'static str },
}

#[derive(Debug, Clone, Error)]
pub enum CredentialsError {
    #[error("warden key not available")]
    Missing,

    #[error("warden key is not a valid secp256k1 private key")]
    Invalid,
}

/// Failures that abort a whole scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("contract metadata unavailable: {0}")]
    MetadataUnavailable(#[from] DirectoryError),

    #[error("RPC: {0}")]
    Rpc(eyre::Report),
}

/// Failures that abort the relay of a single event.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("credentials unavailable: {0}")]
    CredentialsUnavailable(#[from] CredentialsError),

    #[error("RPC: {0}")]
    Rpc(eyre::Report),
}
