use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    json_abi::JsonAbi,
    primitives::Address,
    signers::local::PrivateKeySigner,
    sol_types::{SolCall, SolEvent},
};
use serde::Deserialize;
use tracing::trace;

use crate::{
    bindings::{Destination, Source},
    chain::ChainSide,
    errors::{CredentialsError, DirectoryError},
};

const DEPOSIT_INDEXED: &[bool] = &[true, true, false];
const UNWRAP_INDEXED: &[bool] = &[true, true, false, true, false];

/// Address and interface of one deployed bridge contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractInfo {
    pub address: Address,
    pub abi: JsonAbi,
}

impl ContractInfo {
    /// Checks that the ABI declares the event scanned on `side`, with the same
    /// indexed inputs as the bindings, and the function invoked there when
    /// relaying from the other side.
    fn check_interface(&self, side: ChainSide) -> Result<(), DirectoryError> {
        let (event, event_hash, indexed, function, selector) = match side {
            ChainSide::Source => (
                "Deposit",
                Source::Deposit::SIGNATURE_HASH,
                DEPOSIT_INDEXED,
                "withdraw",
                Source::withdrawCall::SELECTOR,
            ),
            ChainSide::Destination => (
                "Unwrap",
                Destination::Unwrap::SIGNATURE_HASH,
                UNWRAP_INDEXED,
                "wrap",
                Destination::wrapCall::SELECTOR,
            ),
        };

        // The selector ignores `indexed`, but topic decoding depends on it.
        let has_event = self.abi.event(event).is_some_and(|events| {
            events.iter().any(|e| {
                e.selector() == event_hash
                    && e.inputs.iter().map(|input| input.indexed).eq(indexed.iter().copied())
            })
        });
        if !has_event {
            return Err(DirectoryError::IncompatibleAbi {
                chain: side,
                item: event,
            });
        }

        let has_function = self
            .abi
            .function(function)
            .is_some_and(|functions| functions.iter().any(|f| f.selector().0 == selector));
        if !has_function {
            return Err(DirectoryError::IncompatibleAbi {
                chain: side,
                item: function,
            });
        }

        Ok(())
    }
}

/// Raw shape of `contract_info.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractMetadata {
    source: Option<ContractInfo>,
    destination: Option<ContractInfo>,
    warden_key: Option<String>,
}

impl ContractMetadata {
    pub fn contract(&self, side: ChainSide) -> Result<&ContractInfo, DirectoryError> {
        let info = match side {
            ChainSide::Source => self.source.as_ref(),
            ChainSide::Destination => self.destination.as_ref(),
        }
        .ok_or(DirectoryError::MissingEntry(side))?;
        info.check_interface(side)?;
        Ok(info)
    }

    pub fn warden_key(&self) -> Option<&str> {
        self.warden_key.as_deref()
    }
}

/// Reads contract metadata from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct ContractDirectory {
    path: PathBuf,
}

impl ContractDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ContractMetadata, DirectoryError> {
        trace!(path = %self.path.display(), "loading contract metadata");
        let raw = fs::read_to_string(&self.path).map_err(|source| DirectoryError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| DirectoryError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}

/// Prefixes a hex private key with `0x` when it lacks one.
pub fn normalize_key(key: &str) -> String {
    let key = key.trim();
    if key.starts_with("0x") {
        key.to_string()
    } else {
        format!("0x{key}")
    }
}

fn non_empty(key: &&str) -> bool {
    !key.trim().is_empty()
}

/// Picks the warden key from the configured secret first, then from the metadata
/// file, and parses it into a signer.
pub fn resolve_warden(
    configured: Option<&str>,
    metadata: &ContractMetadata,
) -> Result<PrivateKeySigner, CredentialsError> {
    let key = configured
        .filter(non_empty)
        .or_else(|| metadata.warden_key().filter(non_empty))
        .ok_or(CredentialsError::Missing)?;

    normalize_key(key)
        .parse::<PrivateKeySigner>()
        .map_err(|_| CredentialsError::Invalid)
}
