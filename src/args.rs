use std::{env, path::PathBuf};

use alloy::transports::http::reqwest::Url;
use clap::{ArgAction, Parser};

use crate::{chain::ChainConfig, relayer::DEFAULT_SCAN_WINDOW};

/// Fallback secret read when `WARDEN_PRIVATE_KEY` is unset.
const LEGACY_KEY_ENVVAR: &str = "PRIVATE_KEY";

/// Relays bridge events between the source and destination chains, one pass per run.
#[derive(Debug, Parser)]
#[command(name = "bridge-relayer", version)]
pub struct Args {
    /// JSON-RPC endpoint of the source chain.
    #[arg(
        long,
        env = "SOURCE_RPC_URL",
        default_value = "https://api.avax-test.network/ext/bc/C/rpc"
    )]
    pub source_rpc: Url,

    /// JSON-RPC endpoint of the destination chain.
    #[arg(
        long,
        env = "DESTINATION_RPC_URL",
        default_value = "https://data-seed-prebsc-1-s1.binance.org:8545/"
    )]
    pub destination_rpc: Url,

    /// Use permissive response types on the source chain.
    #[arg(long, env = "SOURCE_ANY_NETWORK", action = ArgAction::Set, default_value_t = false)]
    pub source_any_network: bool,

    /// Use permissive response types on the destination chain.
    #[arg(long, env = "DESTINATION_ANY_NETWORK", action = ArgAction::Set, default_value_t = true)]
    pub destination_any_network: bool,

    /// Contract metadata written at deployment time.
    #[arg(long, env = "CONTRACT_INFO", default_value = "contract_info.json")]
    pub contract_info: PathBuf,

    /// Number of trailing blocks scanned below the chain tip.
    #[arg(long, env = "SCAN_WINDOW", default_value_t = DEFAULT_SCAN_WINDOW)]
    pub window: u64,

    /// Warden private key, hex with or without `0x`.
    #[arg(long, env = "WARDEN_PRIVATE_KEY", hide_env_values = true)]
    pub warden_key: Option<String>,
}

impl Args {
    pub fn source(&self) -> ChainConfig {
        ChainConfig {
            rpc_url: self.source_rpc.clone(),
            any_network: self.source_any_network,
        }
    }

    pub fn destination(&self) -> ChainConfig {
        ChainConfig {
            rpc_url: self.destination_rpc.clone(),
            any_network: self.destination_any_network,
        }
    }

    /// The configured warden key, falling back to `PRIVATE_KEY`.
    pub fn warden_key(&self) -> Option<String> {
        first_key(self.warden_key.clone(), || env::var(LEGACY_KEY_ENVVAR).ok())
    }
}

fn first_key(
    configured: Option<String>,
    fallback: impl FnOnce() -> Option<String>,
) -> Option<String> {
    let non_empty = |key: &String| !key.trim().is_empty();
    configured
        .filter(non_empty)
        .or_else(|| fallback().filter(non_empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "bridge-relayer",
            "--source-rpc",
            "http://localhost:8545",
            "--destination-any-network",
            "false",
            "--window",
            "5",
            "--contract-info",
            "/tmp/info.json",
        ])
        .unwrap();

        assert_eq!(args.source().rpc_url.as_str(), "http://localhost:8545/");
        assert!(!args.destination().any_network);
        assert_eq!(args.window, 5);
        assert_eq!(args.contract_info, PathBuf::from("/tmp/info.json"));
    }

    #[test]
    fn blank_key_falls_back_to_legacy_secret() {
        let legacy = || Some("legacy".to_string());

        assert_eq!(first_key(Some(String::new()), legacy), Some("legacy".into()));
        assert_eq!(first_key(Some(" ".into()), legacy), Some("legacy".into()));
        assert_eq!(first_key(Some("warden".into()), legacy), Some("warden".into()));
        assert_eq!(first_key(Some(String::new()), || Some(String::new())), None);
    }

    #[test]
    fn rejects_malformed_url() {
        assert!(Args::try_parse_from(["bridge-relayer", "--source-rpc", "not a url"]).is_err());
    }
}
