use std::fmt;

use alloy::primitives::{Address, B256, U256};

/// A `Deposit` observed on the source chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    pub token: Address,
    pub recipient: Address,
    pub amount: U256,
    pub block: Option<u64>,
    pub tx_hash: Option<B256>,
}

/// An `Unwrap` observed on the destination chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unwrap {
    pub underlying_token: Address,
    pub wrapped_token: Address,
    pub from: Address,
    pub to: Address,
    pub amount: U256,
    pub block: Option<u64>,
    pub tx_hash: Option<B256>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    Deposit(Deposit),
    Unwrap(Unwrap),
}

impl BridgeEvent {
    pub fn block(&self) -> Option<u64> {
        match self {
            BridgeEvent::Deposit(deposit) => deposit.block,
            BridgeEvent::Unwrap(unwrap) => unwrap.block,
        }
    }

    pub fn tx_hash(&self) -> Option<B256> {
        match self {
            BridgeEvent::Deposit(deposit) => deposit.tx_hash,
            BridgeEvent::Unwrap(unwrap) => unwrap.tx_hash,
        }
    }
}

/// Which counterpart function a relay invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMethod {
    Wrap,
    Withdraw,
}

impl fmt::Display for RelayMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayMethod::Wrap => write!(f, "wrap"),
            RelayMethod::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// The outbound call that answers a [`BridgeEvent`] on the other chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayCall {
    pub method: RelayMethod,
    pub token: Address,
    pub recipient: Address,
    pub amount: U256,
}

impl From<&Deposit> for RelayCall {
    fn from(deposit: &Deposit) -> Self {
        RelayCall {
            method: RelayMethod::Wrap,
            token: deposit.token,
            recipient: deposit.recipient,
            amount: deposit.amount,
        }
    }
}

impl From<&Unwrap> for RelayCall {
    fn from(unwrap: &Unwrap) -> Self {
        RelayCall {
            method: RelayMethod::Withdraw,
            token: unwrap.underlying_token,
            recipient: unwrap.to,
            amount: unwrap.amount,
        }
    }
}

impl From<&BridgeEvent> for RelayCall {
    fn from(event: &BridgeEvent) -> Self {
        match event {
            BridgeEvent::Deposit(deposit) => deposit.into(),
            BridgeEvent::Unwrap(unwrap) => unwrap.into(),
        }
    }
}
