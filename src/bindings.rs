use alloy::{rpc::types::Log, sol};

use crate::event::{BridgeEvent, Deposit, Unwrap};

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract Source {
        event Deposit(address indexed token, address indexed recipient, uint256 amount);

        function withdraw(address _token, address _recipient, uint256 _amount) external;
    }
);

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract Destination {
        event Unwrap(address indexed underlying_token, address indexed wrapped_token, address frm, address indexed to, uint256 amount);

        function wrap(address _underlying_token, address _recipient, uint256 _amount) external;
    }
);

impl From<(Source::Deposit, Log)> for BridgeEvent {
    fn from((event, log): (Source::Deposit, Log)) -> Self {
        BridgeEvent::Deposit(Deposit {
            token: event.token,
            recipient: event.recipient,
            amount: event.amount,
            block: log.block_number,
            tx_hash: log.transaction_hash,
        })
    }
}

impl From<(Destination::Unwrap, Log)> for BridgeEvent {
    fn from((event, log): (Destination::Unwrap, Log)) -> Self {
        BridgeEvent::Unwrap(Unwrap {
            underlying_token: event.underlying_token,
            wrapped_token: event.wrapped_token,
            from: event.frm,
            to: event.to,
            amount: event.amount,
            block: log.block_number,
            tx_hash: log.transaction_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy::{
        primitives::{address, b256, Log as PrimitiveLog, U256},
        sol_types::SolEvent,
    };

    use super::*;

    fn rpc_log<E: SolEvent>(event: &E) -> Log {
        Log {
            inner: PrimitiveLog {
                address: address!("1111111111111111111111111111111111111111"),
                data: event.encode_log_data(),
            },
            block_number: Some(42),
            transaction_hash: Some(b256!(
                "00000000000000000000000000000000000000000000000000000000000000aa"
            )),
            ..Default::default()
        }
    }

    #[test]
    fn deposit_log_decodes_into_typed_event() {
        let token = address!("2222222222222222222222222222222222222222");
        let recipient = address!("3333333333333333333333333333333333333333");
        let log = rpc_log(&Source::Deposit {
            token,
            recipient,
            amount: U256::from(7u64),
        });

        let decoded = log.log_decode::<Source::Deposit>().unwrap().inner.data;
        let BridgeEvent::Deposit(deposit) = BridgeEvent::from((decoded, log)) else {
            panic!("expected a deposit");
        };
        assert_eq!(deposit.token, token);
        assert_eq!(deposit.recipient, recipient);
        assert_eq!(deposit.amount, U256::from(7u64));
        assert_eq!(deposit.block, Some(42));
        assert_eq!(
            deposit.tx_hash,
            Some(b256!(
                "00000000000000000000000000000000000000000000000000000000000000aa"
            ))
        );
    }

    #[test]
    fn unwrap_log_keeps_non_indexed_sender() {
        let underlying = address!("2222222222222222222222222222222222222222");
        let to = address!("4444444444444444444444444444444444444444");
        let frm = address!("5555555555555555555555555555555555555555");
        let log = rpc_log(&Destination::Unwrap {
            underlying_token: underlying,
            wrapped_token: address!("6666666666666666666666666666666666666666"),
            frm,
            to,
            amount: U256::from(1_000u64),
        });

        let decoded = log.log_decode::<Destination::Unwrap>().unwrap().inner.data;
        let BridgeEvent::Unwrap(unwrap) = BridgeEvent::from((decoded, log)) else {
            panic!("expected an unwrap");
        };
        assert_eq!(unwrap.underlying_token, underlying);
        assert_eq!(unwrap.from, frm);
        assert_eq!(unwrap.to, to);
        assert_eq!(unwrap.amount, U256::from(1_000u64));
    }
}
