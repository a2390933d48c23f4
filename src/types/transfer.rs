// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The merged ledger row

use alloy_primitives::{Address, BlockNumber, TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::types::currency::CurrencySymbol;
use crate::types::position::OrderingKey;
use crate::types::records::SourceKind;

/// Second-currency side of a dual-currency merge row.
///
/// `value` is the row's net contribution in `currency`, clamped to zero when
/// that contribution is negative. Rows that only moved the primary currency
/// therefore carry a zero secondary value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryLeg {
    pub currency: CurrencySymbol,
    pub value: U256,
}

/// A single value movement attributed to one of the three transfer sources.
///
/// Produced per query by the merge engine and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub transaction_hash: TxHash,
    pub from_address: Address,
    pub to_address: Address,
    /// Magnitude moved in the primary currency
    pub value: U256,
    /// Present only in dual-currency merges
    pub secondary: Option<SecondaryLeg>,
    pub key: OrderingKey,
}

impl TransferEvent {
    pub fn block_number(&self) -> BlockNumber {
        self.key.block_number
    }

    pub fn source(&self) -> SourceKind {
        self.key.source()
    }

    /// Returns true if `address` is the sender or the receiver
    pub fn involves(&self, address: Address) -> bool {
        self.from_address == address || self.to_address == address
    }

    /// Secondary value, or zero for single-currency rows
    pub fn secondary_value(&self) -> U256 {
        self.secondary
            .as_ref()
            .map(|leg| leg.value)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::position::EventPosition;
    use alloy_primitives::address;

    fn event(from: Address, to: Address) -> TransferEvent {
        TransferEvent {
            transaction_hash: TxHash::ZERO,
            from_address: from,
            to_address: to,
            value: U256::from(10),
            secondary: None,
            key: OrderingKey::new(
                7,
                EventPosition::Native {
                    transaction_index: 1,
                },
            ),
        }
    }

    #[test]
    fn test_involves_sender_or_receiver() {
        let alice = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let bob = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
        let carol = address!("cccccccccccccccccccccccccccccccccccccccc");

        let e = event(alice, bob);
        assert!(e.involves(alice));
        assert!(e.involves(bob));
        assert!(!e.involves(carol));
    }

    #[test]
    fn test_secondary_value_defaults_to_zero() {
        let mut e = event(Address::ZERO, Address::ZERO);
        assert_eq!(e.secondary_value(), U256::ZERO);

        e.secondary = Some(SecondaryLeg {
            currency: CurrencySymbol::new("cUSD"),
            value: U256::from(3),
        });
        assert_eq!(e.secondary_value(), U256::from(3));
        assert_eq!(e.block_number(), 7);
        assert_eq!(e.source(), SourceKind::NativeTransfers);
    }
}
