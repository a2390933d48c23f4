// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Key normalization and projection of source rows
//!
//! Every source row becomes a [`SourceEvent`]: the row plus the leg it is
//! merged as. A `SourceEvent` knows its [`OrderingKey`], whether it qualifies
//! for a merge at all, and how to project itself into a [`TransferEvent`].

use alloy_primitives::U256;

use crate::config::constants::ROOT_CALL_INDEX;
use crate::config::LedgerConfig;
use crate::types::currency::CurrencySymbol;
use crate::types::position::{EventPosition, OrderingKey, TokenLeg};
use crate::types::records::{InternalCallTransfer, NativeTransfer, TokenTransfer};
use crate::types::transfer::{SecondaryLeg, TransferEvent};

/// A source row tagged with the leg it is merged as
#[derive(Debug, Clone)]
pub(crate) enum SourceEvent {
    Native(NativeTransfer),
    Internal(InternalCallTransfer),
    Token(TokenTransfer, TokenLeg),
}

impl SourceEvent {
    pub(crate) fn key(&self) -> OrderingKey {
        match self {
            SourceEvent::Native(t) => OrderingKey::new(
                t.block_number,
                EventPosition::Native {
                    transaction_index: t.transaction_index,
                },
            ),
            SourceEvent::Internal(c) => OrderingKey::new(
                c.block_number,
                EventPosition::Internal {
                    transaction_index: c.transaction_index,
                    call_index: c.call_index,
                },
            ),
            SourceEvent::Token(t, leg) => OrderingKey::new(
                t.block_number,
                EventPosition::Token {
                    log_index: t.log_index,
                    leg: *leg,
                },
            ),
        }
    }

    /// Returns true if the row represents value movement under `config`.
    ///
    /// Native and internal rows must move a non-zero value. Root calls and
    /// internal calls of an excluded type never qualify. Token transfers
    /// always qualify.
    pub(crate) fn qualifies(&self, config: &LedgerConfig) -> bool {
        match self {
            SourceEvent::Native(t) => !t.value.is_zero(),
            SourceEvent::Internal(c) => {
                !c.value.is_zero()
                    && c.call_index != ROOT_CALL_INDEX
                    && config.includes_call_type(c.call_type)
            }
            SourceEvent::Token(..) => true,
        }
    }

    /// Value moved in the primary currency; a secondary leg moves none
    fn primary_value(&self) -> U256 {
        match self {
            SourceEvent::Native(t) => t.value,
            SourceEvent::Internal(c) => c.value,
            SourceEvent::Token(_, TokenLeg::Secondary) => U256::ZERO,
            SourceEvent::Token(t, _) => t.amount,
        }
    }

    /// Non-negative contribution to the secondary currency's ledger.
    ///
    /// Secondary legs contribute their full amount. Every other row would
    /// contribute its primary value negated, which clamps to zero.
    fn secondary_value(&self) -> U256 {
        match self {
            SourceEvent::Token(t, TokenLeg::Secondary) => t.amount,
            _ => U256::ZERO,
        }
    }

    /// Projects the row into a merged event.
    ///
    /// With `secondary_currency` set, the event carries a [`SecondaryLeg`]
    /// carrying the row's secondary contribution.
    pub(crate) fn into_transfer(self, secondary_currency: Option<&CurrencySymbol>) -> TransferEvent {
        let key = self.key();
        let value = self.primary_value();
        let secondary = secondary_currency.map(|currency| SecondaryLeg {
            currency: currency.clone(),
            value: self.secondary_value(),
        });

        let (transaction_hash, from_address, to_address) = match self {
            SourceEvent::Native(t) => (t.transaction_hash, t.from_address, t.to_address),
            SourceEvent::Internal(c) => (c.transaction_hash, c.from_address, c.to_address),
            SourceEvent::Token(t, _) => (t.transaction_hash, t.from_address, t.to_address),
        };

        TransferEvent {
            transaction_hash,
            from_address,
            to_address,
            value,
            secondary,
            key,
        }
    }
}
