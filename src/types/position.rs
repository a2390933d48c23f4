// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Ordering keys shared by every transfer source
//!
//! Native transfers, internal calls and token transfers have no common position
//! space: a transaction index, a call index and a log index are unrelated
//! counters. [`EventPosition`] tags each position with its source so a single
//! comparison orders all three.
//!
//! Within a block, larger positions are later execution steps. Sorting
//! [`OrderingKey`]s descending therefore yields "most recent first":
//!
//! ```text
//! block desc
//!   └─ Native   (transaction_index desc)
//!   └─ Internal (transaction_index desc, call_index desc)
//!   └─ Token    (log_index desc, Primary leg before Secondary leg)
//! ```

use std::fmt;

use alloy_primitives::BlockNumber;
use serde::{Deserialize, Serialize};

use crate::types::records::SourceKind;

/// Which currency leg a token transfer was merged as.
///
/// Variant order defines ordering within one log index; do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenLeg {
    /// Second currency of a dual-currency merge
    Secondary,
    /// First currency of a dual-currency merge
    Primary,
    /// Only currency of a single-currency merge
    Single,
}

/// Source-tagged position of an event within its block.
///
/// Variant and field declaration order define the derived ordering; do not
/// reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum EventPosition {
    Token { log_index: u64, leg: TokenLeg },
    Internal { transaction_index: u64, call_index: u64 },
    Native { transaction_index: u64 },
}

impl EventPosition {
    /// The source this position belongs to
    pub fn source(&self) -> SourceKind {
        match self {
            EventPosition::Native { .. } => SourceKind::NativeTransfers,
            EventPosition::Internal { .. } => SourceKind::InternalCalls,
            EventPosition::Token { .. } => SourceKind::TokenTransfers,
        }
    }

    /// Renders the `(tx_position, log_position, step_position)` triple used by
    /// consumers of the signed legacy key.
    ///
    /// The triple is informational; it does not order events. Internal calls
    /// render only their call index, so calls of different transactions in the
    /// same block can share a triple.
    ///
    /// Returns `None` when an index exceeds `i64::MAX` and has no signed
    /// rendering.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledgerscan::{EventPosition, TokenLeg};
    ///
    /// let native = EventPosition::Native { transaction_index: 5 };
    /// assert_eq!(native.legacy_triple(), Some((5, -5, -5)));
    ///
    /// let token = EventPosition::Token { log_index: 3, leg: TokenLeg::Secondary };
    /// assert_eq!(token.legacy_triple(), Some((-3, 3, -3)));
    /// ```
    pub fn legacy_triple(&self) -> Option<(i64, i64, i64)> {
        let triple = match *self {
            EventPosition::Native { transaction_index } => {
                let t = i64::try_from(transaction_index).ok()?;
                (t, -t, -t)
            }
            EventPosition::Internal { call_index, .. } => {
                let c = i64::try_from(call_index).ok()?;
                (-c, -c, c)
            }
            EventPosition::Token { log_index, leg } => {
                let l = i64::try_from(log_index).ok()?;
                match leg {
                    TokenLeg::Single => (-1, -1, -1),
                    TokenLeg::Primary => (-1, l, -1),
                    TokenLeg::Secondary => (-l, l, -l),
                }
            }
        };
        Some(triple)
    }
}

impl fmt::Display for EventPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventPosition::Native { transaction_index } => write!(f, "tx#{transaction_index}"),
            EventPosition::Internal {
                transaction_index,
                call_index,
            } => write!(f, "tx#{transaction_index}/call#{call_index}"),
            EventPosition::Token { log_index, leg } => write!(f, "log#{log_index}/{leg:?}"),
        }
    }
}

/// Full ordering key of a merged transfer event.
///
/// Field order defines the derived ordering: block first, then position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderingKey {
    pub block_number: BlockNumber,
    pub position: EventPosition,
}

impl OrderingKey {
    pub const fn new(block_number: BlockNumber, position: EventPosition) -> Self {
        Self {
            block_number,
            position,
        }
    }

    pub fn source(&self) -> SourceKind {
        self.position.source()
    }
}

impl fmt::Display for OrderingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {} {}", self.block_number, self.position)
    }
}
