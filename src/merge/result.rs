// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Ordered merge results and the post-merge filters over them
//!
//! Filters run after ordering, never inside the per-source fetches: the merge
//! is global, and scoping it is a predicate over the already ordered rows.

use alloy_primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

use crate::types::position::OrderingKey;
use crate::types::transfer::TransferEvent;

/// Transfer events ordered by [`OrderingKey`] descending (most recent first)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergedTransfers {
    events: Vec<TransferEvent>,
}

/// One page of a merge result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPage {
    pub events: Vec<TransferEvent>,
    /// Key to pass as `after` for the next page; `None` on the last page
    pub next: Option<OrderingKey>,
}

impl MergedTransfers {
    /// Wraps events that are already in merge order
    pub(crate) fn from_ordered(events: Vec<TransferEvent>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransferEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[TransferEvent] {
        &self.events
    }

    pub fn into_vec(self) -> Vec<TransferEvent> {
        self.events
    }

    /// Keeps events sent or received by `address`, preserving order
    pub fn involving(self, address: Address) -> Self {
        Self {
            events: self
                .events
                .into_iter()
                .filter(|e| e.involves(address))
                .collect(),
        }
    }

    /// Keeps events of one transaction, preserving order
    pub fn in_transaction(self, transaction_hash: TxHash) -> Self {
        Self {
            events: self
                .events
                .into_iter()
                .filter(|e| e.transaction_hash == transaction_hash)
                .collect(),
        }
    }

    /// Keyset pagination over the merge order.
    ///
    /// Returns up to `limit` events that come strictly after `after` (or from
    /// the start when `after` is `None`), and the key to resume from if any
    /// events remain.
    pub fn page(&self, after: Option<OrderingKey>, limit: usize) -> TransferPage {
        let start = match after {
            Some(key) => self.events.partition_point(|e| e.key >= key),
            None => 0,
        };
        let end = start.saturating_add(limit).min(self.events.len());
        let events = self.events[start..end].to_vec();

        let next = if end < self.events.len() {
            events.last().map(|e| e.key)
        } else {
            None
        };

        TransferPage { events, next }
    }
}

impl IntoIterator for MergedTransfers {
    type Item = TransferEvent;
    type IntoIter = std::vec::IntoIter<TransferEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a MergedTransfers {
    type Item = &'a TransferEvent;
    type IntoIter = std::slice::Iter<'a, TransferEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
