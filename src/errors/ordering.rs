// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors for ordering invariant violations.

use alloy_primitives::{Address, BlockNumber};

use crate::types::position::OrderingKey;
use crate::types::records::SourceKind;

/// Two events from the same source produced an identical ordering key.
///
/// Ordering keys are unique by construction, so a collision means the store
/// returned corrupt or inconsistent rows. These are never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderingError {
    /// Two merged transfer events share a full ordering key.
    #[error("Duplicate ordering key from {origin}: {key}")]
    DuplicateKey {
        /// Source both events came from
        origin: SourceKind,
        /// The colliding key
        key: OrderingKey,
    },

    /// Two present-valued balance snapshots exist for the same address and block.
    #[error("Duplicate balance snapshot for {address} at block {block_number}")]
    DuplicateSnapshot {
        address: Address,
        block_number: BlockNumber,
    },
}
