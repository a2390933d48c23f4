// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Balance snapshot and delta types

use alloy_primitives::{Address, BlockNumber, I256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Balance of an address as recorded at one block.
///
/// `value` is `None` when the balance was scheduled for fetching but never
/// recorded; such snapshots take no part in delta computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub address_hash: Address,
    pub block_number: BlockNumber,
    pub value: Option<U256>,
    pub block_timestamp: DateTime<Utc>,
}

/// A present-valued snapshot annotated with its change from the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDelta {
    pub address_hash: Address,
    pub block_number: BlockNumber,
    pub value: U256,
    pub block_timestamp: DateTime<Utc>,
    /// `value` minus the previous present snapshot's value (or zero)
    ///
    /// Changes outside the `I256` range fail with
    /// [`BalanceError::DeltaOutOfRange`](crate::BalanceError::DeltaOutOfRange).
    pub delta: I256,
}
