// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while deriving balance delta series.

use alloy_primitives::{Address, BlockNumber};

/// A balance delta could not be represented.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BalanceError {
    /// The change between two consecutive snapshots does not fit a signed
    /// 256-bit integer (its magnitude exceeds 2^255).
    #[error("Balance delta for {address} at block {block_number} exceeds the signed 256-bit range")]
    DeltaOutOfRange {
        address: Address,
        block_number: BlockNumber,
    },
}
