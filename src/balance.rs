// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Balance delta series
//!
//! Turns an address's balance snapshots into deltas against the immediately
//! preceding present snapshot. The computation is a single forward pass with
//! one carried accumulator:
//!
//! ```text
//! snapshots (asc):  v1      v2       v3
//! previous:         0       v1       v2
//! delta:            v1      v2-v1    v3-v2
//! ```
//!
//! Snapshots without a value are removed before the pass, so the next present
//! snapshot is compared against the last present one.

use std::sync::Arc;

use alloy_primitives::{Address, Sign, I256, U256};
use tracing::{debug, Instrument};

use crate::config::LedgerConfig;
use crate::errors::{BalanceError, LedgerError, OrderingError};
use crate::sources::{bounded_fetch, BalanceSnapshotSource};
use crate::spans;
use crate::types::balance::{BalanceDelta, BalanceSnapshot};
use crate::types::records::SourceKind;

/// Computes deltas for the snapshots of a single address.
///
/// Returns deltas ordered by block number descending. Absent values are
/// dropped first; the earliest present snapshot's delta equals its value.
///
/// # Errors
///
/// - [`OrderingError::DuplicateSnapshot`] if two present snapshots share a block
/// - [`BalanceError::DeltaOutOfRange`] if a change exceeds the signed 256-bit
///   range
///
/// # Examples
///
/// ```rust
/// use ledgerscan::{compute_deltas, BalanceSnapshot};
/// use alloy_primitives::{Address, Sign, I256, U256};
/// use chrono::{TimeZone, Utc};
///
/// let at = |block: u64, value: Option<u64>| BalanceSnapshot {
///     address_hash: Address::ZERO,
///     block_number: block,
///     value: value.map(U256::from),
///     block_timestamp: Utc.timestamp_opt(1_700_000_000 + block as i64, 0).unwrap(),
/// };
///
/// let deltas = compute_deltas(vec![at(1, Some(100)), at(2, None), at(3, Some(40))]).unwrap();
///
/// assert_eq!(deltas.len(), 2);
/// assert_eq!(deltas[0].block_number, 3);
/// assert_eq!(deltas[0].delta, I256::try_from(-60i64).unwrap());
/// assert_eq!(deltas[1].delta, I256::try_from(100i64).unwrap());
/// ```
pub fn compute_deltas(snapshots: Vec<BalanceSnapshot>) -> Result<Vec<BalanceDelta>, LedgerError> {
    let mut present: Vec<(BalanceSnapshot, U256)> = snapshots
        .into_iter()
        .filter_map(|snapshot| snapshot.value.map(|value| (snapshot, value)))
        .collect();

    present.sort_by_key(|(snapshot, _)| snapshot.block_number);

    if let Some(pair) = present
        .windows(2)
        .find(|pair| pair[0].0.block_number == pair[1].0.block_number)
    {
        return Err(OrderingError::DuplicateSnapshot {
            address: pair[0].0.address_hash,
            block_number: pair[0].0.block_number,
        }
        .into());
    }

    let mut deltas = present
        .into_iter()
        .scan(U256::ZERO, |previous, (snapshot, value)| {
            let delta = signed_difference(value, *previous);
            *previous = value;
            Some((snapshot, value, delta))
        })
        .map(|(snapshot, value, delta)| {
            let delta = delta.ok_or(BalanceError::DeltaOutOfRange {
                address: snapshot.address_hash,
                block_number: snapshot.block_number,
            })?;
            Ok(BalanceDelta {
                address_hash: snapshot.address_hash,
                block_number: snapshot.block_number,
                value,
                block_timestamp: snapshot.block_timestamp,
                delta,
            })
        })
        .collect::<Result<Vec<_>, LedgerError>>()?;

    deltas.reverse();
    Ok(deltas)
}

/// `value - previous`, or `None` when it does not fit an [`I256`]
fn signed_difference(value: U256, previous: U256) -> Option<I256> {
    if value >= previous {
        I256::checked_from_sign_and_abs(Sign::Positive, value - previous)
    } else {
        I256::checked_from_sign_and_abs(Sign::Negative, previous - value)
    }
}

/// Reads balance snapshots and derives their delta series
pub struct BalanceDeltaSeries {
    snapshots: Arc<dyn BalanceSnapshotSource>,
    config: LedgerConfig,
}

impl BalanceDeltaSeries {
    pub fn new(snapshots: Arc<dyn BalanceSnapshotSource>, config: LedgerConfig) -> Self {
        Self { snapshots, config }
    }

    /// Every present snapshot of `address`, most recent first, with its delta
    pub async fn balance_deltas(&self, address: Address) -> Result<Vec<BalanceDelta>, LedgerError> {
        async move {
            let snapshots = bounded_fetch(
                SourceKind::BalanceSnapshots,
                self.config.fetch_timeout,
                self.snapshots.fetch_balance_snapshots(address),
            )
            .await?;

            let fetched = snapshots.len();
            let deltas = compute_deltas(snapshots)?;
            debug!(fetched, present = deltas.len(), "Computed balance deltas");
            Ok(deltas)
        }
        .instrument(spans::balance_deltas(address))
        .await
    }

    /// The most recent delta of `address`, if it has any present snapshot
    pub async fn latest(&self, address: Address) -> Result<Option<BalanceDelta>, LedgerError> {
        Ok(self.balance_deltas(address).await?.into_iter().next())
    }
}
