// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Storage adapters for ledger event sources
//!
//! The merge engine, the activity view and the balance pipeline read stored
//! events only through these traits. Each trait covers one event kind and is
//! object-safe, so adapters are held as `Arc<dyn Trait>` and a store can be
//! swapped per source (or wrapped, e.g. to inject failures in tests).
//!
//! Adapters may return rows in any order; ordering is the caller's job. A
//! failing adapter returns a [`SourceError`] tagged with its [`SourceKind`].
//!
//! [`InMemoryLedgerStore`] implements every trait over in-memory rows.

use std::future::Future;
use std::time::Duration;

use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use tracing::warn;

use crate::errors::SourceError;
use crate::types::balance::BalanceSnapshot;
use crate::types::records::{
    InternalCallTransfer, NativeTransfer, SourceKind, TokenTransfer, Transaction,
};

pub mod filter;
mod memory;

pub use filter::{InternalCallFilter, NativeTransferFilter, TokenTransferFilter};
pub use memory::InMemoryLedgerStore;

/// Native currency moved by whole transactions
#[async_trait]
pub trait NativeTransferSource: Send + Sync {
    async fn fetch_native_transfers(
        &self,
        filter: &NativeTransferFilter,
    ) -> Result<Vec<NativeTransfer>, SourceError>;
}

/// Native currency moved by nested calls
#[async_trait]
pub trait InternalCallTransferSource: Send + Sync {
    async fn fetch_internal_call_transfers(
        &self,
        filter: &InternalCallFilter,
    ) -> Result<Vec<InternalCallTransfer>, SourceError>;

    /// Point lookup by `(transaction_hash, call_index)`
    ///
    /// Returns `Ok(None)` when no such call exists.
    async fn fetch_internal_call_transfer(
        &self,
        transaction_hash: TxHash,
        call_index: u64,
    ) -> Result<Option<InternalCallTransfer>, SourceError>;
}

/// Transfers emitted by token contract logs
#[async_trait]
pub trait TokenTransferSource: Send + Sync {
    async fn fetch_token_transfers(
        &self,
        filter: &TokenTransferFilter,
    ) -> Result<Vec<TokenTransfer>, SourceError>;

    /// Point lookup by `(transaction_hash, log_index)`
    ///
    /// Returns `Ok(None)` when no such transfer exists.
    async fn fetch_token_transfer(
        &self,
        transaction_hash: TxHash,
        log_index: u64,
    ) -> Result<Option<TokenTransfer>, SourceError>;
}

/// Full transaction records for address activity
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Transactions sent, received, or creating a contract at `address`
    async fn fetch_address_transactions(
        &self,
        address: Address,
    ) -> Result<Vec<Transaction>, SourceError>;
}

/// Recorded balance snapshots
#[async_trait]
pub trait BalanceSnapshotSource: Send + Sync {
    async fn fetch_balance_snapshots(
        &self,
        address: Address,
    ) -> Result<Vec<BalanceSnapshot>, SourceError>;
}

/// Runs an adapter fetch, bounding it by `timeout` when one is configured.
///
/// The bound uses tokio's timer, so a timeout requires a tokio runtime.
pub(crate) async fn bounded_fetch<T, F>(
    origin: SourceKind,
    timeout: Option<Duration>,
    fetch: F,
) -> Result<T, SourceError>
where
    F: Future<Output = Result<T, SourceError>>,
{
    let Some(limit) = timeout else {
        return fetch.await;
    };

    match tokio::time::timeout(limit, fetch).await {
        Ok(result) => result,
        Err(_) => {
            warn!(source = %origin, timeout_ms = limit.as_millis(), "Adapter fetch timed out");
            Err(SourceError::timeout(origin, limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_fetch_passes_through_without_timeout() {
        let result = bounded_fetch(SourceKind::Transactions, None, async { Ok::<_, SourceError>(7) })
            .await
            .unwrap();
        assert_eq!(result, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_fetch_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, SourceError>(())
        };

        let err = bounded_fetch(
            SourceKind::TokenTransfers,
            Some(Duration::from_millis(50)),
            slow,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            SourceError::Timeout {
                origin: SourceKind::TokenTransfers,
                ..
            }
        ));
    }
}
