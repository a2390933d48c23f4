// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory ledger store implementing every source adapter

use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{
    BalanceSnapshotSource, InternalCallFilter, InternalCallTransferSource, NativeTransferFilter,
    NativeTransferSource, TokenTransferFilter, TokenTransferSource, TransactionSource,
};
use crate::errors::SourceError;
use crate::types::balance::BalanceSnapshot;
use crate::types::records::{InternalCallTransfer, NativeTransfer, TokenTransfer, Transaction};

/// Rows held by the store
#[derive(Debug, Default)]
struct StoreState {
    transactions: Vec<Transaction>,
    internal_calls: Vec<InternalCallTransfer>,
    token_transfers: Vec<TokenTransfer>,
    balance_snapshots: Vec<BalanceSnapshot>,
}

impl StoreState {
    fn transaction(&self, hash: TxHash) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.hash == hash)
    }
}

/// In-memory store of immutable ledger rows
///
/// Answers every adapter query by scanning its rows, honouring each filter
/// field the way an indexed relational store would. Native transfers are
/// derived from the stored transactions: the recipient is the transaction's
/// `to` address, or the created contract for contract creations; a
/// transaction with neither has no recipient and yields no transfer.
///
/// # Examples
///
/// ```rust
/// use ledgerscan::{InMemoryLedgerStore, Transaction};
/// use alloy_primitives::{address, TxHash, U256};
///
/// let store = InMemoryLedgerStore::new().with_transaction(Transaction {
///     hash: TxHash::ZERO,
///     block_number: 10,
///     index: 0,
///     from_address: address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
///     to_address: Some(address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb")),
///     created_contract_address: None,
///     value: U256::from(100),
/// });
/// ```
///
/// # Thread Safety
///
/// Rows sit behind a `tokio::sync::RwLock`, so a shared store can keep
/// receiving rows through the `insert_*` methods while queries run.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    state: RwLock<StoreState>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.state.get_mut().transactions.push(transaction);
        self
    }

    pub fn with_internal_call(mut self, call: InternalCallTransfer) -> Self {
        self.state.get_mut().internal_calls.push(call);
        self
    }

    pub fn with_token_transfer(mut self, transfer: TokenTransfer) -> Self {
        self.state.get_mut().token_transfers.push(transfer);
        self
    }

    pub fn with_balance_snapshot(mut self, snapshot: BalanceSnapshot) -> Self {
        self.state.get_mut().balance_snapshots.push(snapshot);
        self
    }

    pub async fn insert_transaction(&self, transaction: Transaction) {
        self.state.write().await.transactions.push(transaction);
    }

    pub async fn insert_internal_call(&self, call: InternalCallTransfer) {
        self.state.write().await.internal_calls.push(call);
    }

    pub async fn insert_token_transfer(&self, transfer: TokenTransfer) {
        self.state.write().await.token_transfers.push(transfer);
    }

    pub async fn insert_balance_snapshot(&self, snapshot: BalanceSnapshot) {
        self.state.write().await.balance_snapshots.push(snapshot);
    }
}

fn native_transfer(tx: &Transaction) -> Option<NativeTransfer> {
    let to_address = tx.to_address.or(tx.created_contract_address)?;
    Some(NativeTransfer {
        transaction_hash: tx.hash,
        from_address: tx.from_address,
        to_address,
        value: tx.value,
        transaction_index: tx.index,
        block_number: tx.block_number,
    })
}

#[async_trait]
impl NativeTransferSource for InMemoryLedgerStore {
    async fn fetch_native_transfers(
        &self,
        filter: &NativeTransferFilter,
    ) -> Result<Vec<NativeTransfer>, SourceError> {
        let state = self.state.read().await;
        let rows: Vec<_> = state
            .transactions
            .iter()
            .filter_map(native_transfer)
            .filter(|transfer| filter.matches(transfer))
            .collect();

        debug!(rows = rows.len(), "In-memory native transfers fetched");
        Ok(rows)
    }
}

#[async_trait]
impl InternalCallTransferSource for InMemoryLedgerStore {
    async fn fetch_internal_call_transfers(
        &self,
        filter: &InternalCallFilter,
    ) -> Result<Vec<InternalCallTransfer>, SourceError> {
        let state = self.state.read().await;
        let rows: Vec<_> = state
            .internal_calls
            .iter()
            .filter(|call| filter.matches_call(call))
            .filter(|call| {
                filter.address_hash.is_none_or(|address| {
                    state
                        .transaction(call.transaction_hash)
                        .is_some_and(|tx| tx.involves(address))
                })
            })
            .cloned()
            .collect();

        debug!(rows = rows.len(), "In-memory internal calls fetched");
        Ok(rows)
    }

    async fn fetch_internal_call_transfer(
        &self,
        transaction_hash: TxHash,
        call_index: u64,
    ) -> Result<Option<InternalCallTransfer>, SourceError> {
        let state = self.state.read().await;
        Ok(state
            .internal_calls
            .iter()
            .find(|call| call.transaction_hash == transaction_hash && call.call_index == call_index)
            .cloned())
    }
}

#[async_trait]
impl TokenTransferSource for InMemoryLedgerStore {
    async fn fetch_token_transfers(
        &self,
        filter: &TokenTransferFilter,
    ) -> Result<Vec<TokenTransfer>, SourceError> {
        let state = self.state.read().await;
        let rows: Vec<_> = state
            .token_transfers
            .iter()
            .filter(|transfer| filter.matches(transfer))
            .cloned()
            .collect();

        debug!(rows = rows.len(), "In-memory token transfers fetched");
        Ok(rows)
    }

    async fn fetch_token_transfer(
        &self,
        transaction_hash: TxHash,
        log_index: u64,
    ) -> Result<Option<TokenTransfer>, SourceError> {
        let state = self.state.read().await;
        Ok(state
            .token_transfers
            .iter()
            .find(|t| t.transaction_hash == transaction_hash && t.log_index == log_index)
            .cloned())
    }
}

#[async_trait]
impl TransactionSource for InMemoryLedgerStore {
    async fn fetch_address_transactions(
        &self,
        address: Address,
    ) -> Result<Vec<Transaction>, SourceError> {
        let state = self.state.read().await;
        Ok(state
            .transactions
            .iter()
            .filter(|tx| tx.involves(address))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BalanceSnapshotSource for InMemoryLedgerStore {
    async fn fetch_balance_snapshots(
        &self,
        address: Address,
    ) -> Result<Vec<BalanceSnapshot>, SourceError> {
        let state = self.state.read().await;
        Ok(state
            .balance_snapshots
            .iter()
            .filter(|snapshot| snapshot.address_hash == address)
            .cloned()
            .collect())
    }
}
