// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for ledgerscan integration tests
//!
//! Provides row builders for the in-memory store and a failing adapter to
//! exercise source outages without a real database.

#![allow(dead_code)]

use alloy_primitives::{address, Address, TxHash, B256, U256};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use ledgerscan::sources::{InternalCallFilter, NativeTransferFilter, TokenTransferFilter};
use ledgerscan::{
    BalanceSnapshot, BalanceSnapshotSource, CallType, CurrencySymbol, InternalCallTransfer,
    InternalCallTransferSource, NativeTransfer, NativeTransferSource, SourceError, SourceKind,
    TokenTransfer, TokenTransferSource, Transaction, TransactionSource,
};

pub const ALICE: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
pub const BOB: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
pub const CAROL: Address = address!("cccccccccccccccccccccccccccccccccccccccc");
pub const TOKEN_CONTRACT: Address = address!("dddddddddddddddddddddddddddddddddddddddd");

/// Deterministic transaction hash for tests
pub fn tx_hash(n: u8) -> TxHash {
    B256::repeat_byte(n)
}

pub fn transaction(
    hash: TxHash,
    block_number: u64,
    index: u64,
    from: Address,
    to: Address,
    value: u64,
) -> Transaction {
    Transaction {
        hash,
        block_number,
        index,
        from_address: from,
        to_address: Some(to),
        created_contract_address: None,
        value: U256::from(value),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn internal_call(
    hash: TxHash,
    block_number: u64,
    transaction_index: u64,
    call_index: u64,
    call_type: CallType,
    from: Address,
    to: Address,
    value: u64,
) -> InternalCallTransfer {
    InternalCallTransfer {
        transaction_hash: hash,
        from_address: from,
        to_address: to,
        value: U256::from(value),
        call_type,
        call_index,
        transaction_index,
        block_number,
    }
}

pub fn token_transfer(
    hash: TxHash,
    block_number: u64,
    log_index: u64,
    symbol: &str,
    from: Address,
    to: Address,
    amount: u64,
) -> TokenTransfer {
    TokenTransfer {
        transaction_hash: hash,
        from_address: from,
        to_address: to,
        amount: U256::from(amount),
        token_symbol: CurrencySymbol::new(symbol),
        token_contract_address: TOKEN_CONTRACT,
        log_index,
        block_number,
    }
}

pub fn snapshot(address: Address, block_number: u64, value: Option<u64>) -> BalanceSnapshot {
    BalanceSnapshot {
        address_hash: address,
        block_number,
        value: value.map(U256::from),
        block_timestamp: Utc
            .timestamp_opt(1_700_000_000 + block_number as i64 * 5, 0)
            .unwrap(),
    }
}

/// Install a test subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Adapter that fails every fetch, tagged with the source it stands in for
pub struct FailingSource {
    origin: SourceKind,
}

impl FailingSource {
    pub fn new(origin: SourceKind) -> Self {
        Self { origin }
    }

    fn fail<T>(&self) -> Result<T, SourceError> {
        Err(SourceError::unavailable(self.origin, "store offline"))
    }
}

#[async_trait]
impl NativeTransferSource for FailingSource {
    async fn fetch_native_transfers(
        &self,
        _filter: &NativeTransferFilter,
    ) -> Result<Vec<NativeTransfer>, SourceError> {
        self.fail()
    }
}

#[async_trait]
impl InternalCallTransferSource for FailingSource {
    async fn fetch_internal_call_transfers(
        &self,
        _filter: &InternalCallFilter,
    ) -> Result<Vec<InternalCallTransfer>, SourceError> {
        self.fail()
    }

    async fn fetch_internal_call_transfer(
        &self,
        _transaction_hash: TxHash,
        _call_index: u64,
    ) -> Result<Option<InternalCallTransfer>, SourceError> {
        self.fail()
    }
}

#[async_trait]
impl TokenTransferSource for FailingSource {
    async fn fetch_token_transfers(
        &self,
        _filter: &TokenTransferFilter,
    ) -> Result<Vec<TokenTransfer>, SourceError> {
        self.fail()
    }

    async fn fetch_token_transfer(
        &self,
        _transaction_hash: TxHash,
        _log_index: u64,
    ) -> Result<Option<TokenTransfer>, SourceError> {
        self.fail()
    }
}

#[async_trait]
impl TransactionSource for FailingSource {
    async fn fetch_address_transactions(
        &self,
        _address: Address,
    ) -> Result<Vec<Transaction>, SourceError> {
        self.fail()
    }
}

#[async_trait]
impl BalanceSnapshotSource for FailingSource {
    async fn fetch_balance_snapshots(
        &self,
        _address: Address,
    ) -> Result<Vec<BalanceSnapshot>, SourceError> {
        self.fail()
    }
}

/// Adapter returning rows without applying any filter
///
/// Stands in for a store whose indexes ignore part of the pushed-down filter.
pub struct UnfilteredInternalCalls {
    pub calls: Vec<InternalCallTransfer>,
}

#[async_trait]
impl InternalCallTransferSource for UnfilteredInternalCalls {
    async fn fetch_internal_call_transfers(
        &self,
        _filter: &InternalCallFilter,
    ) -> Result<Vec<InternalCallTransfer>, SourceError> {
        Ok(self.calls.clone())
    }

    async fn fetch_internal_call_transfer(
        &self,
        transaction_hash: TxHash,
        call_index: u64,
    ) -> Result<Option<InternalCallTransfer>, SourceError> {
        Ok(self
            .calls
            .iter()
            .find(|c| c.transaction_hash == transaction_hash && c.call_index == call_index)
            .cloned())
    }
}
