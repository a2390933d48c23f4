// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-kind activity of one address
//!
//! Activity is not unified into one ordering. Each collection is fetched
//! through its own adapter and ordered independently, most recent first.

use std::cmp::Reverse;
use std::sync::Arc;

use alloy_primitives::Address;
use futures::future::try_join3;
use serde::{Deserialize, Serialize};
use tracing::{info, Instrument};

use crate::config::LedgerConfig;
use crate::errors::LedgerError;
use crate::sources::{
    bounded_fetch, InternalCallFilter, InternalCallTransferSource, TokenTransferFilter,
    TokenTransferSource, TransactionSource,
};
use crate::spans;
use crate::types::records::{InternalCallTransfer, SourceKind, TokenTransfer, Transaction};

/// Everything an address took part in, grouped by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressActivity {
    pub address: Address,
    /// Sent, received, or contract-creating transactions; `(block, index)` desc
    pub transactions: Vec<Transaction>,
    /// Internal calls of those transactions; `(block, transaction index, call index)` desc
    pub internal_calls: Vec<InternalCallTransfer>,
    /// Token transfers sent or received, any token; `(block, log index)` desc
    pub token_transfers: Vec<TokenTransfer>,
}

impl AddressActivity {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.internal_calls.is_empty()
            && self.token_transfers.is_empty()
    }
}

/// Collects [`AddressActivity`] through the transaction, internal call and
/// token transfer adapters
pub struct AddressActivityFilter {
    transactions: Arc<dyn TransactionSource>,
    internal: Arc<dyn InternalCallTransferSource>,
    tokens: Arc<dyn TokenTransferSource>,
    config: LedgerConfig,
}

impl AddressActivityFilter {
    pub fn new(
        transactions: Arc<dyn TransactionSource>,
        internal: Arc<dyn InternalCallTransferSource>,
        tokens: Arc<dyn TokenTransferSource>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            transactions,
            internal,
            tokens,
            config,
        }
    }

    /// Create a filter reading every source from one store
    pub fn from_store<S>(store: Arc<S>, config: LedgerConfig) -> Self
    where
        S: TransactionSource + InternalCallTransferSource + TokenTransferSource + 'static,
    {
        Self::new(store.clone(), store.clone(), store, config)
    }

    /// Fetch the three activity collections of `address`
    ///
    /// The fetches run concurrently and fail together: if any adapter fails,
    /// no activity is returned.
    pub async fn address_activity(&self, address: Address) -> Result<AddressActivity, LedgerError> {
        async move {
            let timeout = self.config.fetch_timeout;
            let internal_filter = InternalCallFilter::default().with_address(address);
            let token_filter = TokenTransferFilter::any_token().with_address(address);

            let (mut transactions, mut internal_calls, mut token_transfers) = try_join3(
                bounded_fetch(
                    SourceKind::Transactions,
                    timeout,
                    self.transactions.fetch_address_transactions(address),
                ),
                bounded_fetch(
                    SourceKind::InternalCalls,
                    timeout,
                    self.internal.fetch_internal_call_transfers(&internal_filter),
                ),
                bounded_fetch(
                    SourceKind::TokenTransfers,
                    timeout,
                    self.tokens.fetch_token_transfers(&token_filter),
                ),
            )
            .await?;

            transactions.sort_by_key(|tx| Reverse((tx.block_number, tx.index)));
            internal_calls
                .sort_by_key(|c| Reverse((c.block_number, c.transaction_index, c.call_index)));
            token_transfers.sort_by_key(|t| Reverse((t.block_number, t.log_index)));

            info!(
                transactions = transactions.len(),
                internal_calls = internal_calls.len(),
                token_transfers = token_transfers.len(),
                "Collected address activity"
            );

            Ok(AddressActivity {
                address,
                transactions,
                internal_calls,
                token_transfers,
            })
        }
        .instrument(spans::address_activity(address))
        .await
    }
}
