// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transfer merge engine
//!
//! Unions native transfers, qualifying internal-call transfers and token
//! transfers into one ledger ordered by [`OrderingKey`] descending.
//!
//! # Pipeline
//!
//! 1. Fetch every source concurrently. Any failure fails the whole merge;
//!    a merge missing one source would misrepresent the ledger.
//! 2. Tag each row with its leg and drop rows that do not qualify.
//! 3. Project into [`TransferEvent`]s.
//! 4. Sort by key descending and reject duplicate keys.

use std::sync::Arc;

use alloy_primitives::TxHash;
use futures::future::{try_join3, try_join4};
use tracing::{debug, error, info, Instrument};

use crate::config::constants::{ROOT_CALL_INDEX, VALUELESS_CALL_TYPES};
use crate::config::LedgerConfig;
use crate::errors::{LedgerError, OrderingError, SourceError};
use crate::merge::normalize::SourceEvent;
use crate::merge::result::MergedTransfers;
use crate::sources::{
    bounded_fetch, InternalCallFilter, InternalCallTransferSource, NativeTransferFilter,
    NativeTransferSource, TokenTransferFilter, TokenTransferSource,
};
use crate::spans;
use crate::types::currency::CurrencySymbol;
use crate::types::position::TokenLeg;
use crate::types::records::{
    InternalCallTransfer, NativeTransfer, SourceKind, TokenTransfer,
};
use crate::types::transfer::TransferEvent;

/// Merges the three transfer sources into one ordered ledger
///
/// The engine is stateless between calls and `Send + Sync`; share it behind an
/// `Arc` to run merges for different callers in parallel.
///
/// # Examples
///
/// ```rust,ignore
/// use ledgerscan::{InMemoryLedgerStore, LedgerConfig, TransferMergeEngine};
/// use std::sync::Arc;
///
/// let store = Arc::new(InMemoryLedgerStore::new());
/// let engine = TransferMergeEngine::from_store(store, LedgerConfig::default());
///
/// let ledger = engine.merge_single_currency_transfers(&"cUSD".into()).await?;
/// for event in ledger.involving(alice) {
///     println!("{} -> {}: {}", event.from_address, event.to_address, event.value);
/// }
/// ```
pub struct TransferMergeEngine {
    native: Arc<dyn NativeTransferSource>,
    internal: Arc<dyn InternalCallTransferSource>,
    tokens: Arc<dyn TokenTransferSource>,
    config: LedgerConfig,
}

impl TransferMergeEngine {
    /// Create an engine from one adapter per source
    pub fn new(
        native: Arc<dyn NativeTransferSource>,
        internal: Arc<dyn InternalCallTransferSource>,
        tokens: Arc<dyn TokenTransferSource>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            native,
            internal,
            tokens,
            config,
        }
    }

    /// Create an engine reading every source from one store
    pub fn from_store<S>(store: Arc<S>, config: LedgerConfig) -> Self
    where
        S: NativeTransferSource + InternalCallTransferSource + TokenTransferSource + 'static,
    {
        Self::new(store.clone(), store.clone(), store, config)
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Merge native transfers, internal calls and one currency's token transfers
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Source`] if any source fetch fails (no partial result)
    /// - [`LedgerError::Ordering`] if two events share an ordering key
    pub async fn merge_single_currency_transfers(
        &self,
        currency_symbol: &CurrencySymbol,
    ) -> Result<MergedTransfers, LedgerError> {
        async move {
            let (natives, internals, tokens) = try_join3(
                self.fetch_native(),
                self.fetch_internal(),
                self.fetch_tokens(currency_symbol),
            )
            .await?;

            let events = natives
                .into_iter()
                .map(SourceEvent::Native)
                .chain(internals.into_iter().map(SourceEvent::Internal))
                .chain(
                    tokens
                        .into_iter()
                        .map(|t| SourceEvent::Token(t, TokenLeg::Single)),
                );

            self.finish(events, None)
        }
        .instrument(spans::merge_single_currency_transfers(currency_symbol))
        .await
    }

    /// Merge all sources, reporting the configured secondary currency on every row
    ///
    /// Primary-currency rows (native, internal and primary token transfers)
    /// carry their value and a zero secondary value. Secondary token
    /// transfers carry a zero primary value and their amount as secondary
    /// value.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::ConfigurationMissing`] if no dual-currency pair is configured
    /// - [`LedgerError::Source`] if any source fetch fails (no partial result)
    /// - [`LedgerError::Ordering`] if two events share an ordering key
    pub async fn merge_dual_currency_transfers(&self) -> Result<MergedTransfers, LedgerError> {
        let pair = self
            .config
            .dual_currency
            .as_ref()
            .ok_or_else(|| LedgerError::configuration_missing("dual_currency"))?;

        async move {
            let (natives, internals, primary_tokens, secondary_tokens) = try_join4(
                self.fetch_native(),
                self.fetch_internal(),
                self.fetch_tokens(&pair.primary),
                self.fetch_tokens(&pair.secondary),
            )
            .await?;

            let events = natives
                .into_iter()
                .map(SourceEvent::Native)
                .chain(internals.into_iter().map(SourceEvent::Internal))
                .chain(
                    primary_tokens
                        .into_iter()
                        .map(|t| SourceEvent::Token(t, TokenLeg::Primary)),
                )
                .chain(
                    secondary_tokens
                        .into_iter()
                        .map(|t| SourceEvent::Token(t, TokenLeg::Secondary)),
                );

            self.finish(events, Some(&pair.secondary))
        }
        .instrument(spans::merge_dual_currency_transfers(
            &pair.primary,
            &pair.secondary,
        ))
        .await
    }

    /// Look up one internal call by transaction and call index
    ///
    /// Returns `Ok(None)` when the store has no such call.
    pub async fn find_internal_call_transfer(
        &self,
        transaction_hash: TxHash,
        call_index: u64,
    ) -> Result<Option<InternalCallTransfer>, LedgerError> {
        let found = bounded_fetch(
            SourceKind::InternalCalls,
            self.config.fetch_timeout,
            self.internal
                .fetch_internal_call_transfer(transaction_hash, call_index),
        )
        .instrument(spans::point_lookup(
            SourceKind::InternalCalls,
            transaction_hash,
            call_index,
        ))
        .await?;

        Ok(found)
    }

    /// Look up one token transfer by transaction and log index
    ///
    /// Returns `Ok(None)` when the store has no such transfer.
    pub async fn find_token_transfer(
        &self,
        transaction_hash: TxHash,
        log_index: u64,
    ) -> Result<Option<TokenTransfer>, LedgerError> {
        let found = bounded_fetch(
            SourceKind::TokenTransfers,
            self.config.fetch_timeout,
            self.tokens.fetch_token_transfer(transaction_hash, log_index),
        )
        .instrument(spans::point_lookup(
            SourceKind::TokenTransfers,
            transaction_hash,
            log_index,
        ))
        .await?;

        Ok(found)
    }

    async fn fetch_native(&self) -> Result<Vec<NativeTransfer>, SourceError> {
        let filter = NativeTransferFilter::positive_value();
        let rows = bounded_fetch(
            SourceKind::NativeTransfers,
            self.config.fetch_timeout,
            self.native.fetch_native_transfers(&filter),
        )
        .await
        .inspect_err(|e| error!(error = %e, "Native transfer fetch failed"))?;

        debug!(rows = rows.len(), "Fetched native transfers");
        Ok(rows)
    }

    async fn fetch_internal(&self) -> Result<Vec<InternalCallTransfer>, SourceError> {
        let mut filter = InternalCallFilter::positive_value().excluding_index(ROOT_CALL_INDEX);
        for call_type in VALUELESS_CALL_TYPES
            .iter()
            .chain(&self.config.excluded_call_types)
        {
            filter = filter.excluding_call_type(*call_type);
        }

        let rows = bounded_fetch(
            SourceKind::InternalCalls,
            self.config.fetch_timeout,
            self.internal.fetch_internal_call_transfers(&filter),
        )
        .await
        .inspect_err(|e| error!(error = %e, "Internal call fetch failed"))?;

        debug!(rows = rows.len(), "Fetched internal call transfers");
        Ok(rows)
    }

    async fn fetch_tokens(
        &self,
        currency_symbol: &CurrencySymbol,
    ) -> Result<Vec<TokenTransfer>, SourceError> {
        let filter = TokenTransferFilter::for_symbol(currency_symbol.clone());
        let rows = bounded_fetch(
            SourceKind::TokenTransfers,
            self.config.fetch_timeout,
            self.tokens.fetch_token_transfers(&filter),
        )
        .await
        .inspect_err(|e| error!(error = %e, currency = %currency_symbol, "Token transfer fetch failed"))?;

        debug!(rows = rows.len(), currency = %currency_symbol, "Fetched token transfers");
        Ok(rows)
    }

    /// Drops non-qualifying rows, projects, orders and verifies the result
    fn finish(
        &self,
        events: impl Iterator<Item = SourceEvent>,
        secondary_currency: Option<&CurrencySymbol>,
    ) -> Result<MergedTransfers, LedgerError> {
        let mut dropped = 0usize;
        let projected: Vec<TransferEvent> = events
            .filter(|event| {
                let keep = event.qualifies(&self.config);
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .map(|event| event.into_transfer(secondary_currency))
            .collect();

        if dropped > 0 {
            debug!(dropped, "Dropped rows that moved no value");
        }

        let ordered = order_descending(projected)?;
        info!(events = ordered.len(), "Merged transfer ledger");
        Ok(MergedTransfers::from_ordered(ordered))
    }
}

/// Sorts events most recent first and rejects duplicate keys.
///
/// Keys are unique by construction, so equal neighbours after sorting mean the
/// store returned the same position twice.
pub(crate) fn order_descending(
    mut events: Vec<TransferEvent>,
) -> Result<Vec<TransferEvent>, OrderingError> {
    events.sort_by(|a, b| b.key.cmp(&a.key));

    if let Some(pair) = events.windows(2).find(|pair| pair[0].key == pair[1].key) {
        let key = pair[0].key;
        error!(%key, source = %key.source(), "Duplicate ordering key in merge");
        return Err(OrderingError::DuplicateKey {
            origin: key.source(),
            key,
        });
    }

    Ok(events)
}
