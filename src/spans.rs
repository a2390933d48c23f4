//! Span creation helpers for ledgerscan operations.
//!
//! Telemetry is kept apart from business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here, attached
//! with [`tracing::Instrument`].
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param_value))
//!     .await
//! }
//! ```

use alloy_primitives::{Address, TxHash};
use tracing::{Level, Span};

use crate::types::currency::CurrencySymbol;
use crate::types::records::SourceKind;

/// Create span for a single-currency transfer merge.
///
/// Parent: None (root span for this operation)
/// Children: adapter fetches for the three transfer sources
#[inline]
pub(crate) fn merge_single_currency_transfers(currency: &CurrencySymbol) -> Span {
    tracing::span!(
        Level::INFO,
        "ledgerscan.merge_single_currency_transfers",
        currency = %currency,
    )
}

/// Create span for a dual-currency transfer merge.
///
/// Parent: None (root span for this operation)
/// Children: adapter fetches for the three transfer sources
#[inline]
pub(crate) fn merge_dual_currency_transfers(
    primary: &CurrencySymbol,
    secondary: &CurrencySymbol,
) -> Span {
    tracing::span!(
        Level::INFO,
        "ledgerscan.merge_dual_currency_transfers",
        primary = %primary,
        secondary = %secondary,
    )
}

/// Create span for a point lookup of one internal call or token transfer.
#[inline]
pub(crate) fn point_lookup(source: SourceKind, transaction_hash: TxHash, index: u64) -> Span {
    tracing::debug_span!(
        "ledgerscan.point_lookup",
        source = %source,
        transaction_hash = %transaction_hash,
        index = index,
    )
}

/// Create span for collecting the per-kind activity of an address.
///
/// Parent: None (root span for this operation)
/// Children: transaction, internal call and token transfer fetches
#[inline]
pub(crate) fn address_activity(address: Address) -> Span {
    tracing::span!(
        Level::INFO,
        "ledgerscan.address_activity",
        address = %address,
    )
}

/// Create span for computing the balance delta series of an address.
#[inline]
pub(crate) fn balance_deltas(address: Address) -> Span {
    tracing::span!(
        Level::INFO,
        "ledgerscan.balance_deltas",
        address = %address,
    )
}
