// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the ledgerscan library.
//!
//! This module follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling ([`SourceError`],
//!   [`OrderingError`], [`BalanceError`])
//! - **Unified error type** ([`LedgerError`]) returned by the public
//!   operations, so errors compose with `?`
//!
//! A missing row in a point lookup is not an error: lookups return
//! `Ok(None)`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use ledgerscan::{LedgerError, SourceKind, TransferMergeEngine};
//!
//! async fn example(engine: &TransferMergeEngine) {
//!     match engine.merge_single_currency_transfers(&"cUSD".into()).await {
//!         Ok(transfers) => println!("{} transfers", transfers.len()),
//!         Err(LedgerError::Source(e)) if e.origin() == SourceKind::TokenTransfers => {
//!             eprintln!("Token transfers unavailable: {e}");
//!         }
//!         Err(LedgerError::Ordering(e)) => eprintln!("Corrupt store data: {e}"),
//!         Err(e) => eprintln!("Other error: {e}"),
//!     }
//! }
//! ```

mod balance;
mod ordering;
mod source;

pub use balance::BalanceError;
pub use ordering::OrderingError;
pub use source::SourceError;

/// Unified error type for all ledgerscan operations.
///
/// All module-specific error types automatically convert to `LedgerError` via
/// `From` implementations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A storage adapter failed; no partial result is returned.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Store data violated the ordering invariant.
    #[error("Ordering invariant violated: {0}")]
    Ordering(#[from] OrderingError),

    /// A balance delta fell outside the representable range.
    #[error("Balance error: {0}")]
    Balance(#[from] BalanceError),

    /// Required configuration is missing.
    #[error("Missing configuration: {field}")]
    ConfigurationMissing {
        /// Name of the missing configuration field
        field: String,
    },
}

impl LedgerError {
    /// Create a `ConfigurationMissing` error for a specific field.
    pub fn configuration_missing(field: impl Into<String>) -> Self {
        LedgerError::ConfigurationMissing {
            field: field.into(),
        }
    }
}
