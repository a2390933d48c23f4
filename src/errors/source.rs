// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised at the storage adapter boundary.
//!
//! Every variant carries the [`SourceKind`] that failed so a partial outage
//! (say, only the token transfer table being unreachable) is diagnosable from
//! the error alone.

use std::time::Duration;

use crate::types::records::SourceKind;

/// A storage adapter could not produce events.
///
/// The merge engine never recovers from these locally: it cannot fabricate
/// ledger data, so the error is propagated unchanged and the whole operation
/// fails.
///
/// # Examples
///
/// ```rust
/// use ledgerscan::{SourceError, SourceKind};
///
/// let error = SourceError::unavailable(SourceKind::TokenTransfers, "connection reset");
/// assert_eq!(error.origin(), SourceKind::TokenTransfers);
/// println!("Error: {}", error);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The store reported that the source cannot be read right now.
    #[error("{origin} source unavailable: {reason}")]
    Unavailable {
        /// Source that failed
        origin: SourceKind,
        /// Store-provided explanation
        reason: String,
    },

    /// The fetch did not complete within the configured timeout.
    #[error("{origin} source timed out after {after:?}")]
    Timeout {
        /// Source that failed
        origin: SourceKind,
        /// The timeout that elapsed
        after: Duration,
    },

    /// The store returned an error of its own.
    #[error("{origin} source failed")]
    Store {
        /// Source that failed
        origin: SourceKind,
        /// The underlying store error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SourceError {
    /// Helper to create an `Unavailable` error.
    pub fn unavailable(origin: SourceKind, reason: impl Into<String>) -> Self {
        SourceError::Unavailable {
            origin,
            reason: reason.into(),
        }
    }

    /// Helper to create a `Timeout` error.
    pub fn timeout(origin: SourceKind, after: Duration) -> Self {
        SourceError::Timeout { origin, after }
    }

    /// Helper to create a `Store` error from any error type.
    pub fn store(
        origin: SourceKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SourceError::Store {
            origin,
            source: Box::new(source),
        }
    }

    /// The source that failed
    pub fn origin(&self) -> SourceKind {
        match self {
            SourceError::Unavailable { origin, .. }
            | SourceError::Timeout { origin, .. }
            | SourceError::Store { origin, .. } => *origin,
        }
    }
}
