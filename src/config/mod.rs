// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for ledgerscan operations
//!
//! This module controls which internal calls count as value movement, which
//! currency pair the dual-currency merge reports, and how long a single
//! adapter fetch may take.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use ledgerscan::LedgerConfig;
//!
//! // Bounds fetches at 30 seconds; delegatecalls and root calls are always excluded
//! let config = LedgerConfig::default();
//! assert!(config.dual_currency.is_none());
//! ```
//!
//! # Example: Dual-currency ledger
//!
//! ```rust
//! use ledgerscan::LedgerConfigBuilder;
//! use std::time::Duration;
//!
//! let config = LedgerConfigBuilder::with_defaults()
//!     .dual_currency("cGLD", "cUSD")
//!     .fetch_timeout(Duration::from_secs(5))
//!     .build();
//!
//! assert_eq!(config.dual_currency.unwrap().secondary.as_str(), "cUSD");
//! ```

use std::time::Duration;

use crate::types::currency::CurrencySymbol;
use crate::types::records::CallType;

pub mod constants;

use constants::{DEFAULT_FETCH_TIMEOUT, VALUELESS_CALL_TYPES};

/// Currency pair reported by the dual-currency merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualCurrency {
    /// Currency of native, internal-call and primary token legs
    pub primary: CurrencySymbol,
    /// Currency reported through each row's secondary leg
    pub secondary: CurrencySymbol,
}

impl DualCurrency {
    pub fn new(primary: impl Into<CurrencySymbol>, secondary: impl Into<CurrencySymbol>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

/// Configuration for ledgerscan operations
///
/// Use [`LedgerConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Currency pair for [`merge_dual_currency_transfers`](crate::TransferMergeEngine::merge_dual_currency_transfers)
    /// Default: None (dual-currency merges fail with `ConfigurationMissing`)
    pub dual_currency: Option<DualCurrency>,

    /// Internal call types excluded from merges in addition to
    /// [`VALUELESS_CALL_TYPES`], which are always excluded
    /// Default: empty
    pub excluded_call_types: Vec<CallType>,

    /// Upper bound on a single adapter fetch
    /// Default: 30 seconds
    pub fetch_timeout: Option<Duration>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LedgerConfig {
    /// Create config with the standard exclusions and a 30 second fetch timeout
    pub fn with_defaults() -> Self {
        Self {
            dual_currency: None,
            excluded_call_types: Vec::new(),
            fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
        }
    }

    /// Create config with the standard exclusions and no fetch timeout
    ///
    /// Suitable for tests or stores that enforce their own deadlines.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ledgerscan::LedgerConfig;
    ///
    /// let config = LedgerConfig::minimal();
    /// assert!(config.fetch_timeout.is_none());
    /// assert!(config.excluded_call_types.is_empty());
    /// ```
    pub fn minimal() -> Self {
        Self {
            fetch_timeout: None,
            ..Self::with_defaults()
        }
    }

    /// Returns true if internal calls of this type are merged
    ///
    /// [`VALUELESS_CALL_TYPES`] are never merged, whatever the configuration.
    pub fn includes_call_type(&self, call_type: CallType) -> bool {
        !VALUELESS_CALL_TYPES.contains(&call_type)
            && !self.excluded_call_types.contains(&call_type)
    }
}

/// Builder for [`LedgerConfig`]
///
/// # Example
///
/// ```rust
/// use ledgerscan::{CallType, LedgerConfigBuilder};
///
/// let config = LedgerConfigBuilder::new()
///     .exclude_call_type(CallType::StaticCall)
///     .build();
///
/// assert!(!config.includes_call_type(CallType::DelegateCall));
/// assert!(!config.includes_call_type(CallType::StaticCall));
/// assert!(config.includes_call_type(CallType::Call));
/// ```
pub struct LedgerConfigBuilder {
    config: LedgerConfig,
}

impl Default for LedgerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerConfigBuilder {
    /// Create a new builder starting from [`LedgerConfig::minimal`]
    pub fn new() -> Self {
        Self {
            config: LedgerConfig::minimal(),
        }
    }

    /// Start from [`LedgerConfig::with_defaults`]
    pub fn with_defaults() -> Self {
        Self {
            config: LedgerConfig::with_defaults(),
        }
    }

    /// Set the currency pair used by dual-currency merges
    pub fn dual_currency(
        mut self,
        primary: impl Into<CurrencySymbol>,
        secondary: impl Into<CurrencySymbol>,
    ) -> Self {
        self.config.dual_currency = Some(DualCurrency::new(primary, secondary));
        self
    }

    /// Exclude an additional internal call type
    pub fn exclude_call_type(mut self, call_type: CallType) -> Self {
        if !self.config.excluded_call_types.contains(&call_type) {
            self.config.excluded_call_types.push(call_type);
        }
        self
    }

    /// Bound every adapter fetch
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch_timeout = Some(timeout);
        self
    }

    /// Remove the fetch bound
    pub fn no_fetch_timeout(mut self) -> Self {
        self.config.fetch_timeout = None;
        self
    }

    pub fn build(self) -> LedgerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_exclude_delegatecall() {
        let config = LedgerConfig::default();
        assert!(!config.includes_call_type(CallType::DelegateCall));
        assert!(config.includes_call_type(CallType::Call));
        assert!(config.excluded_call_types.is_empty());
        assert_eq!(config.fetch_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_delegatecall_stays_excluded_when_exclusions_cleared() {
        let mut config = LedgerConfig::default();
        config.excluded_call_types.clear();
        assert!(!config.includes_call_type(CallType::DelegateCall));
    }

    #[test]
    fn test_builder_does_not_duplicate_exclusions() {
        let config = LedgerConfigBuilder::new()
            .exclude_call_type(CallType::StaticCall)
            .exclude_call_type(CallType::StaticCall)
            .build();
        assert_eq!(config.excluded_call_types, vec![CallType::StaticCall]);
    }

    #[test]
    fn test_builder_overrides() {
        let config = LedgerConfigBuilder::with_defaults()
            .dual_currency("cGLD", "cUSD")
            .exclude_call_type(CallType::Create)
            .no_fetch_timeout()
            .build();

        assert_eq!(
            config.dual_currency,
            Some(DualCurrency::new("cGLD", "cUSD"))
        );
        assert!(!config.includes_call_type(CallType::Create));
        assert!(config.fetch_timeout.is_none());
    }
}
