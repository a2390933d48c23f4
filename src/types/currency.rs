// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong type for token symbols

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbol identifying a currency or token class (e.g. `cUSD`, `WETH`)
///
/// Symbols compare exactly; no case folding is applied, since token contracts
/// are free to pick symbols that differ only by case.
///
/// # Examples
///
/// ```
/// use ledgerscan::CurrencySymbol;
///
/// let symbol = CurrencySymbol::new("cUSD");
/// assert_eq!(symbol.as_str(), "cUSD");
/// assert_ne!(symbol, CurrencySymbol::new("CUSD"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencySymbol(String);

impl CurrencySymbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CurrencySymbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CurrencySymbol {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CurrencySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
