// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Filters pushed down to the storage adapters
//!
//! Each filter mirrors what a store can answer from its indexes. Stores should
//! honour every field; the merge engine re-checks the value and call
//! predicates on the rows it receives, so a lax store cannot leak excluded
//! rows into a merge.
//!
//! # Examples
//!
//! ```rust
//! use ledgerscan::sources::{InternalCallFilter, NativeTransferFilter};
//! use ledgerscan::CallType;
//! use alloy_primitives::{address, U256};
//!
//! let alice = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
//!
//! let natives = NativeTransferFilter::positive_value().with_address(alice);
//! assert_eq!(natives.min_value, U256::from(1));
//!
//! let calls = InternalCallFilter::positive_value()
//!     .excluding_call_type(CallType::DelegateCall)
//!     .excluding_index(0);
//! assert_eq!(calls.exclude_index, Some(0));
//! ```

use alloy_primitives::{Address, TxHash, U256};

use crate::types::currency::CurrencySymbol;
use crate::types::records::{
    CallType, InternalCallTransfer, NativeTransfer, TokenTransfer,
};

/// Filter for [`NativeTransferSource`](super::NativeTransferSource)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeTransferFilter {
    /// Inclusive lower bound on `value`
    pub min_value: U256,
    /// Keep transfers sent or received by this address
    pub address_hash: Option<Address>,
    /// Keep transfers of this transaction
    pub transaction_hash: Option<TxHash>,
}

impl NativeTransferFilter {
    /// Every transfer that moved a non-zero value
    pub fn positive_value() -> Self {
        Self {
            min_value: U256::from(1),
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address_hash = Some(address);
        self
    }

    pub fn with_transaction(mut self, transaction_hash: TxHash) -> Self {
        self.transaction_hash = Some(transaction_hash);
        self
    }

    pub fn matches(&self, transfer: &NativeTransfer) -> bool {
        transfer.value >= self.min_value
            && self
                .address_hash
                .is_none_or(|a| transfer.from_address == a || transfer.to_address == a)
            && self
                .transaction_hash
                .is_none_or(|h| transfer.transaction_hash == h)
    }
}

/// Filter for [`InternalCallTransferSource`](super::InternalCallTransferSource)
///
/// `address_hash` selects calls belonging to transactions the address took part
/// in (as sender, receiver or created contract). That needs the enclosing
/// transaction, so [`matches_call`](Self::matches_call) leaves it to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternalCallFilter {
    /// Inclusive lower bound on `value`
    pub min_value: U256,
    pub exclude_call_types: Vec<CallType>,
    pub exclude_index: Option<u64>,
    pub address_hash: Option<Address>,
    pub transaction_hash: Option<TxHash>,
}

impl InternalCallFilter {
    /// Every call that moved a non-zero value
    pub fn positive_value() -> Self {
        Self {
            min_value: U256::from(1),
            ..Self::default()
        }
    }

    pub fn excluding_call_type(mut self, call_type: CallType) -> Self {
        if !self.exclude_call_types.contains(&call_type) {
            self.exclude_call_types.push(call_type);
        }
        self
    }

    pub fn excluding_index(mut self, call_index: u64) -> Self {
        self.exclude_index = Some(call_index);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address_hash = Some(address);
        self
    }

    pub fn with_transaction(mut self, transaction_hash: TxHash) -> Self {
        self.transaction_hash = Some(transaction_hash);
        self
    }

    /// Checks every field except `address_hash`
    pub fn matches_call(&self, call: &InternalCallTransfer) -> bool {
        call.value >= self.min_value
            && !self.exclude_call_types.contains(&call.call_type)
            && self.exclude_index != Some(call.call_index)
            && self
                .transaction_hash
                .is_none_or(|h| call.transaction_hash == h)
    }
}

/// Filter for [`TokenTransferSource`](super::TokenTransferSource)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTransferFilter {
    /// Keep transfers of this token symbol; `None` keeps every token
    pub currency_symbol: Option<CurrencySymbol>,
    /// Keep transfers sent or received by this address
    pub address_hash: Option<Address>,
    /// Keep transfers of this transaction
    pub transaction_hash: Option<TxHash>,
}

impl TokenTransferFilter {
    pub fn for_symbol(symbol: CurrencySymbol) -> Self {
        Self {
            currency_symbol: Some(symbol),
            ..Self::default()
        }
    }

    pub fn any_token() -> Self {
        Self::default()
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address_hash = Some(address);
        self
    }

    pub fn with_transaction(mut self, transaction_hash: TxHash) -> Self {
        self.transaction_hash = Some(transaction_hash);
        self
    }

    pub fn matches(&self, transfer: &TokenTransfer) -> bool {
        self.currency_symbol
            .as_ref()
            .is_none_or(|s| &transfer.token_symbol == s)
            && self
                .address_hash
                .is_none_or(|a| transfer.from_address == a || transfer.to_address == a)
            && self
                .transaction_hash
                .is_none_or(|h| transfer.transaction_hash == h)
    }
}
