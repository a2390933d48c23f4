// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Rows produced by the storage adapters
//!
//! These are the shapes each event source yields before the merge engine
//! normalizes them. They carry the store's native position keys (block number,
//! position in block, position in log) and nothing else the merge needs.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, BlockNumber, TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::types::currency::CurrencySymbol;

/// Identifies which event source a row, key or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Value carried by whole transactions
    NativeTransfers,
    /// Value moved by nested contract calls
    InternalCalls,
    /// Transfers emitted by token contract logs
    TokenTransfers,
    /// Full transaction records (address activity)
    Transactions,
    /// Recorded balance snapshots
    BalanceSnapshots,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::NativeTransfers => "native_transfers",
            SourceKind::InternalCalls => "internal_calls",
            SourceKind::TokenTransfers => "token_transfers",
            SourceKind::Transactions => "transactions",
            SourceKind::BalanceSnapshots => "balance_snapshots",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// EVM call type of an internal call, as recorded by the tracer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Call,
    CallCode,
    DelegateCall,
    StaticCall,
    Create,
    Create2,
    SelfDestruct,
}

impl CallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallType::Call => "call",
            CallType::CallCode => "callcode",
            CallType::DelegateCall => "delegatecall",
            CallType::StaticCall => "staticcall",
            CallType::Create => "create",
            CallType::Create2 => "create2",
            CallType::SelfDestruct => "selfdestruct",
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a call type string is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown call type: {0}")]
pub struct UnknownCallType(pub String);

impl FromStr for CallType {
    type Err = UnknownCallType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" => Ok(CallType::Call),
            "callcode" => Ok(CallType::CallCode),
            "delegatecall" => Ok(CallType::DelegateCall),
            "staticcall" => Ok(CallType::StaticCall),
            "create" => Ok(CallType::Create),
            "create2" => Ok(CallType::Create2),
            "selfdestruct" | "suicide" => Ok(CallType::SelfDestruct),
            _ => Err(UnknownCallType(s.to_string())),
        }
    }
}

/// Native currency moved by a whole transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeTransfer {
    pub transaction_hash: TxHash,
    pub from_address: Address,
    pub to_address: Address,
    pub value: U256,
    pub transaction_index: u64,
    pub block_number: BlockNumber,
}

/// Native currency moved by a nested call inside a transaction.
///
/// `call_index` restarts at zero in every transaction; index zero is the
/// top-level call and duplicates the enclosing transaction's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalCallTransfer {
    pub transaction_hash: TxHash,
    pub from_address: Address,
    pub to_address: Address,
    pub value: U256,
    pub call_type: CallType,
    pub call_index: u64,
    pub transaction_index: u64,
    pub block_number: BlockNumber,
}

/// A transfer emitted by a token contract log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub transaction_hash: TxHash,
    pub from_address: Address,
    pub to_address: Address,
    pub amount: U256,
    pub token_symbol: CurrencySymbol,
    pub token_contract_address: Address,
    pub log_index: u64,
    pub block_number: BlockNumber,
}

/// A full transaction record, used by address activity views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: TxHash,
    pub block_number: BlockNumber,
    pub index: u64,
    pub from_address: Address,
    /// `None` for contract creations
    pub to_address: Option<Address>,
    pub created_contract_address: Option<Address>,
    pub value: U256,
}

impl Transaction {
    /// Returns true if `address` sent, received, or was created by this transaction
    pub fn involves(&self, address: Address) -> bool {
        self.from_address == address
            || self.to_address == Some(address)
            || self.created_contract_address == Some(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_call_type_parses_case_insensitively() {
        assert_eq!("DelegateCall".parse::<CallType>(), Ok(CallType::DelegateCall));
        assert_eq!("call".parse::<CallType>(), Ok(CallType::Call));
        assert_eq!("suicide".parse::<CallType>(), Ok(CallType::SelfDestruct));
    }

    #[test]
    fn test_call_type_rejects_unknown() {
        let err = "jump".parse::<CallType>().unwrap_err();
        assert_eq!(err, UnknownCallType("jump".to_string()));
    }

    #[test]
    fn test_call_type_display_round_trips_through_parse() {
        for call_type in [
            CallType::Call,
            CallType::CallCode,
            CallType::DelegateCall,
            CallType::StaticCall,
            CallType::Create,
            CallType::Create2,
            CallType::SelfDestruct,
        ] {
            assert_eq!(call_type.to_string().parse::<CallType>(), Ok(call_type));
        }
    }

    #[test]
    fn test_transaction_involves_created_contract() {
        let sender = address!("1111111111111111111111111111111111111111");
        let created = address!("2222222222222222222222222222222222222222");
        let stranger = address!("3333333333333333333333333333333333333333");

        let tx = Transaction {
            hash: TxHash::ZERO,
            block_number: 1,
            index: 0,
            from_address: sender,
            to_address: None,
            created_contract_address: Some(created),
            value: U256::ZERO,
        };

        assert!(tx.involves(sender));
        assert!(tx.involves(created));
        assert!(!tx.involves(stranger));
    }

    #[test]
    fn test_source_kind_serializes_snake_case() {
        let json = serde_json::to_string(&SourceKind::InternalCalls).unwrap();
        assert_eq!(json, "\"internal_calls\"");
    }
}
