// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Read-only ledger views over stored EVM chain events.
//!
//! `ledgerscan` answers "what value moved, in what order, and what was the
//! running balance" for an address or a transaction. It reads already
//! persisted, immutable events through storage adapters and derives:
//!
//! - **Merged transfer ledgers** ([`TransferMergeEngine`]): native transfers
//!   carried by whole transactions, value moved by internal calls, and token
//!   transfers emitted by logs, unified into one collision-free ordering.
//!   Single-currency and dual-currency variants are available.
//! - **Address activity** ([`AddressActivityFilter`]): per-kind collections
//!   for one address, each ordered on its own.
//! - **Balance delta series** ([`BalanceDeltaSeries`]): balance snapshots
//!   annotated with their change since the previous snapshot.
//!
//! Storage is an external collaborator: implement the traits in [`sources`]
//! for your store, or use [`InMemoryLedgerStore`].
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerscan::{InMemoryLedgerStore, LedgerConfig, TransferMergeEngine};
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryLedgerStore::new());
//! let engine = TransferMergeEngine::from_store(store, LedgerConfig::default());
//!
//! let ledger = engine
//!     .merge_single_currency_transfers(&"cUSD".into())
//!     .await?
//!     .involving(alice);
//! ```

pub mod activity;
pub mod balance;
pub mod config;
pub mod errors;
pub mod merge;
pub mod sources;
mod spans;
pub mod types;

pub use activity::{AddressActivity, AddressActivityFilter};
pub use balance::{compute_deltas, BalanceDeltaSeries};
pub use config::{DualCurrency, LedgerConfig, LedgerConfigBuilder};
pub use errors::{BalanceError, LedgerError, OrderingError, SourceError};
pub use merge::{MergedTransfers, TransferMergeEngine, TransferPage};
pub use sources::{
    BalanceSnapshotSource, InMemoryLedgerStore, InternalCallTransferSource, NativeTransferSource,
    TokenTransferSource, TransactionSource,
};
pub use types::balance::{BalanceDelta, BalanceSnapshot};
pub use types::currency::CurrencySymbol;
pub use types::position::{EventPosition, OrderingKey, TokenLeg};
pub use types::records::{
    CallType, InternalCallTransfer, NativeTransfer, SourceKind, TokenTransfer, Transaction,
    UnknownCallType,
};
pub use types::transfer::{SecondaryLeg, TransferEvent};
