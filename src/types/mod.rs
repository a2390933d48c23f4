// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across ledgerscan.
//!
//! This module provides the domain types shared by the adapters, the merge
//! engine and the balance pipeline:
//! - Adapter rows (native, internal-call and token transfers, transactions)
//! - Source-tagged ordering keys
//! - Merged transfer events and their optional secondary-currency leg
//! - Balance snapshots and deltas
//! - Currency symbols

pub mod balance;
pub mod currency;
pub mod position;
pub mod records;
pub mod transfer;

// Note: Public types are re-exported from lib.rs, not here
