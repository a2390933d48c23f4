// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transfer merging across native, internal-call and token sources.
//!
//! This module handles:
//! - Key normalization of each source's native positions
//! - Single- and dual-currency merges into one ordered ledger
//! - Post-merge address and transaction filters
//! - Keyset pagination over merge results

pub mod engine;
pub(crate) mod normalize;
pub mod result;

pub use engine::TransferMergeEngine;
pub use result::{MergedTransfers, TransferPage};
