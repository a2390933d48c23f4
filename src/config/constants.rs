// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known constants
//!
//! This module centralizes the magic values the merge engine relies on.

use std::time::Duration;

use crate::types::records::CallType;

/// Call index of the top-level call of a transaction.
///
/// Its value is the transaction's own value, which the native transfer source
/// already reports, so merges skip it.
pub const ROOT_CALL_INDEX: u64 = 0;

/// Call types that never represent independent value movement.
///
/// A delegatecall executes foreign code in the caller's context; any value it
/// carries belongs to the surrounding call.
pub const VALUELESS_CALL_TYPES: [CallType; 1] = [CallType::DelegateCall];

/// Default bound on a single adapter fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
