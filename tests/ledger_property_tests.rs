// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for merge ordering and balance deltas
//!
//! These tests use proptest to generate stores with arbitrary, collision-free
//! positions and check the ordering and exclusion guarantees of the merge.

mod helpers;

use std::collections::BTreeMap;
use std::sync::Arc;

use alloy_primitives::{Address, I256, U256};
use helpers::*;
use ledgerscan::{
    compute_deltas, CallType, CurrencySymbol, EventPosition, InMemoryLedgerStore, LedgerConfig,
    LedgerConfigBuilder, MergedTransfers, TokenLeg, TransferMergeEngine,
};
use proptest::prelude::*;

type TxRows = BTreeMap<(u64, u64), u64>;
type CallRows = BTreeMap<(u64, u64, u64), (u64, CallType)>;
type TokenRows = BTreeMap<(u64, u64), (u64, bool)>;

fn arb_call_type() -> impl Strategy<Value = CallType> {
    prop_oneof![
        Just(CallType::Call),
        Just(CallType::DelegateCall),
        Just(CallType::StaticCall),
        Just(CallType::Create),
    ]
}

fn arb_party() -> impl Strategy<Value = Address> {
    prop_oneof![Just(ALICE), Just(BOB), Just(CAROL)]
}

fn arb_transactions() -> impl Strategy<Value = TxRows> {
    prop::collection::btree_map((0u64..6, 0u64..5), 0u64..50, 0..12)
}

fn arb_calls() -> impl Strategy<Value = CallRows> {
    prop::collection::btree_map(
        (0u64..6, 0u64..5, 0u64..4),
        (0u64..50, arb_call_type()),
        0..16,
    )
}

/// `true` in the value marks a cUSD transfer, `false` a CELO one
fn arb_tokens() -> impl Strategy<Value = TokenRows> {
    prop::collection::btree_map((0u64..6, 0u64..8), (0u64..50, any::<bool>()), 0..12)
}

fn position_hash(block: u64, index: u64) -> alloy_primitives::TxHash {
    tx_hash((block * 8 + index) as u8)
}

fn build_store(
    txs: &TxRows,
    calls: &CallRows,
    tokens: &TokenRows,
    from: Address,
    to: Address,
) -> InMemoryLedgerStore {
    let mut store = InMemoryLedgerStore::new();
    for (&(block, index), &value) in txs {
        let hash = position_hash(block, index);
        store = store.with_transaction(transaction(hash, block, index, from, to, value));
    }
    for (&(block, tx_index, call_index), &(value, call_type)) in calls {
        store = store.with_internal_call(internal_call(
            position_hash(block, tx_index),
            block,
            tx_index,
            call_index,
            call_type,
            to,
            from,
            value,
        ));
    }
    for (&(block, log_index), &(amount, is_cusd)) in tokens {
        let symbol = if is_cusd { "cUSD" } else { "CELO" };
        store = store.with_token_transfer(token_transfer(
            position_hash(block, 0),
            block,
            log_index,
            symbol,
            from,
            to,
            amount,
        ));
    }
    store
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn merge(store: InMemoryLedgerStore, config: LedgerConfig) -> MergedTransfers {
    let engine = TransferMergeEngine::from_store(Arc::new(store), config);
    run(engine.merge_single_currency_transfers(&CurrencySymbol::new("cUSD"))).unwrap()
}

proptest! {
    /// Property: merged keys are strictly descending, so unique
    #[test]
    fn prop_merge_is_strictly_descending(
        txs in arb_transactions(),
        calls in arb_calls(),
        tokens in arb_tokens(),
    ) {
        let ledger = merge(build_store(&txs, &calls, &tokens, ALICE, BOB), LedgerConfig::default());

        for pair in ledger.as_slice().windows(2) {
            prop_assert!(pair[0].key > pair[1].key, "{} must precede {}", pair[0].key, pair[1].key);
        }
    }

    /// Property: exactly the qualifying rows survive the merge
    #[test]
    fn prop_merge_keeps_only_qualifying_rows(
        txs in arb_transactions(),
        calls in arb_calls(),
        tokens in arb_tokens(),
    ) {
        let ledger = merge(build_store(&txs, &calls, &tokens, ALICE, BOB), LedgerConfig::default());

        let natives = txs.values().filter(|&&v| v > 0).count();
        let internals = calls
            .iter()
            .filter(|&(&(_, _, idx), &(v, ct))| v > 0 && idx != 0 && ct != CallType::DelegateCall)
            .count();
        let cusd = tokens.values().filter(|&&(_, is_cusd)| is_cusd).count();
        prop_assert_eq!(ledger.len(), natives + internals + cusd);

        for event in &ledger {
            if let EventPosition::Internal { call_index, .. } = event.key.position {
                prop_assert_ne!(call_index, 0);
                prop_assert!(event.value > U256::ZERO);
            }
            if let EventPosition::Native { .. } = event.key.position {
                prop_assert!(event.value > U256::ZERO);
            }
        }
    }

    /// Property: address scoping after the merge is an order-preserving subsequence
    #[test]
    fn prop_involving_is_a_subsequence(
        txs in arb_transactions(),
        calls in arb_calls(),
        tokens in arb_tokens(),
        from in arb_party(),
        to in arb_party(),
        scope in arb_party(),
    ) {
        let full = merge(build_store(&txs, &calls, &tokens, from, to), LedgerConfig::default());
        let scoped = full.clone().involving(scope);

        let expected: Vec<_> = full.iter().filter(|e| e.involves(scope)).cloned().collect();
        prop_assert_eq!(scoped.into_vec(), expected);
    }

    /// Property: in dual mode only secondary legs carry a secondary value
    #[test]
    fn prop_dual_secondary_values(
        txs in arb_transactions(),
        calls in arb_calls(),
        tokens in arb_tokens(),
    ) {
        let store = build_store(&txs, &calls, &tokens, ALICE, BOB);
        let config = LedgerConfigBuilder::with_defaults()
            .dual_currency("CELO", "cUSD")
            .build();
        let engine = TransferMergeEngine::from_store(Arc::new(store), config);
        let ledger = run(engine.merge_dual_currency_transfers()).unwrap();

        for event in &ledger {
            match event.key.position {
                EventPosition::Token { leg: TokenLeg::Secondary, .. } => {
                    prop_assert_eq!(event.value, U256::ZERO);
                }
                _ => prop_assert_eq!(event.secondary_value(), U256::ZERO),
            }
        }
    }

    /// Property: deltas telescope to the latest present value
    #[test]
    fn prop_deltas_telescope(
        values in prop::collection::btree_map(0u64..100, prop::option::of(0u64..1_000_000), 0..20),
    ) {
        let snapshots = values
            .iter()
            .map(|(&block, &value)| snapshot(ALICE, block, value))
            .collect();
        let deltas = compute_deltas(snapshots).unwrap();

        let present: Vec<_> = values.iter().filter_map(|(b, v)| v.map(|v| (*b, v))).collect();
        prop_assert_eq!(deltas.len(), present.len());

        let total = deltas.iter().fold(I256::ZERO, |acc, d| acc + d.delta);
        let latest = present.last().map(|&(_, v)| v).unwrap_or(0);
        prop_assert_eq!(total, I256::try_from(latest).unwrap());

        for pair in deltas.windows(2) {
            prop_assert!(pair[0].block_number > pair[1].block_number);
        }
    }
}
