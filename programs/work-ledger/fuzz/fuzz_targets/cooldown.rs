//! Fuzz target for the cooldown guard
//!
//! Tests invariants:
//! - An identical submission inside the horizon is refused with TaskCooldownActive
//! - The same submission is accepted again once the horizon has passed
//! - The submission window never outgrows its allocation
//! - Distinct submissions are never refused, however many are cooling
//!
//! Run with: cargo test --release -p work-ledger-fuzz cooldown

use crate::*;
use proptest::prelude::*;
use work_ledger::instructions::catalog::default_cooldown;
use work_ledger::state::WorkType;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn fuzz_duplicate_rejected(
        tag in arb_valid_work_type_tag(),
        effort in arb_valid_effort_bps(),
        description in arb_description(),
        start in arb_timestamp(),
    ) {
        let result = simulate_duplicate_submission(tag, effort, &description, start);

        prop_assert!(!result.is_invariant_violation(), "{:?}", result);
    }

    #[test]
    fn fuzz_accepted_after_horizon(
        tag in arb_valid_work_type_tag(),
        effort in arb_valid_effort_bps(),
        index in 0usize..DESCRIPTION_POOL.len(),
        start in arb_timestamp(),
        extra in 0i64..86_400i64,
    ) {
        let horizon = default_cooldown(WorkType::try_from(tag).unwrap());
        let record = LedgerOp::Record {
            worker: 0,
            work_type: tag,
            effort_weight_bps: effort,
            description: DESCRIPTION_POOL[index].to_string(),
        };
        let ops = [
            record.clone(),
            LedgerOp::Advance { seconds: horizon - 1 },
            record.clone(),
            LedgerOp::Advance { seconds: 1 + extra },
            record,
        ];

        let results = simulate_sequence(1, start, &ops);

        prop_assert!(results[0].is_success(), "{:?}", results);
        match &results[2] {
            SimulationResult::Error(name) => prop_assert_eq!(name.as_str(), "TaskCooldownActive"),
            other => prop_assert!(false, "expected cooldown rejection, got {:?}", other),
        }
        prop_assert!(results[4].is_success(), "{:?}", results);
    }

    #[test]
    fn fuzz_window_bounded(
        descriptions in prop::collection::vec("[a-z]{4,12}", 1..48),
        start in arb_timestamp(),
    ) {
        let ops: Vec<LedgerOp> = descriptions
            .into_iter()
            .map(|description| LedgerOp::Record {
                worker: 0,
                work_type: 0,
                effort_weight_bps: 10000,
                description,
            })
            .collect();

        let results = simulate_sequence(1, start, &ops);

        for result in &results {
            prop_assert!(!result.is_invariant_violation(), "{:?}", result);
            if let SimulationResult::Error(name) = result {
                prop_assert!(name == "TaskCooldownActive", "unexpected rejection {}", name);
            }
        }
    }

    #[test]
    fn fuzz_distinct_work_always_admitted(
        tag in arb_valid_work_type_tag(),
        gaps in prop::collection::vec(0i64..2_000i64, 1..80),
        start in arb_timestamp(),
    ) {
        let mut ops = Vec::with_capacity(gaps.len() * 2);
        for (i, gap) in gaps.into_iter().enumerate() {
            ops.push(LedgerOp::Record {
                worker: 0,
                work_type: tag,
                effort_weight_bps: 10000,
                description: format!("distinct work item {}", i),
            });
            ops.push(LedgerOp::Advance { seconds: gap });
        }

        let results = simulate_sequence(1, start, &ops);

        for result in &results {
            prop_assert!(result.is_success(), "{:?}", result);
        }
    }
}
