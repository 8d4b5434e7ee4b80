//! Fuzz target for multi-worker ledger sequences
//!
//! Tests invariants:
//! - Protocol counters equal the sums over workers after every step
//! - Every credited token is either pending or decayed
//! - A rejected submission leaves both accounts untouched
//! - Counters never decrease
//!
//! Run with: cargo test --release -p work-ledger-fuzz ledger_sequence

use crate::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn fuzz_ledger_sequence(input in any::<LedgerSequenceInput>()) {
        let results = simulate_sequence(input.workers, input.start, &input.ops);

        for (i, result) in results.iter().enumerate() {
            prop_assert!(!result.is_invariant_violation(),
                "Step {}: {:?}\nOps: {:?}", i, result, input.ops);
        }
    }

    #[test]
    fn fuzz_single_record(input in any::<RecordWorkInput>()) {
        let mut ledger = SimulatedLedger::new(1, input.registered_at).unwrap();
        ledger.now = input.registered_at.saturating_add(input.elapsed);
        ledger.workers[0].pending_tokens = input.pending_tokens;
        ledger.workers[0].total_tokens_earned = input.pending_tokens;
        ledger.protocol.total_tokens_emitted = input.pending_tokens;

        let result = ledger.apply(&LedgerOp::Record {
            worker: 0,
            work_type: input.work_type,
            effort_weight_bps: input.effort_weight_bps,
            description: input.description.clone(),
        });

        prop_assert!(!result.is_invariant_violation(), "{:?}\nInput: {:?}", result, input);
        if input.work_type > 9 {
            prop_assert!(result.is_error());
        }
        prop_assert_eq!(ledger.check_invariants(), LedgerInvariantResult::Valid);
    }
}
