//! Fuzz target for the decay engine
//!
//! Tests invariants:
//! - Decay never exceeds the balance and conserves tokens
//! - Zero elapsed time is idempotent
//! - The checkpoint only advances by whole periods
//!
//! Run with: cargo test --release -p work-ledger-fuzz decay

use crate::*;
use proptest::prelude::*;
use work_ledger::instructions::decay_helpers::apply_decay;
use work_ledger::state::Worker;

fn worker_for(input: &DecayInput) -> Worker {
    Worker {
        pending_tokens: input.pending_tokens,
        total_tokens_earned: input.pending_tokens,
        last_decay_check: input.last_decay_check,
        registered_at: input.last_decay_check,
        ..Worker::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn fuzz_decay_conserves_tokens(input in any::<DecayInput>()) {
        let mut worker = worker_for(&input);
        let now = input.last_decay_check.saturating_add(input.elapsed);

        let outcome = apply_decay(&mut worker, input.decay_rate, input.decay_period, now).unwrap();

        prop_assert_eq!(
            check_decay_conservation(input.pending_tokens, outcome.remaining, outcome.decayed),
            DecayInvariantResult::Valid,
            "Input: {:?}", input
        );
        prop_assert_eq!(worker.pending_tokens, outcome.remaining);
        prop_assert_eq!(worker.total_tokens_decayed, outcome.decayed);
        prop_assert_eq!(
            check_decay_checkpoint(input.last_decay_check, worker.last_decay_check, now),
            DecayInvariantResult::Valid
        );

        let consumed = worker.last_decay_check - input.last_decay_check;
        prop_assert_eq!(consumed % input.decay_period, 0);
    }

    #[test]
    fn fuzz_decay_idempotent_at_same_instant(input in any::<DecayInput>()) {
        let mut worker = worker_for(&input);
        let now = input.last_decay_check.saturating_add(input.elapsed);

        apply_decay(&mut worker, input.decay_rate, input.decay_period, now).unwrap();
        let pending = worker.pending_tokens;
        let checkpoint = worker.last_decay_check;

        let again = apply_decay(&mut worker, input.decay_rate, input.decay_period, now).unwrap();
        prop_assert_eq!(again.decayed, 0);
        prop_assert_eq!(worker.pending_tokens, pending);
        prop_assert_eq!(worker.last_decay_check, checkpoint);
    }

    #[test]
    fn fuzz_decay_never_increases_balance(input in any::<DecayInput>(), steps in prop::collection::vec(arb_time_step(), 1..16)) {
        let mut worker = worker_for(&input);
        let mut now = input.last_decay_check;
        let mut previous = worker.pending_tokens;

        for step in steps {
            now = now.saturating_add(step);
            apply_decay(&mut worker, input.decay_rate, input.decay_period, now).unwrap();
            prop_assert!(worker.pending_tokens <= previous);
            previous = worker.pending_tokens;
        }
        prop_assert_eq!(check_worker_balance(&worker), LedgerInvariantResult::Valid);
    }
}
