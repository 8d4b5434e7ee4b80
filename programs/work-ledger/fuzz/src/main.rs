//! Fuzz test runner for the Work Ledger
//!
//! Run with: cargo run --release -p work-ledger-fuzz
//! Or: cargo test -p work-ledger-fuzz (for property-based tests)

use proptest::prelude::*;
use proptest::strategy::ValueTree;
use std::time::Instant;
use work_ledger_fuzz::*;

fn main() {
    println!("=== Work Ledger Fuzz Testing ===\n");

    let start = Instant::now();
    let mut total_tests = 0;
    let mut passed = 0;
    let mut failed = 0;

    println!("Running record_work fuzz tests...");
    let (p, f) = run_record_work_fuzz(200);
    passed += p;
    failed += f;
    total_tests += p + f;

    println!("Running duplicate submission fuzz tests...");
    let (p, f) = run_duplicate_fuzz(200);
    passed += p;
    failed += f;
    total_tests += p + f;

    println!("Running ledger sequence fuzz tests...");
    let (p, f) = run_sequence_fuzz(100);
    passed += p;
    failed += f;
    total_tests += p + f;

    println!("Running edge case tests...");
    let (p, f) = run_edge_case_tests();
    passed += p;
    failed += f;
    total_tests += p + f;

    let duration = start.elapsed();

    println!("\n=== Fuzz Testing Complete ===");
    println!("Total tests: {}", total_tests);
    println!("Passed: {}", passed);
    println!("Failed: {}", failed);
    println!("Duration: {:?}", duration);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn run_record_work_fuzz(iterations: usize) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    let mut runner = proptest::test_runner::TestRunner::default();

    for i in 0..iterations {
        let input = any::<RecordWorkInput>()
            .new_tree(&mut runner)
            .expect("Failed to generate RecordWorkInput")
            .current();

        let mut ledger = match SimulatedLedger::new(1, input.registered_at) {
            Ok(ledger) => ledger,
            Err(e) => {
                println!("  [FAIL] Iteration {}: setup {}", i, e);
                failed += 1;
                continue;
            }
        };
        ledger.now = input.registered_at.saturating_add(input.elapsed);

        let result = ledger.apply(&LedgerOp::Record {
            worker: 0,
            work_type: input.work_type,
            effort_weight_bps: input.effort_weight_bps,
            description: input.description.clone(),
        });

        if result.is_invariant_violation() {
            println!("  [FAIL] Iteration {}: {:?}", i, result);
            failed += 1;
        } else {
            passed += 1;
        }
    }

    println!("  record_work: {} passed, {} failed", passed, failed);
    (passed, failed)
}

fn run_duplicate_fuzz(iterations: usize) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    let mut runner = proptest::test_runner::TestRunner::default();
    let strategy = (
        arb_valid_work_type_tag(),
        arb_valid_effort_bps(),
        arb_description(),
        arb_timestamp(),
    );

    for i in 0..iterations {
        let (tag, effort, description, start) = strategy
            .new_tree(&mut runner)
            .expect("Failed to generate duplicate submission input")
            .current();

        let result = simulate_duplicate_submission(tag, effort, &description, start);

        if result.is_invariant_violation() {
            println!("  [FAIL] Iteration {}: {:?}", i, result);
            failed += 1;
        } else {
            passed += 1;
        }
    }

    println!("  duplicate_submission: {} passed, {} failed", passed, failed);
    (passed, failed)
}

fn run_sequence_fuzz(iterations: usize) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    let mut runner = proptest::test_runner::TestRunner::default();

    for i in 0..iterations {
        let input = any::<LedgerSequenceInput>()
            .new_tree(&mut runner)
            .expect("Failed to generate LedgerSequenceInput")
            .current();

        let results = simulate_sequence(input.workers, input.start, &input.ops);

        if let Some(violation) = results.iter().find(|r| r.is_invariant_violation()) {
            println!("  [FAIL] Iteration {}: {:?}", i, violation);
            failed += 1;
        } else {
            passed += 1;
        }
    }

    println!("  ledger_sequence: {} passed, {} failed", passed, failed);
    (passed, failed)
}

fn run_edge_case_tests() -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    // Balance at u64::MAX cannot absorb another emission
    {
        let mut ledger = match SimulatedLedger::new(1, 1_700_000_000) {
            Ok(ledger) => ledger,
            Err(_) => return (passed, failed + 1),
        };
        ledger.workers[0].pending_tokens = u64::MAX;
        ledger.workers[0].total_tokens_earned = u64::MAX;
        ledger.protocol.total_tokens_emitted = u64::MAX;

        let result = ledger.apply(&LedgerOp::Record {
            worker: 0,
            work_type: 0,
            effort_weight_bps: 10000,
            description: "overflow".to_string(),
        });

        match result {
            SimulationResult::Error(ref name) if name == "ArithmeticOverflow" => passed += 1,
            other => {
                println!("  [FAIL] u64::MAX balance: {:?}", other);
                failed += 1;
            }
        }
    }

    // Decay after a year of inactivity empties the balance
    {
        let ops = [
            LedgerOp::Record {
                worker: 0,
                work_type: 4,
                effort_weight_bps: 20000,
                description: "Closed enterprise deal".to_string(),
            },
            LedgerOp::Advance { seconds: 365 * 86_400 },
            LedgerOp::Decay { worker: 0 },
        ];
        let results = simulate_sequence(1, 1_700_000_000, &ops);

        if results.iter().any(|r| !r.is_success()) {
            println!("  [FAIL] full decay: {:?}", results);
            failed += 1;
        } else {
            passed += 1;
        }
    }

    // Work type tag just past the catalog
    {
        let results = simulate_sequence(
            1,
            1_700_000_000,
            &[LedgerOp::Record {
                worker: 0,
                work_type: 10,
                effort_weight_bps: 10000,
                description: "unknown".to_string(),
            }],
        );

        match results.first() {
            Some(SimulationResult::Error(name)) if name == "InvalidWorkType" => passed += 1,
            other => {
                println!("  [FAIL] unknown work type: {:?}", other);
                failed += 1;
            }
        }
    }

    println!("  edge_cases: {} passed, {} failed", passed, failed);
    (passed, failed)
}
