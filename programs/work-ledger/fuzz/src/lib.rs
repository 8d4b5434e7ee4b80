//! Property-based fuzz testing library for the Work Ledger
//!
//! Drives the real ledger state transitions (`record_work_at`,
//! `decay_worker_at`) with generated inputs and checks the ledger invariants
//! after every step.
//!
//! # Usage
//!
//! ```bash
//! # Run all property-based tests
//! cargo test --release -p work-ledger-fuzz
//!
//! # Run the fuzz test runner
//! cargo run --release -p work-ledger-fuzz
//!
//! # Run with more iterations
//! PROPTEST_CASES=10000 cargo test --release -p work-ledger-fuzz
//! ```

pub mod arbitrary;
pub mod invariants;
pub mod scenarios;

pub use arbitrary::*;
pub use invariants::*;
pub use scenarios::*;

// Include fuzz targets as test modules
#[cfg(test)]
#[path = "../fuzz_targets/emission.rs"]
mod emission_tests;

#[cfg(test)]
#[path = "../fuzz_targets/decay.rs"]
mod decay_tests;

#[cfg(test)]
#[path = "../fuzz_targets/cooldown.rs"]
mod cooldown_tests;

#[cfg(test)]
#[path = "../fuzz_targets/ledger_sequence.rs"]
mod ledger_sequence_tests;
