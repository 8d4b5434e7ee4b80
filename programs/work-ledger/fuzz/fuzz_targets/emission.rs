//! Fuzz target for the emission calculator
//!
//! Tests invariants:
//! - Emission is monotone in effort
//! - Doubling effort doubles emission
//! - Effort outside the configured range is rejected
//!
//! Run with: cargo test --release -p work-ledger-fuzz emission

use crate::*;
use proptest::prelude::*;
use work_ledger::instructions::catalog::base_emission;
use work_ledger::instructions::emission::compute_emission;
use work_ledger::state::{ProtocolState, WorkType};

const MIN: u16 = ProtocolState::DEFAULT_MIN_EFFORT_BPS;
const MAX: u16 = ProtocolState::DEFAULT_MAX_EFFORT_BPS;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn fuzz_emission_monotone(
        tag in arb_valid_work_type_tag(),
        a in arb_valid_effort_bps(),
        b in arb_valid_effort_bps(),
    ) {
        let work_type = WorkType::try_from(tag).unwrap();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let e_low = compute_emission(work_type, low, MIN, MAX).unwrap();
        let e_high = compute_emission(work_type, high, MIN, MAX).unwrap();

        prop_assert_eq!(check_emission_monotonic(e_low, e_high), EmissionInvariantResult::Valid);
    }

    #[test]
    fn fuzz_emission_linear(tag in arb_valid_work_type_tag(), effort in 5000u16..=10000u16) {
        let work_type = WorkType::try_from(tag).unwrap();
        let single = compute_emission(work_type, effort, MIN, MAX).unwrap();
        let double = compute_emission(work_type, effort * 2, MIN, MAX).unwrap();

        prop_assert_eq!(check_emission_linear(single, double), EmissionInvariantResult::Valid);
    }

    #[test]
    fn fuzz_emission_range_enforced(tag in arb_valid_work_type_tag(), effort in arb_effort_bps()) {
        let work_type = WorkType::try_from(tag).unwrap();
        let result = compute_emission(work_type, effort, MIN, MAX);

        if (MIN..=MAX).contains(&effort) {
            let emission = result.unwrap();
            prop_assert!(emission <= base_emission(work_type) * 2);
            prop_assert!(emission >= base_emission(work_type) / 2);
        } else {
            prop_assert_eq!(error_name(&result.unwrap_err()), "InvalidEffortWeight");
        }
    }
}

#[test]
fn test_catalog_ratio() {
    let onboard = compute_emission(WorkType::OnboardUser, 10000, MIN, MAX).unwrap();
    let close = compute_emission(WorkType::CloseDeal, 10000, MIN, MAX).unwrap();
    assert_eq!(onboard * 20, close);
}
