//! Token emission for a unit of work.

use crate::errors::LedgerError;
use crate::instructions::catalog::base_emission;
use crate::instructions::constants::BASIS_POINTS_DIVISOR;
use crate::state::WorkType;
use anchor_lang::prelude::*;

/// Compute the emission for `work_type` scaled by `effort_weight_bps`.
///
/// `emission = base * effort / 10000`, floored. The effort weight must lie in
/// `[min_effort_bps, max_effort_bps]`.
///
/// # Errors
/// * `InvalidEffortWeight` - effort weight outside the configured range
/// * `ArithmeticOverflow` - result does not fit in u64
pub fn compute_emission(
    work_type: WorkType,
    effort_weight_bps: u16,
    min_effort_bps: u16,
    max_effort_bps: u16,
) -> Result<u64> {
    require!(
        effort_weight_bps >= min_effort_bps && effort_weight_bps <= max_effort_bps,
        LedgerError::InvalidEffortWeight
    );

    apply_bps(base_emission(work_type), effort_weight_bps as u64)
}

/// `amount * bps / 10000`, floored. Widened to u128 so the product cannot
/// overflow; `bps` above 10000 scales up.
pub fn apply_bps(amount: u64, bps: u64) -> Result<u64> {
    let scaled = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(LedgerError::ArithmeticOverflow)?
        / (BASIS_POINTS_DIVISOR as u128);

    u64::try_from(scaled).map_err(|_| LedgerError::ArithmeticOverflow.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::constants::BASELINE_EFFORT_BPS;
    use crate::state::ProtocolState;

    const MIN: u16 = ProtocolState::DEFAULT_MIN_EFFORT_BPS;
    const MAX: u16 = ProtocolState::DEFAULT_MAX_EFFORT_BPS;

    fn emit(work_type: WorkType, effort: u16) -> Result<u64> {
        compute_emission(work_type, effort, MIN, MAX)
    }

    #[test]
    fn test_baseline_effort_yields_base() {
        for work_type in WorkType::ALL {
            assert_eq!(
                emit(work_type, BASELINE_EFFORT_BPS).unwrap(),
                base_emission(work_type)
            );
        }
    }

    #[test]
    fn test_double_effort_doubles_emission() {
        for work_type in WorkType::ALL {
            assert_eq!(
                emit(work_type, 20000).unwrap(),
                2 * emit(work_type, 10000).unwrap()
            );
        }
    }

    #[test]
    fn test_write_code_at_150_percent() {
        assert_eq!(emit(WorkType::WriteCode, 15000).unwrap(), 3_000_000);
    }

    #[test]
    fn test_close_deal_to_onboard_ratio() {
        let low = emit(WorkType::OnboardUser, 10000).unwrap();
        let high = emit(WorkType::CloseDeal, 10000).unwrap();
        assert!(high > low);
        assert_eq!(high / low, 20);
    }

    #[test]
    fn test_apply_bps_rounds_down() {
        // 1% of 99 = 0.99
        assert_eq!(apply_bps(99, 100).unwrap(), 0);
        // 150% of 3 = 4.5
        assert_eq!(apply_bps(3, 15000).unwrap(), 4);
        assert_eq!(apply_bps(1, 9999).unwrap(), 0);
    }

    #[test]
    fn test_apply_bps_overflow() {
        assert_eq!(apply_bps(u64::MAX, 10000).unwrap(), u64::MAX);
        assert!(apply_bps(u64::MAX, 20000).is_err());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(emit(WorkType::Marketing, MIN).is_ok());
        assert!(emit(WorkType::Marketing, MAX).is_ok());
    }

    #[test]
    fn test_effort_out_of_range_rejected() {
        assert!(emit(WorkType::Marketing, MIN - 1).is_err());
        assert!(emit(WorkType::Marketing, MAX + 1).is_err());
        assert!(emit(WorkType::Marketing, 0).is_err());
        // The raw percentage form is not accepted
        assert!(emit(WorkType::WriteCode, 150).is_err());
    }

    #[test]
    fn test_emission_monotonic_in_effort() {
        let mut previous = 0;
        for effort in (MIN..=MAX).step_by(250) {
            let amount = emit(WorkType::BugReport, effort).unwrap();
            assert!(amount >= previous);
            previous = amount;
        }
    }
}
