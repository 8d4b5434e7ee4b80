//! Time-based depreciation of pending balances.

use crate::errors::LedgerError;
use crate::instructions::constants::BASIS_POINTS_DIVISOR;
use crate::instructions::emission::apply_bps;
use crate::state::Worker;
use anchor_lang::prelude::*;

/// Result of a decay pass over one worker
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecayOutcome {
    /// Tokens removed from `pending_tokens`
    pub decayed: u64,
    /// Whole periods consumed
    pub periods: u64,
    /// `pending_tokens` after the pass
    pub remaining: u64,
}

/// Whole decay periods elapsed since `last_decay_check`.
/// A timestamp earlier than the last check (clock drift) counts as zero.
pub fn elapsed_periods(last_decay_check: i64, period: i64, now: i64) -> Result<u64> {
    require!(period > 0, LedgerError::InvalidDecayPeriod);
    let elapsed = now.saturating_sub(last_decay_check).max(0);
    Ok((elapsed / period) as u64)
}

/// Fraction of the balance removed after `periods` periods at `rate_bps`,
/// in basis points. Linear in the number of periods and capped at 100%.
pub fn decay_fraction_bps(rate_bps: u16, periods: u64) -> u64 {
    (rate_bps as u64)
        .saturating_mul(periods)
        .min(BASIS_POINTS_DIVISOR)
}

/// Bring `worker` up to date with the decay schedule.
///
/// With zero whole periods elapsed this is a no-op. Otherwise a single linear
/// reduction `pending * min(rate * periods, 10000) / 10000` (floored) is
/// removed and `last_decay_check` advances by the consumed periods only, so a
/// partial period keeps accumulating across calls.
///
/// # Errors
/// * `InvalidDecayPeriod` - non-positive period
/// * `ArithmeticOverflow` - counter overflow
pub fn apply_decay(worker: &mut Worker, rate_bps: u16, period: i64, now: i64) -> Result<DecayOutcome> {
    let periods = elapsed_periods(worker.last_decay_check, period, now)?;
    if periods == 0 {
        return Ok(DecayOutcome {
            decayed: 0,
            periods: 0,
            remaining: worker.pending_tokens,
        });
    }

    let fraction = decay_fraction_bps(rate_bps, periods);
    // fraction <= 10000 so decayed <= pending_tokens
    let decayed = apply_bps(worker.pending_tokens, fraction)?;
    worker.pending_tokens = worker.pending_tokens.saturating_sub(decayed);
    worker.total_tokens_decayed = worker
        .total_tokens_decayed
        .checked_add(decayed)
        .ok_or(LedgerError::ArithmeticOverflow)?;

    let consumed = i64::try_from(periods)
        .ok()
        .and_then(|p| p.checked_mul(period))
        .ok_or(LedgerError::ArithmeticOverflow)?;
    worker.last_decay_check = worker
        .last_decay_check
        .checked_add(consumed)
        .ok_or(LedgerError::ArithmeticOverflow)?;

    Ok(DecayOutcome {
        decayed,
        periods,
        remaining: worker.pending_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::is_ledger_error;

    const DAY: i64 = 86_400;
    const START: i64 = 1_700_000_000;

    fn worker_with(pending: u64) -> Worker {
        Worker {
            owner: Pubkey::new_unique(),
            pending_tokens: pending,
            last_decay_check: START,
            registered_at: START,
            ..Worker::default()
        }
    }

    #[test]
    fn test_no_decay_within_first_period() {
        let mut w = worker_with(1_000_000);
        let outcome = apply_decay(&mut w, 100, DAY, START + DAY - 1).unwrap();
        assert_eq!(outcome.decayed, 0);
        assert_eq!(outcome.periods, 0);
        assert_eq!(w.pending_tokens, 1_000_000);
        assert_eq!(w.last_decay_check, START);
    }

    #[test]
    fn test_zero_elapsed_is_idempotent() {
        let mut w = worker_with(1_000_000);
        apply_decay(&mut w, 100, DAY, START).unwrap();
        let first = w.pending_tokens;
        apply_decay(&mut w, 100, DAY, START).unwrap();
        assert_eq!(w.pending_tokens, first);
        assert_eq!(w.last_decay_check, START);
    }

    #[test]
    fn test_one_period_removes_one_percent() {
        let mut w = worker_with(1_000_000);
        let outcome = apply_decay(&mut w, 100, DAY, START + DAY).unwrap();
        assert_eq!(outcome.decayed, 10_000);
        assert_eq!(outcome.remaining, 990_000);
        assert_eq!(w.total_tokens_decayed, 10_000);
        assert_eq!(w.last_decay_check, START + DAY);
    }

    #[test]
    fn test_multiple_periods_are_linear() {
        let mut w = worker_with(1_000_000);
        let outcome = apply_decay(&mut w, 100, DAY, START + 3 * DAY).unwrap();
        assert_eq!(outcome.periods, 3);
        assert_eq!(outcome.decayed, 30_000);
        assert_eq!(w.pending_tokens, 970_000);
    }

    #[test]
    fn test_partial_period_is_carried() {
        let mut w = worker_with(1_000_000);
        apply_decay(&mut w, 100, DAY, START + DAY + DAY / 2).unwrap();
        assert_eq!(w.last_decay_check, START + DAY);
        // Half a period later the carried remainder completes a period
        let outcome = apply_decay(&mut w, 100, DAY, START + 2 * DAY).unwrap();
        assert_eq!(outcome.periods, 1);
        assert_eq!(w.last_decay_check, START + 2 * DAY);
    }

    #[test]
    fn test_repeated_sub_period_calls_still_accumulate() {
        let mut w = worker_with(1_000_000);
        let mut now = START;
        for _ in 0..24 {
            now += DAY / 24;
            apply_decay(&mut w, 100, DAY, now).unwrap();
        }
        assert_eq!(w.pending_tokens, 990_000);
    }

    #[test]
    fn test_decay_clamps_at_zero() {
        let mut w = worker_with(123_456);
        let outcome = apply_decay(&mut w, 100, DAY, START + 500 * DAY).unwrap();
        assert_eq!(outcome.decayed, 123_456);
        assert_eq!(w.pending_tokens, 0);

        let outcome = apply_decay(&mut w, 100, DAY, START + 1000 * DAY).unwrap();
        assert_eq!(outcome.decayed, 0);
        assert_eq!(w.pending_tokens, 0);
    }

    #[test]
    fn test_decay_rounds_down() {
        // 1% of 99 = 0.99
        let mut w = worker_with(99);
        let outcome = apply_decay(&mut w, 100, DAY, START + DAY).unwrap();
        assert_eq!(outcome.decayed, 0);
        assert_eq!(w.pending_tokens, 99);
        assert_eq!(w.last_decay_check, START + DAY);
    }

    #[test]
    fn test_clock_drift_counts_as_zero() {
        let mut w = worker_with(1_000);
        let outcome = apply_decay(&mut w, 100, DAY, START - DAY).unwrap();
        assert_eq!(outcome, DecayOutcome { decayed: 0, periods: 0, remaining: 1_000 });
    }

    #[test]
    fn test_zero_rate_never_decays() {
        let mut w = worker_with(1_000);
        let outcome = apply_decay(&mut w, 0, DAY, START + 10 * DAY).unwrap();
        assert_eq!(outcome.decayed, 0);
        assert_eq!(outcome.periods, 10);
        assert_eq!(w.last_decay_check, START + 10 * DAY);
    }

    #[test]
    fn test_invalid_period_rejected() {
        let mut w = worker_with(1_000);
        let err = apply_decay(&mut w, 100, 0, START + DAY).unwrap_err();
        assert!(is_ledger_error(&err, LedgerError::InvalidDecayPeriod));
    }

    #[test]
    fn test_fraction_is_capped() {
        assert_eq!(decay_fraction_bps(100, 0), 0);
        assert_eq!(decay_fraction_bps(100, 50), 5_000);
        assert_eq!(decay_fraction_bps(100, 1_000), 10_000);
        assert_eq!(decay_fraction_bps(u16::MAX, u64::MAX), 10_000);
    }
}
