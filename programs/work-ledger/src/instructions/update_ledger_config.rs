//! Update ledger configuration (authority gated)

use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::events::LedgerConfigUpdated;
use crate::instructions::constants::{
    BASIS_POINTS_DIVISOR, MAX_COOLDOWN_SECONDS, MAX_DECAY_PERIOD,
};
use crate::state::ProtocolState;

/// Tunable ledger parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerConfigParams {
    /// Decay per period in basis points (0-10000)
    pub decay_rate: u16,
    /// Seconds per decay period (1 second - 365 days)
    pub decay_period: i64,
    /// Witness consensus in basis points (1-10000)
    pub witness_threshold: u16,
    /// Lowest accepted effort weight in basis points (> 0)
    pub min_effort_bps: u16,
    /// Highest accepted effort weight in basis points (>= min)
    pub max_effort_bps: u16,
    /// Cooldown for every work type in seconds (0 = catalog defaults, max 7 days)
    pub cooldown_override: i64,
    /// Emissions above this are flagged for witness review
    pub witness_review_threshold: u64,
}

#[derive(Accounts)]
pub struct UpdateLedgerConfig<'info> {
    #[account(
        mut,
        seeds = [b"protocol"],
        bump = protocol_state.bump,
        has_one = authority @ LedgerError::UnauthorizedAuthority
    )]
    pub protocol_state: Account<'info, ProtocolState>,

    pub authority: Signer<'info>,
}

/// Check every parameter against its allowed range.
pub fn validate_config_params(params: &LedgerConfigParams) -> Result<()> {
    require!(
        (params.decay_rate as u64) <= BASIS_POINTS_DIVISOR,
        LedgerError::InvalidDecayRate
    );
    require!(
        params.decay_period > 0 && params.decay_period <= MAX_DECAY_PERIOD,
        LedgerError::InvalidDecayPeriod
    );
    require!(
        params.witness_threshold > 0 && (params.witness_threshold as u64) <= BASIS_POINTS_DIVISOR,
        LedgerError::InvalidWitnessThreshold
    );
    require!(
        params.min_effort_bps > 0 && params.min_effort_bps <= params.max_effort_bps,
        LedgerError::InvalidEffortRange
    );
    require!(
        params.cooldown_override >= 0 && params.cooldown_override <= MAX_COOLDOWN_SECONDS,
        LedgerError::InvalidCooldown
    );
    Ok(())
}

/// Overwrite the tunable fields. Counters are never touched.
pub fn apply_config_params(state: &mut ProtocolState, params: &LedgerConfigParams) {
    state.decay_rate = params.decay_rate;
    state.decay_period = params.decay_period;
    state.witness_threshold = params.witness_threshold;
    state.min_effort_bps = params.min_effort_bps;
    state.max_effort_bps = params.max_effort_bps;
    state.cooldown_override = params.cooldown_override;
    state.witness_review_threshold = params.witness_review_threshold;
}

#[allow(clippy::too_many_arguments)]
pub fn handler(
    ctx: Context<UpdateLedgerConfig>,
    decay_rate: u16,
    decay_period: i64,
    witness_threshold: u16,
    min_effort_bps: u16,
    max_effort_bps: u16,
    cooldown_override: i64,
    witness_review_threshold: u64,
) -> Result<()> {
    let params = LedgerConfigParams {
        decay_rate,
        decay_period,
        witness_threshold,
        min_effort_bps,
        max_effort_bps,
        cooldown_override,
        witness_review_threshold,
    };
    validate_config_params(&params)?;

    let state = &mut ctx.accounts.protocol_state;
    apply_config_params(state, &params);

    let clock = Clock::get()?;
    msg!(
        "Ledger config updated: decay {} bps / {}s, effort {}-{} bps",
        params.decay_rate,
        params.decay_period,
        params.min_effort_bps,
        params.max_effort_bps
    );

    emit!(LedgerConfigUpdated {
        decay_rate: params.decay_rate,
        decay_period: params.decay_period,
        witness_threshold: params.witness_threshold,
        min_effort_bps: params.min_effort_bps,
        max_effort_bps: params.max_effort_bps,
        cooldown_override: params.cooldown_override,
        witness_review_threshold: params.witness_review_threshold,
        updated_by: ctx.accounts.authority.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::is_ledger_error;

    fn defaults() -> LedgerConfigParams {
        let state = ProtocolState::default();
        LedgerConfigParams {
            decay_rate: state.decay_rate,
            decay_period: state.decay_period,
            witness_threshold: state.witness_threshold,
            min_effort_bps: state.min_effort_bps,
            max_effort_bps: state.max_effort_bps,
            cooldown_override: state.cooldown_override,
            witness_review_threshold: state.witness_review_threshold,
        }
    }

    fn rejected_with(params: LedgerConfigParams, expected: LedgerError) -> bool {
        match validate_config_params(&params) {
            Ok(()) => false,
            Err(err) => is_ledger_error(&err, expected),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config_params(&defaults()).is_ok());
    }

    #[test]
    fn test_decay_rate_bounds() {
        assert!(validate_config_params(&LedgerConfigParams { decay_rate: 0, ..defaults() }).is_ok());
        assert!(validate_config_params(&LedgerConfigParams { decay_rate: 10000, ..defaults() }).is_ok());
        assert!(rejected_with(
            LedgerConfigParams { decay_rate: 10001, ..defaults() },
            LedgerError::InvalidDecayRate
        ));
    }

    #[test]
    fn test_decay_period_bounds() {
        assert!(rejected_with(
            LedgerConfigParams { decay_period: 0, ..defaults() },
            LedgerError::InvalidDecayPeriod
        ));
        assert!(rejected_with(
            LedgerConfigParams { decay_period: -1, ..defaults() },
            LedgerError::InvalidDecayPeriod
        ));
        assert!(rejected_with(
            LedgerConfigParams { decay_period: MAX_DECAY_PERIOD + 1, ..defaults() },
            LedgerError::InvalidDecayPeriod
        ));
    }

    #[test]
    fn test_witness_threshold_bounds() {
        assert!(rejected_with(
            LedgerConfigParams { witness_threshold: 0, ..defaults() },
            LedgerError::InvalidWitnessThreshold
        ));
        assert!(rejected_with(
            LedgerConfigParams { witness_threshold: 10001, ..defaults() },
            LedgerError::InvalidWitnessThreshold
        ));
    }

    #[test]
    fn test_effort_range() {
        assert!(rejected_with(
            LedgerConfigParams { min_effort_bps: 0, ..defaults() },
            LedgerError::InvalidEffortRange
        ));
        assert!(rejected_with(
            LedgerConfigParams { min_effort_bps: 15000, max_effort_bps: 12000, ..defaults() },
            LedgerError::InvalidEffortRange
        ));
        assert!(validate_config_params(&LedgerConfigParams {
            min_effort_bps: 10000,
            max_effort_bps: 10000,
            ..defaults()
        })
        .is_ok());
    }

    #[test]
    fn test_cooldown_override_bounds() {
        assert!(rejected_with(
            LedgerConfigParams { cooldown_override: -5, ..defaults() },
            LedgerError::InvalidCooldown
        ));
        assert!(rejected_with(
            LedgerConfigParams { cooldown_override: MAX_COOLDOWN_SECONDS + 1, ..defaults() },
            LedgerError::InvalidCooldown
        ));
    }

    #[test]
    fn test_apply_preserves_counters() {
        let mut state = ProtocolState {
            total_work_recorded: 7,
            total_tokens_emitted: 700,
            ..ProtocolState::default()
        };
        let params = LedgerConfigParams { decay_rate: 250, cooldown_override: 60, ..defaults() };
        apply_config_params(&mut state, &params);
        assert_eq!(state.decay_rate, 250);
        assert_eq!(state.cooldown_override, 60);
        assert_eq!(state.total_work_recorded, 7);
        assert_eq!(state.total_tokens_emitted, 700);
    }
}
