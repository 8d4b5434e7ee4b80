//! Apply the decay schedule to a worker's pending balance.
//!
//! Permissionless: decay only ever reduces a balance.

use crate::events::TokensDecayed;
use crate::instructions::ledger_helpers::decay_worker_at;
use crate::state::{ProtocolState, Worker};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct ApplyDecay<'info> {
    #[account(
        mut,
        seeds = [b"worker", worker.owner.as_ref()],
        bump = worker.bump
    )]
    pub worker: Account<'info, Worker>,

    #[account(
        seeds = [b"protocol"],
        bump = protocol_state.bump
    )]
    pub protocol_state: Account<'info, ProtocolState>,
}

/// Returns the amount removed.
pub fn handler(ctx: Context<ApplyDecay>) -> Result<u64> {
    let clock = Clock::get()?;
    let worker = &mut ctx.accounts.worker;
    let state = &ctx.accounts.protocol_state;

    let outcome = decay_worker_at(state, worker, clock.unix_timestamp)?;

    if outcome.decayed > 0 {
        emit!(TokensDecayed {
            owner: worker.owner,
            decay_amount: outcome.decayed,
            remaining_balance: outcome.remaining,
            periods_elapsed: outcome.periods,
            timestamp: clock.unix_timestamp,
        });
    }

    Ok(outcome.decayed)
}
