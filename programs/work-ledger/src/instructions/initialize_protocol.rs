//! Initialize the protocol-wide ledger state

use crate::events::ProtocolInitialized;
use crate::instructions::ledger_helpers::init_protocol_state;
use crate::state::ProtocolState;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct InitializeProtocol<'info> {
    /// Created on first call; a second call sees the populated account and
    /// is refused with `AlreadyInitialized`.
    #[account(
        init_if_needed,
        payer = authority,
        space = ProtocolState::SIZE,
        seeds = [b"protocol"],
        bump
    )]
    pub protocol_state: Account<'info, ProtocolState>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeProtocol>) -> Result<()> {
    let clock = Clock::get()?;
    let state = &mut ctx.accounts.protocol_state;

    init_protocol_state(
        state,
        ctx.accounts.authority.key(),
        ctx.bumps.protocol_state,
        clock.unix_timestamp,
    )?;

    emit!(ProtocolInitialized {
        authority: state.authority,
        decay_rate: state.decay_rate,
        decay_period: state.decay_period,
        witness_threshold: state.witness_threshold,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
