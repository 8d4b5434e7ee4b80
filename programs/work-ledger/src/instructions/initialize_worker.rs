//! Register a worker account for the signing owner

use crate::events::WorkerInitialized;
use crate::instructions::ledger_helpers::init_worker_state;
use crate::state::{ProtocolState, Worker};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct InitializeWorker<'info> {
    #[account(
        init_if_needed,
        payer = owner,
        space = Worker::SIZE,
        seeds = [b"worker", owner.key().as_ref()],
        bump
    )]
    pub worker: Account<'info, Worker>,

    #[account(
        mut,
        seeds = [b"protocol"],
        bump = protocol_state.bump
    )]
    pub protocol_state: Account<'info, ProtocolState>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeWorker>) -> Result<()> {
    let clock = Clock::get()?;
    let worker_key = ctx.accounts.worker.key();
    let worker = &mut ctx.accounts.worker;
    let state = &mut ctx.accounts.protocol_state;

    init_worker_state(
        worker,
        state,
        ctx.accounts.owner.key(),
        ctx.bumps.worker,
        clock.unix_timestamp,
    )?;

    emit!(WorkerInitialized {
        owner: worker.owner,
        worker: worker_key,
        total_workers: state.total_workers,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
