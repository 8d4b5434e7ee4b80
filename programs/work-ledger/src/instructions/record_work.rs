//! Record a unit of work and credit its emission

use crate::errors::LedgerError;
use crate::events::WorkRecorded;
use crate::instructions::ledger_helpers::record_work_at;
use crate::state::{ProtocolState, Worker};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct RecordWork<'info> {
    #[account(
        mut,
        seeds = [b"worker", owner.key().as_ref()],
        bump = worker.bump,
        has_one = owner @ LedgerError::UnauthorizedWorker
    )]
    pub worker: Account<'info, Worker>,

    #[account(
        mut,
        seeds = [b"protocol"],
        bump = protocol_state.bump
    )]
    pub protocol_state: Account<'info, ProtocolState>,

    pub owner: Signer<'info>,
}

/// Returns the emitted token amount.
pub fn handler(
    ctx: Context<RecordWork>,
    work_type: u8,
    effort_weight_bps: u16,
    description: String,
) -> Result<u64> {
    let clock = Clock::get()?;
    let worker = &mut ctx.accounts.worker;
    let state = &mut ctx.accounts.protocol_state;

    let receipt = record_work_at(
        state,
        worker,
        work_type,
        effort_weight_bps,
        &description,
        clock.unix_timestamp,
    )?;

    if receipt.decay.decayed > 0 {
        msg!(
            "Decayed {} tokens over {} periods before crediting",
            receipt.decay.decayed,
            receipt.decay.periods
        );
    }

    emit!(WorkRecorded {
        owner: worker.owner,
        work_type: receipt.work_type,
        effort_weight_bps,
        emission_amount: receipt.emission,
        pending_tokens: worker.pending_tokens,
        total_work_completed: worker.total_work_completed,
        diversity_score: worker.diversity_score(),
        requires_witness: receipt.requires_witness,
        timestamp: clock.unix_timestamp,
    });

    Ok(receipt.emission)
}
