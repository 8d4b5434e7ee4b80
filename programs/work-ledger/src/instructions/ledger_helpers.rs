//! Ledger state transitions shared by the instruction handlers.
//!
//! Every transition stages its changes and commits them only after all
//! checks and arithmetic succeeded, so a failed call leaves both accounts
//! untouched.

use crate::errors::LedgerError;
use crate::instructions::cooldown_helpers::{
    admit_submission, description_hash, submission_fingerprint,
};
use crate::instructions::decay_helpers::{apply_decay, DecayOutcome};
use crate::instructions::emission::compute_emission;
use crate::state::{ProtocolState, WorkRecord, WorkType, Worker};
use crate::utils::validation::validate_description;
use anchor_lang::prelude::*;

/// Outcome of an accepted work submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkReceipt {
    pub work_type: WorkType,
    pub emission: u64,
    /// Decay applied to the worker before crediting
    pub decay: DecayOutcome,
    pub requires_witness: bool,
}

/// Populate a fresh protocol state with default parameters.
///
/// # Errors
/// * `AlreadyInitialized` - state already has an authority
pub fn init_protocol_state(
    state: &mut ProtocolState,
    authority: Pubkey,
    bump: u8,
    now: i64,
) -> Result<()> {
    require!(!state.is_initialized(), LedgerError::AlreadyInitialized);

    *state = ProtocolState {
        authority,
        initialized_at: now,
        bump,
        ..ProtocolState::default()
    };
    Ok(())
}

/// Populate a fresh worker and count it in the protocol totals.
///
/// # Errors
/// * `ProtocolNotInitialized` - protocol state not yet created
/// * `AlreadyInitialized` - worker already has an owner
/// * `ArithmeticOverflow` - worker counter overflow
pub fn init_worker_state(
    worker: &mut Worker,
    protocol: &mut ProtocolState,
    owner: Pubkey,
    bump: u8,
    now: i64,
) -> Result<()> {
    require!(protocol.is_initialized(), LedgerError::ProtocolNotInitialized);
    require!(!worker.is_initialized(), LedgerError::AlreadyInitialized);

    let total_workers = protocol
        .total_workers
        .checked_add(1)
        .ok_or(LedgerError::ArithmeticOverflow)?;

    *worker = Worker {
        owner,
        registered_at: now,
        last_decay_check: now,
        bump,
        ..Worker::default()
    };
    protocol.total_workers = total_workers;
    Ok(())
}

/// Record one unit of work for `worker`.
///
/// Order of operations:
/// 1. Validate work type, description and effort weight.
/// 2. Apply pending decay to bring the balance current.
/// 3. Admit through the cooldown guard.
/// 4. Credit the emission and bump worker and protocol counters.
///
/// # Errors
/// * `InvalidWorkType` - unknown work type tag
/// * `InvalidDescription` / `DescriptionTooLong` - malformed description
/// * `InvalidEffortWeight` - effort outside the configured range
/// * `TaskCooldownActive` - identical submission still cooling down
/// * `ArithmeticOverflow` - counter overflow
pub fn record_work_at(
    protocol: &mut ProtocolState,
    worker: &mut Worker,
    work_type: u8,
    effort_weight_bps: u16,
    description: &str,
    now: i64,
) -> Result<WorkReceipt> {
    let work_type = WorkType::try_from(work_type)?;
    validate_description(description)?;
    let emission = compute_emission(
        work_type,
        effort_weight_bps,
        protocol.min_effort_bps,
        protocol.max_effort_bps,
    )?;

    let mut staged = worker.clone();
    let decay = apply_decay(&mut staged, protocol.decay_rate, protocol.decay_period, now)?;

    let fingerprint = submission_fingerprint(work_type, description);
    admit_submission(&mut staged, work_type, fingerprint, protocol, now)?;

    staged.pending_tokens = staged
        .pending_tokens
        .checked_add(emission)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    staged.total_tokens_earned = staged
        .total_tokens_earned
        .checked_add(emission)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    staged.total_work_completed = staged
        .total_work_completed
        .checked_add(1)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    staged.last_work_at = now;
    staged.work_types_mask |= work_type.bit();
    staged.push_history(WorkRecord {
        work_type,
        effort_weight_bps,
        timestamp: now,
        emission_amount: emission,
        description_hash: description_hash(description),
    });

    let total_work_recorded = protocol
        .total_work_recorded
        .checked_add(1)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    let total_tokens_emitted = protocol
        .total_tokens_emitted
        .checked_add(emission)
        .ok_or(LedgerError::ArithmeticOverflow)?;

    *worker = staged;
    protocol.total_work_recorded = total_work_recorded;
    protocol.total_tokens_emitted = total_tokens_emitted;

    Ok(WorkReceipt {
        work_type,
        emission,
        decay,
        requires_witness: emission > protocol.witness_review_threshold,
    })
}

/// Apply decay to `worker` under the protocol's decay parameters.
///
/// Decay is tracked on the worker only; the protocol state is read, never
/// written.
///
/// # Errors
/// * `InvalidDecayPeriod` - misconfigured period
/// * `ArithmeticOverflow` - counter overflow
pub fn decay_worker_at(
    protocol: &ProtocolState,
    worker: &mut Worker,
    now: i64,
) -> Result<DecayOutcome> {
    let mut staged = worker.clone();
    let outcome = apply_decay(&mut staged, protocol.decay_rate, protocol.decay_period, now)?;
    *worker = staged;
    Ok(outcome)
}
