//! Events emitted by the Work Ledger program
//!
//! Indexers and clients subscribe to these through program logs.

use anchor_lang::prelude::*;

use crate::state::WorkType;

/// Emitted once when the protocol state is created
#[event]
pub struct ProtocolInitialized {
    pub authority: Pubkey,
    pub decay_rate: u16,
    pub decay_period: i64,
    pub witness_threshold: u16,
    pub timestamp: i64,
}

/// Emitted when a worker account is registered
#[event]
pub struct WorkerInitialized {
    pub owner: Pubkey,
    pub worker: Pubkey,
    pub total_workers: u64,
    pub timestamp: i64,
}

/// Emitted for every accepted work submission
#[event]
pub struct WorkRecorded {
    pub owner: Pubkey,
    pub work_type: WorkType,
    pub effort_weight_bps: u16,
    pub emission_amount: u64,
    pub pending_tokens: u64,
    pub total_work_completed: u64,
    pub diversity_score: u64,
    /// High-value emission that the witness layer should review
    pub requires_witness: bool,
    pub timestamp: i64,
}

/// Emitted when decay removes tokens from a pending balance
#[event]
pub struct TokensDecayed {
    pub owner: Pubkey,
    pub decay_amount: u64,
    pub remaining_balance: u64,
    pub periods_elapsed: u64,
    pub timestamp: i64,
}

/// Emitted when the cooldown guard refuses a submission
#[event]
pub struct CooldownRejected {
    pub worker: Pubkey,
    pub fingerprint: [u8; 32],
    /// Seconds since the conflicting submission was accepted
    pub fingerprint_age: i64,
    /// Seconds until the same submission is accepted again
    pub cooldown_remaining: i64,
    pub timestamp: i64,
}

/// Emitted when the authority tunes the ledger configuration
#[event]
pub struct LedgerConfigUpdated {
    pub decay_rate: u16,
    pub decay_period: i64,
    pub witness_threshold: u16,
    pub min_effort_bps: u16,
    pub max_effort_bps: u16,
    pub cooldown_override: i64,
    pub witness_review_threshold: u64,
    pub updated_by: Pubkey,
    pub timestamp: i64,
}
