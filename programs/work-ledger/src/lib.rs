#![allow(unexpected_cfgs)]
//! Work Ledger
//!
//! Records units of work performed by workers, credits each with a token
//! emission scaled by effort, refuses duplicate submissions inside a cooldown
//! window and depreciates unclaimed balances over time.

use anchor_lang::prelude::*;

declare_id!("8scMZueMgZtFv4qdJAthn8DPs7y9SKVCDy9YCCynihBQ");

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

#[program]
pub mod work_ledger {
    use super::*;

    /// Create the protocol state with default configuration.
    /// The signer becomes the authority for configuration updates.
    pub fn initialize_protocol(ctx: Context<InitializeProtocol>) -> Result<()> {
        instructions::initialize_protocol::handler(ctx)
    }

    /// Register a worker account for the signer.
    pub fn initialize_worker(ctx: Context<InitializeWorker>) -> Result<()> {
        instructions::initialize_worker::handler(ctx)
    }

    /// Record one unit of work and credit its emission to the worker.
    ///
    /// Outstanding decay is applied first. The submission is then checked
    /// against the cooldown window before anything is credited.
    ///
    /// # Arguments
    /// * `work_type` - Catalog tag (0-9, see `WorkType`)
    /// * `effort_weight_bps` - Effort multiplier in basis points (10000 = 1.0x)
    /// * `description` - Free-text description of the work, fingerprinted for cooldown
    ///
    /// Returns the emitted amount in base units.
    pub fn record_work(
        ctx: Context<RecordWork>,
        work_type: u8,
        effort_weight_bps: u16,
        description: String,
    ) -> Result<u64> {
        instructions::record_work::handler(ctx, work_type, effort_weight_bps, description)
    }

    /// Apply outstanding decay to a worker's pending balance.
    /// Permissionless. Returns the amount removed.
    pub fn apply_decay(ctx: Context<ApplyDecay>) -> Result<u64> {
        instructions::apply_decay::handler(ctx)
    }

    /// Update ledger configuration (authority gated).
    ///
    /// # Arguments
    /// * `decay_rate` - Decay per period in basis points
    /// * `decay_period` - Seconds per decay period
    /// * `witness_threshold` - Witness consensus in basis points
    /// * `min_effort_bps` / `max_effort_bps` - Accepted effort weight range
    /// * `cooldown_override` - Cooldown for all work types in seconds (0 = catalog defaults)
    /// * `witness_review_threshold` - Emissions above this are flagged for review
    #[allow(clippy::too_many_arguments)]
    pub fn update_ledger_config(
        ctx: Context<UpdateLedgerConfig>,
        decay_rate: u16,
        decay_period: i64,
        witness_threshold: u16,
        min_effort_bps: u16,
        max_effort_bps: u16,
        cooldown_override: i64,
        witness_review_threshold: u64,
    ) -> Result<()> {
        instructions::update_ledger_config::handler(
            ctx,
            decay_rate,
            decay_period,
            witness_threshold,
            min_effort_bps,
            max_effort_bps,
            cooldown_override,
            witness_review_threshold,
        )
    }
}
