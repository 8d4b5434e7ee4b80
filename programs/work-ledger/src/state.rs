//! Account state structures for the Work Ledger program

use anchor_lang::prelude::*;

use crate::errors::LedgerError;

// ============================================================================
// Size Constants
// ============================================================================

/// Size of fingerprints and description hashes (SHA256)
pub const HASH_SIZE: usize = 32;

/// Fingerprints tracked per worker by the cooldown guard. When full, the
/// entry closest to expiry is evicted.
pub const MAX_RECENT_SUBMISSIONS: usize = 32;

/// Number of accepted work records retained per worker
pub const MAX_WORK_HISTORY: usize = 16;

/// Kind of work a submission claims.
///
/// Serialized on the wire as a `u8` tag (see [`WorkType::tag`]) so that an
/// unknown tag surfaces as `InvalidWorkType` instead of a deserialization
/// failure.
///
/// | Tag | Variant               |
/// |-----|-----------------------|
/// |  0  | `OnboardUser`         |
/// |  1  | `CreateContent`       |
/// |  2  | `WriteCode`           |
/// |  3  | `ReferClient`         |
/// |  4  | `CloseDeal`           |
/// |  5  | `CommunityManagement` |
/// |  6  | `BugReport`           |
/// |  7  | `Documentation`       |
/// |  8  | `Marketing`           |
/// |  9  | `UserSupport`         |
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default, InitSpace,
)]
#[repr(u8)]
pub enum WorkType {
    #[default]
    OnboardUser = 0,
    CreateContent = 1,
    WriteCode = 2,
    ReferClient = 3,
    CloseDeal = 4,
    CommunityManagement = 5,
    BugReport = 6,
    Documentation = 7,
    Marketing = 8,
    UserSupport = 9,
}

impl WorkType {
    pub const ALL: [WorkType; 10] = [
        WorkType::OnboardUser,
        WorkType::CreateContent,
        WorkType::WriteCode,
        WorkType::ReferClient,
        WorkType::CloseDeal,
        WorkType::CommunityManagement,
        WorkType::BugReport,
        WorkType::Documentation,
        WorkType::Marketing,
        WorkType::UserSupport,
    ];

    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Bit for this work type in `Worker::work_types_mask`
    pub fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl TryFrom<u8> for WorkType {
    type Error = anchor_lang::error::Error;

    fn try_from(tag: u8) -> Result<Self> {
        WorkType::ALL
            .get(tag as usize)
            .copied()
            .ok_or_else(|| LedgerError::InvalidWorkType.into())
    }
}

/// Protocol-wide ledger state
/// PDA seeds: ["protocol"]
#[account]
#[derive(InitSpace)]
pub struct ProtocolState {
    /// Identity that initialized the protocol.
    /// Only this key may tune the ledger configuration.
    pub authority: Pubkey,
    /// Accepted submissions across all workers
    pub total_work_recorded: u64,
    /// Tokens credited to pending balances
    pub total_tokens_emitted: u64,
    /// Registered workers
    pub total_workers: u64,
    /// Decay per elapsed period in basis points
    pub decay_rate: u16,
    /// Length of one decay period (seconds)
    pub decay_period: i64,
    /// Fraction of witnesses required to confirm a submission (basis points).
    /// Enforced by the external verification layer, stored here only.
    pub witness_threshold: u16,
    /// Lowest accepted effort weight (basis points)
    pub min_effort_bps: u16,
    /// Highest accepted effort weight (basis points)
    pub max_effort_bps: u16,
    /// Cooldown horizon applied to every work type (seconds).
    /// 0 = use the per-type catalog defaults.
    pub cooldown_override: i64,
    /// Emissions above this amount are flagged for witness review
    pub witness_review_threshold: u64,
    /// Initialization timestamp (0 = not initialized)
    pub initialized_at: i64,
    /// Bump seed for PDA
    pub bump: u8,
    /// Reserved for future configuration fields
    pub _reserved: [u8; 8],
}

impl Default for ProtocolState {
    fn default() -> Self {
        Self {
            authority: Pubkey::default(),
            total_work_recorded: 0,
            total_tokens_emitted: 0,
            total_workers: 0,
            decay_rate: ProtocolState::DEFAULT_DECAY_RATE,
            decay_period: ProtocolState::DEFAULT_DECAY_PERIOD,
            witness_threshold: ProtocolState::DEFAULT_WITNESS_THRESHOLD,
            min_effort_bps: ProtocolState::DEFAULT_MIN_EFFORT_BPS,
            max_effort_bps: ProtocolState::DEFAULT_MAX_EFFORT_BPS,
            cooldown_override: 0,
            witness_review_threshold: ProtocolState::DEFAULT_WITNESS_REVIEW_THRESHOLD,
            initialized_at: 0,
            bump: 0,
            _reserved: [0u8; 8],
        }
    }
}

impl ProtocolState {
    /// 1% per period
    pub const DEFAULT_DECAY_RATE: u16 = 100;
    /// One period per day
    pub const DEFAULT_DECAY_PERIOD: i64 = 24 * 60 * 60;
    /// 60% witness consensus
    pub const DEFAULT_WITNESS_THRESHOLD: u16 = 6000;
    /// 50% of base emission
    pub const DEFAULT_MIN_EFFORT_BPS: u16 = 5000;
    /// 200% of base emission
    pub const DEFAULT_MAX_EFFORT_BPS: u16 = 20000;
    pub const DEFAULT_WITNESS_REVIEW_THRESHOLD: u64 = 1_000_000_000;

    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        8 +  // total_work_recorded
        8 +  // total_tokens_emitted
        8 +  // total_workers
        2 +  // decay_rate
        8 +  // decay_period
        2 +  // witness_threshold
        2 +  // min_effort_bps
        2 +  // max_effort_bps
        8 +  // cooldown_override
        8 +  // witness_review_threshold
        8 +  // initialized_at
        1 +  // bump
        8; // reserved

    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }
}

/// One fingerprint held by the cooldown guard.
/// Expiry is derived from `work_type` and the current configuration.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct SubmissionEntry {
    /// SHA256 of (work type, description)
    pub fingerprint: [u8; 32],
    pub work_type: WorkType,
    pub submitted_at: i64,
}

/// Accepted unit of work kept in the worker's history ring
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct WorkRecord {
    pub work_type: WorkType,
    pub effort_weight_bps: u16,
    pub timestamp: i64,
    pub emission_amount: u64,
    pub description_hash: [u8; 32],
}

/// Per-participant ledger account
/// PDA seeds: ["worker", owner]
#[account]
#[derive(Default, InitSpace)]
pub struct Worker {
    /// Controlling identity, immutable after creation
    pub owner: Pubkey,
    /// Accepted submissions by this worker
    pub total_work_completed: u64,
    /// Accrued, unclaimed balance subject to decay
    pub pending_tokens: u64,
    /// Lifetime emission credited
    pub total_tokens_earned: u64,
    /// Lifetime decay removed
    pub total_tokens_decayed: u64,
    /// Registration timestamp
    pub registered_at: i64,
    /// Start of the current (partial) decay period
    pub last_decay_check: i64,
    /// Timestamp of the last accepted submission
    pub last_work_at: i64,
    /// Bit per work type ever credited (see [`WorkType::bit`])
    pub work_types_mask: u16,
    /// Bump seed
    pub bump: u8,
    /// Cooldown window, oldest first
    #[max_len(MAX_RECENT_SUBMISSIONS)]
    pub recent_submissions: Vec<SubmissionEntry>,
    /// Last accepted records, oldest first
    #[max_len(MAX_WORK_HISTORY)]
    pub work_history: Vec<WorkRecord>,
    /// Reserved bytes for future use
    pub _reserved: [u8; 8],
}

impl Worker {
    pub const SIZE: usize = 8 + // discriminator
        32 + // owner
        8 +  // total_work_completed
        8 +  // pending_tokens
        8 +  // total_tokens_earned
        8 +  // total_tokens_decayed
        8 +  // registered_at
        8 +  // last_decay_check
        8 +  // last_work_at
        2 +  // work_types_mask
        1 +  // bump
        4 + (MAX_RECENT_SUBMISSIONS * (HASH_SIZE + 1 + 8)) + // recent_submissions
        4 + (MAX_WORK_HISTORY * (1 + 2 + 8 + 8 + HASH_SIZE)) + // work_history
        8; // reserved

    /// Points per distinct work type performed
    pub const DIVERSITY_POINTS_PER_TYPE: u64 = 100;

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn diversity_score(&self) -> u64 {
        u64::from(self.work_types_mask.count_ones()) * Self::DIVERSITY_POINTS_PER_TYPE
    }

    /// Append to the history ring, dropping the oldest record when full.
    pub fn push_history(&mut self, record: WorkRecord) {
        if self.work_history.len() >= MAX_WORK_HISTORY {
            self.work_history.remove(0);
        }
        self.work_history.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// SIZE must equal INIT_SPACE (borsh serialized) + 8-byte discriminator.
    macro_rules! test_size_constant {
        ($struct:ty) => {
            assert_eq!(
                <$struct>::SIZE,
                <$struct as anchor_lang::Space>::INIT_SPACE + 8,
                concat!(stringify!($struct), "::SIZE mismatch with INIT_SPACE")
            );
        };
    }

    fn record(work_type: WorkType, timestamp: i64) -> WorkRecord {
        WorkRecord {
            work_type,
            effort_weight_bps: 10_000,
            timestamp,
            emission_amount: 1,
            description_hash: [0u8; 32],
        }
    }

    #[test]
    fn test_protocol_state_size() {
        test_size_constant!(ProtocolState);
    }

    #[test]
    fn test_worker_size() {
        test_size_constant!(Worker);
    }

    #[test]
    fn test_protocol_state_defaults() {
        let state = ProtocolState::default();
        assert_eq!(state.total_work_recorded, 0);
        assert_eq!(state.decay_rate, 100);
        assert_eq!(state.witness_threshold, 6000);
        assert_eq!(state.min_effort_bps, 5000);
        assert_eq!(state.max_effort_bps, 20000);
        assert!(!state.is_initialized());
    }

    #[test]
    fn test_work_type_tag_round_trip() {
        for work_type in WorkType::ALL {
            assert_eq!(WorkType::try_from(work_type.tag()).unwrap(), work_type);
        }
    }

    #[test]
    fn test_unknown_work_type_tag_rejected() {
        assert!(WorkType::try_from(10).is_err());
        assert!(WorkType::try_from(u8::MAX).is_err());
    }

    #[test]
    fn test_work_type_bits_are_distinct() {
        let mask = WorkType::ALL.iter().fold(0u16, |acc, t| {
            assert_eq!(acc & t.bit(), 0);
            acc | t.bit()
        });
        assert_eq!(mask.count_ones(), 10);
    }

    #[test]
    fn test_diversity_score_counts_distinct_types() {
        let mut worker = Worker::default();
        assert_eq!(worker.diversity_score(), 0);
        worker.work_types_mask |= WorkType::WriteCode.bit();
        worker.work_types_mask |= WorkType::WriteCode.bit();
        worker.work_types_mask |= WorkType::BugReport.bit();
        assert_eq!(worker.diversity_score(), 200);
    }

    #[test]
    fn test_history_ring_drops_oldest() {
        let mut worker = Worker::default();
        for i in 0..(MAX_WORK_HISTORY as i64 + 3) {
            worker.push_history(record(WorkType::Marketing, i));
        }
        assert_eq!(worker.work_history.len(), MAX_WORK_HISTORY);
        assert_eq!(worker.work_history[0].timestamp, 3);
        assert_eq!(
            worker.work_history.last().unwrap().timestamp,
            MAX_WORK_HISTORY as i64 + 2
        );
    }
}
