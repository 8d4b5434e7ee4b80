//! Ledger invariant checking for fuzz testing

use work_ledger::state::{ProtocolState, Worker, MAX_RECENT_SUBMISSIONS, MAX_WORK_HISTORY};

/// Emission invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmissionInvariantResult {
    Valid,
    /// Higher effort produced a lower emission
    NotMonotonic { low: u64, high: u64 },
    /// compute(t, 2x) != 2 * compute(t, 1x)
    NotLinear { single: u64, double: u64 },
}

/// Decay invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecayInvariantResult {
    Valid,
    /// Decay removed more than the balance held
    ExceedsBalance { before: u64, decayed: u64 },
    /// before != remaining + decayed
    ConservationViolation { before: u64, remaining: u64, decayed: u64 },
    /// Last check moved backwards or past `now`
    CheckpointOutOfRange { before: i64, after: i64, now: i64 },
}

/// Worker / protocol accounting invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerInvariantResult {
    Valid,
    /// Protocol work counter differs from the per-worker sum
    WorkCountMismatch { protocol: u64, workers: u64 },
    /// Protocol emission counter differs from the per-worker sum
    EmittedMismatch { protocol: u64, workers: u64 },
    /// earned - decayed != pending for a worker
    BalanceMismatch { earned: u64, decayed: u64, pending: u64 },
    /// A monotonic counter went down
    CounterDecreased { name: &'static str, before: u64, after: u64 },
    /// Bounded vector outgrew its allocation
    CapacityExceeded { name: &'static str, len: usize, max: usize },
}

impl LedgerInvariantResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, LedgerInvariantResult::Valid)
    }
}

// ============================================================================
// Emission Invariants
// ============================================================================

/// More effort never yields less emission
pub fn check_emission_monotonic(low: u64, high: u64) -> EmissionInvariantResult {
    if high < low {
        EmissionInvariantResult::NotMonotonic { low, high }
    } else {
        EmissionInvariantResult::Valid
    }
}

/// Doubling effort doubles emission
pub fn check_emission_linear(single: u64, double: u64) -> EmissionInvariantResult {
    if single.checked_mul(2) != Some(double) {
        EmissionInvariantResult::NotLinear { single, double }
    } else {
        EmissionInvariantResult::Valid
    }
}

// ============================================================================
// Decay Invariants
// ============================================================================

/// Decay is bounded by the balance and conserves tokens
pub fn check_decay_conservation(before: u64, remaining: u64, decayed: u64) -> DecayInvariantResult {
    if decayed > before {
        return DecayInvariantResult::ExceedsBalance { before, decayed };
    }
    if remaining.checked_add(decayed) != Some(before) {
        return DecayInvariantResult::ConservationViolation {
            before,
            remaining,
            decayed,
        };
    }
    DecayInvariantResult::Valid
}

/// `last_decay_check` never moves backwards and never passes `now`
/// (unless it already was ahead of `now`)
pub fn check_decay_checkpoint(before: i64, after: i64, now: i64) -> DecayInvariantResult {
    if after < before || (after > now && after != before) {
        DecayInvariantResult::CheckpointOutOfRange { before, after, now }
    } else {
        DecayInvariantResult::Valid
    }
}

// ============================================================================
// Ledger Accounting Invariants
// ============================================================================

/// Protocol counters equal the sums over workers
pub fn check_ledger_totals(protocol: &ProtocolState, workers: &[Worker]) -> LedgerInvariantResult {
    let work: u64 = workers.iter().map(|w| w.total_work_completed).sum();
    if protocol.total_work_recorded != work {
        return LedgerInvariantResult::WorkCountMismatch {
            protocol: protocol.total_work_recorded,
            workers: work,
        };
    }

    let earned: u64 = workers.iter().map(|w| w.total_tokens_earned).sum();
    if protocol.total_tokens_emitted != earned {
        return LedgerInvariantResult::EmittedMismatch {
            protocol: protocol.total_tokens_emitted,
            workers: earned,
        };
    }

    LedgerInvariantResult::Valid
}

/// Every token earned is either still pending or decayed, and the bounded
/// vectors stay within their allocation
pub fn check_worker_balance(worker: &Worker) -> LedgerInvariantResult {
    if worker.total_tokens_earned.checked_sub(worker.total_tokens_decayed) != Some(worker.pending_tokens) {
        return LedgerInvariantResult::BalanceMismatch {
            earned: worker.total_tokens_earned,
            decayed: worker.total_tokens_decayed,
            pending: worker.pending_tokens,
        };
    }
    if worker.recent_submissions.len() > MAX_RECENT_SUBMISSIONS {
        return LedgerInvariantResult::CapacityExceeded {
            name: "recent_submissions",
            len: worker.recent_submissions.len(),
            max: MAX_RECENT_SUBMISSIONS,
        };
    }
    if worker.work_history.len() > MAX_WORK_HISTORY {
        return LedgerInvariantResult::CapacityExceeded {
            name: "work_history",
            len: worker.work_history.len(),
            max: MAX_WORK_HISTORY,
        };
    }
    LedgerInvariantResult::Valid
}

/// Monotonic counters never decrease between two snapshots
pub fn check_counters_monotonic(before: &ProtocolState, after: &ProtocolState) -> LedgerInvariantResult {
    let pairs = [
        ("total_work_recorded", before.total_work_recorded, after.total_work_recorded),
        ("total_tokens_emitted", before.total_tokens_emitted, after.total_tokens_emitted),
        ("total_workers", before.total_workers, after.total_workers),
    ];
    for (name, before, after) in pairs {
        if after < before {
            return LedgerInvariantResult::CounterDecreased { name, before, after };
        }
    }
    LedgerInvariantResult::Valid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_conservation() {
        assert_eq!(check_decay_conservation(100, 99, 1), DecayInvariantResult::Valid);
        assert_eq!(
            check_decay_conservation(100, 0, 101),
            DecayInvariantResult::ExceedsBalance { before: 100, decayed: 101 }
        );
        assert_eq!(
            check_decay_conservation(100, 98, 1),
            DecayInvariantResult::ConservationViolation { before: 100, remaining: 98, decayed: 1 }
        );
    }

    #[test]
    fn test_emission_linear() {
        assert_eq!(check_emission_linear(5, 10), EmissionInvariantResult::Valid);
        assert_eq!(
            check_emission_linear(5, 11),
            EmissionInvariantResult::NotLinear { single: 5, double: 11 }
        );
        assert!(matches!(
            check_emission_linear(u64::MAX, 0),
            EmissionInvariantResult::NotLinear { .. }
        ));
    }

    #[test]
    fn test_worker_balance() {
        let worker = Worker {
            total_tokens_earned: 100,
            total_tokens_decayed: 30,
            pending_tokens: 70,
            ..Worker::default()
        };
        assert!(check_worker_balance(&worker).is_valid());

        let broken = Worker {
            pending_tokens: 71,
            ..worker
        };
        assert!(!check_worker_balance(&broken).is_valid());
    }

    #[test]
    fn test_ledger_totals_sum_earned() {
        let workers = [
            Worker {
                total_work_completed: 1,
                total_tokens_earned: 100,
                total_tokens_decayed: 40,
                pending_tokens: 60,
                ..Worker::default()
            },
            Worker {
                total_work_completed: 2,
                total_tokens_earned: 50,
                pending_tokens: 50,
                ..Worker::default()
            },
        ];
        let protocol = ProtocolState {
            total_work_recorded: 3,
            total_tokens_emitted: 150,
            ..ProtocolState::default()
        };
        assert!(check_ledger_totals(&protocol, &workers).is_valid());

        let short = ProtocolState {
            total_tokens_emitted: 110,
            ..protocol
        };
        assert_eq!(
            check_ledger_totals(&short, &workers),
            LedgerInvariantResult::EmittedMismatch { protocol: 110, workers: 150 }
        );
    }

    #[test]
    fn test_counters_monotonic() {
        let before = ProtocolState {
            total_work_recorded: 3,
            ..ProtocolState::default()
        };
        let after = ProtocolState {
            total_work_recorded: 2,
            ..ProtocolState::default()
        };
        assert_eq!(
            check_counters_monotonic(&before, &after),
            LedgerInvariantResult::CounterDecreased {
                name: "total_work_recorded",
                before: 3,
                after: 2
            }
        );
    }
}
