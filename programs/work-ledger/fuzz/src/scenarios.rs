//! Fuzz testing scenarios that drive the ledger state transitions
//!
//! The program's own `record_work_at` / `decay_worker_at` run directly on
//! in-memory accounts, so sequences can be explored without the Solana
//! runtime.

use anchor_lang::error::Error;
use anchor_lang::prelude::Pubkey;
use work_ledger::instructions::ledger_helpers::{
    decay_worker_at, init_protocol_state, init_worker_state, record_work_at,
};
use work_ledger::state::{ProtocolState, SubmissionEntry, WorkRecord, Worker};

use crate::arbitrary::LedgerOp;
use crate::invariants::*;

/// Result of a simulated instruction execution
#[derive(Debug, Clone)]
pub enum SimulationResult {
    Success,
    Error(String),
    InvariantViolation(String),
}

impl SimulationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SimulationResult::Success)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SimulationResult::Error(_))
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, SimulationResult::InvariantViolation(_))
    }
}

/// Name of a program error (`TaskCooldownActive`, ...) or its display text
pub fn error_name(err: &Error) -> String {
    match err {
        Error::AnchorError(e) => e.error_name.clone(),
        other => other.to_string(),
    }
}

/// Comparable copy of the mutable worker fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSnapshot {
    pub total_work_completed: u64,
    pub pending_tokens: u64,
    pub total_tokens_earned: u64,
    pub total_tokens_decayed: u64,
    pub last_decay_check: i64,
    pub last_work_at: i64,
    pub work_types_mask: u16,
    pub recent_submissions: Vec<SubmissionEntry>,
    pub work_history: Vec<WorkRecord>,
}

impl From<&Worker> for WorkerSnapshot {
    fn from(w: &Worker) -> Self {
        Self {
            total_work_completed: w.total_work_completed,
            pending_tokens: w.pending_tokens,
            total_tokens_earned: w.total_tokens_earned,
            total_tokens_decayed: w.total_tokens_decayed,
            last_decay_check: w.last_decay_check,
            last_work_at: w.last_work_at,
            work_types_mask: w.work_types_mask,
            recent_submissions: w.recent_submissions.clone(),
            work_history: w.work_history.clone(),
        }
    }
}

/// Comparable copy of the protocol counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolSnapshot {
    pub total_work_recorded: u64,
    pub total_tokens_emitted: u64,
    pub total_workers: u64,
}

impl From<&ProtocolState> for ProtocolSnapshot {
    fn from(p: &ProtocolState) -> Self {
        Self {
            total_work_recorded: p.total_work_recorded,
            total_tokens_emitted: p.total_tokens_emitted,
            total_workers: p.total_workers,
        }
    }
}

/// In-memory ledger: one protocol state and a set of registered workers
pub struct SimulatedLedger {
    pub protocol: ProtocolState,
    pub workers: Vec<Worker>,
    pub now: i64,
}

impl SimulatedLedger {
    /// Initialize the protocol and register `workers` workers at `start`.
    pub fn new(workers: usize, start: i64) -> Result<Self, String> {
        let mut protocol = ProtocolState::default();
        init_protocol_state(&mut protocol, Pubkey::new_from_array([0xAA; 32]), 255, start)
            .map_err(|e| error_name(&e))?;

        let mut accounts = Vec::with_capacity(workers);
        for i in 0..workers {
            let mut worker = Worker::default();
            // Index + 1 so no owner equals the default key
            let owner = Pubkey::new_from_array([(i as u8).wrapping_add(1); 32]);
            init_worker_state(&mut worker, &mut protocol, owner, 254, start)
                .map_err(|e| error_name(&e))?;
            accounts.push(worker);
        }

        Ok(Self {
            protocol,
            workers: accounts,
            now: start,
        })
    }

    /// Run one operation and check the ledger invariants afterwards.
    ///
    /// Rejections are `Error`; a rejection that changed state, or an accepted
    /// call that broke accounting, is an `InvariantViolation`.
    pub fn apply(&mut self, op: &LedgerOp) -> SimulationResult {
        match op {
            LedgerOp::Advance { seconds } => {
                self.now = self.now.saturating_add(*seconds);
                SimulationResult::Success
            }
            LedgerOp::Record {
                worker,
                work_type,
                effort_weight_bps,
                description,
            } => self.record(*worker, *work_type, *effort_weight_bps, description),
            LedgerOp::Decay { worker } => self.decay(*worker),
        }
    }

    fn record(
        &mut self,
        index: usize,
        work_type: u8,
        effort_weight_bps: u16,
        description: &str,
    ) -> SimulationResult {
        let Some(worker) = self.workers.get_mut(index) else {
            return SimulationResult::Error("UnknownWorker".to_string());
        };
        let worker_before = WorkerSnapshot::from(&*worker);
        let protocol_before = self.protocol.clone();

        let result = record_work_at(
            &mut self.protocol,
            worker,
            work_type,
            effort_weight_bps,
            description,
            self.now,
        );

        match result {
            Err(err) => {
                if WorkerSnapshot::from(&*worker) != worker_before
                    || ProtocolSnapshot::from(&self.protocol) != ProtocolSnapshot::from(&protocol_before)
                {
                    return SimulationResult::InvariantViolation(format!(
                        "Rejected record_work ({}) mutated state",
                        error_name(&err)
                    ));
                }
                SimulationResult::Error(error_name(&err))
            }
            Ok(receipt) => {
                if let DecayInvariantResult::ExceedsBalance { before, decayed }
                | DecayInvariantResult::ConservationViolation { before, decayed, .. } =
                    check_decay_conservation(
                        worker_before.pending_tokens,
                        receipt.decay.remaining,
                        receipt.decay.decayed,
                    )
                {
                    return SimulationResult::InvariantViolation(format!(
                        "Decay before credit broke conservation: before {} decayed {}",
                        before, decayed
                    ));
                }

                let expected_pending = receipt.decay.remaining.checked_add(receipt.emission);
                if expected_pending != Some(worker.pending_tokens) {
                    return SimulationResult::InvariantViolation(format!(
                        "Pending {} != remaining {} + emission {}",
                        worker.pending_tokens, receipt.decay.remaining, receipt.emission
                    ));
                }

                if worker.total_work_completed != worker_before.total_work_completed + 1 {
                    return SimulationResult::InvariantViolation(
                        "total_work_completed did not advance by one".to_string(),
                    );
                }

                self.check_after(&protocol_before)
            }
        }
    }

    fn decay(&mut self, index: usize) -> SimulationResult {
        let Some(worker) = self.workers.get_mut(index) else {
            return SimulationResult::Error("UnknownWorker".to_string());
        };
        let before_pending = worker.pending_tokens;
        let before_check = worker.last_decay_check;
        let protocol_before = self.protocol.clone();

        let outcome = match decay_worker_at(&self.protocol, worker, self.now) {
            Ok(outcome) => outcome,
            Err(err) => return SimulationResult::Error(error_name(&err)),
        };

        if check_decay_conservation(before_pending, outcome.remaining, outcome.decayed)
            != DecayInvariantResult::Valid
        {
            return SimulationResult::InvariantViolation(format!(
                "Decay broke conservation: before {} remaining {} decayed {}",
                before_pending, outcome.remaining, outcome.decayed
            ));
        }

        if let DecayInvariantResult::CheckpointOutOfRange { before, after, now } =
            check_decay_checkpoint(before_check, worker.last_decay_check, self.now)
        {
            return SimulationResult::InvariantViolation(format!(
                "Decay checkpoint moved from {} to {} at {}",
                before, after, now
            ));
        }

        if ProtocolSnapshot::from(&self.protocol) != ProtocolSnapshot::from(&protocol_before) {
            return SimulationResult::InvariantViolation(
                "Decay changed the protocol counters".to_string(),
            );
        }

        self.check_after(&protocol_before)
    }

    fn check_after(&self, protocol_before: &ProtocolState) -> SimulationResult {
        let checks = std::iter::once(check_counters_monotonic(protocol_before, &self.protocol))
            .chain(std::iter::once(check_ledger_totals(&self.protocol, &self.workers)))
            .chain(self.workers.iter().map(check_worker_balance));

        for result in checks {
            if !result.is_valid() {
                return SimulationResult::InvariantViolation(format!("{:?}", result));
            }
        }
        SimulationResult::Success
    }

    /// Full invariant sweep over the current state
    pub fn check_invariants(&self) -> LedgerInvariantResult {
        let totals = check_ledger_totals(&self.protocol, &self.workers);
        if !totals.is_valid() {
            return totals;
        }
        self.workers
            .iter()
            .map(check_worker_balance)
            .find(|r| !r.is_valid())
            .unwrap_or(LedgerInvariantResult::Valid)
    }
}

/// Run a whole operation sequence, stopping at the first invariant violation.
pub fn simulate_sequence(workers: usize, start: i64, ops: &[LedgerOp]) -> Vec<SimulationResult> {
    let mut ledger = match SimulatedLedger::new(workers, start) {
        Ok(ledger) => ledger,
        Err(e) => return vec![SimulationResult::InvariantViolation(format!("setup failed: {}", e))],
    };

    let mut results = Vec::with_capacity(ops.len());
    for op in ops {
        let result = ledger.apply(op);
        let stop = result.is_invariant_violation();
        results.push(result);
        if stop {
            break;
        }
    }
    results
}

/// Submit the same work twice at the same instant; the second must be
/// refused by the cooldown guard whenever the first was accepted.
pub fn simulate_duplicate_submission(
    work_type: u8,
    effort_weight_bps: u16,
    description: &str,
    start: i64,
) -> SimulationResult {
    let mut ledger = match SimulatedLedger::new(1, start) {
        Ok(ledger) => ledger,
        Err(e) => return SimulationResult::InvariantViolation(format!("setup failed: {}", e)),
    };

    let op = LedgerOp::Record {
        worker: 0,
        work_type,
        effort_weight_bps,
        description: description.to_string(),
    };

    let first = ledger.apply(&op);
    if !first.is_success() {
        return first;
    }

    match ledger.apply(&op) {
        SimulationResult::Error(name) if name == "TaskCooldownActive" => SimulationResult::Success,
        SimulationResult::Error(name) => SimulationResult::InvariantViolation(format!(
            "Duplicate rejected with {} instead of TaskCooldownActive",
            name
        )),
        SimulationResult::Success => {
            SimulationResult::InvariantViolation("Duplicate submission credited twice".to_string())
        }
        violation => violation,
    }
}
