//! Anti-gaming cooldown guard.
//!
//! A worker is not credited twice for the same `(work type, description)`
//! while the fingerprint of the earlier submission is unexpired. Expiry is
//! always measured against the current configuration, so changing the
//! cooldown override applies to fingerprints already in the window.

use crate::errors::LedgerError;
use crate::events::CooldownRejected;
use crate::instructions::catalog::default_cooldown;
use crate::instructions::constants::FINGERPRINT_DOMAIN;
use crate::state::{ProtocolState, SubmissionEntry, WorkType, Worker, MAX_RECENT_SUBMISSIONS};
use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

/// Deterministic fingerprint of a submission. Matching is exact: two
/// descriptions collide only if their bytes are identical.
pub fn submission_fingerprint(work_type: WorkType, description: &str) -> [u8; 32] {
    hashv(&[
        FINGERPRINT_DOMAIN,
        &[work_type.tag()],
        description.as_bytes(),
    ])
    .to_bytes()
}

/// SHA256 of the raw description, kept in the work history.
pub fn description_hash(description: &str) -> [u8; 32] {
    hashv(&[description.as_bytes()]).to_bytes()
}

/// Cooldown horizon for `work_type` under the current configuration.
pub fn cooldown_horizon(work_type: WorkType, config: &ProtocolState) -> i64 {
    if config.cooldown_override > 0 {
        config.cooldown_override
    } else {
        default_cooldown(work_type)
    }
}

/// First timestamp at which `entry` no longer blocks a resubmission.
pub fn entry_expires_at(entry: &SubmissionEntry, config: &ProtocolState) -> i64 {
    entry
        .submitted_at
        .saturating_add(cooldown_horizon(entry.work_type, config))
}

/// A worker is cooling while any fingerprint in its window is unexpired.
pub fn is_cooling(worker: &Worker, config: &ProtocolState, now: i64) -> bool {
    worker
        .recent_submissions
        .iter()
        .any(|entry| entry_expires_at(entry, config) > now)
}

/// Reject if an unexpired entry with the same fingerprint exists.
///
/// Read-only on the worker. On rejection a `CooldownRejected` event carries the
/// age of the conflicting fingerprint and the seconds until it expires.
///
/// # Errors
/// * `TaskCooldownActive` - identical submission still cooling down
pub fn check_cooldown(
    worker: &Worker,
    fingerprint: &[u8; 32],
    config: &ProtocolState,
    now: i64,
) -> Result<()> {
    let conflict = worker
        .recent_submissions
        .iter()
        .find(|entry| entry.fingerprint == *fingerprint && entry_expires_at(entry, config) > now);

    if let Some(entry) = conflict {
        // Clock drift can put submitted_at ahead of now
        let age = now.saturating_sub(entry.submitted_at).max(0);
        let remaining = entry_expires_at(entry, config).saturating_sub(now);
        msg!(
            "Cooldown active: fingerprint age {}s, retry in {}s",
            age,
            remaining
        );
        emit!(CooldownRejected {
            worker: worker.owner,
            fingerprint: *fingerprint,
            fingerprint_age: age,
            cooldown_remaining: remaining,
            timestamp: now,
        });
        return Err(LedgerError::TaskCooldownActive.into());
    }

    Ok(())
}

/// Drop entries whose cooldown has ended. Returns the number removed.
pub fn prune_expired(worker: &mut Worker, config: &ProtocolState, now: i64) -> usize {
    let before = worker.recent_submissions.len();
    worker
        .recent_submissions
        .retain(|entry| entry_expires_at(entry, config) > now);
    before - worker.recent_submissions.len()
}

/// Admit a submission: check for a conflicting fingerprint, prune expired
/// entries and append the new one.
///
/// A full window evicts the entry closest to expiry, so distinct work is
/// never refused for lack of space. The worker is left untouched when the
/// submission is rejected.
///
/// # Errors
/// * `TaskCooldownActive` - identical submission still cooling down
pub fn admit_submission(
    worker: &mut Worker,
    work_type: WorkType,
    fingerprint: [u8; 32],
    config: &ProtocolState,
    now: i64,
) -> Result<()> {
    check_cooldown(worker, &fingerprint, config, now)?;

    prune_expired(worker, config, now);
    if worker.recent_submissions.len() >= MAX_RECENT_SUBMISSIONS {
        let closest = worker
            .recent_submissions
            .iter()
            .enumerate()
            .min_by_key(|(_, entry)| entry_expires_at(entry, config))
            .map(|(index, _)| index);
        if let Some(index) = closest {
            let evicted = worker.recent_submissions.remove(index);
            msg!(
                "Cooldown window full: evicted fingerprint submitted at {}",
                evicted.submitted_at
            );
        }
    }

    worker.recent_submissions.push(SubmissionEntry {
        fingerprint,
        work_type,
        submitted_at: now,
    });

    Ok(())
}
