//! Static work catalog: base emission and default cooldown per work type.

use crate::instructions::constants::DEFAULT_COOLDOWN_SECONDS;
use crate::state::WorkType;

/// Base emission for one unit of work at 100% effort (token base units).
pub fn base_emission(work_type: WorkType) -> u64 {
    match work_type {
        WorkType::OnboardUser => 500_000,
        WorkType::CreateContent => 1_000_000,
        WorkType::WriteCode => 2_000_000,
        WorkType::ReferClient => 5_000_000,
        WorkType::CloseDeal => 10_000_000,
        WorkType::CommunityManagement => 750_000,
        WorkType::BugReport => 1_500_000,
        WorkType::Documentation => 800_000,
        WorkType::Marketing => 1_200_000,
        WorkType::UserSupport => 600_000,
    }
}

/// Default horizon (seconds) during which an identical submission is refused.
pub fn default_cooldown(work_type: WorkType) -> i64 {
    match work_type {
        WorkType::OnboardUser => 3600,
        WorkType::CreateContent => 2 * 3600,
        WorkType::WriteCode => 30 * 60,
        WorkType::ReferClient | WorkType::CloseDeal => 24 * 3600,
        _ => DEFAULT_COOLDOWN_SECONDS,
    }
}
