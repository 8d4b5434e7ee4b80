//! Shared constants for instruction handlers

/// Divisor for basis points calculations (100% = 10000 bps)
pub const BASIS_POINTS_DIVISOR: u64 = 10000;

/// Effort weight that yields exactly the catalog base emission
pub const BASELINE_EFFORT_BPS: u16 = 10000;

/// Maximum description length in bytes
pub const MAX_DESCRIPTION_LEN: usize = 256;

/// Upper bound for the protocol-wide cooldown override (7 days in seconds)
pub const MAX_COOLDOWN_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Upper bound for the decay period (365 days in seconds)
pub const MAX_DECAY_PERIOD: i64 = 365 * 24 * 60 * 60;

/// Domain separator for submission fingerprints
pub const FINGERPRINT_DOMAIN: &[u8] = b"work-submission";

/// Default cooldown for work types without a dedicated horizon (1 hour)
pub const DEFAULT_COOLDOWN_SECONDS: i64 = 3600;
