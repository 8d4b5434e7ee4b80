//! Error codes for the Work Ledger program

use anchor_lang::prelude::*;

#[error_code]
pub enum LedgerError {
    // Lifecycle errors, numbered from 6000 in declaration order
    #[msg("Account has already been initialized")]
    AlreadyInitialized,

    #[msg("Protocol state has not been initialized")]
    ProtocolNotInitialized,

    // Validation errors
    #[msg("Effort weight is outside the configured range")]
    InvalidEffortWeight,

    #[msg("Unknown work type")]
    InvalidWorkType,

    #[msg("Description must be non-empty printable text")]
    InvalidDescription,

    #[msg("Description exceeds maximum length")]
    DescriptionTooLong,

    // Anti-gaming policy errors
    #[msg("Task cooldown period still active")]
    TaskCooldownActive,

    // Authorization errors
    #[msg("Only the worker owner can perform this action")]
    UnauthorizedWorker,

    #[msg("Only the protocol authority can perform this action")]
    UnauthorizedAuthority,

    // Configuration errors
    #[msg("Decay rate must be at most 10000 basis points")]
    InvalidDecayRate,

    #[msg("Decay period must be positive")]
    InvalidDecayPeriod,

    #[msg("Witness threshold must be between 1 and 10000 basis points")]
    InvalidWitnessThreshold,

    #[msg("Effort range must be non-empty with a positive minimum")]
    InvalidEffortRange,

    #[msg("Cooldown override must be between 0 and 7 days")]
    InvalidCooldown,

    // General errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}

/// True if `err` carries the program error code of `expected`.
#[cfg(test)]
pub(crate) fn is_ledger_error(err: &anchor_lang::error::Error, expected: LedgerError) -> bool {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number == u32::from(expected),
        anchor_lang::error::Error::ProgramError(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_offset() {
        assert_eq!(u32::from(LedgerError::AlreadyInitialized), 6000);
        assert_eq!(
            u32::from(LedgerError::TaskCooldownActive),
            6000 + LedgerError::TaskCooldownActive as u32
        );
    }

    #[test]
    fn test_error_codes_are_sequential() {
        assert_eq!(u32::from(LedgerError::ProtocolNotInitialized), 6001);
        assert_eq!(u32::from(LedgerError::InvalidEffortWeight), 6002);
        assert_eq!(u32::from(LedgerError::TaskCooldownActive), 6006);
        assert_eq!(u32::from(LedgerError::UnauthorizedWorker), 6007);
        assert_eq!(u32::from(LedgerError::InvalidDecayRate), 6009);
        assert_eq!(u32::from(LedgerError::ArithmeticOverflow), 6014);
    }

    #[test]
    fn test_is_ledger_error_matches_code() {
        let err: anchor_lang::error::Error = LedgerError::InvalidEffortWeight.into();
        assert!(is_ledger_error(&err, LedgerError::InvalidEffortWeight));
        assert!(!is_ledger_error(&err, LedgerError::InvalidWorkType));
    }
}
