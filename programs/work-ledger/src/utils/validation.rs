//! Input validation utilities for the Work Ledger program

use crate::errors::LedgerError;
use crate::instructions::constants::MAX_DESCRIPTION_LEN;
use anchor_lang::prelude::*;

/// Returns true if `s` has visible content and no control characters.
///
/// Unicode text is allowed; only control characters (newlines, tabs, escape
/// sequences, NUL) are refused so that a fingerprint cannot be varied with
/// invisible bytes.
///
/// # Examples
/// ```
/// use work_ledger::utils::validation::is_printable_text;
///
/// assert!(is_printable_text("Onboarded new user John Doe"));
/// assert!(is_printable_text("Café opening post"));
/// assert!(!is_printable_text("line one\nline two"));
/// assert!(!is_printable_text("   "));
/// ```
pub fn is_printable_text(s: &str) -> bool {
    !s.trim().is_empty() && !s.chars().any(char::is_control)
}

/// Validate a work description before it is fingerprinted.
///
/// # Errors
/// * `DescriptionTooLong` - more than `MAX_DESCRIPTION_LEN` bytes
/// * `InvalidDescription` - empty, blank, or containing control characters
pub fn validate_description(description: &str) -> Result<()> {
    require!(
        description.len() <= MAX_DESCRIPTION_LEN,
        LedgerError::DescriptionTooLong
    );
    require!(
        is_printable_text(description),
        LedgerError::InvalidDescription
    );
    Ok(())
}
