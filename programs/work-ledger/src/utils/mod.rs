//! Utility modules for the Work Ledger program

pub mod validation;
