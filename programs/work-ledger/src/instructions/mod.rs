//! Instruction handlers for the Work Ledger

pub mod catalog;
pub mod constants;
pub mod cooldown_helpers;
pub mod decay_helpers;
pub mod emission;
pub mod ledger_helpers;

pub mod apply_decay;
pub mod initialize_protocol;
pub mod initialize_worker;
pub mod record_work;
pub mod update_ledger_config;

#[allow(ambiguous_glob_reexports)]
pub use apply_decay::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize_protocol::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize_worker::*;
#[allow(ambiguous_glob_reexports)]
pub use record_work::*;
#[allow(ambiguous_glob_reexports)]
pub use update_ledger_config::*;
