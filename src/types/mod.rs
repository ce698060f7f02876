//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `fine`: the fine record and its paid status
//! - `roster`: the immutable players and reasons reference tables
//! - `error`: error types for the fine ledger

pub mod error;
pub mod fine;
pub mod roster;

pub use error::FineError;
pub use fine::{Fine, PaidStatus};
pub use roster::{Player, Reason};
