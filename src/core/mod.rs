//! Core business logic module
//!
//! This module contains the fine lifecycle components:
//! - `date` - dd/mm/yyyy shape validation and component extraction
//! - `selector` - index selection against original-position candidate sets
//! - `engine` - the session context and the lifecycle state machine
//! - `report` - listings, the text summary, and chart aggregation

pub mod date;
pub mod engine;
pub mod report;
pub mod selector;

pub use engine::{FlowOutcome, Session};
pub use selector::Selection;
