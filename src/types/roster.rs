//! Reference tables: players and fine reasons
//!
//! Both tables are immutable once loaded. Rows are identified by their
//! position in the table; that position is what selection prompts display
//! and accept. Fines copy fields out of these rows at creation time rather
//! than holding a live reference.

use rust_decimal::Decimal;

/// A team member that can be fined
///
/// Identified by row position in the players table. Fines reference players
/// by copied name, so renaming a player does not touch existing fines.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Full name, e.g. `"Ana García"`
    pub name: String,
}

/// A catalog entry pairing a fine description with its fixed amount
///
/// New fines copy the label and amount at creation time; editing a reason
/// afterwards leaves existing fines at the amount they were created with.
#[derive(Debug, Clone, PartialEq)]
pub struct Reason {
    /// Human-readable description, e.g. `"Late to training"`
    pub label: String,

    /// Fixed amount charged when a fine with this reason is created
    pub amount: Decimal,
}
