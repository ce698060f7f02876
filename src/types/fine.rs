//! Fine-related types for the fine ledger
//!
//! This module defines the `Fine` record and its paid status. A fine is the
//! only mutable entity in the system: it is created unpaid, may have its
//! amount doubled while unpaid, and is eventually marked paid exactly once.

use rust_decimal::Decimal;
use std::fmt;

/// Paid status of a fine
///
/// Serialized as `NO` / `SI` in the fines table, matching the historical
/// file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaidStatus {
    /// The fine has not been paid yet
    No,
    /// The fine has been paid
    Yes,
}

impl PaidStatus {
    /// The serialized form of the status (`NO` / `SI`)
    pub fn as_str(&self) -> &'static str {
        match self {
            PaidStatus::No => "NO",
            PaidStatus::Yes => "SI",
        }
    }
}

impl fmt::Display for PaidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A disciplinary fine charged to a player
///
/// The player name, reason label, and amount are snapshots taken from the
/// reference tables at creation time, not live references: a later edit of
/// the players or reasons table does not propagate to existing fines.
///
/// Identity is positional: a fine is addressed by its row position in the
/// collection, and that position is what the user types at selection prompts.
///
/// # Invariant
///
/// `status == PaidStatus::Yes` if and only if `paid_on` is present.
/// [`Fine::mark_paid`] is the only mutator that touches either field and it
/// always sets both.
#[derive(Debug, Clone, PartialEq)]
pub struct Fine {
    /// Full name of the fined player, copied from the players table
    pub player_name: String,

    /// Date the fine was imposed, `dd/mm/yyyy`
    ///
    /// Dates are stored and compared as text; only the doubling predicate
    /// extracts numeric day/month components.
    pub imposed_on: String,

    /// Date the fine was paid, `dd/mm/yyyy`; absent while unpaid
    pub paid_on: Option<String>,

    /// Reason label, copied from the reasons table
    pub reason: String,

    /// Amount owed; starts at the reason's fixed amount and doubles while
    /// the fine is unpaid and overdue
    pub amount: Decimal,

    /// Paid flag, kept consistent with `paid_on` presence
    pub status: PaidStatus,
}

impl Fine {
    /// Create a new unpaid fine
    ///
    /// Snapshots the player name and the reason's label and amount.
    pub fn new(player_name: String, imposed_on: String, reason: String, amount: Decimal) -> Self {
        Fine {
            player_name,
            imposed_on,
            paid_on: None,
            reason,
            amount,
            status: PaidStatus::No,
        }
    }

    /// Whether the fine has been paid
    pub fn is_paid(&self) -> bool {
        matches!(self.status, PaidStatus::Yes)
    }

    /// Mark the fine as paid on the given date
    ///
    /// Sets the paid date and the paid flag together, so the flag⟺date
    /// invariant holds by construction.
    pub fn mark_paid(&mut self, paid_on: String) {
        self.paid_on = Some(paid_on);
        self.status = PaidStatus::Yes;
    }
}
