//! Reporting: listings, the textual summary, and chart aggregation
//!
//! All functions here are pure (no I/O) for easy testing. Listings label
//! rows with their original collection indices (including when only a
//! subset is listed) because those indices are what the selection prompts
//! accept.

use crate::types::{Fine, Player, Reason};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Render the players table as numbered rows for a selection prompt
pub fn list_players(players: &[Player]) -> String {
    let mut listing = String::new();
    for (index, player) in players.iter().enumerate() {
        let _ = writeln!(listing, " {index} - {}", player.name);
    }
    listing
}

/// Render the reasons table as numbered rows for a selection prompt
pub fn list_reasons(reasons: &[Reason]) -> String {
    let mut listing = String::new();
    for (index, reason) in reasons.iter().enumerate() {
        let _ = writeln!(listing, " {index} - {} ({}€)", reason.label, reason.amount);
    }
    listing
}

/// Render a subset of the fines as numbered rows for a selection prompt
///
/// Only the rows named in `indices` are listed, but each row is labeled with
/// its original position in `fines`, never with a renumbered subset index.
pub fn list_fines(fines: &[Fine], indices: &[usize]) -> String {
    let mut listing = String::new();
    for &index in indices {
        let Some(fine) = fines.get(index) else {
            continue;
        };
        let paid_on = fine.paid_on.as_deref().unwrap_or("-");
        let _ = writeln!(
            listing,
            " {index} - {} | {} | {} | {} | {}€ | {}",
            fine.player_name, fine.imposed_on, paid_on, fine.reason, fine.amount, fine.status
        );
    }
    listing
}

/// Render the whole ledger as the shareable text summary
///
/// Display numbering is 1-based and independent of the storage indices. The
/// paid-date line is included only for paid fines.
pub fn render_summary(fines: &[Fine]) -> String {
    let mut msg = String::new();
    for (position, fine) in fines.iter().enumerate() {
        let _ = write!(
            msg,
            "Fine {}\n\t- Name: {}\n\t- Date: {}",
            position + 1,
            fine.player_name,
            fine.imposed_on
        );
        if let Some(paid_on) = &fine.paid_on {
            let _ = write!(msg, "\n\t- Date paid: {paid_on}");
        }
        let _ = write!(
            msg,
            "\n\t- Reason: {}\n\t- Amount: {}€\n\t- Paid: {}\n",
            fine.reason, fine.amount, fine.status
        );
    }
    msg
}

/// Count fines per player first name, most-frequent first
///
/// Grouping is by the first whitespace-delimited token of the player name,
/// so two players sharing a first name land in the same bucket. Ties are
/// broken by label so the ordering is deterministic.
pub fn fines_per_player(fines: &[Fine]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for fine in fines {
        let first_name = fine
            .player_name
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_string();
        *counts.entry(first_name).or_insert(0) += 1;
    }

    let mut per_player: Vec<(String, usize)> = counts.into_iter().collect();
    per_player.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    per_player
}
