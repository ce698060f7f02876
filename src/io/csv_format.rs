//! CSV format handling for the three ledger tables
//!
//! This module centralizes all CSV format concerns, providing:
//! - Row structures for deserialization of players, reasons, and fines
//! - Conversion from raw rows to domain types (and back for fines)
//! - Fines table serialization
//!
//! Monetary fields are carried as raw strings in the row structures and
//! parsed into `Decimal` in the conversion functions, so a malformed amount
//! produces a proper error instead of a serde type failure. All functions
//! are pure (no file I/O) for easy testing.

use crate::types::{Fine, FineError, PaidStatus, Player, Reason};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

/// Header of the fines table, in persisted column order
pub const FINES_HEADER: [&str; 6] = ["NAME", "DATE", "DATE_PAID", "REASON", "MONEY", "PAID?"];

/// Raw players table row: `NAME`
///
/// Row position in the table is the player's identity; no id column is
/// persisted.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PlayerRow {
    #[serde(rename = "NAME")]
    pub name: String,
}

/// Raw reasons table row: `REASON,PRICE`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReasonRow {
    #[serde(rename = "REASON")]
    pub reason: String,
    #[serde(rename = "PRICE")]
    pub price: String,
}

/// Raw fines table row: `NAME,DATE,DATE_PAID,REASON,MONEY,PAID?`
///
/// An empty `DATE_PAID` field deserializes to `None`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FineRow {
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "DATE")]
    pub date: String,
    #[serde(rename = "DATE_PAID")]
    pub date_paid: Option<String>,
    #[serde(rename = "REASON")]
    pub reason: String,
    #[serde(rename = "MONEY")]
    pub money: String,
    #[serde(rename = "PAID?")]
    pub paid: String,
}

/// Parse a monetary field into a non-negative `Decimal`
fn parse_amount(raw: &str) -> Result<Decimal, FineError> {
    let amount =
        Decimal::from_str(raw.trim()).map_err(|_| FineError::invalid_amount(raw.trim()))?;
    if amount.is_sign_negative() {
        return Err(FineError::invalid_amount(raw.trim()));
    }
    Ok(amount)
}

/// Parse a `PAID?` field: `SI`/`YES` or `NO`, case-insensitive
fn parse_paid_flag(raw: &str) -> Result<PaidStatus, FineError> {
    match raw.trim().to_uppercase().as_str() {
        "SI" | "YES" => Ok(PaidStatus::Yes),
        "NO" => Ok(PaidStatus::No),
        _ => Err(FineError::invalid_paid_flag(raw.trim())),
    }
}

/// Convert a raw players row to a [`Player`]
pub fn convert_player_row(row: PlayerRow) -> Player {
    Player { name: row.name }
}

/// Convert a raw reasons row to a [`Reason`]
///
/// # Errors
///
/// Returns an error when the price field is not a non-negative decimal.
pub fn convert_reason_row(row: ReasonRow) -> Result<Reason, FineError> {
    Ok(Reason {
        label: row.reason,
        amount: parse_amount(&row.price)?,
    })
}

/// Convert a raw fines row to a [`Fine`]
///
/// Validates the amount, the paid flag, and the flag⟺paid-date consistency
/// invariant: a row claiming `SI` without a paid date (or `NO` with one) is
/// rejected rather than loaded into a state the rest of the system assumes
/// impossible.
pub fn convert_fine_row(row: FineRow) -> Result<Fine, FineError> {
    let amount = parse_amount(&row.money)?;
    let status = parse_paid_flag(&row.paid)?;

    match (status, row.date_paid.is_some()) {
        (PaidStatus::Yes, false) => {
            return Err(FineError::parse(format!(
                "fine for '{}' is flagged paid but has no paid date",
                row.name
            )))
        }
        (PaidStatus::No, true) => {
            return Err(FineError::parse(format!(
                "fine for '{}' has a paid date but is flagged unpaid",
                row.name
            )))
        }
        _ => {}
    }

    Ok(Fine {
        player_name: row.name,
        imposed_on: row.date,
        paid_on: row.date_paid,
        reason: row.reason,
        amount,
        status,
    })
}

/// Convert a [`Fine`] back to its persisted row shape
pub fn fine_to_row(fine: &Fine) -> FineRow {
    FineRow {
        name: fine.player_name.clone(),
        date: fine.imposed_on.clone(),
        date_paid: fine.paid_on.clone(),
        reason: fine.reason.clone(),
        money: fine.amount.to_string(),
        paid: fine.status.as_str().to_string(),
    }
}

/// Write the fines table in CSV format
///
/// Writes the header row followed by every fine in collection order: a
/// full overwrite shape, not an append. An empty collection still produces
/// the header row.
pub fn write_fines_csv(fines: &[Fine], output: &mut dyn Write) -> Result<(), FineError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer.write_record(FINES_HEADER)?;
    for fine in fines {
        writer.serialize(fine_to_row(fine))?;
    }
    writer.flush()?;

    Ok(())
}
