//! Record store: loading and saving the ledger tables
//!
//! Three comma-delimited, UTF-8 CSV files live under one data directory:
//!
//! - `players.csv` with header `NAME`
//! - `reasons.csv` with header `REASON,PRICE`
//! - `fines.csv` with header `NAME,DATE,DATE_PAID,REASON,MONEY,PAID?`
//!
//! Row position is record identity; no index column is persisted. Loading
//! is a startup-time, all-or-nothing operation: an empty players or reasons
//! table is a fatal error (nothing can be fined without them), while an
//! empty fines table is a normal state for a fresh ledger.
//!
//! Saving is a full overwrite of `fines.csv`, performed only when the
//! working copy actually differs from the loaded one.

use crate::io::csv_format::{
    convert_fine_row, convert_player_row, convert_reason_row, write_fines_csv, FineRow, PlayerRow,
    ReasonRow,
};
use crate::types::{Fine, FineError, Player, Reason};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::{Path, PathBuf};

/// The three tables as loaded at startup
#[derive(Debug)]
pub struct LoadedTables {
    pub fines: Vec<Fine>,
    pub players: Vec<Player>,
    pub reasons: Vec<Reason>,
}

/// Result of a save request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The working copy equals the loaded copy field-for-field; no write
    /// was performed
    Unchanged,
    /// The fines table was overwritten
    Written,
}

/// Loads and persists the ledger tables under one data directory
#[derive(Debug, Clone)]
pub struct RecordStore {
    data_dir: PathBuf,
}

impl RecordStore {
    /// Create a store over the given data directory
    pub fn new(data_dir: PathBuf) -> Self {
        RecordStore { data_dir }
    }

    /// Path of the fines table
    pub fn fines_path(&self) -> PathBuf {
        self.data_dir.join("fines.csv")
    }

    /// Path of the players table
    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join("players.csv")
    }

    /// Path of the reasons table
    pub fn reasons_path(&self) -> PathBuf {
        self.data_dir.join("reasons.csv")
    }

    /// Load the three tables
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be opened or parsed, or if the
    /// players or reasons table has no rows. Load errors are fatal to the
    /// session; no write is ever attempted after a failed load.
    pub fn load(&self) -> Result<LoadedTables, FineError> {
        let players: Vec<Player> = read_rows::<PlayerRow>(&self.players_path())?
            .into_iter()
            .map(convert_player_row)
            .collect();
        if players.is_empty() {
            return Err(FineError::EmptyTable { table: "players" });
        }

        let reasons = read_rows::<ReasonRow>(&self.reasons_path())?
            .into_iter()
            .enumerate()
            .map(|(index, row)| convert_reason_row(row).map_err(|e| at_line(e, index)))
            .collect::<Result<Vec<Reason>, FineError>>()?;
        if reasons.is_empty() {
            return Err(FineError::EmptyTable { table: "reasons" });
        }

        let fines = read_rows::<FineRow>(&self.fines_path())?
            .into_iter()
            .enumerate()
            .map(|(index, row)| convert_fine_row(row).map_err(|e| at_line(e, index)))
            .collect::<Result<Vec<Fine>, FineError>>()?;

        Ok(LoadedTables {
            fines,
            players,
            reasons,
        })
    }

    /// Persist the working fines copy, unless nothing changed
    ///
    /// Compares `modified` against `original` field-for-field; when they are
    /// equal this is a no-op and [`SaveOutcome::Unchanged`] is returned.
    /// Otherwise `fines.csv` is fully overwritten (header plus every row in
    /// collection order).
    pub fn save(&self, original: &[Fine], modified: &[Fine]) -> Result<SaveOutcome, FineError> {
        if original == modified {
            return Ok(SaveOutcome::Unchanged);
        }

        let path = self.fines_path();
        let mut file = File::create(&path).map_err(|e| FineError::Io {
            message: format!("Failed to write '{}': {}", path.display(), e),
        })?;
        write_fines_csv(modified, &mut file)?;

        Ok(SaveOutcome::Written)
    }
}

/// Read and deserialize every row of one table
///
/// The reader trims whitespace from headers and fields, so an empty
/// `DATE_PAID` field (possibly padded) deserializes to `None`.
fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, FineError> {
    let file = File::open(path).map_err(|e| FineError::Io {
        message: format!("Failed to open '{}': {}", path.display(), e),
    })?;

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);
    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(FineError::from)
}

/// Attach a 1-based file line number to a position-less parse error
///
/// `row_index` is the 0-based data row index; line 1 is the header.
fn at_line(error: FineError, row_index: usize) -> FineError {
    match error {
        FineError::Parse {
            line: None,
            message,
        } => FineError::Parse {
            line: Some(row_index as u64 + 2),
            message,
        },
        other => other,
    }
}
