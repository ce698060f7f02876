//! Error types for the fine ledger
//!
//! This module defines all error types that can occur while loading, editing,
//! and persisting the fine ledger. Errors are designed to be descriptive and
//! user-friendly for terminal output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: file not found, permission denied, etc.
//! - **CSV Parsing Errors**: malformed CSV, invalid field contents, etc.
//! - **Reference Data Errors**: empty players or reasons table at startup
//! - **Lifecycle Errors**: paying or doubling a fine that is not eligible
//! - **Collaborator Errors**: clipboard or chart rendering failures

use thiserror::Error;

/// Main error type for the fine ledger
///
/// This enum represents all possible errors that can occur during a session.
/// Each variant includes relevant context to help diagnose and resolve the
/// issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FineError {
    /// I/O error occurred while reading or writing files
    ///
    /// This is typically a fatal error (file not found, permissions, disk
    /// full, etc.).
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred while loading one of the tables
    ///
    /// Loading is all-or-nothing, so a malformed row aborts the load.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A reference table (players or reasons) has no rows
    ///
    /// This is a fatal startup error: without players and reasons no fine
    /// can be created, so the session does not start.
    #[error("The {table} table is empty; add at least one row before starting")]
    EmptyTable {
        /// Name of the offending table
        table: &'static str,
    },

    /// A date string does not match the dd/mm/yyyy shape
    #[error("Invalid date '{input}': expected dd/mm/yyyy")]
    InvalidDate {
        /// The rejected input
        input: String,
    },

    /// A paid flag field held something other than SI, YES or NO
    #[error("Invalid paid flag '{value}': expected SI or NO")]
    InvalidPaidFlag {
        /// The rejected field contents
        value: String,
    },

    /// A monetary field could not be parsed as a decimal amount
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The rejected field contents
        amount: String,
    },

    /// A fine index does not exist in the collection
    #[error("No fine at index {index}")]
    FineNotFound {
        /// The out-of-range index
        index: usize,
    },

    /// A lifecycle operation was applied to a fine that is already paid
    ///
    /// Unreachable through the interactive surface, where the selector only
    /// offers unpaid fines; returned to library callers that bypass it.
    #[error("Fine {index} is already paid")]
    AlreadyPaid {
        /// Index of the paid fine
        index: usize,
    },

    /// Doubling would overflow the amount
    #[error("Doubling fine {index} would overflow its amount")]
    AmountOverflow {
        /// Index of the fine whose amount would overflow
        index: usize,
    },

    /// The system clipboard could not be reached
    ///
    /// Informational: the summary is printed instead and the session
    /// continues.
    #[error("Clipboard unavailable: {message}")]
    Clipboard {
        /// Description of the clipboard failure
        message: String,
    },

    /// Chart rendering failed
    ///
    /// Informational: reported to the user and the session continues.
    #[error("Chart rendering failed: {message}")]
    Chart {
        /// Description of the rendering failure
        message: String,
    },
}

// Conversion from io::Error to FineError
impl From<std::io::Error> for FineError {
    fn from(error: std::io::Error) -> Self {
        FineError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to FineError
impl From<csv::Error> for FineError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        FineError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

impl FineError {
    /// Create a Parse error without position information
    pub fn parse(message: impl Into<String>) -> Self {
        FineError::Parse {
            line: None,
            message: message.into(),
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(input: &str) -> Self {
        FineError::InvalidDate {
            input: input.to_string(),
        }
    }

    /// Create an InvalidPaidFlag error
    pub fn invalid_paid_flag(value: &str) -> Self {
        FineError::InvalidPaidFlag {
            value: value.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        FineError::InvalidAmount {
            amount: amount.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::io_error(
        FineError::Io { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        FineError::Parse { line: Some(3), message: "Invalid field".to_string() },
        "CSV parse error at line 3: Invalid field"
    )]
    #[case::parse_error_without_line(
        FineError::Parse { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::empty_table(
        FineError::EmptyTable { table: "players" },
        "The players table is empty; add at least one row before starting"
    )]
    #[case::invalid_date(
        FineError::InvalidDate { input: "1/1/2025".to_string() },
        "Invalid date '1/1/2025': expected dd/mm/yyyy"
    )]
    #[case::invalid_paid_flag(
        FineError::InvalidPaidFlag { value: "MAYBE".to_string() },
        "Invalid paid flag 'MAYBE': expected SI or NO"
    )]
    #[case::fine_not_found(
        FineError::FineNotFound { index: 7 },
        "No fine at index 7"
    )]
    #[case::already_paid(
        FineError::AlreadyPaid { index: 0 },
        "Fine 0 is already paid"
    )]
    #[case::amount_overflow(
        FineError::AmountOverflow { index: 2 },
        "Doubling fine 2 would overflow its amount"
    )]
    fn test_error_display(#[case] error: FineError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: FineError = io_error.into();
        assert!(matches!(error, FineError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_helper_constructors() {
        assert_eq!(
            FineError::invalid_date("xx"),
            FineError::InvalidDate {
                input: "xx".to_string()
            }
        );
        assert_eq!(
            FineError::invalid_amount("abc"),
            FineError::InvalidAmount {
                amount: "abc".to_string()
            }
        );
        assert_eq!(
            FineError::parse("bad row"),
            FineError::Parse {
                line: None,
                message: "bad row".to_string()
            }
        );
    }
}
