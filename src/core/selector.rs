//! Index selection against a candidate set
//!
//! Every record in the ledger is addressed by its position in its
//! collection, and that position is what the user types at a prompt. When an
//! operation only applies to a subset (for example, the unpaid fines), the
//! listing shows the subset but keeps the **original** collection indices:
//! the displayed, selectable index set is exactly the acceptable index set,
//! and a filtered view is never renumbered.
//!
//! The selector is generic over `BufRead`/`Write`, so tests drive it with
//! in-memory buffers the same way the interactive session drives it with
//! locked stdin/stdout.

use crate::types::FineError;
use std::io::{BufRead, Write};

/// Cancel tokens accepted at every prompt, matched case-insensitively
pub const CANCEL_TOKENS: [&str; 2] = ["C", "CANCEL"];

/// Result of a selection prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The user chose a valid candidate index (an original collection
    /// position)
    Chosen(usize),
    /// The user typed a cancel token (or the input ended)
    Cancelled,
}

/// Whether `input` is one of the cancel tokens, in any casing
pub fn is_cancel(input: &str) -> bool {
    CANCEL_TOKENS
        .iter()
        .any(|token| input.eq_ignore_ascii_case(token))
}

/// Read one line, trimmed; `None` at end of input
pub fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, FineError> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt until the user picks a valid candidate index or cancels
///
/// Each round prints `prompt` followed by `listing` (the numbered rows the
/// indices refer to), then reads a line. A cancel token returns
/// [`Selection::Cancelled`]; an entry that is not a non-negative integer, or
/// an integer not present in `candidates`, prints a validation message
/// naming `subject` and prompts again; a valid candidate returns
/// [`Selection::Chosen`].
///
/// # Arguments
///
/// * `input` - line source (stdin or a test buffer)
/// * `output` - prompt sink (stdout or a test buffer)
/// * `prompt` - the question shown above the listing
/// * `listing` - pre-rendered rows labeled with original indices
/// * `candidates` - the acceptable original indices
/// * `subject` - what the listing contains, for the validation message
pub fn select_index<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    listing: &str,
    candidates: &[usize],
    subject: &str,
) -> Result<Selection, FineError> {
    loop {
        writeln!(output, "{prompt}")?;
        write!(output, "{listing}")?;

        let Some(entry) = read_line(input)? else {
            return Ok(Selection::Cancelled);
        };
        if is_cancel(&entry) {
            return Ok(Selection::Cancelled);
        }

        match entry.parse::<usize>() {
            Ok(index) if candidates.contains(&index) => return Ok(Selection::Chosen(index)),
            _ => writeln!(output, "\"{entry}\" is not an index of the {subject} list")?,
        }
    }
}
