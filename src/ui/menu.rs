//! The interactive menu loop
//!
//! One session: a loop over the numbered menu, dispatching to the lifecycle
//! flows, the reporting commands, and the store. Generic over
//! `BufRead`/`Write` so end-to-end tests can drive a whole session through
//! in-memory buffers.
//!
//! Persistence wiring follows the tri-state flow outcome: `SaveRequested`
//! saves immediately, `Kept` and `Cancelled` do not, and the explicit
//! `S`/`Save` command saves on demand. A save that would write identical
//! data prints an informational message instead of touching the file.

use crate::core::engine::{self, FlowOutcome, Session};
use crate::core::{report, selector};
use crate::io::{RecordStore, SaveOutcome};
use crate::types::FineError;
use crate::ui::{charts, clipboard};
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use std::path::Path;

const MENU: &str = "What do you want to do?\n\
    \t1 - Record a new fine\n\
    \t2 - Mark a fine as paid\n\
    \t3 - Double a fine\n\
    \t4 - Copy the summary message\n\
    \t5 - Show the charts\n\
    \tS/Save - Save the changes\n\
    \tE/Exit - Quit\n";

/// Run the menu loop until the user exits (or the input ends)
///
/// `today` anchors the doubling-eligibility predicate for the whole
/// session; the binary passes the current local date.
pub fn run_session<R: BufRead, W: Write>(
    store: &RecordStore,
    session: &mut Session,
    input: &mut R,
    output: &mut W,
    charts_path: &Path,
    today: NaiveDate,
) -> Result<(), FineError> {
    loop {
        write!(output, "{MENU}")?;

        let Some(entry) = selector::read_line(input)? else {
            break;
        };
        match entry.to_uppercase().as_str() {
            "1" => {
                let outcome = engine::create_fine_flow(session, input, output)?;
                apply_outcome(store, session, outcome, output)?;
            }
            "2" => {
                let outcome = engine::mark_paid_flow(session, input, output)?;
                apply_outcome(store, session, outcome, output)?;
            }
            "3" => {
                let outcome = engine::double_fine_flow(session, input, output, today)?;
                apply_outcome(store, session, outcome, output)?;
            }
            "4" => copy_summary(session, output)?,
            "5" => show_charts(session, output, charts_path)?,
            "S" | "SAVE" => save(store, session, output)?,
            "E" | "EXIT" => break,
            other => writeln!(output, "\"{other}\" is not a valid option")?,
        }
    }

    Ok(())
}

/// Persist if the flow asked for it; cancelled flows trigger no save prompt
fn apply_outcome<W: Write>(
    store: &RecordStore,
    session: &Session,
    outcome: FlowOutcome,
    output: &mut W,
) -> Result<(), FineError> {
    match outcome {
        FlowOutcome::SaveRequested => save(store, session, output),
        FlowOutcome::Kept | FlowOutcome::Cancelled => Ok(()),
    }
}

fn save<W: Write>(
    store: &RecordStore,
    session: &Session,
    output: &mut W,
) -> Result<(), FineError> {
    match store.save(&session.original, &session.fines)? {
        SaveOutcome::Unchanged => writeln!(
            output,
            "No information has been modified, make a change before saving."
        )?,
        SaveOutcome::Written => writeln!(output, "Information saved successfully.")?,
    }
    Ok(())
}

/// Copy the summary to the clipboard, falling back to plain printing
fn copy_summary<W: Write>(session: &Session, output: &mut W) -> Result<(), FineError> {
    let summary = report::render_summary(&session.fines);
    match clipboard::copy_text(&summary) {
        Ok(()) => writeln!(output, "The following message has been copied:\n{summary}")?,
        Err(error) => {
            writeln!(output, "{error}")?;
            writeln!(output, "The message could not be copied:\n{summary}")?;
        }
    }
    Ok(())
}

/// Render the charts, reporting failures without ending the session
fn show_charts<W: Write>(
    session: &Session,
    output: &mut W,
    charts_path: &Path,
) -> Result<(), FineError> {
    let per_player = report::fines_per_player(&session.fines);
    if per_player.is_empty() {
        writeln!(output, "There are no fines to chart yet.")?;
        return Ok(());
    }

    match charts::render(&per_player, charts_path) {
        Ok(()) => writeln!(output, "Charts written to {}", charts_path.display())?,
        Err(error) => writeln!(output, "{error}")?,
    }
    Ok(())
}
