//! Fine lifecycle engine
//!
//! This module owns the fine state machine (states `{Unpaid, Paid}`,
//! initial `Unpaid`, terminal `Paid`) and the session context it runs in.
//!
//! The engine is split into two layers:
//!
//! - **Pure operations** ([`unpaid_indices`], [`doubling_candidates`],
//!   [`mark_paid`], [`double_amount`]) that mutate or query a fines
//!   collection and are unit-testable without any I/O.
//! - **Interactive flows** ([`create_fine_flow`], [`mark_paid_flow`],
//!   [`double_fine_flow`]) that drive the selector and date prompts over
//!   generic `BufRead`/`Write` handles and apply the pure operations.
//!
//! Every flow returns a [`FlowOutcome`]: a cancel at any sub-step aborts the
//! whole flow with no mutation and no save prompt, while a completed flow
//! asks whether to persist immediately.

use crate::core::date;
use crate::core::report;
use crate::core::selector::{self, Selection};
use crate::types::{Fine, FineError, Player, Reason};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

/// Affirmative answers to the save-now prompt, matched case-insensitively
const AFFIRMATIVE_TOKENS: [&str; 5] = ["S", "Y", "SI", "YES", "TRUE"];

/// What the caller should do after a lifecycle flow completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The ledger was modified; the user declined an immediate save
    Kept,
    /// The ledger was modified and the user asked to save right away
    SaveRequested,
    /// The user cancelled; nothing was modified and no save prompt ran
    Cancelled,
}

/// Per-session state: the reference tables and the two fines copies
///
/// The loaded fines are retained read-only for the save-on-no-op check;
/// all edits go to the working copy. Modeled as an explicit context object
/// passed to each operation rather than ambient globals.
#[derive(Debug)]
pub struct Session {
    /// Players table, immutable for the session
    pub players: Vec<Player>,

    /// Reasons table, immutable for the session
    pub reasons: Vec<Reason>,

    /// The fines exactly as loaded; never modified during the session
    pub original: Vec<Fine>,

    /// The working copy that lifecycle operations mutate
    pub fines: Vec<Fine>,
}

impl Session {
    /// Start a session over the loaded tables
    pub fn new(fines: Vec<Fine>, players: Vec<Player>, reasons: Vec<Reason>) -> Self {
        Session {
            players,
            reasons,
            original: fines.clone(),
            fines,
        }
    }
}

/// Indices of the fines that are still unpaid, in collection order
pub fn unpaid_indices(fines: &[Fine]) -> Vec<usize> {
    fines
        .iter()
        .enumerate()
        .filter(|(_, fine)| !fine.is_paid())
        .map(|(index, _)| index)
        .collect()
}

/// Whether a fine's imposed date counts as overdue relative to `today`
///
/// A fine qualifies only when its imposed month is strictly before the
/// current month and its imposed day is not after the current day. The year
/// is not considered, and a fine imposed in the current month never
/// qualifies; consequently nothing is ever overdue in January. This is the
/// historical ledger rule, kept as-is.
///
/// A date whose day/month components are not numeric (the shape check does
/// not validate digits) simply never qualifies.
fn is_overdue(fine: &Fine, today: NaiveDate) -> bool {
    match date::day_month(&fine.imposed_on) {
        Some((day, month)) => month < today.month() && day <= today.day(),
        None => false,
    }
}

/// Indices of the fines eligible for doubling: unpaid and overdue
pub fn doubling_candidates(fines: &[Fine], today: NaiveDate) -> Vec<usize> {
    fines
        .iter()
        .enumerate()
        .filter(|(_, fine)| !fine.is_paid() && is_overdue(fine, today))
        .map(|(index, _)| index)
        .collect()
}

/// Mark the fine at `index` as paid on `paid_on`
///
/// Sets the paid date and the paid flag together. Terminal: once paid, a
/// fine never leaves the Paid state and its amount is frozen.
///
/// # Errors
///
/// Returns an error if the index is out of range or the fine is already
/// paid. Through the interactive surface the second case is unreachable:
/// the selector's candidate set for payment never includes a paid fine.
pub fn mark_paid(fines: &mut [Fine], index: usize, paid_on: String) -> Result<(), FineError> {
    let fine = fines
        .get_mut(index)
        .ok_or(FineError::FineNotFound { index })?;
    if fine.is_paid() {
        return Err(FineError::AlreadyPaid { index });
    }
    fine.mark_paid(paid_on);
    Ok(())
}

/// Double the amount owed by the fine at `index`
///
/// Repeatable: each call doubles again while the fine stays unpaid. Never
/// touches the paid flag or the paid date.
///
/// # Errors
///
/// Returns an error if the index is out of range, the fine is already paid,
/// or the doubled amount would overflow.
pub fn double_amount(fines: &mut [Fine], index: usize) -> Result<(), FineError> {
    let fine = fines
        .get_mut(index)
        .ok_or(FineError::FineNotFound { index })?;
    if fine.is_paid() {
        return Err(FineError::AlreadyPaid { index });
    }
    fine.amount = fine
        .amount
        .checked_mul(Decimal::TWO)
        .ok_or(FineError::AmountOverflow { index })?;
    Ok(())
}

/// Prompt until a `dd/mm/yyyy`-shaped date is entered or the user cancels
///
/// Returns `None` on a cancel token or end of input. The shape check is the
/// only validation performed; see [`crate::core::date`].
pub fn prompt_date<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>, FineError> {
    loop {
        writeln!(output, "{prompt}")?;

        let Some(entry) = selector::read_line(input)? else {
            return Ok(None);
        };
        if selector::is_cancel(&entry) {
            return Ok(None);
        }

        match date::validate(&entry) {
            Ok(_) => return Ok(Some(entry)),
            Err(_) => writeln!(
                output,
                "The date format is not valid, enter it as {}; e.g. 26/11/2025",
                date::FORMAT_HINT
            )?,
        }
    }
}

/// Ask whether to persist the change right away
fn prompt_save_now<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<FlowOutcome, FineError> {
    writeln!(
        output,
        "Ledger updated. Save the changes to disk now? (S/N)"
    )?;
    let answer = selector::read_line(input)?.unwrap_or_default();
    if AFFIRMATIVE_TOKENS
        .iter()
        .any(|token| answer.eq_ignore_ascii_case(token))
    {
        Ok(FlowOutcome::SaveRequested)
    } else {
        Ok(FlowOutcome::Kept)
    }
}

/// Report a cancellation and return the Cancelled outcome
fn cancelled<W: Write>(output: &mut W) -> Result<FlowOutcome, FineError> {
    writeln!(output, "Operation cancelled.")?;
    Ok(FlowOutcome::Cancelled)
}

/// Record a new fine: select player, select reason, enter the imposed date
///
/// The new fine is appended unpaid with the reason's fixed amount; the
/// player name and reason label/amount are copied, not referenced. Any
/// cancelled sub-step aborts the whole flow with the collection unchanged.
pub fn create_fine_flow<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    output: &mut W,
) -> Result<FlowOutcome, FineError> {
    let player_candidates: Vec<usize> = (0..session.players.len()).collect();
    let player_index = match selector::select_index(
        input,
        output,
        "Enter the player code (Cancel/C to abort):",
        &report::list_players(&session.players),
        &player_candidates,
        "players",
    )? {
        Selection::Chosen(index) => index,
        Selection::Cancelled => return cancelled(output),
    };

    let reason_candidates: Vec<usize> = (0..session.reasons.len()).collect();
    let reason_index = match selector::select_index(
        input,
        output,
        "Enter the reason code (Cancel/C to abort):",
        &report::list_reasons(&session.reasons),
        &reason_candidates,
        "reasons",
    )? {
        Selection::Chosen(index) => index,
        Selection::Cancelled => return cancelled(output),
    };

    let imposed_on = match prompt_date(
        input,
        output,
        "Enter the date the fine was imposed (dd/mm/yyyy) (Cancel/C to abort)",
    )? {
        Some(date) => date,
        None => return cancelled(output),
    };

    // Snapshot the player and reason fields; the fine holds no live link
    // back to the reference tables.
    let player = &session.players[player_index];
    let reason = &session.reasons[reason_index];
    session.fines.push(Fine::new(
        player.name.clone(),
        imposed_on,
        reason.label.clone(),
        reason.amount,
    ));

    prompt_save_now(input, output)
}

/// Mark an unpaid fine as paid: select among the unpaid, enter the paid date
///
/// The selector's candidate set is restricted to unpaid fines; that
/// restriction is what makes paying twice impossible through this interface.
pub fn mark_paid_flow<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    output: &mut W,
) -> Result<FlowOutcome, FineError> {
    let candidates = unpaid_indices(&session.fines);
    if candidates.is_empty() {
        writeln!(output, "There are no unpaid fines.")?;
        return Ok(FlowOutcome::Cancelled);
    }

    let fine_index = match selector::select_index(
        input,
        output,
        "Enter the code of the fine to mark as paid (Cancel/C to abort):",
        &report::list_fines(&session.fines, &candidates),
        &candidates,
        "unpaid fines",
    )? {
        Selection::Chosen(index) => index,
        Selection::Cancelled => return cancelled(output),
    };

    let paid_on = match prompt_date(
        input,
        output,
        "Enter the date the fine was paid (dd/mm/yyyy) (Cancel/C to abort)",
    )? {
        Some(date) => date,
        None => return cancelled(output),
    };

    mark_paid(&mut session.fines, fine_index, paid_on)?;

    prompt_save_now(input, output)
}

/// Double an overdue unpaid fine: select among the eligible set
///
/// Eligibility is unpaid **and** overdue relative to `today`; see
/// [`doubling_candidates`] for the exact rule. Doubling compounds on
/// repeated invocations.
pub fn double_fine_flow<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    output: &mut W,
    today: NaiveDate,
) -> Result<FlowOutcome, FineError> {
    let candidates = doubling_candidates(&session.fines, today);
    if candidates.is_empty() {
        writeln!(output, "There are no overdue unpaid fines to double.")?;
        return Ok(FlowOutcome::Cancelled);
    }

    let fine_index = match selector::select_index(
        input,
        output,
        "Enter the code of the fine to double (Cancel/C to abort):",
        &report::list_fines(&session.fines, &candidates),
        &candidates,
        "overdue unpaid fines",
    )? {
        Selection::Chosen(index) => index,
        Selection::Cancelled => return cancelled(output),
    };

    double_amount(&mut session.fines, fine_index)?;

    prompt_save_now(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaidStatus;
    use rstest::rstest;
    use std::io::Cursor;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn fine(name: &str, imposed: &str, amount: Decimal) -> Fine {
        Fine::new(
            name.to_string(),
            imposed.to_string(),
            "Late".to_string(),
            amount,
        )
    }

    fn test_session(fines: Vec<Fine>) -> Session {
        Session::new(
            fines,
            vec![
                Player {
                    name: "Ana García".to_string(),
                },
                Player {
                    name: "Beto López".to_string(),
                },
            ],
            vec![Reason {
                label: "Late".to_string(),
                amount: Decimal::new(50, 1),
            }],
        )
    }

    fn run_create(session: &mut Session, script: &str) -> FlowOutcome {
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        create_fine_flow(session, &mut input, &mut output).unwrap()
    }

    // --- pure operations ---

    #[test]
    fn test_unpaid_indices_excludes_paid_fines() {
        let mut fines = vec![
            fine("Ana García", "01/01/2025", Decimal::new(5, 0)),
            fine("Beto López", "02/01/2025", Decimal::new(5, 0)),
        ];
        mark_paid(&mut fines, 0, "15/01/2025".to_string()).unwrap();

        assert_eq!(unpaid_indices(&fines), vec![1]);
    }

    #[test]
    fn test_mark_paid_sets_date_and_flag() {
        let mut fines = vec![fine("Ana García", "01/01/2025", Decimal::new(5, 0))];

        mark_paid(&mut fines, 0, "15/01/2025".to_string()).unwrap();

        assert_eq!(fines[0].paid_on.as_deref(), Some("15/01/2025"));
        assert_eq!(fines[0].status, PaidStatus::Yes);
    }

    #[test]
    fn test_mark_paid_twice_is_rejected() {
        let mut fines = vec![fine("Ana García", "01/01/2025", Decimal::new(5, 0))];
        mark_paid(&mut fines, 0, "15/01/2025".to_string()).unwrap();

        let result = mark_paid(&mut fines, 0, "16/01/2025".to_string());
        assert!(matches!(result, Err(FineError::AlreadyPaid { index: 0 })));
        // The first payment is untouched
        assert_eq!(fines[0].paid_on.as_deref(), Some("15/01/2025"));
    }

    #[test]
    fn test_mark_paid_out_of_range() {
        let mut fines = vec![fine("Ana García", "01/01/2025", Decimal::new(5, 0))];
        let result = mark_paid(&mut fines, 3, "15/01/2025".to_string());
        assert!(matches!(result, Err(FineError::FineNotFound { index: 3 })));
    }

    #[test]
    fn test_double_amount_compounds() {
        let mut fines = vec![fine("Ana García", "01/01/2025", Decimal::new(50, 1))];

        double_amount(&mut fines, 0).unwrap();
        assert_eq!(fines[0].amount, Decimal::new(100, 1));

        double_amount(&mut fines, 0).unwrap();
        assert_eq!(fines[0].amount, Decimal::new(200, 1));
    }

    #[test]
    fn test_double_amount_never_touches_paid_state() {
        let mut fines = vec![fine("Ana García", "01/01/2025", Decimal::new(5, 0))];

        double_amount(&mut fines, 0).unwrap();

        assert_eq!(fines[0].status, PaidStatus::No);
        assert_eq!(fines[0].paid_on, None);
    }

    #[test]
    fn test_double_amount_rejects_paid_fine() {
        let mut fines = vec![fine("Ana García", "01/01/2025", Decimal::new(5, 0))];
        mark_paid(&mut fines, 0, "15/01/2025".to_string()).unwrap();

        let result = double_amount(&mut fines, 0);
        assert!(matches!(result, Err(FineError::AlreadyPaid { index: 0 })));
        assert_eq!(fines[0].amount, Decimal::new(5, 0));
    }

    #[rstest]
    // Imposed 15/03: month 3 < 6 and day 15 <= 20
    #[case::earlier_month_earlier_day("15/03/2025", 2025, 6, 20, true)]
    // Same month never qualifies, even when the day has passed
    #[case::same_month("05/06/2025", 2025, 6, 20, false)]
    // Day after today disqualifies even an earlier month
    #[case::later_day("25/03/2025", 2025, 6, 20, false)]
    // Day equal to today qualifies
    #[case::equal_day("20/03/2025", 2025, 6, 20, true)]
    // The year is ignored: a fine from a past year with a later month does
    // not qualify
    #[case::past_year_later_month("15/12/2024", 2025, 6, 20, false)]
    // In January no month can be strictly smaller, so nothing qualifies
    #[case::january_is_empty("01/12/2024", 2025, 1, 31, false)]
    // Non-numeric components never qualify
    #[case::non_numeric_components("ab/cd/efgh", 2025, 6, 20, false)]
    fn test_doubling_eligibility(
        #[case] imposed: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] eligible: bool,
    ) {
        let fines = vec![fine("Ana García", imposed, Decimal::new(5, 0))];
        let candidates = doubling_candidates(&fines, ymd(year, month, day));
        assert_eq!(!candidates.is_empty(), eligible);
    }

    #[test]
    fn test_doubling_candidates_exclude_paid_fines() {
        let mut fines = vec![
            fine("Ana García", "15/03/2025", Decimal::new(5, 0)),
            fine("Beto López", "15/03/2025", Decimal::new(5, 0)),
        ];
        mark_paid(&mut fines, 0, "01/04/2025".to_string()).unwrap();

        assert_eq!(doubling_candidates(&fines, ymd(2025, 6, 20)), vec![1]);
    }

    // --- interactive flows ---

    #[test]
    fn test_create_fine_flow_appends_snapshot() {
        let mut session = test_session(vec![]);

        let outcome = run_create(&mut session, "0\n0\n01/01/2025\nN\n");

        assert_eq!(outcome, FlowOutcome::Kept);
        assert_eq!(session.fines.len(), 1);
        let created = &session.fines[0];
        assert_eq!(created.player_name, "Ana García");
        assert_eq!(created.imposed_on, "01/01/2025");
        assert_eq!(created.paid_on, None);
        assert_eq!(created.reason, "Late");
        assert_eq!(created.amount, Decimal::new(50, 1));
        assert_eq!(created.status, PaidStatus::No);
    }

    #[test]
    fn test_create_fine_flow_save_requested() {
        let mut session = test_session(vec![]);
        let outcome = run_create(&mut session, "1\n0\n01/01/2025\ns\n");
        assert_eq!(outcome, FlowOutcome::SaveRequested);
        assert_eq!(session.fines[0].player_name, "Beto López");
    }

    #[rstest]
    #[case::cancel_at_player("c\n")]
    #[case::cancel_at_reason("0\ncancel\n")]
    #[case::cancel_at_date("0\n0\nC\n")]
    fn test_create_fine_flow_cancel_leaves_ledger_unchanged(#[case] script: &str) {
        let mut session = test_session(vec![]);
        let outcome = run_create(&mut session, script);
        assert_eq!(outcome, FlowOutcome::Cancelled);
        assert!(session.fines.is_empty());
        assert_eq!(session.fines, session.original);
    }

    #[test]
    fn test_create_fine_flow_reprompts_on_bad_date() {
        let mut session = test_session(vec![]);
        let mut input = Cursor::new("0\n0\n1/1/2025\n01-01-2025\n01/01/2025\nN\n".to_string());
        let mut output = Vec::new();

        let outcome = create_fine_flow(&mut session, &mut input, &mut output).unwrap();

        assert_eq!(outcome, FlowOutcome::Kept);
        assert_eq!(session.fines.len(), 1);
        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(
            transcript
                .matches("The date format is not valid")
                .count(),
            2
        );
    }

    #[test]
    fn test_mark_paid_flow_excludes_paid_fines_from_candidates() {
        let mut fines = vec![
            fine("Ana García", "01/01/2025", Decimal::new(5, 0)),
            fine("Beto López", "02/01/2025", Decimal::new(5, 0)),
        ];
        mark_paid(&mut fines, 0, "15/01/2025".to_string()).unwrap();
        let mut session = test_session(fines);

        // Index 0 is paid, so entering it must re-prompt; index 1 succeeds.
        let mut input = Cursor::new("0\n1\n20/01/2025\nN\n".to_string());
        let mut output = Vec::new();
        let outcome = mark_paid_flow(&mut session, &mut input, &mut output).unwrap();

        assert_eq!(outcome, FlowOutcome::Kept);
        assert!(session.fines[1].is_paid());
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("\"0\" is not an index of the unpaid fines list"));
        // The listing never shows the paid row
        assert!(!transcript.contains(" 0 - Ana García"));
    }

    #[test]
    fn test_mark_paid_flow_with_no_unpaid_fines() {
        let mut fines = vec![fine("Ana García", "01/01/2025", Decimal::new(5, 0))];
        mark_paid(&mut fines, 0, "15/01/2025".to_string()).unwrap();
        let mut session = test_session(fines);

        let mut input = Cursor::new(String::new());
        let mut output = Vec::new();
        let outcome = mark_paid_flow(&mut session, &mut input, &mut output).unwrap();

        assert_eq!(outcome, FlowOutcome::Cancelled);
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("There are no unpaid fines."));
    }

    #[test]
    fn test_mark_paid_flow_cancel_at_date_leaves_fine_unpaid() {
        let mut session = test_session(vec![fine("Ana García", "01/01/2025", Decimal::new(5, 0))]);

        let mut input = Cursor::new("0\nc\n".to_string());
        let mut output = Vec::new();
        let outcome = mark_paid_flow(&mut session, &mut input, &mut output).unwrap();

        assert_eq!(outcome, FlowOutcome::Cancelled);
        assert!(!session.fines[0].is_paid());
        assert_eq!(session.fines, session.original);
    }

    #[test]
    fn test_double_fine_flow_doubles_selected_fine() {
        let mut session = test_session(vec![
            fine("Ana García", "15/03/2025", Decimal::new(5, 0)),
            fine("Beto López", "05/06/2025", Decimal::new(5, 0)),
        ]);

        // Only index 0 is overdue on 20/06; index 1 is same-month.
        let mut input = Cursor::new("1\n0\nN\n".to_string());
        let mut output = Vec::new();
        let outcome =
            double_fine_flow(&mut session, &mut input, &mut output, ymd(2025, 6, 20)).unwrap();

        assert_eq!(outcome, FlowOutcome::Kept);
        assert_eq!(session.fines[0].amount, Decimal::new(10, 0));
        assert_eq!(session.fines[1].amount, Decimal::new(5, 0));
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("\"1\" is not an index of the overdue unpaid fines list"));
    }

    #[test]
    fn test_double_fine_flow_with_no_candidates() {
        let mut session = test_session(vec![fine("Ana García", "05/06/2025", Decimal::new(5, 0))]);

        let mut input = Cursor::new(String::new());
        let mut output = Vec::new();
        let outcome =
            double_fine_flow(&mut session, &mut input, &mut output, ymd(2025, 6, 20)).unwrap();

        assert_eq!(outcome, FlowOutcome::Cancelled);
        assert_eq!(session.fines[0].amount, Decimal::new(5, 0));
    }

    #[rstest]
    #[case::short_yes("s\n", FlowOutcome::SaveRequested)]
    #[case::english_yes("Y\n", FlowOutcome::SaveRequested)]
    #[case::long_yes("yes\n", FlowOutcome::SaveRequested)]
    #[case::spanish_yes("SI\n", FlowOutcome::SaveRequested)]
    #[case::declined("n\n", FlowOutcome::Kept)]
    #[case::anything_else("later\n", FlowOutcome::Kept)]
    #[case::end_of_input("", FlowOutcome::Kept)]
    fn test_save_now_prompt_tokens(#[case] answer: &str, #[case] expected: FlowOutcome) {
        let mut session = test_session(vec![]);
        let script = format!("0\n0\n01/01/2025\n{answer}");
        assert_eq!(run_create(&mut session, &script), expected);
    }
}
