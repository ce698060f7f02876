//! Clipboard collaborator
//!
//! Copies the rendered text summary to the system clipboard. In a headless
//! session there may be no clipboard to talk to; the caller reports the
//! failure and prints the summary instead, so the command never aborts the
//! session.

use crate::types::FineError;

/// Place `text` on the system clipboard
pub fn copy_text(text: &str) -> Result<(), FineError> {
    let mut clipboard = arboard::Clipboard::new().map_err(clipboard_error)?;
    clipboard.set_text(text.to_string()).map_err(clipboard_error)
}

fn clipboard_error(error: arboard::Error) -> FineError {
    FineError::Clipboard {
        message: error.to_string(),
    }
}
