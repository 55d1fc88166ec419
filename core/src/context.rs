//! Solve context for UI communication.
//!
//! The `SolveContext` struct is a plain data snapshot the host UI reads after
//! every key event: where the cursor is, which cells to highlight, which
//! clues are current, and whether anything deserves a warning.

use serde::Serialize;

use crate::cursor::Cursor;
use crate::entry::EntrySlot;
use crate::grid::Position;
use crate::session::SolveSession;

/// Snapshot of session state for rendering.
///
/// # Fields
///
/// - `cursor`: Active cell and direction
/// - `highlights`: Other cells of the active word
/// - `current_entry`: Entry index of the active word (clue shown as current)
/// - `cross_entry`: Entry index of the crossing word, if the cell is checked
/// - `current_label`: Display label of the active word, e.g. "4A"
/// - `duplicate_answer`: The active word, when another filled entry repeats it
/// - `completed_entries` / `total_entries`: Progress counters
/// - `filled`: Every open cell holds a letter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SolveContext {
    pub cursor: Cursor,
    pub highlights: Vec<Position>,
    pub current_entry: Option<usize>,
    pub cross_entry: Option<usize>,
    pub current_label: String,
    pub duplicate_answer: Option<String>,
    pub completed_entries: usize,
    pub total_entries: usize,
    pub filled: bool,
}

impl SolveContext {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the session state into this context.
    pub fn sync_from(&mut self, session: &SolveSession) {
        let index = session.index();
        let cursor = session.cursor();
        let entry_at = |dir| match index.slot(cursor.position, dir) {
            EntrySlot::Present { entry, .. } => Some(entry),
            EntrySlot::Absent => None,
        };

        self.cursor = cursor;
        self.highlights = session.highlights();
        self.current_entry = entry_at(cursor.direction);
        self.cross_entry = entry_at(cursor.direction.other());
        self.current_label = self
            .current_entry
            .and_then(|i| index.entry(i))
            .map(|entry| entry.label())
            .unwrap_or_default();
        self.duplicate_answer = if session.config().warn_duplicate_answers {
            self.current_entry
                .and_then(|i| index.entry(i))
                .and_then(|current| {
                    let word = current.word(session.grid())?;
                    let repeats = index.entries().iter().any(|other| {
                        other.index != current.index
                            && other.word(session.grid()).as_deref() == Some(word.as_str())
                    });
                    repeats.then_some(word)
                })
        } else {
            None
        };
        self.completed_entries = index.complete_count();
        self.total_entries = index.len();
        self.filled = session.is_filled();
    }

    /// Check if the active word repeats another answer.
    pub fn has_duplicate(&self) -> bool {
        self.duplicate_answer.is_some()
    }
}
