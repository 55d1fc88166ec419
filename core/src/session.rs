//! Solving session state.
//!
//! The `SolveSession` ties the current grid version, the entry index for its
//! layout and the cursor together, and applies the keyboard behaviour of a
//! crossword solver on top of `Navigator`:
//!
//! - a letter is written, then the cursor advances within the entry
//! - backspace clears the cell, then the cursor retreats within the entry
//! - an arrow along the current direction moves one cell; a perpendicular
//!   arrow only switches direction
//! - tab / shift-tab jump to the next / previous incomplete entry
//!
//! Completion flags are re-derived after every letter edit, so tab traversal
//! never works from a stale picture of which entries are filled.

use std::sync::Arc;

use tracing::debug;

use crate::cursor::Cursor;
use crate::entry::{EntryIndex, EntrySlot};
use crate::error::{GridError, Result};
use crate::grid::{Cell, Direction, Grid, Position};
use crate::navigation::Navigator;
use crate::Config;

/// Grid, index and cursor for one editing session.
#[derive(Debug, Clone)]
pub struct SolveSession {
    grid: Grid,
    index: Arc<EntryIndex>,
    cursor: Cursor,
    config: Config,
}

impl SolveSession {
    /// Start a session on `grid`, building its entry index.
    pub fn new(grid: Grid, config: Config) -> Result<Self> {
        let index = Arc::new(EntryIndex::build(&grid));
        Self::with_index(grid, index, config)
    }

    /// Start a session with an index built elsewhere (e.g. from a cache).
    ///
    /// The cursor starts on the first entry in tab order.
    pub fn with_index(grid: Grid, index: Arc<EntryIndex>, config: Config) -> Result<Self> {
        if !index.matches(&grid) {
            return Err(GridError::LayoutMismatch);
        }
        let cursor = initial_cursor(&index)?;
        Ok(Self {
            grid,
            index,
            cursor,
            config,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn index(&self) -> &EntryIndex {
        &self.index
    }

    /// Shared handle to the current index.
    pub fn index_arc(&self) -> Arc<EntryIndex> {
        self.index.clone()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Navigator over the current grid version.
    pub fn navigator(&self) -> Navigator<'_> {
        Navigator::new(&self.grid, &self.index).with_skip_filled(self.config.skip_filled_on_advance)
    }

    /// Commit a letter edit (same layout) together with the cursor position
    /// `next` computes on the edited grid. Nothing changes if `next` fails.
    fn commit_letters<F>(&mut self, grid: Grid, next: F) -> Result<()>
    where
        F: FnOnce(&Navigator<'_>) -> Result<Position>,
    {
        let index = self.index.refresh_completion(&grid)?;
        let position = next(
            &Navigator::new(&grid, &index).with_skip_filled(self.config.skip_filled_on_advance),
        )?;
        self.grid = grid;
        self.index = Arc::new(index);
        self.cursor.position = position;
        Ok(())
    }

    /// Write `ch` at the cursor and advance within the current entry.
    pub fn type_char(&mut self, ch: char) -> Result<()> {
        let Cursor {
            position,
            direction,
        } = self.cursor;
        let letter = Cell::Letter(self.config.normalize_input(ch));
        let grid = self.grid.with_value(position, letter)?;
        // Advance on the edited grid: the cell just filled is no longer a
        // candidate blank.
        self.commit_letters(grid, |nav| nav.advance_position(position, direction))
    }

    /// Clear the cell under the cursor and retreat within the current entry.
    pub fn delete(&mut self) -> Result<()> {
        let Cursor {
            position,
            direction,
        } = self.cursor;
        let grid = self.grid.with_blank(position)?;
        self.commit_letters(grid, |nav| nav.retreat_position(position, direction))
    }

    /// Arrow key handling. `axis` is the direction the arrow points along
    /// (left/right = across, up/down = down).
    pub fn arrow(&mut self, axis: Direction, forward: bool) {
        if axis != self.cursor.direction {
            self.change_direction();
            return;
        }
        let nav = self.navigator();
        let pos = self.cursor.position;
        self.cursor.position = match (axis, forward) {
            (Direction::Across, false) => nav.move_left(pos),
            (Direction::Across, true) => nav.move_right(pos),
            (Direction::Down, false) => nav.move_up(pos),
            (Direction::Down, true) => nav.move_down(pos),
        };
    }

    /// Switch between across and down without moving. A cell that belongs
    /// to a single entry keeps its direction.
    pub fn change_direction(&mut self) {
        let toggled = self.cursor.toggled();
        if self.index.slot(toggled.position, toggled.direction) == EntrySlot::Absent {
            debug!(pos = %toggled.position, direction = %toggled.direction, "no entry to turn to");
            return;
        }
        self.cursor = toggled;
    }

    /// Jump to the next (or previous) incomplete entry.
    pub fn tab(&mut self, reverse: bool) -> Result<()> {
        let Cursor {
            position,
            direction,
        } = self.cursor;
        self.cursor = self
            .navigator()
            .move_to_next_entry(position, direction, reverse)?;
        Ok(())
    }

    /// Pointer click on `pos`.
    ///
    /// Clicking a block does nothing and returns false. Clicking the active
    /// cell switches direction. Clicking any other cell moves there, keeping
    /// the direction unless the cell has no entry along it.
    pub fn click(&mut self, pos: Position) -> Result<bool> {
        if self.grid.value_at(pos)?.is_block() {
            return Ok(false);
        }
        if pos == self.cursor.position {
            self.change_direction();
            return Ok(true);
        }
        let direction = self.cursor.direction;
        let has_entry = |dir| self.index.slot(pos, dir) != EntrySlot::Absent;
        let direction = if has_entry(direction) {
            direction
        } else if has_entry(direction.other()) {
            direction.other()
        } else {
            debug!(%pos, "clicked cell belongs to no entry");
            return Ok(false);
        };
        self.cursor = Cursor::new(pos, direction);
        Ok(true)
    }

    /// Move to the entry picked from a clue list. Returns false for an
    /// unknown entry index.
    pub fn select_entry(&mut self, entry_index: usize) -> bool {
        let Some(entry) = self.index.entry(entry_index) else {
            return false;
        };
        self.cursor = self.navigator().first_blank_or_start(entry);
        true
    }

    /// Swap in a grid with a different layout together with its index.
    ///
    /// If the cursor now sits on a block or a cell without an entry along
    /// the current direction, it moves to the first entry in tab order.
    pub fn replace_layout(&mut self, grid: Grid, index: Arc<EntryIndex>) -> Result<()> {
        if !index.matches(&grid) {
            return Err(GridError::LayoutMismatch);
        }
        let cursor_valid =
            index.slot(self.cursor.position, self.cursor.direction) != EntrySlot::Absent;
        if !cursor_valid {
            let toggled = self.cursor.toggled();
            self.cursor = if index.slot(toggled.position, toggled.direction) != EntrySlot::Absent {
                toggled
            } else {
                initial_cursor(&index)?
            };
        }
        self.grid = grid;
        self.index = index;
        Ok(())
    }

    /// Cells of the active word other than the cursor cell.
    pub fn highlights(&self) -> Vec<Position> {
        self.navigator()
            .highlights(self.cursor.position, self.cursor.direction)
    }

    /// Whether every open cell holds a letter.
    pub fn is_filled(&self) -> bool {
        !self.grid.cells().iter().any(|cell| cell.is_blank())
    }
}

/// First cell of the first entry in tab order.
fn initial_cursor(index: &EntryIndex) -> Result<Cursor> {
    index
        .sorted_entries()
        .next()
        .map(|entry| Cursor::new(entry.cells[0], entry.direction))
        .ok_or(GridError::NoEntries)
}
