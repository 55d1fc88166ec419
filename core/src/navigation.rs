//! Cursor movement over a grid and its entry index.
//!
//! A `Navigator` borrows a grid and the index built for its layout and
//! answers "where does the cursor go next" for every input the solver can
//! give. None of the operations mutate anything.
//!
//! Movement that cannot happen (into a block, off the grid, past the end of
//! an entry, tabbing with nothing left to fill) returns the input cursor.
//! Entry lookups on a cell without an entry are contract violations and
//! fail with `GridError::MissingEntry`.

use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::entry::{Entry, EntryIndex};
use crate::error::{GridError, Result};
use crate::grid::{Cell, Direction, Grid, Position};

/// Navigation queries against one grid version.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    grid: &'a Grid,
    index: &'a EntryIndex,
    skip_filled: bool,
}

impl<'a> Navigator<'a> {
    pub fn new(grid: &'a Grid, index: &'a EntryIndex) -> Self {
        Self {
            grid,
            index,
            skip_filled: true,
        }
    }

    /// When false, `advance_position` moves to the next cell of the entry
    /// without looking for blanks.
    pub fn with_skip_filled(mut self, skip_filled: bool) -> Self {
        self.skip_filled = skip_filled;
        self
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn index(&self) -> &'a EntryIndex {
        self.index
    }

    fn is_blank(&self, pos: Position) -> bool {
        matches!(self.grid.get(pos), Some(Cell::Blank))
    }

    /// One step along `direction`, or `pos` if that cell is a block or off
    /// the grid.
    fn step(&self, pos: Position, direction: Direction, forward: bool) -> Position {
        match self.grid.neighbor(pos, direction, forward) {
            Some(next) if self.grid.is_open(next) => next,
            _ => {
                trace!(%pos, %direction, forward, "move rejected");
                pos
            }
        }
    }

    pub fn move_left(&self, pos: Position) -> Position {
        self.step(pos, Direction::Across, false)
    }

    pub fn move_right(&self, pos: Position) -> Position {
        self.step(pos, Direction::Across, true)
    }

    pub fn move_up(&self, pos: Position) -> Position {
        self.step(pos, Direction::Down, false)
    }

    pub fn move_down(&self, pos: Position) -> Position {
        self.step(pos, Direction::Down, true)
    }

    /// Cursor position after a letter was entered at `pos`.
    ///
    /// Looks for the next blank cell of the entry, wrapping around within
    /// the entry. With no blank left, moves to the following cell, or stays
    /// on the last one.
    pub fn advance_position(&self, pos: Position, direction: Direction) -> Result<Position> {
        let (entry, offset) = self.index.entry_at_position(pos, direction)?;
        let len = entry.cells.len();
        if self.skip_filled {
            let next_blank = (1..=len)
                .map(|step| entry.cells[(offset + step) % len])
                .find(|&cell| self.is_blank(cell));
            if let Some(cell) = next_blank {
                return Ok(cell);
            }
        }
        Ok(entry.cells.get(offset + 1).copied().unwrap_or(pos))
    }

    /// Cursor position after a delete at `pos`: the previous cell of the
    /// entry, or `pos` at the entry start.
    pub fn retreat_position(&self, pos: Position, direction: Direction) -> Result<Position> {
        let (entry, offset) = self.index.entry_at_position(pos, direction)?;
        Ok(match offset.checked_sub(1) {
            Some(prev) => entry.cells[prev],
            None => pos,
        })
    }

    /// Tab to the next (or previous) incomplete entry in tab order, landing
    /// on its first blank cell. Returns the input cursor if no entry has a
    /// blank left.
    pub fn move_to_next_entry(
        &self,
        pos: Position,
        direction: Direction,
        reverse: bool,
    ) -> Result<Cursor> {
        let (current, _) = self.index.entry_at_position(pos, direction)?;
        let Some(start) = self.index.sorted_position(current.index) else {
            return Err(GridError::MissingEntry {
                row: pos.row,
                col: pos.col,
                direction,
            });
        };

        let count = self.index.len();
        for step in 1..=count {
            let i = if reverse {
                (start + count - step) % count
            } else {
                (start + step) % count
            };
            let candidate = self.index.sorted_entry(i);
            if candidate.is_complete {
                continue;
            }
            if let Some(cell) = candidate.first_blank(self.grid) {
                trace!(from = current.index, to = candidate.index, reverse, "tab");
                return Ok(Cursor::new(cell, candidate.direction));
            }
        }

        debug!(%pos, %direction, "no incomplete entry to tab to");
        Ok(Cursor::new(pos, direction))
    }

    /// Cells sharing the run of open cells through `pos` along `direction`,
    /// excluding `pos`: cells before it (nearest first), then cells after.
    ///
    /// Reads only the grid's blocks, so it stays correct even when the
    /// entry index is out of date with the layout.
    pub fn highlights(&self, pos: Position, direction: Direction) -> Vec<Position> {
        let grid = self.grid;
        let run = move |forward: bool| {
            std::iter::successors(grid.neighbor(pos, direction, forward), move |&p| {
                grid.neighbor(p, direction, forward)
            })
            .take_while(move |&p| grid.is_open(p))
        };
        run(false).chain(run(true)).collect()
    }

    /// Entry along `direction` at `pos` and the offset of `pos` in it.
    pub fn entry_at_position(&self, pos: Position, direction: Direction) -> Result<(&'a Entry, usize)> {
        self.index.entry_at_position(pos, direction)
    }

    /// Entry along `direction` at `pos` and the entry crossing it.
    pub fn entry_and_cross_at_position(
        &self,
        pos: Position,
        direction: Direction,
    ) -> Result<(&'a Entry, &'a Entry)> {
        self.index.entry_and_cross_at_position(pos, direction)
    }

    /// Where to put the cursor when `entry` is picked from a clue list: its
    /// first blank cell, or its first cell if it is filled.
    pub fn first_blank_or_start(&self, entry: &Entry) -> Cursor {
        let cell = entry
            .first_blank(self.grid)
            .unwrap_or(entry.cells[0]);
        Cursor::new(cell, entry.direction)
    }
}
