//! Cell edits that produce new grid versions.
//!
//! Letter edits keep the block layout, so an `EntryIndex` built for the old
//! grid still describes the new one (only completion needs re-deriving).
//! `with_block_toggled` is the one structural edit.

use tracing::trace;

use crate::entry::Entry;
use crate::error::{GridError, Result};
use crate::grid::{Cell, Grid, Position};

impl Grid {
    /// New cell sequence equal to this grid's except at `pos`.
    ///
    /// Writing to a block cell is silently rejected and the unchanged cells
    /// are returned. Writing `Cell::Block` is also rejected here; use
    /// `with_block_toggled` for structural edits.
    pub fn with_cell_value(&self, pos: Position, value: Cell) -> Result<Vec<Cell>> {
        let index = self.index_of(pos)?;
        let mut cells = self.cells().to_vec();
        if cells[index].is_block() || value.is_block() {
            trace!(%pos, ?value, "rejected edit of block layout");
            return Ok(cells);
        }
        cells[index] = value;
        Ok(cells)
    }

    /// New grid with `value` written at `pos` (blocks are left untouched).
    pub fn with_value(&self, pos: Position, value: Cell) -> Result<Grid> {
        let cells = self.with_cell_value(pos, value)?;
        Grid::new(self.width(), self.height(), cells)
    }

    /// New grid with the uppercased letter `ch` at `pos`.
    pub fn with_letter(&self, pos: Position, ch: char) -> Result<Grid> {
        self.with_value(pos, Cell::Letter(crate::utils::to_upper(ch)))
    }

    /// New grid with `pos` cleared to blank.
    pub fn with_blank(&self, pos: Position) -> Result<Grid> {
        self.with_value(pos, Cell::Blank)
    }

    /// New grid with `word` written into the cells of `entry`.
    pub fn with_entry_filled(&self, entry: &Entry, word: &str) -> Result<Grid> {
        let letters: Vec<char> = word.chars().collect();
        if letters.len() != entry.cells.len() {
            return Err(GridError::WordLength {
                word: word.to_string(),
                expected: entry.cells.len(),
                actual: letters.len(),
            });
        }
        let mut cells = self.cells().to_vec();
        for (&pos, &ch) in entry.cells.iter().zip(&letters) {
            let index = self.index_of(pos)?;
            if !cells[index].is_block() {
                cells[index] = Cell::Letter(ch);
            }
        }
        Grid::new(self.width(), self.height(), cells)
    }

    /// New grid with the cell at `pos` switched between block and blank.
    ///
    /// This changes the layout, so any entry index for this grid must be
    /// rebuilt for the result.
    pub fn with_block_toggled(&self, pos: Position) -> Result<Grid> {
        let index = self.index_of(pos)?;
        let mut cells = self.cells().to_vec();
        cells[index] = if cells[index].is_block() {
            Cell::Blank
        } else {
            Cell::Block
        };
        Grid::new(self.width(), self.height(), cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryIndex;
    use crate::grid::Direction;

    #[test]
    fn edit_replaces_single_cell() {
        let grid = Grid::parse("AB.\n   ").unwrap();
        let cells = grid.with_cell_value(Position::new(1, 1), Cell::Letter('Q')).unwrap();
        assert_eq!(cells[4], Cell::Letter('Q'));
        let unchanged: Vec<_> = cells.iter().enumerate().filter(|(i, _)| *i != 4).collect();
        for (i, cell) in unchanged {
            assert_eq!(*cell, grid.cells()[i]);
        }
    }

    #[test]
    fn edit_of_block_is_noop() {
        let grid = Grid::parse("AB.\n   ").unwrap();
        let cells = grid.with_cell_value(Position::new(0, 2), Cell::Letter('Q')).unwrap();
        assert_eq!(cells, grid.cells());
        let next = grid.with_letter(Position::new(0, 2), 'q').unwrap();
        assert_eq!(next, grid);
    }

    #[test]
    fn edit_out_of_bounds_fails() {
        let grid = Grid::blank(2, 2).unwrap();
        assert!(matches!(
            grid.with_letter(Position::new(5, 0), 'A'),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn letters_are_uppercased_and_layout_kept() {
        let grid = Grid::parse("  .\n   ").unwrap();
        let next = grid.with_letter(Position::new(0, 0), 'x').unwrap();
        assert_eq!(next.value_at(Position::new(0, 0)).unwrap(), Cell::Letter('X'));
        assert!(grid.same_layout(&next));
        let cleared = next.with_blank(Position::new(0, 0)).unwrap();
        assert_eq!(cleared, grid);
    }

    #[test]
    fn fill_entry_writes_word() {
        let grid = Grid::parse("   \n   ").unwrap();
        let index = EntryIndex::build(&grid);
        let (entry, _) = index
            .entry_at_position(Position::new(1, 0), Direction::Across)
            .unwrap();
        let filled = grid.with_entry_filled(entry, "CAT").unwrap();
        assert_eq!(filled.to_text(), "   \nCAT");
        assert!(matches!(
            grid.with_entry_filled(entry, "CATS"),
            Err(GridError::WordLength { expected: 3, actual: 4, .. })
        ));
    }

    #[test]
    fn toggling_block_changes_layout() {
        let grid = Grid::blank(3, 3).unwrap();
        let blocked = grid.with_block_toggled(Position::new(1, 1)).unwrap();
        assert!(blocked.is_block(Position::new(1, 1)));
        assert!(!grid.same_layout(&blocked));
        let reopened = blocked.with_block_toggled(Position::new(1, 1)).unwrap();
        assert_eq!(reopened, grid);
    }
}
