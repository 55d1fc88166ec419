//! Rectangular cell store and grid geometry.
//!
//! A `Grid` is a row-major sequence of `width * height` cells. Index `i`
//! maps to row `i / width`, column `i % width`. Grids are values: every edit
//! produces a new grid (see `mutator`), so consumers can compare versions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Default text marker for a block cell.
pub const BLOCK_CHAR: char = '.';

/// Default text marker for a blank (unfilled) cell.
pub const BLANK_CHAR: char = ' ';

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Cannot hold a letter; terminates entries on either side.
    Block,
    /// Not yet filled by the solver.
    Blank,
    /// A filled letter.
    Letter(char),
}

impl Cell {
    /// Read a cell from its text form using the given markers.
    pub fn from_char(ch: char, block: char, blank: char) -> Self {
        if ch == block {
            Cell::Block
        } else if ch == blank {
            Cell::Blank
        } else {
            Cell::Letter(ch)
        }
    }

    /// Text form of the cell using the given markers.
    pub fn to_char(self, block: char, blank: char) -> char {
        match self {
            Cell::Block => block,
            Cell::Blank => blank,
            Cell::Letter(ch) => ch,
        }
    }

    pub fn is_block(self) -> bool {
        matches!(self, Cell::Block)
    }

    pub fn is_blank(self) -> bool {
        matches!(self, Cell::Blank)
    }
}

/// Word direction. `Across` orders before `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// Both directions in scan order.
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    /// The perpendicular direction.
    pub fn other(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// Slot in per-cell `[across, down]` arrays.
    pub fn slot(self) -> usize {
        match self {
            Direction::Across => 0,
            Direction::Down => 1,
        }
    }

    /// `(row, col)` increment for one step forward.
    fn delta(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => f.write_str("across"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// A cell coordinate. Orders row-major.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid dimensions plus block placement. Two grids with equal keys share an
/// entry index structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    width: usize,
    height: usize,
    blocks: Box<[bool]>,
}

/// Rectangular crossword grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from a row-major cell sequence.
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        let expected = cell_count(width, height, cells.len())?;
        if cells.len() != expected {
            return Err(GridError::DimensionMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid of blank cells with no blocks.
    pub fn blank(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        let count = cell_count(width, height, 0)?;
        Self::new(width, height, vec![Cell::Blank; count])
    }

    /// Read a grid from text rows using the default markers.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        Self::from_rows_with(rows, BLOCK_CHAR, BLANK_CHAR)
    }

    /// Read a grid from text rows, one cell per character.
    pub fn from_rows_with(rows: &[&str], block: char, blank: char) -> Result<Self> {
        let height = rows.len();
        let mut width = 0;
        let mut cells = Vec::new();
        for (row, text) in rows.iter().enumerate() {
            let text = crate::utils::nfc(text);
            let before = cells.len();
            cells.extend(text.chars().map(|ch| Cell::from_char(ch, block, blank)));
            let len = cells.len() - before;
            if row == 0 {
                width = len;
            } else if len != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual: len,
                });
            }
        }
        Self::new(width, height, cells)
    }

    /// Read a grid from newline-separated text using the default markers.
    ///
    /// Leading and trailing newlines are ignored; spaces are significant.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, BLOCK_CHAR, BLANK_CHAR)
    }

    /// Read a grid from newline-separated text with custom markers.
    pub fn parse_with(text: &str, block: char, blank: char) -> Result<Self> {
        let rows: Vec<&str> = text
            .trim_matches(|c| c == '\n' || c == '\r')
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        Self::from_rows_with(&rows, block, blank)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Consume the grid, returning its cell sequence.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Row-major index of `pos`, or `OutOfBounds`.
    pub fn index_of(&self, pos: Position) -> Result<usize> {
        if self.contains(pos) {
            Ok(pos.row * self.width + pos.col)
        } else {
            Err(GridError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Position of a row-major index. The index must be in range.
    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index / self.width, index % self.width)
    }

    /// Value of the cell at `pos`, or `OutOfBounds`.
    pub fn value_at(&self, pos: Position) -> Result<Cell> {
        self.index_of(pos).map(|i| self.cells[i])
    }

    /// Value at `pos` if inside the grid.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.value_at(pos).ok()
    }

    /// True for in-bounds block cells.
    pub fn is_block(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Cell::Block))
    }

    /// True for in-bounds cells that are not blocks.
    pub fn is_open(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(cell) if !cell.is_block())
    }

    /// The adjacent cell one step forward (or backward) along `dir`, if it
    /// lies inside the grid.
    pub fn neighbor(&self, pos: Position, dir: Direction, forward: bool) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let next = if forward {
            Position::new(pos.row + dr, pos.col + dc)
        } else {
            Position::new(pos.row.checked_sub(dr)?, pos.col.checked_sub(dc)?)
        };
        self.contains(next).then_some(next)
    }

    /// Cells grouped by row.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Fingerprint of the block layout.
    pub fn layout_key(&self) -> LayoutKey {
        LayoutKey {
            width: self.width,
            height: self.height,
            blocks: self.cells.iter().map(|c| c.is_block()).collect(),
        }
    }

    /// Whether `other` has the same dimensions and block placement.
    pub fn same_layout(&self, other: &Grid) -> bool {
        self.width == other.width
            && self.height == other.height
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.is_block() == b.is_block())
    }

    /// Text form with one line per row.
    pub fn to_text_with(&self, block: char, blank: char) -> String {
        self.rows()
            .map(|row| row.iter().map(|c| c.to_char(block, blank)).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Text form using the default markers.
    pub fn to_text(&self) -> String {
        self.to_text_with(BLOCK_CHAR, BLANK_CHAR)
    }
}

/// `width * height`, or `DimensionMismatch` if that overflows.
fn cell_count(width: usize, height: usize, actual: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or(GridError::DimensionMismatch {
            expected: usize::MAX,
            actual,
        })
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
