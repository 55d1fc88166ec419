//! Error type shared by the grid model and the navigation engine.
//!
//! Only caller-contract violations are errors. Ordinary user actions that
//! cannot do anything (moving into a block, tabbing when every entry is
//! filled, typing over a block) are no-ops and never produce a `GridError`.

use crate::grid::Direction;

/// Errors raised by grid construction, lookup and editing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A position outside `[0, width) x [0, height)` was accessed.
    #[error("position ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    /// An entry lookup was made on a cell that has no entry in that direction.
    #[error("no {direction} entry at ({row}, {col})")]
    MissingEntry {
        row: usize,
        col: usize,
        direction: Direction,
    },

    /// Width or height was zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    /// The cell sequence does not hold `width * height` values.
    #[error("expected {expected} cells for the grid, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A text row has a different length than the first row.
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A word written into an entry does not match the entry length.
    #[error("word '{word}' has {actual} letters but the entry has {expected} cells")]
    WordLength {
        word: String,
        expected: usize,
        actual: usize,
    },

    /// Completion was re-derived from a grid with a different block layout.
    #[error("grid layout does not match the entry index it was paired with")]
    LayoutMismatch,

    /// A word list line carries a score that is not a number.
    #[error("word list line {line}: bad score '{score}'")]
    WordScore { line: usize, score: String },

    /// The grid has no entries to place a cursor on.
    #[error("grid has no entries")]
    NoEntries,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;
