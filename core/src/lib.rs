//! crossgrid-core
//!
//! Crossword grid model and cursor navigation engine: the part of a
//! crossword solving front end that decides which cells form words, how
//! they are numbered, and where the cursor goes on every key press.
//!
//! Public API:
//! - `Grid` - Rectangular cell store with geometry helpers and edit operations
//! - `EntryIndex` - Across/down entries, numbering and the cell → entry map
//! - `Navigator` - Movement, advance/retreat, tab traversal and highlights
//! - `SolveSession` - Grid + index + cursor for one editing session
//! - `Controller` - Key-event front door producing a `SolveContext` for the UI
//! - `IndexCache` - LRU cache of entry indexes keyed by grid layout
//! - `Solver` - Backtracking autofill from a scored `WordList`
//! - `Config` - Markers and behaviour flags, loadable from TOML
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{GridError, Result};

pub mod grid;
pub use grid::{Cell, Direction, Grid, LayoutKey, Position, BLANK_CHAR, BLOCK_CHAR};

pub mod mutator;

pub mod entry;
pub use entry::{Entry, EntryIndex, EntrySlot};

pub mod cursor;
pub use cursor::Cursor;

pub mod navigation;
pub use navigation::Navigator;

pub mod index_cache;
pub use index_cache::IndexCache;

pub mod session;
pub use session::SolveSession;

pub mod context;
pub use context::SolveContext;

pub mod controller;
pub use controller::{Controller, KeyEvent, KeyResult};

pub mod solver;
pub use solver::{Solution, Solver, WordList};

/// Behaviour and text-format options for solving sessions.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Text marker for block cells
    pub block_char: char,
    /// Text marker for blank cells
    pub blank_char: char,

    /// Uppercase letters as they are typed
    pub uppercase_input: bool,
    /// After typing, jump to the next blank cell of the entry instead of the
    /// next cell
    pub skip_filled_on_advance: bool,

    /// Maximum number of layouts kept in the entry index cache
    pub max_cache_size: usize,

    /// Report when the current entry's answer repeats another filled entry
    pub warn_duplicate_answers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_char: BLOCK_CHAR,
            blank_char: BLANK_CHAR,
            uppercase_input: true,
            skip_filled_on_advance: true,
            // A builder toggling blocks revisits few layouts
            max_cache_size: 32,
            warn_duplicate_answers: true,
        }
    }
}

impl Config {
    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read a grid from text using the configured markers.
    pub fn parse_grid(&self, text: &str) -> Result<Grid> {
        Grid::parse_with(text, self.block_char, self.blank_char)
    }

    /// Text form of `grid` using the configured markers.
    pub fn grid_text(&self, grid: &Grid) -> String {
        grid.to_text_with(self.block_char, self.blank_char)
    }

    /// Letter to store for a typed character.
    pub fn normalize_input(&self, ch: char) -> char {
        if self.uppercase_input {
            utils::to_upper(ch)
        } else {
            ch
        }
    }
}

/// Utility helpers.
pub mod utils {
    /// NFC-normalize a grid row so composed letters occupy one cell.
    ///
    /// Unlike free-form input, rows are not trimmed: leading and trailing
    /// spaces are blank cells.
    pub fn nfc(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>()
    }

    /// Uppercase a single letter, keeping characters whose uppercase form is
    /// more than one character (e.g. 'ß') unchanged.
    pub fn to_upper(ch: char) -> char {
        let mut upper = ch.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(single), None) => single,
            _ => ch,
        }
    }
}
