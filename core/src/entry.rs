//! Entry discovery and the cell → entry reverse index.
//!
//! `EntryIndex::build` scans a grid once, row-major, checking each cell for
//! an across start and then a down start. Every start found becomes an
//! `Entry` with the next discovery index; its cells are recorded in a
//! per-cell slot table so that navigation can go from a position to the
//! entry (and offset) crossing it in either direction.
//!
//! The index describes a grid *layout*. Letter edits keep it valid, only
//! completion flags and `used_words` go stale; `refresh_completion`
//! re-derives those from a newer grid with the same layout.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GridError, Result};
use crate::grid::{Cell, Direction, Grid, LayoutKey, Position, BLANK_CHAR, BLOCK_CHAR};

/// One across or down word slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Discovery order, 0-based.
    pub index: usize,
    /// Crossword number shown in the first cell.
    pub label_number: u32,
    pub direction: Direction,
    /// Positions from first to last cell. Always at least two.
    pub cells: Vec<Position>,
    /// No cell was blank when the index was built.
    pub is_complete: bool,
}

impl Entry {
    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Current text of the entry in `grid`, blanks shown as spaces.
    pub fn pattern(&self, grid: &Grid) -> String {
        self.cells
            .iter()
            .filter_map(|&pos| grid.get(pos))
            .map(|cell| cell.to_char(BLOCK_CHAR, BLANK_CHAR))
            .collect()
    }

    /// The entry's letters if every cell is filled in `grid`.
    pub fn word(&self, grid: &Grid) -> Option<String> {
        completed_word(grid, &self.cells)
    }

    /// First cell still blank in `grid`.
    pub fn first_blank(&self, grid: &Grid) -> Option<Position> {
        self.cells
            .iter()
            .copied()
            .find(|&pos| matches!(grid.get(pos), Some(Cell::Blank)))
    }

    /// Short display label such as `12A` or `3D`.
    pub fn label(&self) -> String {
        let suffix = match self.direction {
            Direction::Across => 'A',
            Direction::Down => 'D',
        };
        format!("{}{}", self.label_number, suffix)
    }
}

/// Which entry (if any) covers a cell in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntrySlot {
    /// No entry runs through the cell in this direction (block cells, or
    /// open cells whose run in this direction has length 1).
    #[default]
    Absent,
    /// The cell is `entries[entry].cells[offset]`.
    Present { entry: usize, offset: usize },
}

/// Entries of a grid plus lookup tables derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIndex {
    layout: LayoutKey,
    width: usize,
    entries: Vec<Entry>,
    /// Entry indices ordered by (direction, discovery index).
    sorted_entries: Vec<usize>,
    cell_labels: AHashMap<Position, u32>,
    /// `[across, down]` slot per cell, row-major.
    entries_by_cell: Vec<[EntrySlot; 2]>,
    used_words: AHashSet<String>,
}

/// Accumulator threaded through the discovery scan.
struct Scan {
    next_label: u32,
    entries: Vec<Entry>,
    cell_labels: AHashMap<Position, u32>,
    entries_by_cell: Vec<[EntrySlot; 2]>,
    used_words: AHashSet<String>,
}

impl Scan {
    fn new(grid: &Grid) -> Self {
        Self {
            next_label: 1,
            entries: Vec::new(),
            cell_labels: AHashMap::new(),
            entries_by_cell: vec![[EntrySlot::Absent; 2]; grid.cells().len()],
            used_words: AHashSet::new(),
        }
    }

    /// Label for an entry starting at `start`; across and down entries that
    /// start in the same cell share the first label given to it.
    fn label_for(&mut self, start: Position) -> u32 {
        if let Some(&label) = self.cell_labels.get(&start) {
            return label;
        }
        let label = self.next_label;
        self.cell_labels.insert(start, label);
        self.next_label += 1;
        label
    }

    fn with_entry(mut self, grid: &Grid, start: Position, direction: Direction) -> Self {
        let label_number = self.label_for(start);
        let index = self.entries.len();
        let cells: Vec<Position> =
            std::iter::successors(Some(start), |&pos| grid.neighbor(pos, direction, true))
                .take_while(|&pos| grid.is_open(pos))
                .collect();
        for (offset, pos) in cells.iter().enumerate() {
            let cell = pos.row * grid.width() + pos.col;
            self.entries_by_cell[cell][direction.slot()] = EntrySlot::Present {
                entry: index,
                offset,
            };
        }
        let word = completed_word(grid, &cells);
        let is_complete = word.is_some();
        if let Some(word) = word {
            self.used_words.insert(word);
        }
        self.entries.push(Entry {
            index,
            label_number,
            direction,
            cells,
            is_complete,
        });
        self
    }
}

/// Whether `pos` begins an entry along `direction`: the cell is open, the
/// previous cell is a block or the grid edge, and the next cell is open.
fn is_entry_start(grid: &Grid, pos: Position, direction: Direction) -> bool {
    grid.is_open(pos)
        && grid
            .neighbor(pos, direction, false)
            .map_or(true, |prev| grid.is_block(prev))
        && grid
            .neighbor(pos, direction, true)
            .is_some_and(|next| grid.is_open(next))
}

fn completed_word(grid: &Grid, cells: &[Position]) -> Option<String> {
    cells
        .iter()
        .map(|&pos| match grid.get(pos) {
            Some(Cell::Letter(ch)) => Some(ch),
            _ => None,
        })
        .collect()
}

fn sorted_order(entries: &[Entry]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by_key(|&i| (entries[i].direction, entries[i].index));
    order
}

impl EntryIndex {
    /// Discover all entries of `grid`.
    pub fn build(grid: &Grid) -> Self {
        let starts = (0..grid.height())
            .flat_map(|row| (0..grid.width()).map(move |col| Position::new(row, col)))
            .flat_map(|pos| Direction::ALL.into_iter().map(move |dir| (pos, dir)))
            .filter(|&(pos, dir)| is_entry_start(grid, pos, dir));

        let scan = starts.fold(Scan::new(grid), |scan, (pos, dir)| {
            scan.with_entry(grid, pos, dir)
        });

        debug!(
            width = grid.width(),
            height = grid.height(),
            entries = scan.entries.len(),
            labels = scan.cell_labels.len(),
            "built entry index"
        );

        Self {
            layout: grid.layout_key(),
            width: grid.width(),
            sorted_entries: sorted_order(&scan.entries),
            entries: scan.entries,
            cell_labels: scan.cell_labels,
            entries_by_cell: scan.entries_by_cell,
            used_words: scan.used_words,
        }
    }

    /// Same structure with completion and used words re-derived from `grid`.
    ///
    /// Fails with `LayoutMismatch` if `grid` has different dimensions or
    /// block placement than the grid this index was built from.
    pub fn refresh_completion(&self, grid: &Grid) -> Result<Self> {
        if grid.layout_key() != self.layout {
            return Err(GridError::LayoutMismatch);
        }
        let mut used_words = AHashSet::new();
        let entries = self
            .entries
            .iter()
            .map(|entry| {
                let word = entry.word(grid);
                let is_complete = word.is_some();
                if let Some(word) = word {
                    used_words.insert(word);
                }
                Entry {
                    is_complete,
                    ..entry.clone()
                }
            })
            .collect();
        Ok(Self {
            entries,
            used_words,
            ..self.clone()
        })
    }

    /// Layout this index was built for.
    pub fn layout(&self) -> &LayoutKey {
        &self.layout
    }

    /// Whether this index describes `grid`'s layout.
    pub fn matches(&self, grid: &Grid) -> bool {
        grid.layout_key() == self.layout
    }

    /// All entries in discovery order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in tab order: all across entries, then all down entries,
    /// each group in discovery order.
    pub fn sorted_entries(&self) -> impl DoubleEndedIterator<Item = &Entry> + ExactSizeIterator {
        self.sorted_entries.iter().map(move |&i| &self.entries[i])
    }

    /// Entry at position `i` of the tab order.
    pub(crate) fn sorted_entry(&self, i: usize) -> &Entry {
        &self.entries[self.sorted_entries[i]]
    }

    /// Where `entry_index` sits in the tab order.
    pub fn sorted_position(&self, entry_index: usize) -> Option<usize> {
        self.sorted_entries.iter().position(|&i| i == entry_index)
    }

    /// Entries running in `direction`, in discovery order.
    pub fn entries_in(&self, direction: Direction) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(move |entry| entry.direction == direction)
    }

    /// Label number printed in `pos`, if an entry starts there.
    pub fn cell_label(&self, pos: Position) -> Option<u32> {
        self.cell_labels.get(&pos).copied()
    }

    pub fn cell_labels(&self) -> &AHashMap<Position, u32> {
        &self.cell_labels
    }

    /// Slot for `pos` along `direction`; `Absent` outside the grid.
    pub fn slot(&self, pos: Position, direction: Direction) -> EntrySlot {
        if pos.col >= self.width {
            return EntrySlot::Absent;
        }
        self.entries_by_cell
            .get(pos.row * self.width + pos.col)
            .map_or(EntrySlot::Absent, |slots| slots[direction.slot()])
    }

    /// Entry through `pos` along `direction` and the offset of `pos` in it.
    pub fn entry_at_position(&self, pos: Position, direction: Direction) -> Result<(&Entry, usize)> {
        match self.slot(pos, direction) {
            EntrySlot::Present { entry, offset } => Ok((&self.entries[entry], offset)),
            EntrySlot::Absent => Err(GridError::MissingEntry {
                row: pos.row,
                col: pos.col,
                direction,
            }),
        }
    }

    /// Entry through `pos` along `direction` and the crossing entry.
    pub fn entry_and_cross_at_position(
        &self,
        pos: Position,
        direction: Direction,
    ) -> Result<(&Entry, &Entry)> {
        let (entry, _) = self.entry_at_position(pos, direction)?;
        let (cross, _) = self.entry_at_position(pos, direction.other())?;
        Ok((entry, cross))
    }

    /// The entry with a given clue number and direction.
    pub fn entry_for_label(&self, direction: Direction, label_number: u32) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.direction == direction && entry.label_number == label_number)
    }

    /// Crossing entry for each cell of `entry` (unchecked cells are skipped).
    pub fn crosses(&self, entry: &Entry) -> Vec<&Entry> {
        let across = entry.direction.other();
        entry
            .cells
            .iter()
            .filter_map(|&pos| match self.slot(pos, across) {
                EntrySlot::Present { entry, .. } => Some(&self.entries[entry]),
                EntrySlot::Absent => None,
            })
            .collect()
    }

    /// Words of every entry that was complete when completion was derived.
    pub fn used_words(&self) -> &AHashSet<String> {
        &self.used_words
    }

    pub fn is_used_word(&self, word: &str) -> bool {
        self.used_words.contains(word)
    }

    /// Number of entries currently marked complete.
    pub fn complete_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_complete).count()
    }
}
