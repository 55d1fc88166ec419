//! Integration tests for a full solving workflow.
//!
//! Tests the public API from grid text to a finished puzzle:
//! - Numbering and completion of small reference grids
//! - Controller key handling (typing, backspace, arrows, tab, clicks)
//! - Block toggling through the index cache
//! - TOML configuration round trip

use crossgrid_core::{
    Config, Controller, Cursor, Direction, EntryIndex, GridError, Grid, KeyEvent, KeyResult,
    Navigator, Position, SolveSession,
};

fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

fn press(c: &mut Controller, keys: &[KeyEvent]) {
    for key in keys {
        c.process_key(key.clone()).unwrap();
    }
}

fn type_word(c: &mut Controller, word: &str) {
    for ch in word.chars() {
        c.process_key(KeyEvent::Char(ch)).unwrap();
    }
}

#[test]
fn reference_three_by_three() {
    let grid = Grid::from_rows(&["ABC", "D E", "FGH"]).unwrap();
    let index = EntryIndex::build(&grid);

    let across: Vec<(u32, bool)> = index
        .entries_in(Direction::Across)
        .map(|e| (e.label_number, e.is_complete))
        .collect();
    let down: Vec<(u32, bool)> = index
        .entries_in(Direction::Down)
        .map(|e| (e.label_number, e.is_complete))
        .collect();
    assert_eq!(across, vec![(1, true), (4, false), (5, true)]);
    assert_eq!(down, vec![(1, true), (2, false), (3, true)]);

    let mut words: Vec<&str> = index.used_words().iter().map(String::as_str).collect();
    words.sort();
    assert_eq!(words, vec!["ABC", "ADF", "CEH", "FGH"]);

    let (entry, offset) = index.entry_at_position(p(1, 1), Direction::Down).unwrap();
    assert_eq!((entry.label(), offset), ("2D".to_string(), 1));
    assert_eq!(entry.pattern(&grid), "B G");
}

#[test]
fn single_row_with_block() {
    let grid = Grid::from_rows(&["AB.CD"]).unwrap();
    let index = EntryIndex::build(&grid);
    let nav = Navigator::new(&grid, &index);

    assert_eq!(index.len(), 2);
    assert!(index.entries_in(Direction::Down).next().is_none());
    assert_eq!(nav.highlights(p(0, 0), Direction::Across), vec![p(0, 1)]);
    assert_eq!(nav.highlights(p(0, 3), Direction::Across), vec![p(0, 4)]);
    assert_eq!(
        index.entry_at_position(p(0, 2), Direction::Across),
        Err(GridError::MissingEntry {
            row: 0,
            col: 2,
            direction: Direction::Across
        })
    );
    assert!(matches!(grid.value_at(p(0, 5)), Err(GridError::OutOfBounds { .. })));
}

#[test]
fn one_cell_grid_cannot_host_a_session() {
    let grid = Grid::blank(1, 1).unwrap();
    assert!(EntryIndex::build(&grid).is_empty());
    assert_eq!(
        SolveSession::new(grid, Config::default()).unwrap_err(),
        GridError::NoEntries
    );
}

#[test]
fn solve_a_mini_by_keyboard() {
    let grid = Grid::parse("   \n . \n   ").unwrap();
    let mut c = Controller::new(grid, Config::default()).unwrap();
    assert_eq!(c.context().total_entries, 4);

    // 1A
    type_word(&mut c, "cat");
    assert_eq!(c.context().completed_entries, 1);
    // Last cell of a full entry: the cursor stays put.
    assert_eq!(c.context().cursor, Cursor::new(p(0, 2), Direction::Across));

    // Tab skips the finished 1A and lands on 3A's first blank.
    press(&mut c, &[KeyEvent::Tab]);
    assert_eq!(c.context().cursor, Cursor::new(p(2, 0), Direction::Across));
    assert_eq!(c.context().current_label, "3A");
    type_word(&mut c, "tar");

    // Both down entries have one blank left in the middle row.
    press(&mut c, &[KeyEvent::Tab]);
    assert_eq!(c.context().cursor, Cursor::new(p(1, 0), Direction::Down));
    type_word(&mut c, "o");
    press(&mut c, &[KeyEvent::Tab]);
    assert_eq!(c.context().cursor, Cursor::new(p(1, 2), Direction::Down));
    type_word(&mut c, "r");

    let ctx = c.context();
    assert!(ctx.filled);
    assert_eq!(ctx.completed_entries, 4);
    assert_eq!(c.session().grid().to_text(), "CAT\nO.R\nTAR");
    let index = c.session().index();
    for word in ["CAT", "TAR", "COT", "TRR"] {
        assert!(index.is_used_word(word), "{word}");
    }

    // Nothing left to visit: tab keeps the cursor.
    let before = c.context().cursor;
    press(&mut c, &[KeyEvent::Tab]);
    assert_eq!(c.context().cursor, before);
}

#[test]
fn backspace_and_arrows() {
    let grid = Grid::parse("    \n    ").unwrap();
    let mut c = Controller::new(grid, Config::default()).unwrap();
    type_word(&mut c, "ab");
    assert_eq!(c.context().cursor.position, p(0, 2));

    press(&mut c, &[KeyEvent::Backspace]);
    assert_eq!(c.session().grid().to_text(), "AB  \n    ");
    assert_eq!(c.context().cursor.position, p(0, 1));

    // Perpendicular arrow turns, a second one moves.
    press(&mut c, &[KeyEvent::Down]);
    assert_eq!(c.context().cursor, Cursor::new(p(0, 1), Direction::Down));
    press(&mut c, &[KeyEvent::Down]);
    assert_eq!(c.context().cursor, Cursor::new(p(1, 1), Direction::Down));
    // Off the bottom edge is a no-op.
    press(&mut c, &[KeyEvent::Down]);
    assert_eq!(c.context().cursor.position, p(1, 1));

    press(&mut c, &[KeyEvent::Space]);
    assert_eq!(c.context().cursor.direction, Direction::Across);
    assert_eq!(c.context().highlights, vec![p(1, 0), p(1, 2), p(1, 3)]);
}

#[test]
fn click_selects_and_toggles_direction() {
    let grid = Grid::parse("   \n   ").unwrap();
    let mut c = Controller::new(grid, Config::default()).unwrap();
    assert_eq!(c.process_key(KeyEvent::Click(p(1, 2))).unwrap(), KeyResult::Handled);
    assert_eq!(c.context().cursor, Cursor::new(p(1, 2), Direction::Across));
    c.process_key(KeyEvent::Click(p(1, 2))).unwrap();
    assert_eq!(c.context().cursor, Cursor::new(p(1, 2), Direction::Down));
    assert_eq!(c.context().cross_entry, c.session().index().entry_for_label(Direction::Across, 4).map(|e| e.index));
}

#[test]
fn toggling_blocks_reuses_cached_layouts() {
    let grid = Grid::blank(3, 3).unwrap();
    let mut c = Controller::new(grid, Config::default()).unwrap();
    let centre = p(1, 1);
    for _ in 0..4 {
        assert_eq!(c.process_key(KeyEvent::ToggleBlock(centre)).unwrap(), KeyResult::Handled);
    }
    assert_eq!(c.cache().cache_stats(), (3, 2));
    assert_eq!(c.cache().len(), 2);
    assert_eq!(c.context().total_entries, 6);
}

#[test]
fn config_round_trips_through_toml() {
    let config = Config {
        block_char: '#',
        uppercase_input: false,
        max_cache_size: 4,
        ..Config::default()
    };
    let text = config.to_toml_string().unwrap();
    assert_eq!(Config::from_toml_str(&text).unwrap(), config);

    let partial = Config::from_toml_str("block_char = \"#\"\n").unwrap();
    assert_eq!(partial.block_char, '#');
    assert!(partial.uppercase_input);

    let grid = partial.parse_grid("A#\nBC").unwrap();
    assert!(grid.is_block(p(0, 1)));
    assert_eq!(partial.grid_text(&grid), "A#\nBC");
}
