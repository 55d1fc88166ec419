// core/tests/grid_properties.rs
//
// Property tests over randomly generated grids.
//
// Tests cover:
// - Slot table consistency (every open cell on a run of two or more cells
//   has an entry in that direction, blocks have none)
// - Minimum entry length
// - Deterministic construction and completion refresh
// - Movement round trips and highlight/entry agreement
// - Tab traversal towards the only incomplete entry

use crossgrid_core::{Cell, Direction, EntryIndex, EntrySlot, Grid, Navigator, Position};
use proptest::prelude::*;

fn cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        1 => Just(Cell::Block),
        2 => Just(Cell::Blank),
        2 => prop::char::range('A', 'C').prop_map(Cell::Letter),
    ]
}

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..7, 1usize..7).prop_flat_map(|(width, height)| {
        prop::collection::vec(cell_strategy(), width * height)
            .prop_map(move |cells| Grid::new(width, height, cells).unwrap())
    })
}

fn positions(grid: &Grid) -> impl Iterator<Item = Position> + '_ {
    (0..grid.height()).flat_map(move |row| (0..grid.width()).map(move |col| Position::new(row, col)))
}

/// Open run through `pos` along `direction` has at least two cells.
fn on_run(grid: &Grid, pos: Position, direction: Direction) -> bool {
    [false, true].into_iter().any(|forward| {
        grid.neighbor(pos, direction, forward)
            .is_some_and(|next| grid.is_open(next))
    })
}

fn filled(grid: &Grid) -> Grid {
    let cells = grid
        .cells()
        .iter()
        .map(|&cell| if cell.is_blank() { Cell::Letter('A') } else { cell })
        .collect();
    Grid::new(grid.width(), grid.height(), cells).unwrap()
}

proptest! {
    #[test]
    fn slots_cover_exactly_the_open_runs(grid in grid_strategy()) {
        let index = EntryIndex::build(&grid);
        for pos in positions(&grid) {
            for dir in Direction::ALL {
                let slot = index.slot(pos, dir);
                let expected = grid.is_open(pos) && on_run(&grid, pos, dir);
                prop_assert_eq!(slot != EntrySlot::Absent, expected, "{} {}", pos, dir);
                if let EntrySlot::Present { entry, offset } = slot {
                    prop_assert_eq!(index.entries()[entry].cells[offset], pos);
                    prop_assert_eq!(index.entries()[entry].direction, dir);
                }
            }
        }
    }

    #[test]
    fn entries_have_at_least_two_cells(grid in grid_strategy()) {
        let index = EntryIndex::build(&grid);
        for entry in index.entries() {
            prop_assert!(entry.cells.len() >= 2);
            prop_assert_eq!(index.cell_label(entry.cells[0]), Some(entry.label_number));
        }
        let labels: Vec<u32> = {
            let mut l: Vec<u32> = index.cell_labels().values().copied().collect();
            l.sort();
            l
        };
        prop_assert_eq!(labels, (1..=index.cell_labels().len() as u32).collect::<Vec<_>>());
    }

    #[test]
    fn construction_is_deterministic(grid in grid_strategy()) {
        let a = EntryIndex::build(&grid);
        let b = EntryIndex::build(&grid);
        prop_assert_eq!(a.entries(), b.entries());
        prop_assert_eq!(a.cell_labels(), b.cell_labels());
        prop_assert_eq!(&a, &b);
    }

    #[test]
    fn refresh_matches_rebuild(grid in grid_strategy()) {
        let index = EntryIndex::build(&grid);
        let edited = filled(&grid);
        let refreshed = index.refresh_completion(&edited).unwrap();
        prop_assert_eq!(&refreshed, &EntryIndex::build(&edited));
        prop_assert_eq!(refreshed.complete_count(), refreshed.len());
        for entry in refreshed.entries() {
            let word = entry.word(&edited).unwrap();
            prop_assert!(refreshed.is_used_word(&word));
        }
    }

    #[test]
    fn left_then_right_returns(grid in grid_strategy()) {
        let index = EntryIndex::build(&grid);
        let nav = Navigator::new(&grid, &index);
        for pos in positions(&grid).filter(|&p| grid.is_open(p)) {
            let left = nav.move_left(pos);
            if left != pos {
                prop_assert_eq!(nav.move_right(left), pos);
            }
            let up = nav.move_up(pos);
            if up != pos {
                prop_assert_eq!(nav.move_down(up), pos);
            }
        }
    }

    #[test]
    fn highlights_agree_with_entries(grid in grid_strategy()) {
        let index = EntryIndex::build(&grid);
        let nav = Navigator::new(&grid, &index);
        for pos in positions(&grid).filter(|&p| grid.is_open(p)) {
            for dir in Direction::ALL {
                let mut highlights = nav.highlights(pos, dir);
                highlights.sort();
                let mut expected = match index.entry_at_position(pos, dir) {
                    Ok((entry, _)) => entry.cells.iter().copied().filter(|&c| c != pos).collect(),
                    Err(_) => Vec::new(),
                };
                expected.sort();
                prop_assert_eq!(highlights, expected);
            }
        }
    }

    #[test]
    fn filling_an_entry_completes_it(grid in grid_strategy()) {
        let index = EntryIndex::build(&grid);
        for entry in index.entries() {
            let word: String = std::iter::repeat('Z').take(entry.cells.len()).collect();
            let next = grid.with_entry_filled(entry, &word).unwrap();
            let rebuilt = EntryIndex::build(&next);
            prop_assert!(rebuilt.entries()[entry.index].is_complete);
            prop_assert!(rebuilt.is_used_word(&word));
        }
    }

    #[test]
    fn tab_reaches_the_only_incomplete_entry(grid in grid_strategy()) {
        let full = filled(&grid);
        let index = EntryIndex::build(&full);
        // An unchecked cell belongs to one entry only; blanking it leaves
        // exactly one incomplete entry.
        let target = positions(&full).find(|&p| {
            full.is_open(p)
                && (index.slot(p, Direction::Across) == EntrySlot::Absent)
                    != (index.slot(p, Direction::Down) == EntrySlot::Absent)
        });
        prop_assume!(target.is_some());
        let target = target.unwrap();
        let gap = full.with_blank(target).unwrap();
        let index = EntryIndex::build(&gap);
        prop_assert_eq!(index.len() - index.complete_count(), 1);
        let gap_dir = if index.slot(target, Direction::Across) == EntrySlot::Absent {
            Direction::Down
        } else {
            Direction::Across
        };

        let nav = Navigator::new(&gap, &index);
        for pos in positions(&gap) {
            for dir in Direction::ALL {
                if index.slot(pos, dir) == EntrySlot::Absent {
                    continue;
                }
                for reverse in [false, true] {
                    let (mut at, mut facing) = (pos, dir);
                    for _ in 0..=index.len() {
                        let next = nav.move_to_next_entry(at, facing, reverse).unwrap();
                        at = next.position;
                        facing = next.direction;
                    }
                    prop_assert_eq!((at, facing), (target, gap_dir));
                }
            }
        }
    }
}
