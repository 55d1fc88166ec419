//! Plain-text and JSON views of a solving session.

use crossgrid_core::{Direction, EntryIndex, Grid, Position, SolveSession};
use serde::Serialize;

use crate::config::PlayerConfig;

const CELL_WIDTH: usize = 4;

/// One entry as printed in the clue list or emitted as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrySummary {
    pub label: String,
    pub number: u32,
    pub direction: Direction,
    pub cells: Vec<Position>,
    pub pattern: String,
    pub complete: bool,
}

/// Entry list in tab order (all across entries, then all down entries).
pub fn entry_summaries(grid: &Grid, index: &EntryIndex) -> Vec<EntrySummary> {
    index
        .sorted_entries()
        .map(|entry| EntrySummary {
            label: entry.label(),
            number: entry.label_number,
            direction: entry.direction,
            cells: entry.cells.clone(),
            pattern: entry.pattern(grid).replace(' ', "_"),
            complete: entry.is_complete,
        })
        .collect()
}

/// Draw the board. The cursor cell is bracketed, the rest of the active
/// word parenthesized; labels go on a line above each row.
pub fn render_board(session: &SolveSession, config: &PlayerConfig) -> String {
    let grid = session.grid();
    let index = session.index();
    let cursor = session.cursor();
    let highlights = if config.show_highlights {
        session.highlights()
    } else {
        Vec::new()
    };

    let mut out = String::new();
    for row in 0..grid.height() {
        let cells = (0..grid.width()).map(move |col| Position::new(row, col));
        if config.show_labels {
            let labels: String = cells
                .clone()
                .map(|pos| {
                    let label = if grid.is_block(pos) {
                        "#".repeat(CELL_WIDTH - 1)
                    } else {
                        index.cell_label(pos).map(|n| n.to_string()).unwrap_or_default()
                    };
                    format!("{:<width$}", label, width = CELL_WIDTH)
                })
                .collect();
            push_line(&mut out, &labels);
        }
        let letters: String = cells
            .map(|pos| {
                let Some(cell) = grid.get(pos) else {
                    return String::new();
                };
                if cell.is_block() {
                    return format!("{:<width$}", "#".repeat(CELL_WIDTH - 1), width = CELL_WIDTH);
                }
                let ch = cell.to_char(config.base.block_char, '_');
                let text = if pos == cursor.position {
                    format!("[{ch}]")
                } else if highlights.contains(&pos) {
                    format!("({ch})")
                } else {
                    format!(" {ch} ")
                };
                format!("{:<width$}", text, width = CELL_WIDTH)
            })
            .collect();
        push_line(&mut out, &letters);
    }
    out
}

/// Entry list grouped by direction.
pub fn render_entries(summaries: &[EntrySummary]) -> String {
    let mut out = String::new();
    for direction in Direction::ALL {
        let heading = match direction {
            Direction::Across => "Across",
            Direction::Down => "Down",
        };
        push_line(&mut out, heading);
        for summary in summaries.iter().filter(|s| s.direction == direction) {
            let mark = if summary.complete { "" } else { "  ..." };
            push_line(
                &mut out,
                &format!("{:>4}  {}{}", summary.number, summary.pattern, mark),
            );
        }
    }
    out
}

/// Cursor line shown after a key script: position, direction, active word.
pub fn render_status(session: &SolveSession) -> String {
    let cursor = session.cursor();
    let active = session
        .index()
        .entry_at_position(cursor.position, cursor.direction)
        .map(|(entry, _)| format!("{} {}", entry.label(), entry.pattern(session.grid()).replace(' ', "_")))
        .unwrap_or_else(|_| "-".to_string());
    format!(
        "cursor {} {}  entry {}  complete {}/{}",
        cursor.position,
        cursor.direction,
        active,
        session.index().complete_count(),
        session.index().len()
    )
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}
