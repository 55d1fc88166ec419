//! Cursor state for a solving session.
//!
//! The cursor is the only long-lived mutable state of an editing session:
//! the active cell plus the direction words are being entered in. It is a
//! plain `Copy` value; navigation returns new cursors rather than mutating.

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, Position};

/// Active cell and entry direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub position: Position,
    pub direction: Direction,
}

impl Cursor {
    pub fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Same position, other direction.
    pub fn toggled(self) -> Self {
        Self {
            direction: self.direction.other(),
            ..self
        }
    }

    /// Toggle between across and down in place.
    pub fn change_direction(&mut self) {
        self.direction = self.direction.other();
    }

    /// Same direction, different position.
    pub fn at(self, position: Position) -> Self {
        Self { position, ..self }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(Position::default(), Direction::Across)
    }
}
