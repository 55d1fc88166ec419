//! Key-event front door for a solving session.
//!
//! The `Controller` wraps a `SolveSession` with the entry index cache and a
//! `SolveContext`, providing a `process_key()` method that maps logical key
//! events onto session operations. Translating raw keyboard or pointer
//! events into `KeyEvent`s is the host UI's job.

use tracing::{debug, trace};

use crate::context::SolveContext;
use crate::error::Result;
use crate::grid::{Direction, Grid, Position};
use crate::index_cache::IndexCache;
use crate::session::SolveSession;
use crate::Config;

/// Key event types that the controller can process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// Character input (letters and digits are written into the grid)
    Char(char),
    /// Backspace key
    Backspace,
    /// Left arrow key
    Left,
    /// Right arrow key
    Right,
    /// Up arrow key
    Up,
    /// Down arrow key
    Down,
    /// Space key (switch direction)
    Space,
    /// Tab key (next incomplete entry)
    Tab,
    /// Shift+Tab (previous incomplete entry)
    BackTab,
    /// Pointer click on a cell
    Click(Position),
    /// Clue picked from a clue list, by entry index
    SelectEntry(usize),
    /// Toggle a block at a cell (puzzle construction)
    ToggleBlock(Position),
}

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled by the controller
    Handled,
    /// Key was not handled (pass through to the host)
    NotHandled,
}

/// Solving session with index caching and a UI context.
#[derive(Debug)]
pub struct Controller {
    session: SolveSession,
    cache: IndexCache,
    context: SolveContext,
}

impl Controller {
    /// Create a controller for `grid`.
    pub fn new(grid: Grid, config: Config) -> Result<Self> {
        let cache = IndexCache::new(config.max_cache_size);
        let index = cache.get_or_build(&grid);
        let session = SolveSession::with_index(grid, index, config)?;
        let mut context = SolveContext::new();
        context.sync_from(&session);
        Ok(Self {
            session,
            cache,
            context,
        })
    }

    /// Get a reference to the context for reading UI state.
    pub fn context(&self) -> &SolveContext {
        &self.context
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &SolveSession {
        &self.session
    }

    /// Get a reference to the entry index cache.
    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }

    /// Process a key event and update session state.
    ///
    /// After calling this, the host should read `context()` to redraw.
    /// Returns `KeyResult::NotHandled` for keys the grid has no use for
    /// (punctuation, clicks on blocks, unknown entries).
    pub fn process_key(&mut self, key: KeyEvent) -> Result<KeyResult> {
        trace!(?key, "process key");
        let result = match key {
            KeyEvent::Char(ch) if ch.is_alphanumeric() => {
                self.session.type_char(ch)?;
                KeyResult::Handled
            }
            KeyEvent::Char(_) => KeyResult::NotHandled,
            KeyEvent::Backspace => {
                self.session.delete()?;
                KeyResult::Handled
            }
            KeyEvent::Left => self.arrow(Direction::Across, false),
            KeyEvent::Right => self.arrow(Direction::Across, true),
            KeyEvent::Up => self.arrow(Direction::Down, false),
            KeyEvent::Down => self.arrow(Direction::Down, true),
            KeyEvent::Space => {
                self.session.change_direction();
                KeyResult::Handled
            }
            KeyEvent::Tab => {
                self.session.tab(false)?;
                KeyResult::Handled
            }
            KeyEvent::BackTab => {
                self.session.tab(true)?;
                KeyResult::Handled
            }
            KeyEvent::Click(pos) => handled_if(self.session.click(pos)?),
            KeyEvent::SelectEntry(index) => handled_if(self.session.select_entry(index)),
            KeyEvent::ToggleBlock(pos) => self.toggle_block(pos)?,
        };
        if result == KeyResult::Handled {
            self.context.sync_from(&self.session);
        }
        Ok(result)
    }

    fn arrow(&mut self, axis: Direction, forward: bool) -> KeyResult {
        self.session.arrow(axis, forward);
        KeyResult::Handled
    }

    /// Structural edit at `pos`. The new layout's index comes from the
    /// cache. A toggle that would leave the grid without entries is refused.
    fn toggle_block(&mut self, pos: Position) -> Result<KeyResult> {
        let grid = self.session.grid().with_block_toggled(pos)?;
        let index = self.cache.get_or_build(&grid);
        if index.is_empty() {
            debug!(%pos, "block toggle would remove every entry");
            return Ok(KeyResult::NotHandled);
        }
        self.session.replace_layout(grid, index)?;
        Ok(KeyResult::Handled)
    }
}

fn handled_if(handled: bool) -> KeyResult {
    if handled {
        KeyResult::Handled
    } else {
        KeyResult::NotHandled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;

    fn controller(text: &str) -> Controller {
        Controller::new(Grid::parse(text).unwrap(), Config::default()).unwrap()
    }

    #[test]
    fn typing_updates_context() {
        let mut c = controller("   \n   ");
        assert_eq!(c.process_key(KeyEvent::Char('h')).unwrap(), KeyResult::Handled);
        assert_eq!(c.context().cursor.position, Position::new(0, 1));
        assert_eq!(c.process_key(KeyEvent::Char('-')).unwrap(), KeyResult::NotHandled);
        assert_eq!(c.session().grid().to_text(), "H  \n   ");
    }

    #[test]
    fn block_click_passes_through() {
        let mut c = controller(" .\n  ");
        let before = c.context().clone();
        assert_eq!(
            c.process_key(KeyEvent::Click(Position::new(0, 1))).unwrap(),
            KeyResult::NotHandled
        );
        assert_eq!(c.context(), &before);
    }

    #[test]
    fn toggle_block_rebuilds_layout() {
        let mut c = controller("   \n   \n   ");
        let centre = Position::new(1, 1);
        c.process_key(KeyEvent::Click(centre)).unwrap();
        assert_eq!(c.process_key(KeyEvent::ToggleBlock(centre)).unwrap(), KeyResult::Handled);
        assert!(c.session().grid().is_block(centre));
        // The cursor left the new block.
        assert_eq!(c.context().cursor, Cursor::new(Position::new(0, 0), Direction::Across));
        assert_eq!(c.cache().cache_stats(), (0, 2));

        c.process_key(KeyEvent::Char('z')).unwrap();
        c.process_key(KeyEvent::ToggleBlock(centre)).unwrap();
        assert!(!c.session().grid().is_block(centre));
        assert_eq!(c.cache().cache_stats(), (1, 2));
        // The cached index was refreshed for the letter typed meanwhile.
        assert_eq!(c.session().index(), &crate::EntryIndex::build(c.session().grid()));
    }

    #[test]
    fn toggle_refuses_to_remove_all_entries() {
        let mut c = controller("  ");
        assert_eq!(c.process_key(KeyEvent::ToggleBlock(Position::new(0, 0))).unwrap(), KeyResult::NotHandled);
        assert_eq!(c.session().grid().to_text(), "  ");
    }
}
