// core/src/index_cache.rs
//
// LRU cache of entry indexes keyed by grid layout. A puzzle builder toggling
// blocks back and forth revisits the same few layouts; reusing their index
// structure avoids rescanning. Cached completion is always re-derived from
// the grid being looked up.

use std::cell::RefCell;
use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::trace;

use crate::entry::EntryIndex;
use crate::grid::{Grid, LayoutKey};

pub struct IndexCache {
    cache: RefCell<lru::LruCache<LayoutKey, Arc<EntryIndex>>>,
    cache_hits: RefCell<usize>,
    cache_misses: RefCell<usize>,
}

impl IndexCache {
    /// Create a cache holding up to `capacity` layouts (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: RefCell::new(lru::LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            )),
            cache_hits: RefCell::new(0),
            cache_misses: RefCell::new(0),
        }
    }

    /// Entry index for `grid`, with completion matching `grid`'s letters.
    pub fn get_or_build(&self, grid: &Grid) -> Arc<EntryIndex> {
        let key = grid.layout_key();
        let cached = self.cache.borrow_mut().get(&key).cloned();
        if let Some(index) = cached {
            *self.cache_hits.borrow_mut() += 1;
            trace!(entries = index.len(), "entry index cache hit");
            // Layout keys are equal, so the refresh cannot mismatch.
            return match index.refresh_completion(grid) {
                Ok(refreshed) => Arc::new(refreshed),
                Err(_) => self.insert(key, grid),
            };
        }
        *self.cache_misses.borrow_mut() += 1;
        trace!("entry index cache miss");
        self.insert(key, grid)
    }

    fn insert(&self, key: LayoutKey, grid: &Grid) -> Arc<EntryIndex> {
        let index = Arc::new(EntryIndex::build(grid));
        self.cache.borrow_mut().put(key, index.clone());
        index
    }

    /// Get cache statistics as `(hits, misses)`.
    pub fn cache_stats(&self) -> (usize, usize) {
        (*self.cache_hits.borrow(), *self.cache_misses.borrow())
    }

    /// Get cache hit rate as a percentage (0.0 to 100.0).
    ///
    /// Returns None if no lookups have been made yet.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let hits = *self.cache_hits.borrow();
        let misses = *self.cache_misses.borrow();
        let total = hits + misses;
        if total == 0 {
            None
        } else {
            Some(hits as f32 / total as f32 * 100.0)
        }
    }

    /// Number of cached layouts.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    /// Maximum number of cached layouts.
    pub fn capacity(&self) -> usize {
        self.cache.borrow().cap().get()
    }

    /// Drop all cached layouts and reset statistics.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
        *self.cache_hits.borrow_mut() = 0;
        *self.cache_misses.borrow_mut() = 0;
    }
}

impl std::fmt::Debug for IndexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("stats", &self.cache_stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    #[test]
    fn hits_reuse_layout_and_refresh_completion() {
        let cache = IndexCache::new(4);
        let grid = Grid::parse("  \n  ").unwrap();
        let first = cache.get_or_build(&grid);
        assert_eq!(first.complete_count(), 0);
        assert_eq!(cache.cache_stats(), (0, 1));

        let filled = grid
            .with_letter(Position::new(0, 0), 'a')
            .and_then(|g| g.with_letter(Position::new(0, 1), 'b'))
            .unwrap();
        let second = cache.get_or_build(&filled);
        assert_eq!(cache.cache_stats(), (1, 1));
        assert_eq!(second.complete_count(), 1);
        assert!(second.is_used_word("AB"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.cache_hit_rate(), Some(50.0));
    }

    #[test]
    fn evicts_least_recently_used_layout() {
        let cache = IndexCache::new(1);
        let open = Grid::blank(3, 3).unwrap();
        let blocked = open.with_block_toggled(Position::new(1, 1)).unwrap();
        cache.get_or_build(&open);
        cache.get_or_build(&blocked);
        cache.get_or_build(&open);
        assert_eq!(cache.cache_stats(), (0, 3));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn zero_capacity_is_clamped_and_clear_resets() {
        let cache = IndexCache::new(0);
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.cache_hit_rate(), None);
        cache.get_or_build(&Grid::blank(2, 2).unwrap());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.cache_stats(), (0, 0));
    }
}
