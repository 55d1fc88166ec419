//! Grid autofill from a scored word list.
//!
//! `Solver` fills every blank of a grid with words from a `WordList`. The
//! search is a depth-first backtracking fill:
//!
//! - the incomplete entry with the fewest matching words is filled first
//! - a word already present in a complete entry is never placed again
//! - before a word is placed, every crossing entry it touches must still
//!   have at least one matching word
//! - the lowest-cost filled grid found is kept; branches whose partial cost
//!   already exceeds it are abandoned
//!
//! Cost sums, over all entries, `1 / score` of the best word still matching
//! the entry (or `UNMATCHED_COST` when nothing matches), so higher-scoring
//! words give cheaper grids.

use ahash::{AHashMap, AHashSet};
use tracing::{debug, trace};

use crate::entry::{Entry, EntryIndex, EntrySlot};
use crate::error::{GridError, Result};
use crate::grid::{Cell, Direction, Grid, Position};
use crate::utils;

/// Cost of an entry whose pattern matches no word.
pub const UNMATCHED_COST: f32 = 5.0;

/// Scores below this are raised to it.
pub const MIN_SCORE: f32 = 1.0;

/// Entry text with blank cells as `None`.
pub type Pattern = Vec<Option<char>>;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWord {
    pub word: String,
    pub score: f32,
    letters: Vec<char>,
}

impl ScoredWord {
    fn matches(&self, pattern: &[Option<char>]) -> bool {
        self.letters.len() == pattern.len()
            && self
                .letters
                .iter()
                .zip(pattern)
                .all(|(letter, slot)| slot.map_or(true, |ch| ch == *letter))
    }
}

/// Candidate words bucketed by length, each bucket in descending score
/// order (insertion order among equal scores).
#[derive(Debug, Clone, Default)]
pub struct WordList {
    by_length: AHashMap<usize, Vec<ScoredWord>>,
    seen: AHashSet<String>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Words with the minimum score.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for word in words {
            list.insert(word.as_ref(), MIN_SCORE);
        }
        list
    }

    /// Read one word per line, optionally followed by `;score`. Blank lines
    /// and lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut list = Self::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (word, score) = match line.split_once(';') {
                Some((word, score)) => {
                    let score = score.trim().parse().map_err(|_| GridError::WordScore {
                        line: number + 1,
                        score: score.trim().to_string(),
                    })?;
                    (word, score)
                }
                None => (line, MIN_SCORE),
            };
            list.insert(word, score);
        }
        Ok(list)
    }

    /// Add a word, uppercased and NFC-normalized. Returns false for an empty
    /// or repeated word.
    pub fn insert(&mut self, word: &str, score: f32) -> bool {
        let word: String = utils::nfc(word.trim()).chars().map(utils::to_upper).collect();
        if word.is_empty() || !self.seen.insert(word.clone()) {
            return false;
        }
        let letters: Vec<char> = word.chars().collect();
        let bucket = self.by_length.entry(letters.len()).or_default();
        let entry = ScoredWord {
            word,
            score: score.max(MIN_SCORE),
            letters,
        };
        let at = bucket.partition_point(|other| other.score >= entry.score);
        bucket.insert(at, entry);
        true
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.seen.contains(word)
    }

    /// Words matching `pattern`, best score first.
    pub fn matching<'a>(&'a self, pattern: &'a [Option<char>]) -> impl Iterator<Item = &'a ScoredWord> {
        self.by_length
            .get(&pattern.len())
            .into_iter()
            .flatten()
            .filter(move |word| word.matches(pattern))
    }

    pub fn count_matches(&self, pattern: &[Option<char>]) -> usize {
        self.matching(pattern).count()
    }

    /// Highest score among words matching `pattern`.
    pub fn best_score(&self, pattern: &[Option<char>]) -> Option<f32> {
        self.matching(pattern).next().map(|word| word.score)
    }
}

/// Current letters of `entry` in `grid`.
pub fn entry_pattern(entry: &Entry, grid: &Grid) -> Pattern {
    entry
        .cells
        .iter()
        .map(|&pos| match grid.get(pos) {
            Some(Cell::Letter(ch)) => Some(ch),
            _ => None,
        })
        .collect()
}

/// A filled grid and its cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub grid: Grid,
    pub cost: f32,
}

/// Backtracking autofill over a borrowed word list.
#[derive(Debug, Clone)]
pub struct Solver<'w> {
    words: &'w WordList,
    max_branch: usize,
    max_nodes: usize,
}

struct Search {
    best: Option<Solution>,
    nodes: usize,
}

impl<'w> Solver<'w> {
    pub fn new(words: &'w WordList) -> Self {
        Self {
            words,
            max_branch: 10,
            max_nodes: 100_000,
        }
    }

    /// Once a solution exists, try at most `max_branch` words per entry.
    pub fn with_max_branch(mut self, max_branch: usize) -> Self {
        self.max_branch = max_branch.max(1);
        self
    }

    /// Stop after visiting `max_nodes` partial grids and return the best
    /// solution found so far.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Sum of entry costs for `grid`.
    pub fn cost(&self, grid: &Grid, index: &EntryIndex) -> f32 {
        index
            .entries()
            .iter()
            .map(|entry| match self.words.best_score(&entry_pattern(entry, grid)) {
                Some(score) => 1.0 / score,
                None => UNMATCHED_COST,
            })
            .sum()
    }

    /// Fill `grid`. Returns `None` if the word list cannot fill it without
    /// repeating a word.
    pub fn solve(&self, grid: &Grid) -> Option<Solution> {
        let index = EntryIndex::build(grid);
        let mut search = Search {
            best: None,
            nodes: 0,
        };
        self.search(grid.clone(), &index, &mut search);
        debug!(
            nodes = search.nodes,
            solved = search.best.is_some(),
            "autofill finished"
        );
        search.best
    }

    fn search(&self, grid: Grid, index: &EntryIndex, search: &mut Search) {
        if search.nodes >= self.max_nodes {
            return;
        }
        search.nodes += 1;

        let cost = self.cost(&grid, index);
        if search.best.as_ref().is_some_and(|best| cost > best.cost) {
            return;
        }

        let Some((entry, options)) = self.most_constrained(&grid, index) else {
            // Every entry is filled. Repeated answers collapse in the set.
            let better = search.best.as_ref().map_or(true, |best| cost < best.cost);
            if better && index.used_words().len() == index.len() {
                debug!(cost, "new best fill");
                search.best = Some(Solution { grid, cost });
            }
            return;
        };
        if options == 0 {
            return;
        }

        let pattern = entry_pattern(entry, &grid);
        let mut tried = 0;
        for candidate in self.words.matching(&pattern) {
            if search.best.is_some() && tried >= self.max_branch {
                return;
            }
            if index.is_used_word(&candidate.word) {
                continue;
            }
            if !self.crossings_fillable(&grid, index, entry, &pattern, &candidate.letters) {
                trace!(word = %candidate.word, entry = %entry.label(), "crossing dead end");
                continue;
            }
            tried += 1;

            let Ok(next) = grid.with_entry_filled(entry, &candidate.word) else {
                continue;
            };
            let Ok(next_index) = index.refresh_completion(&next) else {
                continue;
            };
            self.search(next, &next_index, search);
        }
    }

    /// Incomplete entry with the fewest matches (first in discovery order
    /// on ties), with its match count.
    fn most_constrained<'i>(&self, grid: &Grid, index: &'i EntryIndex) -> Option<(&'i Entry, usize)> {
        index
            .entries()
            .iter()
            .filter(|entry| entry.first_blank(grid).is_some())
            .map(|entry| (entry, self.words.count_matches(&entry_pattern(entry, grid))))
            .min_by_key(|&(entry, count)| (count, entry.index))
    }

    /// Every blank cell that `letters` would fill keeps its crossing entry
    /// matchable.
    fn crossings_fillable(
        &self,
        grid: &Grid,
        index: &EntryIndex,
        entry: &Entry,
        pattern: &[Option<char>],
        letters: &[char],
    ) -> bool {
        let cross_direction = entry.direction.other();
        entry
            .cells
            .iter()
            .zip(pattern)
            .zip(letters)
            .filter(|((_, slot), _)| slot.is_none())
            .all(|((&pos, _), &letter)| {
                self.cross_pattern(grid, index, pos, cross_direction, letter)
                    .map_or(true, |cross| self.words.count_matches(&cross) > 0)
            })
    }

    /// Pattern of the entry crossing `pos` with `letter` written at `pos`,
    /// or `None` for an unchecked cell.
    fn cross_pattern(
        &self,
        grid: &Grid,
        index: &EntryIndex,
        pos: Position,
        direction: Direction,
        letter: char,
    ) -> Option<Pattern> {
        let EntrySlot::Present { entry, offset } = index.slot(pos, direction) else {
            return None;
        };
        let mut pattern = entry_pattern(index.entry(entry)?, grid);
        pattern[offset] = Some(letter);
        Some(pattern)
    }
}
