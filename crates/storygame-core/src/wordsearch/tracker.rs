use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::grid::{Coord, LetterGrid};
use super::placement::{self, Placement};
use super::WordSearchConfig;
use crate::error::SelectionError;
use crate::puzzle::WordSearchPuzzle;
use crate::rng::SimpleRng;

/// Words the player has found, in the order they were found.
///
/// Lives apart from the puzzle definition so a host can carry it across grid
/// rebuilds when it wants to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FoundWords(Vec<String>);

impl FoundWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.iter().any(|w| w == word)
    }

    /// Returns false if the word was already there.
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        let word = word.into();
        if self.contains(&word) {
            return false;
        }
        self.0.push(word);
        true
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for FoundWords {
    fn from(words: Vec<String>) -> Self {
        words.into_iter().collect()
    }
}

impl From<FoundWords> for Vec<String> {
    fn from(found: FoundWords) -> Self {
        found.0
    }
}

impl<S: Into<String>> FromIterator<S> for FoundWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut found = FoundWords::new();
        for word in iter {
            found.insert(word);
        }
        found
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionOutcome {
    /// The selection changed but spells no new word. `letters` is the
    /// current read-out, empty when nothing is selected.
    Candidate { letters: String },
    /// A placed word was spelled, forwards or backwards. The selection has
    /// been cleared.
    Found { word: String, reversed: bool },
    Cleared,
    /// A fresh grid was generated. `dropped` lists words that did not fit.
    NewGrid { placed: usize, dropped: Vec<String> },
    Rejected { error: SelectionError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchProgress {
    /// Placed words found so far.
    pub found: usize,
    pub placed: usize,
    pub complete: bool,
    /// True only for the operation that found the last word.
    pub just_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionReport {
    pub outcome: SelectionOutcome,
    pub progress: SearchProgress,
}

/// Word search game: the generated grid plus the player's selection and
/// found words.
#[derive(Debug, Clone)]
pub struct WordSearch {
    puzzle: WordSearchPuzzle,
    config: WordSearchConfig,
    grid: LetterGrid,
    placements: Vec<Placement>,
    selection: Vec<Coord>,
    found: FoundWords,
    rng: SimpleRng,
}

impl WordSearch {
    pub fn new(puzzle: WordSearchPuzzle, config: WordSearchConfig) -> Self {
        Self::with_rng(puzzle, config, SimpleRng::new())
    }

    pub fn with_rng(puzzle: WordSearchPuzzle, config: WordSearchConfig, rng: SimpleRng) -> Self {
        Self::with_found(puzzle, config, rng, FoundWords::new())
    }

    /// Start with words carried over from an earlier grid.
    pub fn with_found(
        puzzle: WordSearchPuzzle,
        config: WordSearchConfig,
        rng: SimpleRng,
        found: FoundWords,
    ) -> Self {
        let mut game = Self {
            grid: LetterGrid {
                size: 0,
                cells: Vec::new(),
            },
            puzzle,
            config,
            placements: Vec::new(),
            selection: Vec::new(),
            found,
            rng,
        };
        game.generate();
        game
    }

    /// Run the placement solver on a blank grid. Returns the dropped words.
    fn generate(&mut self) -> Vec<String> {
        let alphabet = self.config.alphabet_chars();
        let (grid, placements) = placement::build(
            self.puzzle.size(),
            self.puzzle.words(),
            self.config.attempts_per_word,
            &alphabet,
            &mut self.rng,
        );
        let dropped: Vec<String> = self
            .puzzle
            .words()
            .iter()
            .filter(|w| !placements.iter().any(|p| &p.word == *w))
            .cloned()
            .collect();
        self.grid = grid;
        self.placements = placements;
        self.selection.clear();
        info!(
            size = self.puzzle.size(),
            placed = self.placements.len(),
            dropped = dropped.len(),
            "word search grid generated"
        );
        dropped
    }

    // Queries

    pub fn puzzle(&self) -> &WordSearchPuzzle {
        &self.puzzle
    }

    pub fn config(&self) -> &WordSearchConfig {
        &self.config
    }

    pub fn grid(&self) -> &LetterGrid {
        &self.grid
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Words that made it into the grid, in puzzle order.
    pub fn placed_words(&self) -> impl Iterator<Item = &str> {
        self.placements.iter().map(|p| p.word.as_str())
    }

    pub fn is_placed(&self, word: &str) -> bool {
        self.placed_words().any(|w| w == word)
    }

    pub fn selection(&self) -> &[Coord] {
        &self.selection
    }

    pub fn is_selected(&self, coord: Coord) -> bool {
        self.selection.contains(&coord)
    }

    /// Letters under the selection, in selection order.
    pub fn selected_text(&self) -> String {
        self.grid.read(&self.selection)
    }

    pub fn found(&self) -> &FoundWords {
        &self.found
    }

    pub fn into_found(self) -> FoundWords {
        self.found
    }

    pub fn found_count(&self) -> usize {
        self.placed_words().filter(|w| self.found.contains(w)).count()
    }

    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    pub fn is_complete(&self) -> bool {
        !self.placements.is_empty() && self.placed_words().all(|w| self.found.contains(w))
    }

    pub fn progress(&self) -> SearchProgress {
        SearchProgress {
            found: self.found_count(),
            placed: self.placed_count(),
            complete: self.is_complete(),
            just_completed: false,
        }
    }

    // Operations

    /// Add the cell to the selection, or remove it if already selected, then
    /// check whether the selection spells a placed word.
    pub fn toggle_cell(&mut self, coord: Coord) -> SelectionReport {
        if !self.grid.contains(coord) {
            let error = SelectionError::OutOfBounds {
                row: coord.row,
                col: coord.col,
                size: self.grid.size(),
            };
            debug!(%error, "cell toggle rejected");
            return self.report(SelectionOutcome::Rejected { error }, self.is_complete());
        }

        let was_complete = self.is_complete();
        match self.selection.iter().position(|&c| c == coord) {
            Some(index) => {
                self.selection.remove(index);
            }
            None => self.selection.push(coord),
        }

        let outcome = self.validate();
        self.report(outcome, was_complete)
    }

    fn validate(&mut self) -> SelectionOutcome {
        let letters = self.selected_text();
        let reversed: String = letters.chars().rev().collect();

        for (candidate, is_reversed) in [(&letters, false), (&reversed, true)] {
            if !candidate.is_empty() && self.is_placed(candidate) && !self.found.contains(candidate) {
                let word = candidate.clone();
                self.found.insert(word.clone());
                self.selection.clear();
                info!(%word, reversed = is_reversed, "word found");
                return SelectionOutcome::Found {
                    word,
                    reversed: is_reversed,
                };
            }
        }
        SelectionOutcome::Candidate { letters }
    }

    pub fn clear_selection(&mut self) -> SelectionReport {
        self.selection.clear();
        self.report(SelectionOutcome::Cleared, true)
    }

    /// Generate a fresh grid. Found words are kept only when `preserve_found`
    /// is set; the selection is always cleared.
    pub fn new_grid(&mut self, preserve_found: bool) -> SelectionReport {
        let was_complete = self.is_complete();
        if !preserve_found {
            self.found.clear();
        }
        let dropped = self.generate();
        let outcome = SelectionOutcome::NewGrid {
            placed: self.placements.len(),
            dropped,
        };
        // dropping the last unfound word completes the game
        self.report(outcome, was_complete)
    }

    pub fn restart(&mut self) -> SelectionReport {
        self.new_grid(false)
    }

    fn report(&self, outcome: SelectionOutcome, was_complete: bool) -> SelectionReport {
        let mut progress = self.progress();
        progress.just_completed = progress.complete && !was_complete;
        if progress.just_completed {
            info!(words = progress.placed, "word search complete");
        }
        SelectionReport { outcome, progress }
    }
}
