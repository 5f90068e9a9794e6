//! Random word placement with letter-agreeing crossings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grid::{Coord, Direction, LetterGrid};
use crate::rng::SimpleRng;

/// Where a word ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub word: String,
    pub start: Coord,
    pub direction: Direction,
}

impl Placement {
    pub fn cells(&self, size: usize) -> Vec<Coord> {
        self.direction
            .run(self.start, self.word.chars().count(), size)
            .unwrap_or_default()
    }
}

/// A grid under construction: cells are empty until a word writes them.
#[derive(Debug, Clone)]
pub struct Layout {
    size: usize,
    cells: Vec<Option<char>>,
}

impl Layout {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, coord: Coord) -> Option<char> {
        if coord.row < self.size && coord.col < self.size {
            self.cells[coord.row * self.size + coord.col]
        } else {
            None
        }
    }

    /// Write `word` from `start` towards `direction` if it stays inside the
    /// grid and every occupied cell it crosses already holds the same letter.
    pub fn try_place(&mut self, word: &str, start: Coord, direction: Direction) -> bool {
        let letters: Vec<char> = word.chars().collect();
        let Some(run) = direction.run(start, letters.len(), self.size) else {
            return false;
        };
        let fits = run
            .iter()
            .zip(&letters)
            .all(|(&cell, &letter)| self.get(cell).map_or(true, |existing| existing == letter));
        if !fits {
            return false;
        }
        for (cell, letter) in run.into_iter().zip(letters) {
            self.cells[cell.row * self.size + cell.col] = Some(letter);
        }
        true
    }

    /// Up to `attempts` random (direction, anchor) tries.
    pub fn place_random(
        &mut self,
        word: &str,
        attempts: usize,
        rng: &mut SimpleRng,
    ) -> Option<Placement> {
        if self.size == 0 || word.is_empty() {
            return None;
        }
        for _ in 0..attempts {
            let direction = Direction::ALL[rng.below(Direction::ALL.len())];
            let start = Coord::new(rng.below(self.size), rng.below(self.size));
            if self.try_place(word, start, direction) {
                return Some(Placement {
                    word: word.to_string(),
                    start,
                    direction,
                });
            }
        }
        None
    }

    /// Fill every empty cell with a random letter from `alphabet`.
    pub fn fill(self, alphabet: &[char], rng: &mut SimpleRng) -> LetterGrid {
        let cells = self
            .cells
            .into_iter()
            .map(|cell| cell.unwrap_or_else(|| rng.choose(alphabet).copied().unwrap_or('A')))
            .collect();
        LetterGrid {
            size: self.size,
            cells,
        }
    }
}

/// Place `words` in order on an empty `size`x`size` grid, then fill the
/// blanks. Words that run out of attempts are left out of the placements.
pub fn build(
    size: usize,
    words: &[String],
    attempts: usize,
    alphabet: &[char],
    rng: &mut SimpleRng,
) -> (LetterGrid, Vec<Placement>) {
    let mut layout = Layout::new(size);
    let mut placements = Vec::with_capacity(words.len());
    for word in words {
        match layout.place_random(word, attempts, rng) {
            Some(placement) => placements.push(placement),
            None => debug!(%word, attempts, "word did not fit; dropped"),
        }
    }
    (layout.fill(alphabet, rng), placements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> Vec<char> {
        ('A'..='Z').collect()
    }

    #[test]
    fn test_crossing_words_share_letters() {
        let mut layout = Layout::new(5);
        assert!(layout.try_place("CAT", Coord::new(0, 0), Direction::East));
        // shares the C
        assert!(layout.try_place("CAR", Coord::new(0, 0), Direction::South));
        assert!(!layout.try_place("CAR", Coord::new(0, 0), Direction::East), "R clashes with T");

        let grid = layout.fill(&alphabet(), &mut SimpleRng::with_seed(1));
        assert_eq!(
            grid.read(&[Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]),
            "CAT"
        );
        assert_eq!(
            grid.read(&[Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]),
            "CAR"
        );
    }

    #[test]
    fn test_overlapping_run_must_agree() {
        let mut layout = Layout::new(5);
        assert!(layout.try_place("CAT", Coord::new(2, 0), Direction::East));
        let mut copy = layout.clone();
        assert!(!copy.try_place("CAR", Coord::new(2, 0), Direction::East));
        assert!(layout.try_place("TAR", Coord::new(2, 2), Direction::East));
        let grid = layout.fill(&alphabet(), &mut SimpleRng::with_seed(9));
        assert_eq!(grid.rows()[2], "CATAR");
    }

    #[test]
    fn test_out_of_grid_runs_are_rejected() {
        let mut layout = Layout::new(3);
        assert!(!layout.try_place("DOGS", Coord::new(0, 0), Direction::East));
        assert!(!layout.try_place("DOG", Coord::new(0, 0), Direction::North));
        assert!(layout.try_place("DOG", Coord::new(2, 2), Direction::NorthWest));
        assert_eq!(layout.get(Coord::new(0, 0)), Some('G'));
    }

    #[test]
    fn test_failed_placement_leaves_layout_untouched() {
        let mut layout = Layout::new(3);
        assert!(layout.try_place("AAA", Coord::new(0, 0), Direction::South));
        let before = layout.cells.clone();
        assert!(!layout.try_place("BBB", Coord::new(0, 0), Direction::East));
        assert_eq!(layout.cells, before);
    }

    #[test]
    fn test_build_places_and_fills() {
        let words = vec!["CAT".to_string(), "DOG".to_string(), "BIRD".to_string()];
        let mut rng = SimpleRng::with_seed(2024);
        let (grid, placements) = build(10, &words, 240, &alphabet(), &mut rng);

        assert_eq!(grid.size(), 10);
        assert!(grid.rows().iter().all(|r| r.chars().all(|c| c.is_ascii_uppercase())));
        assert_eq!(placements.len(), 3);
        for placement in &placements {
            assert_eq!(grid.read(&placement.cells(10)), placement.word);
        }
    }

    #[test]
    fn test_words_too_long_are_dropped() {
        let words = vec!["ELEPHANT".to_string(), "OX".to_string()];
        let mut rng = SimpleRng::with_seed(5);
        let (grid, placements) = build(4, &words, 240, &alphabet(), &mut rng);
        assert_eq!(grid.size(), 4);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].word, "OX");
    }

    #[test]
    fn test_zero_attempts_places_nothing() {
        let words = vec!["CAT".to_string()];
        let (grid, placements) = build(5, &words, 0, &alphabet(), &mut SimpleRng::with_seed(1));
        assert!(placements.is_empty());
        assert_eq!(grid.rows().len(), 5);
    }
}
