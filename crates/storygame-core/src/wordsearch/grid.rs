//! Coordinates, directions and the finished letter grid.

use serde::{Deserialize, Serialize};

/// Zero-indexed cell position, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The eight compass directions a word can run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    East,
    South,
    SouthEast,
    West,
    North,
    NorthWest,
    SouthWest,
    NorthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::South,
        Direction::SouthEast,
        Direction::West,
        Direction::North,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::NorthEast,
    ];

    /// (row delta, column delta)
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::West => (0, -1),
            Direction::North => (-1, 0),
            Direction::NorthWest => (-1, -1),
            Direction::SouthWest => (1, -1),
            Direction::NorthEast => (-1, 1),
        }
    }

    /// The cell `steps` cells away from `from`, if it lies inside a
    /// `size`x`size` grid.
    pub fn step(self, from: Coord, steps: usize, size: usize) -> Option<Coord> {
        let (dr, dc) = self.delta();
        let steps = isize::try_from(steps).ok()?;
        let row = from.row as isize + dr * steps;
        let col = from.col as isize + dc * steps;
        let in_range = |v: isize| v >= 0 && (v as usize) < size;
        (in_range(row) && in_range(col)).then(|| Coord::new(row as usize, col as usize))
    }

    /// The `len` cells starting at `start`, or `None` when the run leaves the grid.
    pub fn run(self, start: Coord, len: usize, size: usize) -> Option<Vec<Coord>> {
        if len == 0 {
            return Some(Vec::new());
        }
        // both ends inside means every cell in between is too
        self.step(start, len - 1, size)?;
        (0..len).map(|i| self.step(start, i, size)).collect()
    }
}

/// A fully populated square grid of letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterGrid {
    pub(crate) size: usize,
    pub(crate) cells: Vec<char>,
}

impl LetterGrid {
    /// Build from row-major cells. Returns `None` if the count is not `size * size`.
    pub fn from_cells(size: usize, cells: Vec<char>) -> Option<Self> {
        (cells.len() == size * size).then_some(Self { size, cells })
    }

    /// Parse rows of letters, e.g. `["DOG", "XXX", "XXX"]`.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        let cells: Vec<char> = rows.iter().flat_map(|r| r.chars()).collect();
        if rows.iter().any(|r| r.chars().count() != size) {
            return None;
        }
        Self::from_cells(size, cells)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    pub fn get(&self, coord: Coord) -> Option<char> {
        self.contains(coord)
            .then(|| self.cells[coord.row * self.size + coord.col])
    }

    /// Letters at the given cells, in order. Out-of-grid cells are skipped.
    pub fn read(&self, coords: &[Coord]) -> String {
        coords.iter().filter_map(|&c| self.get(c)).collect()
    }

    pub fn rows(&self) -> Vec<String> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_cover_the_compass() {
        let mut deltas: Vec<(isize, isize)> = Direction::ALL.iter().map(|d| d.delta()).collect();
        deltas.sort_unstable();
        deltas.dedup();
        assert_eq!(deltas.len(), 8);
        assert!(!deltas.contains(&(0, 0)));
    }

    #[test]
    fn test_step_and_bounds() {
        let origin = Coord::new(0, 0);
        assert_eq!(Direction::SouthEast.step(origin, 2, 5), Some(Coord::new(2, 2)));
        assert_eq!(Direction::North.step(origin, 1, 5), None);
        assert_eq!(Direction::East.step(origin, 5, 5), None);
        assert_eq!(Direction::SouthWest.step(Coord::new(0, 4), 4, 5), Some(Coord::new(4, 0)));
    }

    #[test]
    fn test_run() {
        let run = Direction::West.run(Coord::new(1, 2), 3, 3).unwrap();
        assert_eq!(run, vec![Coord::new(1, 2), Coord::new(1, 1), Coord::new(1, 0)]);
        assert_eq!(Direction::West.run(Coord::new(1, 1), 3, 3), None);
        assert_eq!(Direction::East.run(Coord::new(0, 0), 0, 3), Some(Vec::new()));
    }

    #[test]
    fn test_letter_grid() {
        let grid = LetterGrid::from_rows(&["DOG", "ABC", "XYZ"]).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.get(Coord::new(0, 2)), Some('G'));
        assert_eq!(grid.get(Coord::new(3, 0)), None);
        assert_eq!(
            grid.read(&[Coord::new(2, 2), Coord::new(1, 1), Coord::new(0, 0)]),
            "ZBD"
        );
        assert_eq!(grid.rows(), vec!["DOG", "ABC", "XYZ"]);
        assert!(LetterGrid::from_rows(&["AB", "C"]).is_none());
    }
}
