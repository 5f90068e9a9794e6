//! Engines for the story mini-games.
//!
//! Two puzzle archetypes live here, both free of any rendering concerns:
//!
//! - [`Reorder`]: shuffled story tiles are placed into numbered slots until
//!   they match the canonical order. Supports tap/drag moves, locking of
//!   correct slots, bounded undo and hints.
//! - [`WordSearch`]: words are hidden in a square letter grid along any of the
//!   eight compass directions and found by selecting cells.
//!
//! Raw puzzle data goes through [`puzzle`] first; the engines only ever see
//! normalized definitions.

pub mod error;
pub mod puzzle;
pub mod reorder;
pub mod rng;
pub mod wordsearch;

pub use error::{MoveError, PuzzleDataIssue, SelectionError};
pub use puzzle::{ReorderPuzzle, Tile, TileGroups, TileId, WordSearchPuzzle};
pub use reorder::{
    Board, CheckReport, Hint, HintReport, MoveOutcome, MoveReport, Progress, Reorder,
    ReorderConfig, Selection, ShuffleMode, Slot, TileLocation,
};
pub use rng::SimpleRng;
pub use wordsearch::{
    Coord, Direction, FoundWords, LetterGrid, SearchProgress, SelectionOutcome, SelectionReport,
    WordSearch, WordSearchConfig,
};
