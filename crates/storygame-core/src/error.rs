//! Error types for the game engines.
//!
//! None of these ever escape as panics: the engines fold them into their
//! report values so the hosting page always gets a descriptor back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::puzzle::TileId;

/// Reasons a reorder move is rejected. A rejected move never mutates the board.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveError {
    /// The move would change a slot that has already been locked.
    #[error("slot {slot} is locked")]
    LockedSlot { slot: usize },

    /// Undo was requested with an empty history.
    #[error("nothing to undo")]
    NoHistory,

    /// The slot index does not exist on this board.
    #[error("slot {index} is out of range (board has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    /// The tile is not currently sitting in the tray.
    #[error("tile '{tile}' is not in the tray")]
    NotInTray { tile: TileId },
}

/// Reasons a word search cell toggle is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionError {
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },
}

/// Problems found while normalizing raw puzzle data.
///
/// The normalizer repairs every one of these instead of failing; they are
/// reported so the host can surface them to puzzle authors.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PuzzleDataIssue {
    #[error("tile list is missing or not an array")]
    MissingTiles,

    #[error("duplicate tile id '{id}' at position {index} was dropped")]
    DuplicateTile { id: String, index: usize },

    #[error("correct order is missing; using tile declaration order")]
    DefaultedOrder,

    #[error("correct order references unknown tile '{id}'")]
    UnknownOrderTile { id: String },

    #[error("correct order repeats tile '{id}'")]
    RepeatedOrderTile { id: String },

    #[error("word list is missing or not an array")]
    MissingWords,

    #[error("word '{word}' appears more than once")]
    DuplicateWord { word: String },

    #[error("grid size {given} is invalid; using {used}")]
    InvalidSize { given: String, used: usize },
}
