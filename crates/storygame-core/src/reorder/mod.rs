//! Reorder puzzle engine.
//!
//! The player moves tiles between a tray and numbered slots until every slot
//! holds the tile the canonical order expects. Moves come in from taps
//! (select, then activate a target) or from completed drags, which call the
//! move operations directly.
//!
//! Every public operation returns a [`MoveReport`] rather than an error: a
//! rejected move is reported as [`MoveOutcome::Rejected`] and leaves the board
//! untouched.

mod board;
mod history;


use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::MoveError;
use crate::puzzle::{ReorderPuzzle, Tile, TileId};
use crate::rng::SimpleRng;

pub use board::{Board, Slot, TileLocation};
pub use history::History;

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 80;

/// What "shuffle" does to the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleMode {
    /// Only the tray order is shuffled.
    #[default]
    Tray,
    /// The tray is shuffled and the contents of unlocked slots are permuted
    /// among themselves.
    UnlockedSlots,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderConfig {
    pub history_capacity: usize,
    pub shuffle_mode: ShuffleMode,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            shuffle_mode: ShuffleMode::Tray,
        }
    }
}

/// The single pending item the player picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum Selection {
    Tray { tile: TileId },
    Slot { tile: TileId, slot: usize },
}

impl Selection {
    pub fn tile(&self) -> &TileId {
        match self {
            Selection::Tray { tile } | Selection::Slot { tile, .. } => tile,
        }
    }
}

/// What an operation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveOutcome {
    Selected { selection: Selection },
    Deselected,
    /// Nothing to do (no selection, empty slot, same slot twice...).
    Ignored,
    Placed {
        tile: TileId,
        slot: usize,
        displaced: Option<TileId>,
    },
    Swapped { a: usize, b: usize },
    Returned { tile: TileId, slot: usize },
    Shuffled,
    Locked { newly_locked: usize },
    Undone,
    Reset,
    Rejected { error: MoveError },
}

/// Progress after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub correct: usize,
    pub total: usize,
    pub solved: bool,
    /// True only for the operation that moved the board into the solved
    /// state. This is the completion signal.
    pub just_solved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub outcome: MoveOutcome,
    pub progress: Progress,
}

impl MoveReport {
    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, MoveOutcome::Rejected { .. })
    }

    pub fn error(&self) -> Option<&MoveError> {
        match &self.outcome {
            MoveOutcome::Rejected { error } => Some(error),
            _ => None,
        }
    }
}

/// Result of the "check" query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub correct: usize,
    pub total: usize,
    pub solved: bool,
}

/// First wrong slot and the tile that belongs there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub slot: usize,
    pub tile: Tile,
    pub location: Option<TileLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HintReport {
    Hint(Hint),
    AlreadyComplete,
}

/// Reorder game state machine.
#[derive(Debug, Clone)]
pub struct Reorder {
    puzzle: ReorderPuzzle,
    config: ReorderConfig,
    board: Board,
    selection: Option<Selection>,
    history: History,
    rng: SimpleRng,
}

impl Reorder {
    /// Start a freshly shuffled game.
    pub fn new(puzzle: ReorderPuzzle, config: ReorderConfig) -> Self {
        Self::with_rng(puzzle, config, SimpleRng::new())
    }

    pub fn with_rng(puzzle: ReorderPuzzle, config: ReorderConfig, rng: SimpleRng) -> Self {
        let history = History::new(config.history_capacity);
        let mut game = Self {
            puzzle,
            config,
            board: Board::default(),
            selection: None,
            history,
            rng,
        };
        game.fresh_shuffle();
        game
    }

    /// Empty slots, every tile in the tray in random order, no selection and
    /// no history.
    fn fresh_shuffle(&mut self) {
        let mut tray: Vec<TileId> = self.puzzle.tiles().iter().map(|t| t.id.clone()).collect();
        self.rng.shuffle(&mut tray);
        self.board = Board::empty(self.puzzle.slot_count(), tray);
        self.selection = None;
        self.history.clear();
        info!(
            slots = self.puzzle.slot_count(),
            tiles = self.puzzle.tiles().len(),
            "reorder board shuffled"
        );
    }

    // Queries

    pub fn puzzle(&self) -> &ReorderPuzzle {
        &self.puzzle
    }

    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn slots(&self) -> &[Slot] {
        self.board.slots()
    }

    pub fn tray(&self) -> &[TileId] {
        self.board.tray()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn correct_count(&self) -> usize {
        self.board.correct_count(self.puzzle.correct_order())
    }

    pub fn total(&self) -> usize {
        self.puzzle.slot_count()
    }

    /// Every slot holds its expected tile. A puzzle without slots is never solved.
    pub fn is_solved(&self) -> bool {
        self.total() > 0 && self.correct_count() == self.total()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn check(&self) -> CheckReport {
        CheckReport {
            correct: self.correct_count(),
            total: self.total(),
            solved: self.is_solved(),
        }
    }

    /// First slot, in index order, that does not hold its expected tile.
    pub fn hint(&self) -> HintReport {
        let order = self.puzzle.correct_order();
        let wrong = self
            .board
            .slots()
            .iter()
            .zip(order)
            .position(|(slot, expected)| !slot.holds(expected));

        let Some(slot) = wrong else {
            return HintReport::AlreadyComplete;
        };
        let expected = &order[slot];
        let tile = self
            .puzzle
            .tile(expected)
            .cloned()
            .unwrap_or_else(|| Tile::bare(expected.as_str()));
        HintReport::Hint(Hint {
            slot,
            location: self.board.locate(expected),
            tile,
        })
    }

    // Selection

    /// Toggle selection of a tray tile.
    pub fn select_from_tray(&mut self, tile: &TileId) -> MoveReport {
        self.run(|game| {
            if game.board.tray_position(tile).is_none() {
                return Err(MoveError::NotInTray { tile: tile.clone() });
            }
            let selection = Selection::Tray { tile: tile.clone() };
            Ok(game.toggle_selection(selection))
        })
    }

    /// Toggle selection of a slot's tile. Empty slots are ignored; locked
    /// slots are rejected without touching the current selection.
    pub fn select_from_slot(&mut self, index: usize) -> MoveReport {
        self.run(|game| {
            let slot = game.board.slot(index)?;
            let Some(tile) = slot.occupant.clone() else {
                return Ok(MoveOutcome::Ignored);
            };
            if slot.locked {
                return Err(MoveError::LockedSlot { slot: index });
            }
            Ok(game.toggle_selection(Selection::Slot { tile, slot: index }))
        })
    }

    fn toggle_selection(&mut self, selection: Selection) -> MoveOutcome {
        if self.selection.as_ref() == Some(&selection) {
            self.selection = None;
            MoveOutcome::Deselected
        } else {
            self.selection = Some(selection.clone());
            MoveOutcome::Selected { selection }
        }
    }

    /// Tap on a slot: place, swap or deselect depending on the selection.
    pub fn activate_slot(&mut self, target: usize) -> MoveReport {
        match self.selection.clone() {
            None => self.run(|_| Ok(MoveOutcome::Ignored)),
            Some(Selection::Tray { tile }) => self.place_from_tray(&tile, target),
            Some(Selection::Slot { slot, .. }) if slot == target => self.run(|game| {
                game.selection = None;
                Ok(MoveOutcome::Deselected)
            }),
            Some(Selection::Slot { slot, .. }) => self.swap_slots(slot, target),
        }
    }

    /// Tap on the tray area: a selected slot tile goes back to the tray.
    pub fn activate_tray(&mut self) -> MoveReport {
        match self.selection.clone() {
            Some(Selection::Slot { slot, .. }) => self.return_slot_to_tray(slot),
            _ => self.run(|_| Ok(MoveOutcome::Ignored)),
        }
    }

    // Moves

    /// Move a tray tile into a slot. A tile already in the slot goes back to
    /// the end of the tray.
    pub fn place_from_tray(&mut self, tile: &TileId, target: usize) -> MoveReport {
        self.run(|game| {
            game.ensure_unlocked(target)?;
            let Some(position) = game.board.tray_position(tile) else {
                return Err(game.reject(MoveError::NotInTray { tile: tile.clone() }));
            };

            game.save_history();
            game.board.tray.remove(position);
            let slot = game.board.slot_mut(target)?;
            let displaced = slot.occupant.replace(tile.clone());
            if let Some(previous) = &displaced {
                game.board.tray.push(previous.clone());
            }
            game.selection = None;
            Ok(MoveOutcome::Placed {
                tile: tile.clone(),
                slot: target,
                displaced,
            })
        })
    }

    /// Exchange the occupants of two slots. Either may be empty.
    pub fn swap_slots(&mut self, a: usize, b: usize) -> MoveReport {
        self.run(|game| {
            game.board.slot(a)?;
            game.board.slot(b)?;
            if a == b {
                return Ok(MoveOutcome::Ignored);
            }
            game.ensure_unlocked(a)?;
            game.ensure_unlocked(b)?;

            game.save_history();
            game.board.slots.swap(a, b);
            // lock flags stay with the position, both are false here anyway
            game.selection = None;
            Ok(MoveOutcome::Swapped { a, b })
        })
    }

    /// Send a slot's tile to the end of the tray.
    pub fn return_slot_to_tray(&mut self, index: usize) -> MoveReport {
        self.run(|game| {
            game.ensure_unlocked(index)?;
            if game.board.slot(index)?.is_empty() {
                game.selection = None;
                return Ok(MoveOutcome::Ignored);
            }

            game.save_history();
            let slot = game.board.slot_mut(index)?;
            let Some(tile) = slot.occupant.take() else {
                return Ok(MoveOutcome::Ignored);
            };
            game.board.tray.push(tile.clone());
            game.selection = None;
            Ok(MoveOutcome::Returned { tile, slot: index })
        })
    }

    /// Shuffle the tray (and, in [`ShuffleMode::UnlockedSlots`], the unlocked slots).
    pub fn shuffle_tray(&mut self) -> MoveReport {
        self.run(|game| {
            game.save_history();
            game.rng.shuffle(&mut game.board.tray);

            if game.config.shuffle_mode == ShuffleMode::UnlockedSlots {
                let unlocked: Vec<usize> = (0..game.board.slots.len())
                    .filter(|&i| !game.board.slots[i].locked)
                    .collect();
                let mut contents: Vec<Option<TileId>> = unlocked
                    .iter()
                    .map(|&i| game.board.slots[i].occupant.take())
                    .collect();
                game.rng.shuffle(&mut contents);
                for (&i, occupant) in unlocked.iter().zip(contents) {
                    game.board.slots[i].occupant = occupant;
                }
            }

            game.selection = None;
            Ok(MoveOutcome::Shuffled)
        })
    }

    /// Lock every slot whose occupant is currently correct. Never unlocks.
    pub fn lock_correct(&mut self) -> MoveReport {
        self.run(|game| {
            game.save_history();
            let mut newly_locked = 0;
            for (slot, expected) in game.board.slots.iter_mut().zip(game.puzzle.correct_order()) {
                if !slot.locked && slot.holds(expected) {
                    slot.locked = true;
                    newly_locked += 1;
                }
            }
            game.selection = None;
            Ok(MoveOutcome::Locked { newly_locked })
        })
    }

    /// Restore the board from the most recent snapshot.
    pub fn undo(&mut self) -> MoveReport {
        self.run(|game| {
            let snapshot = game.history.pop().ok_or(MoveError::NoHistory)?;
            game.board = snapshot;
            game.selection = None;
            Ok(MoveOutcome::Undone)
        })
    }

    /// Start over with a fresh shuffle. History is discarded.
    pub fn reset(&mut self) -> MoveReport {
        self.run(|game| {
            game.fresh_shuffle();
            Ok(MoveOutcome::Reset)
        })
    }

    // Internals

    fn save_history(&mut self) {
        self.history.push(self.board.clone());
    }

    /// Rejections caused by a bad target also drop the selection.
    fn reject(&mut self, error: MoveError) -> MoveError {
        self.selection = None;
        error
    }

    fn ensure_unlocked(&mut self, index: usize) -> Result<(), MoveError> {
        self.board.ensure_unlocked(index).map_err(|e| self.reject(e))
    }

    fn run(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<MoveOutcome, MoveError>,
    ) -> MoveReport {
        let was_solved = self.is_solved();
        let outcome = match op(self) {
            Ok(outcome) => {
                debug!(?outcome, "reorder move");
                outcome
            }
            Err(error) => {
                debug!(%error, "reorder move rejected");
                MoveOutcome::Rejected { error }
            }
        };
        debug_assert!(self.board.is_partition_of(self.puzzle.tiles()));

        let solved = self.is_solved();
        let progress = Progress {
            correct: self.correct_count(),
            total: self.total(),
            solved,
            just_solved: solved && !was_solved,
        };
        if progress.just_solved {
            info!(total = progress.total, "reorder puzzle solved");
        }
        MoveReport { outcome, progress }
    }
}
