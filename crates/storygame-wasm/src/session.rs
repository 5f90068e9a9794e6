//! Engine plus presentation state for one mounted game.
//!
//! Sessions hold everything the wasm controllers expose, minus the JS value
//! conversions, so they can be driven from plain Rust.

use serde_json::Value;
use storygame_core::{
    Coord, FoundWords, MoveReport, Progress, Reorder, ReorderPuzzle, SearchProgress, Selection,
    TileId, WordSearch, WordSearchPuzzle,
};
use tracing::debug;

use crate::config::AdapterConfig;
use crate::feedback::{Action, Feedback, Response, Sound};
use crate::gesture::{DragSource, DragTracker, DropTarget, Gesture};
use crate::view::{ReorderView, WordSearchView};

pub type ReorderResponse = Response<Progress>;
pub type WordSearchResponse = Response<SearchProgress>;

#[derive(Debug, Clone)]
pub struct ReorderSession {
    game: Reorder,
    feedback: Feedback,
    drag: DragTracker,
}

impl ReorderSession {
    pub fn new(puzzle: ReorderPuzzle, config: &AdapterConfig) -> Self {
        Self {
            game: Reorder::with_rng(puzzle, config.reorder_config(), config.rng()),
            feedback: Feedback::new(config.sound, config.reorder_badge.clone()),
            drag: DragTracker::new(),
        }
    }

    /// Normalize raw puzzle JSON and start a game from it.
    pub fn from_value(data: &Value, config: &AdapterConfig) -> Self {
        Self::new(ReorderPuzzle::from_value(data).puzzle, config)
    }

    pub fn game(&self) -> &Reorder {
        &self.game
    }

    pub fn view(&self) -> ReorderView {
        ReorderView::of(&self.game)
    }

    fn respond(&self, action: Action, report: &MoveReport) -> ReorderResponse {
        self.feedback.reorder(action, report)
    }

    fn progress(&self) -> Progress {
        let check = self.game.check();
        Progress {
            correct: check.correct,
            total: check.total,
            solved: check.solved,
            just_solved: false,
        }
    }

    // Taps

    pub fn tap_tray_tile(&mut self, tile: &TileId) -> ReorderResponse {
        let report = self.game.select_from_tray(tile);
        self.respond(Action::SelectTray, &report)
    }

    pub fn tap_slot_tile(&mut self, index: usize) -> ReorderResponse {
        let report = self.game.select_from_slot(index);
        self.respond(Action::SelectSlot, &report)
    }

    /// Tap on a slot box (empty, or the box around a tile).
    pub fn tap_slot(&mut self, index: usize) -> ReorderResponse {
        let action = match self.game.selection() {
            Some(Selection::Tray { .. }) => Action::Place,
            Some(Selection::Slot { .. }) => Action::Swap,
            None => Action::ActivateSlot,
        };
        let report = self.game.activate_slot(index);
        self.respond(action, &report)
    }

    pub fn tap_tray(&mut self) -> ReorderResponse {
        let report = self.game.activate_tray();
        self.respond(Action::Return, &report)
    }

    // Direct moves

    pub fn place(&mut self, tile: &TileId, slot: usize) -> ReorderResponse {
        let report = self.game.place_from_tray(tile, slot);
        self.respond(Action::Place, &report)
    }

    pub fn swap(&mut self, a: usize, b: usize) -> ReorderResponse {
        let report = self.game.swap_slots(a, b);
        self.respond(Action::Swap, &report)
    }

    pub fn return_to_tray(&mut self, slot: usize) -> ReorderResponse {
        let report = self.game.return_slot_to_tray(slot);
        self.respond(Action::Return, &report)
    }

    // Toolbar

    pub fn shuffle(&mut self) -> ReorderResponse {
        let report = self.game.shuffle_tray();
        self.respond(Action::Shuffle, &report)
    }

    pub fn reset(&mut self) -> ReorderResponse {
        self.drag = DragTracker::new();
        let report = self.game.reset();
        self.respond(Action::Reset, &report)
    }

    pub fn undo(&mut self) -> ReorderResponse {
        let report = self.game.undo();
        self.respond(Action::Undo, &report)
    }

    pub fn lock_correct(&mut self) -> ReorderResponse {
        let report = self.game.lock_correct();
        self.respond(Action::Lock, &report)
    }

    pub fn check(&self) -> ReorderResponse {
        self.feedback.check(&self.game.check())
    }

    pub fn hint(&self) -> ReorderResponse {
        self.feedback.hint(&self.game.hint(), self.progress())
    }

    // Pointer gestures

    /// Start a press on a tile. Presses on locked or empty slots are ignored
    /// and return false.
    pub fn pointer_down(&mut self, source: DragSource, pointer_id: i32, x: f64, y: f64) -> bool {
        if let DragSource::Slot { index } = source {
            let draggable = self
                .game
                .slots()
                .get(index)
                .is_some_and(|slot| !slot.locked && !slot.is_empty());
            if !draggable {
                return false;
            }
        }
        self.drag.press(source, pointer_id, x, y);
        true
    }

    /// Returns the cue to play when the press turns into a drag.
    pub fn pointer_move(&mut self, pointer_id: i32, x: f64, y: f64) -> Option<Sound> {
        if self.drag.move_to(pointer_id, x, y) {
            debug!(pointer_id, "drag started");
            return self.feedback.cue(Sound::Pop);
        }
        None
    }

    /// Finish a press. `None` means nothing happened and the page keeps its
    /// current message.
    pub fn pointer_up(
        &mut self,
        pointer_id: i32,
        target: Option<DropTarget>,
    ) -> Option<ReorderResponse> {
        let gesture = self.drag.release(pointer_id, target)?;
        let response = match gesture {
            Gesture::Tap(DragSource::Tray { tile }) => self.tap_tray_tile(&tile),
            Gesture::Tap(DragSource::Slot { index }) => self.tap_slot_tile(index),
            Gesture::Place { tile, slot } => self.place(&tile, slot),
            Gesture::Swap { from, to } => self.swap(from, to),
            Gesture::Return { slot } => self.return_to_tray(slot),
        };
        Some(response)
    }

    pub fn pointer_cancel(&mut self, pointer_id: i32) {
        self.drag.cancel(pointer_id);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }
}

#[derive(Debug, Clone)]
pub struct WordSearchSession {
    game: WordSearch,
    feedback: Feedback,
}

impl WordSearchSession {
    pub fn new(puzzle: WordSearchPuzzle, config: &AdapterConfig, found: FoundWords) -> Self {
        Self {
            game: WordSearch::with_found(puzzle, config.word_search_config(), config.rng(), found),
            feedback: Feedback::new(config.sound, config.word_search_badge.clone()),
        }
    }

    pub fn from_value(data: &Value, config: &AdapterConfig, found: FoundWords) -> Self {
        Self::new(WordSearchPuzzle::from_value(data).puzzle, config, found)
    }

    pub fn game(&self) -> &WordSearch {
        &self.game
    }

    pub fn view(&self) -> WordSearchView {
        WordSearchView::of(&self.game)
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) -> WordSearchResponse {
        let report = self.game.toggle_cell(Coord::new(row, col));
        self.feedback.word_search(&report)
    }

    pub fn clear_selection(&mut self) -> WordSearchResponse {
        let report = self.game.clear_selection();
        self.feedback.word_search(&report)
    }

    pub fn new_grid(&mut self, preserve_found: bool) -> WordSearchResponse {
        let report = self.game.new_grid(preserve_found);
        self.feedback.word_search(&report)
    }

    pub fn restart(&mut self) -> WordSearchResponse {
        let report = self.game.restart();
        self.feedback.word_search(&report)
    }

    pub fn found(&self) -> &FoundWords {
        self.game.found()
    }
}
