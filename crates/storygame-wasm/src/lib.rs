//! WebAssembly bindings for the story mini-games
//!
//! The host page mounts a game by constructing [`ReorderGame`] or
//! [`WordSearchGame`] with the raw puzzle object and an optional config
//! object. Every call returns a plain JS object describing the feedback to
//! show; `view()` returns the full snapshot to render.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use storygame_core::{FoundWords, TileId};
use wasm_bindgen::prelude::*;

mod config;
mod feedback;
mod gesture;
mod logging;
mod session;
mod view;


pub use config::AdapterConfig;
pub use feedback::{Action, Celebration, Feedback, Response, Severity, Sound};
pub use gesture::{DragSource, DragTracker, DropTarget, Gesture, DRAG_THRESHOLD_PX};
pub use logging::init_logging;
pub use session::{ReorderResponse, ReorderSession, WordSearchResponse, WordSearchSession};
pub use view::{CellView, ColorGroup, ReorderView, SlotView, TileView, WordSearchView, WordTag};

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// `undefined` and `null` mean "all defaults".
fn from_js<T: DeserializeOwned + Default>(value: JsValue, what: &str) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| js_sys::Error::new(&format!("invalid {what}: {e}")).into())
}

/// Parse the config and install logging. The first call sets the log level
/// for the whole page.
fn setup(config: JsValue) -> Result<AdapterConfig, JsValue> {
    let config: AdapterConfig = from_js(config, "config")?;
    init_logging(config.level());
    Ok(config)
}

fn drop_target(kind: &str, index: Option<usize>) -> Option<DropTarget> {
    match (kind, index) {
        ("slot", Some(index)) => Some(DropTarget::Slot { index }),
        ("tray", _) => Some(DropTarget::Tray),
        _ => None,
    }
}

/// Controller for the story reorder game
#[wasm_bindgen]
pub struct ReorderGame {
    session: ReorderSession,
}

#[wasm_bindgen]
impl ReorderGame {
    /// Start a shuffled game from a puzzle object
    /// (`{tiles, correct?, colorGroups?}`)
    #[wasm_bindgen(constructor)]
    pub fn new(data: JsValue, config: JsValue) -> Result<ReorderGame, JsValue> {
        let config = setup(config)?;
        let data: Value = from_js(data, "puzzle data")?;
        Ok(ReorderGame {
            session: ReorderSession::from_value(&data, &config),
        })
    }

    /// Full render snapshot
    #[wasm_bindgen]
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.view())
    }

    /// Tap on a tile in the tray
    #[wasm_bindgen]
    pub fn tap_tray_tile(&mut self, tile_id: &str) -> Result<JsValue, JsValue> {
        to_js(&self.session.tap_tray_tile(&TileId::from(tile_id)))
    }

    /// Tap on a tile sitting in a slot
    #[wasm_bindgen]
    pub fn tap_slot_tile(&mut self, index: usize) -> Result<JsValue, JsValue> {
        to_js(&self.session.tap_slot_tile(index))
    }

    /// Tap on a slot box
    #[wasm_bindgen]
    pub fn tap_slot(&mut self, index: usize) -> Result<JsValue, JsValue> {
        to_js(&self.session.tap_slot(index))
    }

    /// Tap on the tray background
    #[wasm_bindgen]
    pub fn tap_tray(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.tap_tray())
    }

    #[wasm_bindgen]
    pub fn place(&mut self, tile_id: &str, slot: usize) -> Result<JsValue, JsValue> {
        to_js(&self.session.place(&TileId::from(tile_id), slot))
    }

    #[wasm_bindgen]
    pub fn swap(&mut self, a: usize, b: usize) -> Result<JsValue, JsValue> {
        to_js(&self.session.swap(a, b))
    }

    #[wasm_bindgen]
    pub fn return_to_tray(&mut self, slot: usize) -> Result<JsValue, JsValue> {
        to_js(&self.session.return_to_tray(slot))
    }

    #[wasm_bindgen]
    pub fn shuffle(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.shuffle())
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.reset())
    }

    #[wasm_bindgen]
    pub fn undo(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.undo())
    }

    #[wasm_bindgen]
    pub fn lock_correct(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.lock_correct())
    }

    #[wasm_bindgen]
    pub fn check(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.check())
    }

    #[wasm_bindgen]
    pub fn hint(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.hint())
    }

    /// Pointer pressed on a tray tile
    #[wasm_bindgen]
    pub fn pointer_down_tray(&mut self, tile_id: &str, pointer_id: i32, x: f64, y: f64) -> bool {
        let source = DragSource::Tray {
            tile: TileId::from(tile_id),
        };
        self.session.pointer_down(source, pointer_id, x, y)
    }

    /// Pointer pressed on a slot tile. Returns false for locked slots.
    #[wasm_bindgen]
    pub fn pointer_down_slot(&mut self, index: usize, pointer_id: i32, x: f64, y: f64) -> bool {
        self.session
            .pointer_down(DragSource::Slot { index }, pointer_id, x, y)
    }

    /// Returns "pop" when the press just became a drag and sound is on
    #[wasm_bindgen]
    pub fn pointer_move(&mut self, pointer_id: i32, x: f64, y: f64) -> Option<String> {
        self.session
            .pointer_move(pointer_id, x, y)
            .map(|sound| match sound {
                Sound::Pop => "pop".to_string(),
                Sound::Ding => "ding".to_string(),
            })
    }

    /// Pointer released over `kind` ("slot" with an index, "tray", or
    /// anything else for no target). Returns `null` when nothing happened.
    #[wasm_bindgen]
    pub fn pointer_up(
        &mut self,
        pointer_id: i32,
        kind: &str,
        index: Option<usize>,
    ) -> Result<JsValue, JsValue> {
        match self.session.pointer_up(pointer_id, drop_target(kind, index)) {
            Some(response) => to_js(&response),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen]
    pub fn pointer_cancel(&mut self, pointer_id: i32) {
        self.session.pointer_cancel(pointer_id);
    }

    #[wasm_bindgen]
    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    #[wasm_bindgen]
    pub fn correct_count(&self) -> usize {
        self.session.game().correct_count()
    }

    #[wasm_bindgen]
    pub fn total(&self) -> usize {
        self.session.game().total()
    }

    #[wasm_bindgen]
    pub fn is_solved(&self) -> bool {
        self.session.game().is_solved()
    }

    #[wasm_bindgen]
    pub fn can_undo(&self) -> bool {
        self.session.game().can_undo()
    }

    /// Board snapshot as JSON, for debugging
    #[wasm_bindgen]
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(self.session.game().board()).unwrap_or_default()
    }
}

/// Controller for the word search game
#[wasm_bindgen]
pub struct WordSearchGame {
    session: WordSearchSession,
}

#[wasm_bindgen]
impl WordSearchGame {
    /// Generate a grid from a puzzle object (`{size?, words}`)
    #[wasm_bindgen(constructor)]
    pub fn new(data: JsValue, config: JsValue) -> Result<WordSearchGame, JsValue> {
        Self::with_found(data, config, JsValue::UNDEFINED)
    }

    /// Like `new`, starting from words found earlier (an array of strings,
    /// as returned by `found_words`)
    #[wasm_bindgen]
    pub fn with_found(
        data: JsValue,
        config: JsValue,
        found: JsValue,
    ) -> Result<WordSearchGame, JsValue> {
        let config = setup(config)?;
        let data: Value = from_js(data, "puzzle data")?;
        let found: FoundWords = from_js(found, "found words")?;
        Ok(WordSearchGame {
            session: WordSearchSession::from_value(&data, &config, found),
        })
    }

    #[wasm_bindgen]
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.view())
    }

    /// Tap on a grid cell
    #[wasm_bindgen]
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<JsValue, JsValue> {
        to_js(&self.session.toggle_cell(row, col))
    }

    #[wasm_bindgen]
    pub fn clear_selection(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.clear_selection())
    }

    /// Rebuild the grid. Found words survive only with `preserve_found`.
    #[wasm_bindgen]
    pub fn new_grid(&mut self, preserve_found: bool) -> Result<JsValue, JsValue> {
        to_js(&self.session.new_grid(preserve_found))
    }

    #[wasm_bindgen]
    pub fn restart(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.restart())
    }

    #[wasm_bindgen]
    pub fn found_words(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.found())
    }

    #[wasm_bindgen]
    pub fn is_complete(&self) -> bool {
        self.session.game().is_complete()
    }
}

#[cfg(test)]
mod native_tests {
    use super::*;

    #[test]
    fn test_drop_target_parsing() {
        assert_eq!(drop_target("slot", Some(3)), Some(DropTarget::Slot { index: 3 }));
        assert_eq!(drop_target("slot", None), None);
        assert_eq!(drop_target("tray", None), Some(DropTarget::Tray));
        assert_eq!(drop_target("", Some(1)), None);
    }
}
