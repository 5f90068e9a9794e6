//! Drag-vs-tap recognition for pointer presses on reorder tiles.
//!
//! A press only becomes a drag once the pointer has travelled past
//! [`DRAG_THRESHOLD_PX`]. Releasing resolves to at most one engine call;
//! intermediate positions never reach the engine.

use storygame_core::TileId;

pub const DRAG_THRESHOLD_PX: f64 = 6.0;

/// The tile under the pointer when it went down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    Tray { tile: TileId },
    Slot { index: usize },
}

/// What the pointer was over when released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Slot { index: usize },
    Tray,
}

/// The single engine call a finished gesture maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Tap(DragSource),
    Place { tile: TileId, slot: usize },
    Swap { from: usize, to: usize },
    Return { slot: usize },
}

#[derive(Debug, Clone)]
struct Press {
    source: DragSource,
    pointer_id: i32,
    start: (f64, f64),
    dragging: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    press: Option<Press>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a press. Replaces any press already in flight.
    pub fn press(&mut self, source: DragSource, pointer_id: i32, x: f64, y: f64) {
        self.press = Some(Press {
            source,
            pointer_id,
            start: (x, y),
            dragging: false,
        });
    }

    /// Returns true on the move that turns the press into a drag.
    pub fn move_to(&mut self, pointer_id: i32, x: f64, y: f64) -> bool {
        let Some(press) = self.press.as_mut().filter(|p| p.pointer_id == pointer_id) else {
            return false;
        };
        if press.dragging {
            return false;
        }
        let (sx, sy) = press.start;
        if (x - sx).hypot(y - sy) > DRAG_THRESHOLD_PX {
            press.dragging = true;
            return true;
        }
        false
    }

    /// Finish the press. Dropping nowhere, or somewhere the source cannot
    /// go, yields `None`.
    pub fn release(&mut self, pointer_id: i32, target: Option<DropTarget>) -> Option<Gesture> {
        if self.press.as_ref()?.pointer_id != pointer_id {
            return None;
        }
        let press = self.press.take()?;
        if !press.dragging {
            return Some(Gesture::Tap(press.source));
        }
        match (press.source, target?) {
            (DragSource::Tray { tile }, DropTarget::Slot { index }) => {
                Some(Gesture::Place { tile, slot: index })
            }
            (DragSource::Slot { index: from }, DropTarget::Slot { index: to }) => {
                Some(Gesture::Swap { from, to })
            }
            (DragSource::Slot { index }, DropTarget::Tray) => Some(Gesture::Return { slot: index }),
            (DragSource::Tray { .. }, DropTarget::Tray) => None,
        }
    }

    pub fn cancel(&mut self, pointer_id: i32) {
        if self.press.as_ref().is_some_and(|p| p.pointer_id == pointer_id) {
            self.press = None;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.dragging)
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tray(id: &str) -> DragSource {
        DragSource::Tray { tile: TileId::from(id) }
    }

    #[test]
    fn test_release_without_movement_is_a_tap() {
        let mut tracker = DragTracker::new();
        tracker.press(tray("a"), 1, 10.0, 10.0);
        assert!(!tracker.move_to(1, 13.0, 14.0), "5px is under the threshold");
        assert_eq!(
            tracker.release(1, Some(DropTarget::Slot { index: 0 })),
            Some(Gesture::Tap(tray("a")))
        );
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn test_drag_to_slot_places() {
        let mut tracker = DragTracker::new();
        tracker.press(tray("a"), 1, 0.0, 0.0);
        assert!(tracker.move_to(1, 7.0, 0.0));
        assert!(!tracker.move_to(1, 40.0, 0.0), "only the first crossing reports");
        assert!(tracker.is_dragging());
        assert_eq!(
            tracker.release(1, Some(DropTarget::Slot { index: 2 })),
            Some(Gesture::Place {
                tile: TileId::from("a"),
                slot: 2
            })
        );
    }

    #[test]
    fn test_slot_drags() {
        let mut tracker = DragTracker::new();
        tracker.press(DragSource::Slot { index: 0 }, 3, 0.0, 0.0);
        tracker.move_to(3, 0.0, 20.0);
        assert_eq!(
            tracker.release(3, Some(DropTarget::Slot { index: 4 })),
            Some(Gesture::Swap { from: 0, to: 4 })
        );

        tracker.press(DragSource::Slot { index: 1 }, 3, 0.0, 0.0);
        tracker.move_to(3, 20.0, 20.0);
        assert_eq!(
            tracker.release(3, Some(DropTarget::Tray)),
            Some(Gesture::Return { slot: 1 })
        );
    }

    #[test]
    fn test_drop_nowhere_does_nothing() {
        let mut tracker = DragTracker::new();
        tracker.press(tray("a"), 1, 0.0, 0.0);
        tracker.move_to(1, 50.0, 50.0);
        assert_eq!(tracker.release(1, None), None);

        tracker.press(tray("a"), 1, 0.0, 0.0);
        tracker.move_to(1, 50.0, 50.0);
        assert_eq!(tracker.release(1, Some(DropTarget::Tray)), None);
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn test_other_pointers_are_ignored() {
        let mut tracker = DragTracker::new();
        tracker.press(tray("a"), 1, 0.0, 0.0);
        assert!(!tracker.move_to(2, 50.0, 50.0));
        assert_eq!(tracker.release(2, None), None);
        tracker.cancel(2);
        assert!(tracker.is_pressed());

        tracker.cancel(1);
        assert!(!tracker.is_pressed());
        assert_eq!(tracker.release(1, Some(DropTarget::Tray)), None);
    }
}
