//! Slots and tray: the mutable part of a reorder game, and the unit that
//! history snapshots copy.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::MoveError;
use crate::puzzle::{Tile, TileId};

/// A numbered destination position. The index is the slot's position on
/// the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub occupant: Option<TileId>,
    pub locked: bool,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// True when the occupant is `expected`. An empty slot is never correct.
    pub fn holds(&self, expected: &TileId) -> bool {
        self.occupant.as_ref() == Some(expected)
    }
}

/// Where a tile currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileLocation {
    Tray,
    Slot { index: usize },
}

/// Slots plus tray. Every tile of the puzzle is in exactly one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) slots: Vec<Slot>,
    pub(crate) tray: Vec<TileId>,
}

impl Board {
    /// `slot_count` empty unlocked slots with every tile in the tray.
    pub fn empty(slot_count: usize, tray: Vec<TileId>) -> Self {
        Self {
            slots: vec![Slot::default(); slot_count],
            tray,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Tray contents in display order.
    pub fn tray(&self) -> &[TileId] {
        &self.tray
    }

    pub fn slot(&self, index: usize) -> Result<&Slot, MoveError> {
        self.slots.get(index).ok_or(MoveError::SlotOutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Result<&mut Slot, MoveError> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(MoveError::SlotOutOfRange { index, len })
    }

    /// Fails when the slot is missing or locked.
    pub fn ensure_unlocked(&self, index: usize) -> Result<(), MoveError> {
        if self.slot(index)?.locked {
            return Err(MoveError::LockedSlot { slot: index });
        }
        Ok(())
    }

    pub fn tray_position(&self, tile: &TileId) -> Option<usize> {
        self.tray.iter().position(|t| t == tile)
    }

    pub fn locate(&self, tile: &TileId) -> Option<TileLocation> {
        if self.tray_position(tile).is_some() {
            return Some(TileLocation::Tray);
        }
        self.slots
            .iter()
            .position(|s| s.holds(tile))
            .map(|index| TileLocation::Slot { index })
    }

    pub fn correct_count(&self, order: &[TileId]) -> usize {
        self.slots
            .iter()
            .zip(order)
            .filter(|(slot, expected)| slot.holds(expected))
            .count()
    }

    /// Checks that tray and slot occupants together hold each tile exactly once.
    pub fn is_partition_of(&self, tiles: &[Tile]) -> bool {
        let mut counts: HashMap<&TileId, usize> = HashMap::new();
        let placed = self.slots.iter().filter_map(|s| s.occupant.as_ref());
        for id in self.tray.iter().chain(placed) {
            *counts.entry(id).or_default() += 1;
        }
        counts.len() == tiles.len() && tiles.iter().all(|t| counts.get(&t.id) == Some(&1))
    }
}
