//! Bounded undo history of full board snapshots.

use std::collections::VecDeque;

use super::board::Board;

/// Snapshot stack with a fixed capacity.
///
/// Only pushes are capacity-checked: once full, the oldest snapshot is
/// evicted from the bottom. Pops always come off the top.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Board>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, snapshot: Board) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    pub fn pop(&mut self) -> Option<Board> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::TileId;

    fn board_with_tray(n: usize) -> Board {
        Board::empty(0, (0..n).map(|i| TileId::new(i.to_string())).collect())
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut history = History::new(4);
        history.push(board_with_tray(1));
        history.push(board_with_tray(2));
        assert_eq!(history.pop(), Some(board_with_tray(2)));
        assert_eq!(history.pop(), Some(board_with_tray(1)));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut history = History::new(3);
        for n in 0..5 {
            history.push(board_with_tray(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.pop(), Some(board_with_tray(4)));
        assert_eq!(history.pop(), Some(board_with_tray(3)));
        assert_eq!(history.pop(), Some(board_with_tray(2)));
        assert!(history.is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = History::new(0);
        history.push(board_with_tray(1));
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 0);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new(2);
        history.push(board_with_tray(1));
        history.clear();
        assert_eq!(history.pop(), None);
    }
}
