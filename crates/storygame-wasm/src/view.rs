//! Render snapshots. The page rebuilds its DOM from these after every call.

use serde::{Deserialize, Serialize};
use storygame_core::{Coord, Reorder, Selection, TileGroups, TileId, WordSearch};

// Colour bands for the bundled salvation story, used when the puzzle has no
// groups of its own or leaves a tile out.
const STORY_TOP: &[&str] = &["creation", "fall", "abraham", "exodus", "promised_land"];
const STORY_MID: &[&str] = &["kingdom", "divided_kingdom", "exile", "return"];
const STORY_BOTTOM: &[&str] = &["jesus_christ", "church", "new_heaven_new_earth"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorGroup {
    Top,
    Mid,
    Bottom,
}

impl ColorGroup {
    /// Puzzle-supplied groups win over the built-in story bands.
    pub fn resolve(id: &TileId, groups: Option<&TileGroups>) -> Option<Self> {
        let id = id.as_str();
        let has = |list: &[String]| list.iter().any(|g| g == id);
        if let Some(groups) = groups {
            if has(&groups.top) {
                return Some(ColorGroup::Top);
            }
            if has(&groups.mid) {
                return Some(ColorGroup::Mid);
            }
            if has(&groups.bottom) {
                return Some(ColorGroup::Bottom);
            }
        }
        if STORY_TOP.contains(&id) {
            Some(ColorGroup::Top)
        } else if STORY_MID.contains(&id) {
            Some(ColorGroup::Mid)
        } else if STORY_BOTTOM.contains(&id) {
            Some(ColorGroup::Bottom)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub id: TileId,
    pub primary: String,
    pub secondary: String,
    pub group: Option<ColorGroup>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub index: usize,
    /// 1-based box number.
    pub label: usize,
    pub tile: Option<TileView>,
    pub locked: bool,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderView {
    pub slots: Vec<SlotView>,
    pub tray: Vec<TileView>,
    pub correct: usize,
    pub total: usize,
    pub solved: bool,
    pub can_undo: bool,
}

impl ReorderView {
    pub fn of(game: &Reorder) -> Self {
        let puzzle = game.puzzle();
        let selection = game.selection();
        let tile_view = |id: &TileId, selected: bool| {
            let (primary, secondary) = puzzle
                .tile(id)
                .map(|t| (t.primary.clone(), t.secondary.clone()))
                .unwrap_or_else(|| (id.to_string(), String::new()));
            TileView {
                id: id.clone(),
                primary,
                secondary,
                group: ColorGroup::resolve(id, puzzle.groups()),
                selected,
            }
        };

        let slots = game
            .slots()
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let selected = matches!(selection, Some(Selection::Slot { slot, .. }) if *slot == index);
                SlotView {
                    index,
                    label: index + 1,
                    tile: slot.occupant.as_ref().map(|id| tile_view(id, selected)),
                    locked: slot.locked,
                    correct: puzzle
                        .correct_order()
                        .get(index)
                        .is_some_and(|expected| slot.holds(expected)),
                }
            })
            .collect();

        let tray = game
            .tray()
            .iter()
            .map(|id| {
                let selected = matches!(selection, Some(Selection::Tray { tile }) if tile == id);
                tile_view(id, selected)
            })
            .collect();

        Self {
            slots,
            tray,
            correct: game.correct_count(),
            total: game.total(),
            solved: game.is_solved(),
            can_undo: game.can_undo(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub letter: char,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordTag {
    pub word: String,
    pub found: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSearchView {
    pub size: usize,
    /// Row-major.
    pub cells: Vec<CellView>,
    /// Only words that made it into the grid.
    pub words: Vec<WordTag>,
    pub selected: String,
    pub found: usize,
    pub placed: usize,
    pub complete: bool,
}

impl WordSearchView {
    pub fn of(game: &WordSearch) -> Self {
        let grid = game.grid();
        let size = grid.size();
        let cells = (0..size)
            .flat_map(|row| (0..size).map(move |col| Coord::new(row, col)))
            .filter_map(|coord| {
                grid.get(coord).map(|letter| CellView {
                    row: coord.row,
                    col: coord.col,
                    letter,
                    selected: game.is_selected(coord),
                })
            })
            .collect();
        let words = game
            .placed_words()
            .map(|word| WordTag {
                word: word.to_string(),
                found: game.found().contains(word),
            })
            .collect();

        Self {
            size,
            cells,
            words,
            selected: game.selected_text(),
            found: game.found_count(),
            placed: game.placed_count(),
            complete: game.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storygame_core::{ReorderConfig, ReorderPuzzle, SimpleRng, WordSearchConfig, WordSearchPuzzle};

    #[test]
    fn test_group_resolution() {
        let groups = TileGroups {
            top: vec!["a".into()],
            mid: vec!["exodus".into()],
            bottom: Vec::new(),
        };
        assert_eq!(ColorGroup::resolve(&"a".into(), Some(&groups)), Some(ColorGroup::Top));
        assert_eq!(ColorGroup::resolve(&"exodus".into(), Some(&groups)), Some(ColorGroup::Mid));
        assert_eq!(ColorGroup::resolve(&"exodus".into(), None), Some(ColorGroup::Top));
        assert_eq!(ColorGroup::resolve(&"church".into(), None), Some(ColorGroup::Bottom));
        assert_eq!(ColorGroup::resolve(&"zzz".into(), Some(&groups)), None);
    }

    #[test]
    fn test_reorder_view() {
        let puzzle = ReorderPuzzle::from_labels(&["a", "b", "c"]);
        let mut game = Reorder::with_rng(puzzle, ReorderConfig::default(), SimpleRng::with_seed(3));
        game.place_from_tray(&"a".into(), 0);
        game.place_from_tray(&"c".into(), 1);
        game.select_from_tray(&"b".into());

        let view = ReorderView::of(&game);
        assert_eq!(view.slots.len(), 3);
        assert_eq!(view.slots[0].label, 1);
        assert!(view.slots[0].correct);
        assert!(!view.slots[1].correct);
        assert!(view.slots[2].tile.is_none());
        assert_eq!(view.tray.len(), 1);
        assert!(view.tray[0].selected);
        assert_eq!(view.correct, 1);
        assert!(view.can_undo);

        game.select_from_slot(1);
        let view = ReorderView::of(&game);
        assert!(view.slots[1].tile.as_ref().is_some_and(|t| t.selected));
        assert!(!view.tray[0].selected);
    }

    #[test]
    fn test_word_search_view() {
        let puzzle = WordSearchPuzzle::new(6, &["DOG", "CAT"]).puzzle;
        let mut game =
            WordSearch::with_rng(puzzle, WordSearchConfig::default(), SimpleRng::with_seed(8));
        game.toggle_cell(Coord::new(0, 0));

        let view = WordSearchView::of(&game);
        assert_eq!(view.size, 6);
        assert_eq!(view.cells.len(), 36);
        assert!(view.cells[0].selected);
        assert_eq!(view.words.len(), game.placed_count());
        assert_eq!(view.selected.chars().count(), game.selection().len());
        assert!(!view.complete);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["cells"][0]["row"], 0);
    }
}
