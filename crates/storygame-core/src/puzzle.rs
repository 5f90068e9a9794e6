//! Puzzle definitions and the normalizer that builds them from raw data.
//!
//! Puzzle files are authored by hand, so normalization is lenient: bare
//! values are stringified, missing fields get defaults and inconsistent
//! entries are dropped. Every repair is reported as a [`PuzzleDataIssue`]
//! and logged, but loading itself never fails.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PuzzleDataIssue;

/// Grid side used when the data does not specify a usable one.
pub const DEFAULT_GRID_SIZE: usize = 12;

/// Largest grid the word search will build.
pub const MAX_GRID_SIZE: usize = 64;

/// Identity of a tile. Unique within a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(String);

impl TileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An atomic puzzle piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Main caption (English in the bundled stories).
    pub primary: String,
    /// Secondary caption (Chinese in the bundled stories), possibly empty.
    pub secondary: String,
}

impl Tile {
    pub fn new(id: impl Into<String>, primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            id: TileId::new(id),
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// A tile whose id and caption are the same label.
    pub fn bare(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(label.clone(), label, "")
    }
}

/// Optional colour grouping. Only the presentation layer reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGroups {
    #[serde(default)]
    pub top: Vec<String>,
    #[serde(default)]
    pub mid: Vec<String>,
    #[serde(default)]
    pub bottom: Vec<String>,
}

/// Result of normalization: the definition plus every repair that was made.
#[derive(Debug, Clone)]
pub struct Normalized<T> {
    pub puzzle: T,
    pub issues: Vec<PuzzleDataIssue>,
}

impl<T> Normalized<T> {
    fn new(puzzle: T, issues: Vec<PuzzleDataIssue>) -> Self {
        for issue in &issues {
            tracing::warn!(%issue, "puzzle data repaired");
        }
        Self { puzzle, issues }
    }
}

/// Serialized form of [`ReorderPuzzle`]. Deserializing goes through the
/// same repairs as [`ReorderPuzzle::from_parts`].
#[derive(Deserialize)]
struct RawReorderPuzzle {
    #[serde(default)]
    tiles: Vec<Tile>,
    #[serde(default)]
    correct_order: Option<Vec<TileId>>,
    #[serde(default)]
    groups: Option<TileGroups>,
}

impl From<RawReorderPuzzle> for ReorderPuzzle {
    fn from(raw: RawReorderPuzzle) -> Self {
        let mut issues = Vec::new();
        let puzzle = Self::repair(raw.tiles, raw.correct_order, raw.groups, &mut issues);
        Normalized::new(puzzle, issues).puzzle
    }
}

/// Immutable definition of a reorder puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawReorderPuzzle")]
pub struct ReorderPuzzle {
    tiles: Vec<Tile>,
    correct_order: Vec<TileId>,
    groups: Option<TileGroups>,
}

impl ReorderPuzzle {
    /// Build a puzzle from already-typed parts. `order` defaults to the tile
    /// declaration order.
    pub fn from_parts(tiles: Vec<Tile>, order: Option<Vec<TileId>>) -> Normalized<Self> {
        let mut issues = Vec::new();
        let puzzle = Self::repair(tiles, order, None, &mut issues);
        Normalized::new(puzzle, issues)
    }

    /// Tiles whose id and caption are the given labels, in correct order.
    pub fn from_labels(labels: &[&str]) -> Self {
        Self::from_parts(labels.iter().map(|l| Tile::bare(*l)).collect(), None).puzzle
    }

    /// Normalize a raw JSON puzzle object:
    /// `{ "tiles": [...], "correct": [...], "colorGroups": {...} }`.
    pub fn from_value(data: &Value) -> Normalized<Self> {
        let mut issues = Vec::new();

        let tiles = match data.get("tiles").and_then(Value::as_array) {
            Some(raw) => raw.iter().enumerate().map(|(i, t)| raw_tile(i, t)).collect(),
            None => {
                issues.push(PuzzleDataIssue::MissingTiles);
                Vec::new()
            }
        };

        let order = data
            .get("correct")
            .and_then(Value::as_array)
            .map(|raw| raw.iter().map(|v| TileId::new(stringify(v))).collect());

        let groups = data
            .get("colorGroups")
            .filter(|v| v.is_object())
            .and_then(|v| serde_json::from_value(v.clone()).ok());

        let puzzle = Self::repair(tiles, order, groups, &mut issues);
        Normalized::new(puzzle, issues)
    }

    fn repair(
        tiles: Vec<Tile>,
        order: Option<Vec<TileId>>,
        groups: Option<TileGroups>,
        issues: &mut Vec<PuzzleDataIssue>,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(tiles.len());
        for (index, tile) in tiles.into_iter().enumerate() {
            if seen.insert(tile.id.clone()) {
                unique.push(tile);
            } else {
                issues.push(PuzzleDataIssue::DuplicateTile {
                    id: tile.id.to_string(),
                    index,
                });
            }
        }

        let mut correct_order = Vec::new();
        match order {
            Some(order) => {
                let mut used = HashSet::new();
                for id in order {
                    if !seen.contains(&id) {
                        issues.push(PuzzleDataIssue::UnknownOrderTile { id: id.to_string() });
                    } else if !used.insert(id.clone()) {
                        issues.push(PuzzleDataIssue::RepeatedOrderTile { id: id.to_string() });
                    } else {
                        correct_order.push(id);
                    }
                }
                if correct_order.is_empty() && !unique.is_empty() {
                    issues.push(PuzzleDataIssue::DefaultedOrder);
                    correct_order = unique.iter().map(|t| t.id.clone()).collect();
                }
            }
            None => correct_order = unique.iter().map(|t| t.id.clone()).collect(),
        }

        Self {
            tiles: unique,
            correct_order,
            groups,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn correct_order(&self) -> &[TileId] {
        &self.correct_order
    }

    pub fn groups(&self) -> Option<&TileGroups> {
        self.groups.as_ref()
    }

    /// Number of slots on the board.
    pub fn slot_count(&self) -> usize {
        self.correct_order.len()
    }

    pub fn tile(&self, id: &TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| &t.id == id)
    }
}

#[derive(Deserialize)]
struct RawWordSearchPuzzle {
    #[serde(default)]
    size: Option<usize>,
    #[serde(default)]
    words: Vec<String>,
}

impl From<RawWordSearchPuzzle> for WordSearchPuzzle {
    fn from(raw: RawWordSearchPuzzle) -> Self {
        Self::new(raw.size.unwrap_or(DEFAULT_GRID_SIZE), &raw.words).puzzle
    }
}

/// Immutable definition of a word search puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWordSearchPuzzle")]
pub struct WordSearchPuzzle {
    size: usize,
    words: Vec<String>,
}

impl WordSearchPuzzle {
    pub fn new<S: AsRef<str>>(size: usize, words: &[S]) -> Normalized<Self> {
        let mut issues = Vec::new();
        let size = checked_size(Some(size as f64), &size.to_string(), &mut issues);
        let words = normalize_words(words.iter().map(|w| w.as_ref().to_string()), &mut issues);
        Normalized::new(Self { size, words }, issues)
    }

    /// Normalize a raw JSON puzzle object: `{ "size": 12, "words": [...] }`.
    pub fn from_value(data: &Value) -> Normalized<Self> {
        let mut issues = Vec::new();

        let size = match data.get("size").filter(|v| !v.is_null()) {
            None => DEFAULT_GRID_SIZE,
            Some(raw) => checked_size(raw.as_f64(), &stringify(raw), &mut issues),
        };

        let words = match data.get("words").and_then(Value::as_array) {
            Some(raw) => normalize_words(raw.iter().map(stringify), &mut issues),
            None => {
                issues.push(PuzzleDataIssue::MissingWords);
                Vec::new()
            }
        };

        Normalized::new(Self { size, words }, issues)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Upper-cased, de-duplicated word list in declaration order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

fn checked_size(raw: Option<f64>, text: &str, issues: &mut Vec<PuzzleDataIssue>) -> usize {
    let used = match raw {
        Some(n) if n.fract() == 0.0 && n >= 1.0 => (n as usize).min(MAX_GRID_SIZE),
        _ => DEFAULT_GRID_SIZE,
    };
    if raw != Some(used as f64) {
        issues.push(PuzzleDataIssue::InvalidSize {
            given: text.to_string(),
            used,
        });
    }
    used
}

fn normalize_words(
    raw: impl Iterator<Item = String>,
    issues: &mut Vec<PuzzleDataIssue>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for word in raw {
        let word = word.trim().to_uppercase();
        if word.is_empty() {
            continue;
        }
        if seen.insert(word.clone()) {
            words.push(word);
        } else {
            issues.push(PuzzleDataIssue::DuplicateWord { word });
        }
    }
    words
}

fn raw_tile(index: usize, raw: &Value) -> Tile {
    let Some(obj) = raw.as_object() else {
        return Tile::bare(stringify(raw));
    };
    let field = |name: &str| obj.get(name).filter(|v| !v.is_null()).map(stringify);

    let id = field("id").unwrap_or_else(|| format!("tile_{index}"));
    let primary = field("en")
        .or_else(|| field("label"))
        .unwrap_or_else(|| id.clone());
    let secondary = field("zh").unwrap_or_default();
    Tile::new(id, primary, secondary)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
