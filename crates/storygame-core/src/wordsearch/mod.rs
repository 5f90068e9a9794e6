//! Word search engine.
//!
//! [`placement`] hides the puzzle words in a square grid; [`WordSearch`]
//! tracks the player's cell selection and the words found so far.

mod grid;
pub mod placement;
mod tracker;

use serde::{Deserialize, Serialize};

pub use grid::{Coord, Direction, LetterGrid};
pub use placement::Placement;
pub use tracker::{
    FoundWords, SearchProgress, SelectionOutcome, SelectionReport, WordSearch,
};

/// Random (direction, anchor) tries per word before it is dropped.
pub const DEFAULT_ATTEMPTS_PER_WORD: usize = 240;

pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordSearchConfig {
    pub attempts_per_word: usize,
    /// Letters used to fill cells no word occupies.
    pub alphabet: String,
}

impl Default for WordSearchConfig {
    fn default() -> Self {
        Self {
            attempts_per_word: DEFAULT_ATTEMPTS_PER_WORD,
            alphabet: DEFAULT_ALPHABET.to_string(),
        }
    }
}

impl WordSearchConfig {
    /// Filler letters, falling back to A-Z when the configured alphabet is blank.
    pub(crate) fn alphabet_chars(&self) -> Vec<char> {
        let chars: Vec<char> = self.alphabet.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.is_empty() {
            DEFAULT_ALPHABET.chars().collect()
        } else {
            chars
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = WordSearchConfig::default();
        assert_eq!(config.attempts_per_word, 240);
        assert_eq!(config.alphabet_chars().len(), 26);
    }

    #[test]
    fn test_blank_alphabet_falls_back() {
        let config = WordSearchConfig {
            alphabet: "  ".into(),
            ..WordSearchConfig::default()
        };
        assert_eq!(config.alphabet_chars(), DEFAULT_ALPHABET.chars().collect::<Vec<_>>());
    }

    #[test]
    fn test_config_deserializes_partial() {
        let config: WordSearchConfig = serde_json::from_str(r#"{"alphabet":"XY"}"#).unwrap();
        assert_eq!(config.attempts_per_word, DEFAULT_ATTEMPTS_PER_WORD);
        assert_eq!(config.alphabet_chars(), vec!['X', 'Y']);
    }
}
