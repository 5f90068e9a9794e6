//! Adapter configuration, passed in by the host page as a plain object.

use serde::{Deserialize, Serialize};
use storygame_core::reorder::DEFAULT_HISTORY_CAPACITY;
use storygame_core::wordsearch::{DEFAULT_ALPHABET, DEFAULT_ATTEMPTS_PER_WORD};
use storygame_core::{ReorderConfig, ShuffleMode, SimpleRng, WordSearchConfig};
use tracing::level_filters::LevelFilter;

use crate::feedback::Celebration;

/// Everything the host can tune. Every field is optional on the JS side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Emit "pop"/"ding" cues in responses.
    pub sound: bool,
    /// One of error, warn, info, debug, trace or off.
    ///
    /// The console subscriber is global and installed once per page, so
    /// only the first game constructed applies its level. Later games log
    /// at that level whatever they ask for.
    pub log_level: String,
    pub history_capacity: usize,
    pub shuffle_mode: ShuffleMode,
    pub attempts_per_word: usize,
    pub alphabet: String,
    /// Fixed RNG seed, for reproducible boards.
    pub seed: Option<u64>,
    pub reorder_badge: Celebration,
    pub word_search_badge: Celebration,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            sound: false,
            log_level: "info".to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            shuffle_mode: ShuffleMode::Tray,
            attempts_per_word: DEFAULT_ATTEMPTS_PER_WORD,
            alphabet: DEFAULT_ALPHABET.to_string(),
            seed: None,
            reorder_badge: Celebration::reorder(),
            word_search_badge: Celebration::word_search(),
        }
    }
}

impl AdapterConfig {
    pub fn reorder_config(&self) -> ReorderConfig {
        ReorderConfig {
            history_capacity: self.history_capacity,
            shuffle_mode: self.shuffle_mode,
        }
    }

    pub fn word_search_config(&self) -> WordSearchConfig {
        WordSearchConfig {
            attempts_per_word: self.attempts_per_word,
            alphabet: self.alphabet.clone(),
        }
    }

    pub fn rng(&self) -> SimpleRng {
        match self.seed {
            Some(seed) => SimpleRng::with_seed(seed),
            None => SimpleRng::new(),
        }
    }

    /// Unknown level names fall back to info.
    pub fn level(&self) -> LevelFilter {
        self.log_level.trim().parse().unwrap_or(LevelFilter::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdapterConfig::default();
        assert!(!config.sound);
        assert_eq!(config.reorder_config(), ReorderConfig::default());
        assert_eq!(config.word_search_config(), WordSearchConfig::default());
        assert_eq!(config.level(), LevelFilter::INFO);
    }

    #[test]
    fn test_partial_object() {
        let config: AdapterConfig = serde_json::from_str(
            r#"{"sound": true, "shuffle_mode": "unlocked_slots", "history_capacity": 5, "seed": 7}"#,
        )
        .unwrap();
        assert!(config.sound);
        assert_eq!(config.reorder_config().shuffle_mode, ShuffleMode::UnlockedSlots);
        assert_eq!(config.reorder_config().history_capacity, 5);
        assert_eq!(config.attempts_per_word, DEFAULT_ATTEMPTS_PER_WORD);
        assert_eq!(config.rng().next_u32(), SimpleRng::with_seed(7).next_u32());
    }

    #[test]
    fn test_badges_are_overridable() {
        let config: AdapterConfig = serde_json::from_str(
            r#"{"reorder_badge": {"title": "Yay", "sub": "Story sorted.", "badge": "Star"}}"#,
        )
        .unwrap();
        assert_eq!(config.reorder_badge.title, "Yay");
        assert_eq!(config.reorder_badge.badge, "Star");
        assert_eq!(config.word_search_badge, Celebration::word_search());
    }

    #[test]
    fn test_log_level_parsing() {
        let mut config = AdapterConfig::default();
        config.log_level = "DEBUG".into();
        assert_eq!(config.level(), LevelFilter::DEBUG);
        config.log_level = "off".into();
        assert_eq!(config.level(), LevelFilter::OFF);
        config.log_level = "chatty".into();
        assert_eq!(config.level(), LevelFilter::INFO);
    }
}
