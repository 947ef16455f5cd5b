//! Application configuration constants.
//!
//! This module centralizes the tunable values used by distractor selection
//! and the few settings that can be overridden from `config.toml` or `.env`.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::Strategy;
use crate::paths;

// ==================== Config File ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
    quiz: Option<QuizConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct QuizConfig {
    distractor_count: Option<usize>,
    strategy: Option<String>,
}

fn read_config_file() -> Option<AppConfig> {
    let contents = std::fs::read_to_string("config.toml").ok()?;
    match toml::from_str::<AppConfig>(&contents) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Ignoring malformed config.toml: {}", e);
            None
        }
    }
}

// ==================== Database Configuration ====================

/// Load corpus database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Priority 1: config.toml
    if let Some(path) = read_config_file()
        .and_then(|c| c.database)
        .and_then(|db| db.path)
    {
        tracing::info!("Using corpus database from config.toml: {}", path);
        return PathBuf::from(path);
    }

    // Priority 2: .env DATABASE_PATH
    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using corpus database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    let default = PathBuf::from(paths::corpus_db_path());
    tracing::info!("Using default corpus database path: {}", default.display());
    default
}

// ==================== Quiz Configuration ====================

/// Number of distractors in a word bank (4 options total)
pub const DISTRACTOR_COUNT: usize = 3;

/// Quiz defaults after applying config.toml overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizDefaults {
    pub distractor_count: usize,
    pub strategy: Strategy,
}

impl Default for QuizDefaults {
    fn default() -> Self {
        Self {
            distractor_count: DISTRACTOR_COUNT,
            strategy: Strategy::Smart,
        }
    }
}

/// Load quiz defaults from the `[quiz]` table of config.toml
pub fn load_quiz_defaults() -> QuizDefaults {
    let quiz = read_config_file().and_then(|c| c.quiz).unwrap_or_default();
    quiz_defaults_from(quiz)
}

fn quiz_defaults_from(quiz: QuizConfig) -> QuizDefaults {
    let mut defaults = QuizDefaults::default();
    if let Some(count) = quiz.distractor_count {
        defaults.distractor_count = count;
    }
    if let Some(name) = quiz.strategy {
        match Strategy::from_str(&name) {
            Some(strategy) => defaults.strategy = strategy,
            None => tracing::warn!("Unknown strategy '{}' in config.toml, using smart", name),
        }
    }
    defaults
}

// ==================== Selection Tuning ====================

/// Smart mode asks the semantic phase for this many times the target count,
/// since many same-root words share a gloss with the answer
pub const SEMANTIC_OVERFETCH: usize = 2;

/// Multiplier for queries that are filtered after fetching (random, other surahs)
pub const RANDOM_OVERFETCH: usize = 3;

/// Allowed transliteration length difference for phonetic distractors
pub const PHONETIC_TOLERANCE: usize = 2;

/// Minimum translation length difference for length-based distractors
pub const LENGTH_GAP: usize = 3;

/// Lower bound for the short-side threshold of length-based distractors
pub const LENGTH_FLOOR: usize = 2;

/// Easy distractors must have a translation longer than this
pub const EASY_MIN_TRANSLATION_LEN: usize = 3;

/// Row cap for corpus queries that have no explicit limit
pub const MAX_QUERY_ROWS: usize = 500;

/// Very common English function words, used as trivially wrong options
pub const SIMPLE_WORDS: &[&str] = &[
    "the", "and", "of", "to", "in", "is", "it", "that", "for", "on", "with", "as", "at", "by",
    "from", "or", "not", "but", "this", "be",
];

/// Check whether a translation is on the common-word allowlist (case-insensitive)
pub fn is_simple_word(translation: &str) -> bool {
    let lower = translation.trim().to_lowercase();
    SIMPLE_WORDS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_defaults() {
        let defaults = QuizDefaults::default();
        assert_eq!(defaults.distractor_count, 3);
        assert_eq!(defaults.strategy, Strategy::Smart);
    }

    #[test]
    fn test_quiz_defaults_from_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [quiz]
            distractor_count = 5
            strategy = "mixed"
            "#,
        )
        .unwrap();
        let defaults = quiz_defaults_from(config.quiz.unwrap());
        assert_eq!(defaults.distractor_count, 5);
        assert_eq!(defaults.strategy, Strategy::Mixed);
    }

    #[test]
    fn test_quiz_defaults_unknown_strategy_falls_back() {
        let defaults = quiz_defaults_from(QuizConfig {
            distractor_count: None,
            strategy: Some("clever".to_string()),
        });
        assert_eq!(defaults, QuizDefaults::default());
    }

    #[test]
    fn test_database_section_parses() {
        let config: AppConfig = toml::from_str("[database]\npath = \"data/q.db\"\n").unwrap();
        assert_eq!(config.database.unwrap().path.as_deref(), Some("data/q.db"));
    }

    #[test]
    fn test_is_simple_word() {
        assert!(is_simple_word("the"));
        assert!(is_simple_word("The"));
        assert!(is_simple_word(" and "));
        assert!(!is_simple_word("Lord"));
        assert!(!is_simple_word(""));
    }
}
