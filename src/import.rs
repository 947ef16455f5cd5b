//! Loading word lists from JSON exports into the corpus.
//!
//! Expects a JSON array of word objects:
//! ```json
//! [{"location": "1:1:1", "surah_number": 1, "verse": 1,
//!   "translation": "In (the) name", "transliteration": "bis'mi",
//!   "root_arabic": "سمو", "root_latin": "smw"}]
//! ```

use rusqlite::Connection;
use std::fs;
use std::path::Path;

use crate::db;
use crate::domain::Word;

/// Error loading a word list.
#[derive(Debug)]
pub enum WordLoadError {
    IoError(String),
    ParseError(String),
    InvalidWord(String),
    Database(rusqlite::Error),
}

impl std::fmt::Display for WordLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WordLoadError::IoError(e) => write!(f, "IO error: {}", e),
            WordLoadError::ParseError(e) => write!(f, "Parse error: {}", e),
            WordLoadError::InvalidWord(e) => write!(f, "Invalid word: {}", e),
            WordLoadError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for WordLoadError {}

impl From<rusqlite::Error> for WordLoadError {
    fn from(e: rusqlite::Error) -> Self {
        WordLoadError::Database(e)
    }
}

/// Parse and validate a JSON word list. The whole list is rejected if any
/// word is invalid, so a bad export never lands half-imported.
pub fn parse_words(json: &str) -> Result<Vec<Word>, WordLoadError> {
    let words: Vec<Word> =
        serde_json::from_str(json).map_err(|e| WordLoadError::ParseError(e.to_string()))?;

    words
        .into_iter()
        .map(|word| match word.validate() {
            Ok(()) => Ok(word.normalized()),
            Err(e) => Err(WordLoadError::InvalidWord(format!("{}: {}", word.location, e))),
        })
        .collect()
}

/// Load words from a single JSON file.
pub fn load_words_from_file(path: &Path) -> Result<Vec<Word>, WordLoadError> {
    let content = fs::read_to_string(path)
        .map_err(|e| WordLoadError::IoError(format!("{}: {}", path.display(), e)))?;

    parse_words(&content).map_err(|e| match e {
        WordLoadError::ParseError(msg) => {
            WordLoadError::ParseError(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Load a JSON word list and store it in the corpus database.
pub fn import_words_file(conn: &Connection, path: &Path) -> Result<usize, WordLoadError> {
    let words = load_words_from_file(path)?;
    let inserted = db::insert_words(conn, &words)?;
    tracing::info!("Imported {} words from {}", inserted, path.display());
    Ok(inserted)
}
