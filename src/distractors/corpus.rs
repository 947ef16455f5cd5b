//! Corpus query contract consumed by the distractor generator.
//!
//! Backends only answer the query shapes below. Excluding the target word's
//! own location and translation is left to the generator.

use std::fmt;

use crate::db::DbLockError;
use crate::domain::Word;

/// Failure of a single corpus query
#[derive(Debug)]
pub enum QueryError {
    Database(rusqlite::Error),
    /// Backend could not be reached (e.g. a poisoned connection lock)
    Unavailable,
    InvalidRow(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Database(e) => write!(f, "Database error: {}", e),
            QueryError::Unavailable => write!(f, "Corpus unavailable"),
            QueryError::InvalidRow(e) => write!(f, "Invalid row: {}", e),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for QueryError {
    fn from(e: rusqlite::Error) -> Self {
        QueryError::Database(e)
    }
}

impl From<DbLockError> for QueryError {
    fn from(_: DbLockError) -> Self {
        QueryError::Unavailable
    }
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Read-only word lookups the distractor strategies are built on.
pub trait WordCorpus {
    fn find_by_location(&self, location: &str) -> QueryResult<Option<Word>>;

    /// Words of one verse in reading order
    fn query_by_verse(&self, surah_number: u16, verse: u32) -> QueryResult<Vec<Word>>;

    fn query_by_root(&self, root_arabic: &str) -> QueryResult<Vec<Word>>;

    fn query_by_surah(&self, surah_number: u16) -> QueryResult<Vec<Word>>;

    /// Translation length in characters, both bounds inclusive
    fn query_by_length_range(&self, min_len: usize, max_len: usize) -> QueryResult<Vec<Word>>;

    /// Transliteration length in characters, both bounds inclusive
    fn query_by_transliteration_length(
        &self,
        min_len: usize,
        max_len: usize,
    ) -> QueryResult<Vec<Word>>;

    fn query_random(&self, limit: usize) -> QueryResult<Vec<Word>>;

    fn query_excluding_surah(&self, surah_number: u16, limit: usize) -> QueryResult<Vec<Word>>;

    /// Words glossed with one of the common English function words
    fn query_simple_words(&self) -> QueryResult<Vec<Word>>;
}

impl<C: WordCorpus + ?Sized> WordCorpus for &C {
    fn find_by_location(&self, location: &str) -> QueryResult<Option<Word>> {
        (**self).find_by_location(location)
    }

    fn query_by_verse(&self, surah_number: u16, verse: u32) -> QueryResult<Vec<Word>> {
        (**self).query_by_verse(surah_number, verse)
    }

    fn query_by_root(&self, root_arabic: &str) -> QueryResult<Vec<Word>> {
        (**self).query_by_root(root_arabic)
    }

    fn query_by_surah(&self, surah_number: u16) -> QueryResult<Vec<Word>> {
        (**self).query_by_surah(surah_number)
    }

    fn query_by_length_range(&self, min_len: usize, max_len: usize) -> QueryResult<Vec<Word>> {
        (**self).query_by_length_range(min_len, max_len)
    }

    fn query_by_transliteration_length(
        &self,
        min_len: usize,
        max_len: usize,
    ) -> QueryResult<Vec<Word>> {
        (**self).query_by_transliteration_length(min_len, max_len)
    }

    fn query_random(&self, limit: usize) -> QueryResult<Vec<Word>> {
        (**self).query_random(limit)
    }

    fn query_excluding_surah(&self, surah_number: u16, limit: usize) -> QueryResult<Vec<Word>> {
        (**self).query_excluding_surah(surah_number, limit)
    }

    fn query_simple_words(&self) -> QueryResult<Vec<Word>> {
        (**self).query_simple_words()
    }
}

/// Validate and normalize words crossing into the core, dropping bad records.
pub fn retain_valid(words: Vec<Word>) -> Vec<Word> {
    words
        .into_iter()
        .filter_map(|word| match word.validate() {
            Ok(()) => Some(word.normalized()),
            Err(e) => {
                tracing::warn!("Skipping corpus word {}: {}", word.location, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::word;

    #[test]
    fn test_retain_valid_drops_bad_words() {
        let mut bad = word("2:1:1", "Alif Laam Meem", "alif-lam-mim");
        bad.surah_number = 3;

        let kept = retain_valid(vec![word("2:2:1", "That", "dhālika"), bad]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].location, "2:2:1");
    }

    #[test]
    fn test_query_error_display() {
        assert_eq!(QueryError::Unavailable.to_string(), "Corpus unavailable");
        assert_eq!(
            QueryError::InvalidRow("bad verse".into()).to_string(),
            "Invalid row: bad verse"
        );
    }

    #[test]
    fn test_query_error_from_lock_error() {
        let err: QueryError = DbLockError.into();
        assert!(matches!(err, QueryError::Unavailable));
    }
}
