//! SQLite-backed implementation of the word corpus.

use crate::config;
use crate::distractors::{retain_valid, QueryError, QueryResult, WordCorpus};
use crate::domain::Word;

use super::{try_lock, words, DbPool};

/// Word corpus stored in the `words` table of a SQLite database
#[derive(Clone)]
pub struct SqliteCorpus {
    pool: DbPool,
}

impl SqliteCorpus {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Run a query against the locked connection and validate the rows
    fn query(
        &self,
        run: impl FnOnce(&rusqlite::Connection) -> rusqlite::Result<Vec<Word>>,
    ) -> QueryResult<Vec<Word>> {
        let conn = try_lock(&self.pool)?;
        Ok(retain_valid(run(&conn)?))
    }
}

impl WordCorpus for SqliteCorpus {
    fn find_by_location(&self, location: &str) -> QueryResult<Option<Word>> {
        let conn = try_lock(&self.pool)?;
        match words::get_word_by_location(&conn, location)? {
            Some(word) => {
                word
                    .validate()
                    .map_err(|e| QueryError::InvalidRow(format!("{}: {}", location, e)))?;
                Ok(Some(word.normalized()))
            }
            None => Ok(None),
        }
    }

    fn query_by_verse(&self, surah_number: u16, verse: u32) -> QueryResult<Vec<Word>> {
        self.query(|conn| words::get_words_by_verse(conn, surah_number, &verse.to_string()))
    }

    fn query_by_root(&self, root_arabic: &str) -> QueryResult<Vec<Word>> {
        self.query(|conn| words::get_words_by_root(conn, root_arabic, config::MAX_QUERY_ROWS))
    }

    fn query_by_surah(&self, surah_number: u16) -> QueryResult<Vec<Word>> {
        self.query(|conn| words::get_words_by_surah(conn, surah_number, config::MAX_QUERY_ROWS))
    }

    fn query_by_length_range(&self, min_len: usize, max_len: usize) -> QueryResult<Vec<Word>> {
        self.query(|conn| {
            words::get_words_by_translation_length(conn, min_len, max_len, config::MAX_QUERY_ROWS)
        })
    }

    fn query_by_transliteration_length(
        &self,
        min_len: usize,
        max_len: usize,
    ) -> QueryResult<Vec<Word>> {
        self.query(|conn| {
            words::get_words_by_transliteration_length(
                conn,
                min_len,
                max_len,
                config::MAX_QUERY_ROWS,
            )
        })
    }

    fn query_random(&self, limit: usize) -> QueryResult<Vec<Word>> {
        self.query(|conn| words::get_random_words(conn, limit))
    }

    fn query_excluding_surah(&self, surah_number: u16, limit: usize) -> QueryResult<Vec<Word>> {
        self.query(|conn| words::get_words_excluding_surah(conn, surah_number, limit))
    }

    fn query_simple_words(&self) -> QueryResult<Vec<Word>> {
        self.query(|conn| {
            words::get_words_with_translations(conn, config::SIMPLE_WORDS, config::MAX_QUERY_ROWS)
        })
    }
}
