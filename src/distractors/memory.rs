//! In-memory word corpus with root and surah indexes.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::collections::HashMap;
use std::sync::Mutex;

use super::corpus::{retain_valid, QueryError, QueryResult, WordCorpus};
use crate::config;
use crate::domain::Word;

pub struct InMemoryCorpus {
    words: Vec<Word>,
    by_location: HashMap<String, usize>,
    by_root: HashMap<String, Vec<usize>>,
    by_surah: HashMap<u16, Vec<usize>>,
    rng: Mutex<StdRng>,
}

impl InMemoryCorpus {
    /// Build a corpus from raw words. Invalid words are skipped and a repeated
    /// location keeps its first occurrence.
    pub fn new(words: impl IntoIterator<Item = Word>) -> Self {
        Self::with_rng(words, StdRng::from_os_rng())
    }

    /// Same as `new`, with a fixed seed for the random queries
    pub fn with_seed(words: impl IntoIterator<Item = Word>, seed: u64) -> Self {
        Self::with_rng(words, StdRng::seed_from_u64(seed))
    }

    fn with_rng(words: impl IntoIterator<Item = Word>, rng: StdRng) -> Self {
        let mut corpus = Self {
            words: Vec::new(),
            by_location: HashMap::new(),
            by_root: HashMap::new(),
            by_surah: HashMap::new(),
            rng: Mutex::new(rng),
        };

        for word in retain_valid(words.into_iter().collect()) {
            if corpus.by_location.contains_key(&word.location) {
                tracing::debug!("Duplicate location {} ignored", word.location);
                continue;
            }
            let idx = corpus.words.len();
            corpus.by_location.insert(word.location.clone(), idx);
            if let Some(root) = &word.root_arabic {
                corpus.by_root.entry(root.clone()).or_default().push(idx);
            }
            corpus.by_surah.entry(word.surah_number).or_default().push(idx);
            corpus.words.push(word);
        }

        corpus
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    fn collect(&self, indexes: Option<&Vec<usize>>) -> Vec<Word> {
        indexes
            .map(|ids| ids.iter().map(|&i| self.words[i].clone()).collect())
            .unwrap_or_default()
    }

    fn filtered(&self, keep: impl Fn(&Word) -> bool) -> Vec<Word> {
        self.words.iter().filter(|w| keep(w)).cloned().collect()
    }

    /// Uniform sample without replacement
    fn sample(&self, pool: Vec<&Word>, limit: usize) -> QueryResult<Vec<Word>> {
        let mut rng = self.rng.lock().map_err(|_| QueryError::Unavailable)?;
        Ok(pool.choose_multiple(&mut *rng, limit).map(|w| (*w).clone()).collect())
    }
}

impl WordCorpus for InMemoryCorpus {
    fn find_by_location(&self, location: &str) -> QueryResult<Option<Word>> {
        Ok(self.by_location.get(location).map(|&i| self.words[i].clone()))
    }

    fn query_by_verse(&self, surah_number: u16, verse: u32) -> QueryResult<Vec<Word>> {
        let mut words: Vec<Word> = self
            .collect(self.by_surah.get(&surah_number))
            .into_iter()
            .filter(|w| w.verse.as_number() == Some(verse))
            .collect();
        words.sort_by_key(|w| w.parsed_location().map(|l| l.position));
        Ok(words)
    }

    fn query_by_root(&self, root_arabic: &str) -> QueryResult<Vec<Word>> {
        Ok(self.collect(self.by_root.get(root_arabic)))
    }

    fn query_by_surah(&self, surah_number: u16) -> QueryResult<Vec<Word>> {
        Ok(self.collect(self.by_surah.get(&surah_number)))
    }

    fn query_by_length_range(&self, min_len: usize, max_len: usize) -> QueryResult<Vec<Word>> {
        Ok(self.filtered(|w| {
            w.translation_len()
                .is_some_and(|len| len >= min_len && len <= max_len)
        }))
    }

    fn query_by_transliteration_length(
        &self,
        min_len: usize,
        max_len: usize,
    ) -> QueryResult<Vec<Word>> {
        Ok(self.filtered(|w| {
            let len = w.transliteration_len();
            len >= min_len && len <= max_len
        }))
    }

    fn query_random(&self, limit: usize) -> QueryResult<Vec<Word>> {
        self.sample(self.words.iter().collect(), limit)
    }

    fn query_excluding_surah(&self, surah_number: u16, limit: usize) -> QueryResult<Vec<Word>> {
        let pool = self
            .words
            .iter()
            .filter(|w| w.surah_number != surah_number)
            .collect();
        self.sample(pool, limit)
    }

    fn query_simple_words(&self) -> QueryResult<Vec<Word>> {
        Ok(self.filtered(|w| w.translation().is_some_and(config::is_simple_word)))
    }
}
