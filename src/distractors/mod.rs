//! Distractor selection and multiple-choice word bank assembly.
//!
//! A [`DistractorGenerator`] picks plausible wrong answers for a word using
//! one of several [`Strategy`] rules, then mixes them with the correct word
//! into a shuffled [`WordBank`]. Every bank satisfies:
//! - exactly one entry is marked correct, and it is the requested word
//! - no distractor shares the correct word's location
//! - no two entries share a translation, and caller-supplied
//!   `avoid_translations` never appear among distractors
//!
//! Corpus failures never surface here: each failing query is logged and
//! treated as an empty result, so callers get the best bank obtainable.

pub mod corpus;
pub mod memory;
pub mod shuffle;
mod strategies;

pub use corpus::{retain_valid, QueryError, QueryResult, WordCorpus};
pub use memory::InMemoryCorpus;
pub use shuffle::shuffle_array;

use rand::Rng;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::{BankEntry, Difficulty, Strategy, Word, WordBank};

/// Options accepted by word bank generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BankOptions {
    /// Carried for callers that choose a strategy by difficulty; smart mode ignores it
    pub difficulty: Option<Difficulty>,
    pub include_semantic: bool,
    pub include_surah: bool,
    pub include_random: bool,
    /// Translations already placed elsewhere in the puzzle
    pub avoid_translations: Vec<String>,
}

impl Default for BankOptions {
    fn default() -> Self {
        Self {
            difficulty: None,
            include_semantic: true,
            include_surah: true,
            include_random: true,
            avoid_translations: Vec::new(),
        }
    }
}

impl BankOptions {
    pub fn avoiding<I, S>(translations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            avoid_translations: translations.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Translations already taken in a selection. The first word to claim a
/// translation keeps it; later words with the same text are rejected.
struct UsedTranslations(HashSet<String>);

impl UsedTranslations {
    fn new(correct: &Word, avoid: &[String]) -> Self {
        let mut used: HashSet<String> = avoid.iter().cloned().collect();
        if let Some(t) = correct.translation() {
            used.insert(t.to_string());
        }
        Self(used)
    }

    /// Words without a translation can never be claimed
    fn claim(&mut self, word: &Word) -> bool {
        match word.translation() {
            Some(t) => self.0.insert(t.to_string()),
            None => false,
        }
    }
}

/// Selects distractors from a corpus. `R` is the random source used for
/// every shuffle, so tests can seed it.
pub struct DistractorGenerator<C, R = ThreadRng> {
    corpus: C,
    rng: R,
}

impl<C: WordCorpus> DistractorGenerator<C> {
    pub fn new(corpus: C) -> Self {
        Self::with_rng(corpus, rand::rng())
    }
}

impl<C: WordCorpus, R: Rng> DistractorGenerator<C, R> {
    pub fn with_rng(corpus: C, rng: R) -> Self {
        Self { corpus, rng }
    }

    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    /// Build a shuffled word bank for `correct` using the smart strategy.
    ///
    /// Returns between 1 and `distractor_count + 1` entries; a short bank
    /// means the corpus had no more unique candidates.
    pub fn generate_word_bank(
        &mut self,
        correct: &Word,
        distractor_count: usize,
        options: &BankOptions,
    ) -> WordBank {
        self.generate_word_bank_with(correct, distractor_count, Strategy::Smart, options)
    }

    /// Build a shuffled word bank with an explicitly chosen strategy.
    ///
    /// The bank invariants are re-applied to whatever the strategy returns,
    /// so the avoid list holds even for strategies that do not read options.
    pub fn generate_word_bank_with(
        &mut self,
        correct: &Word,
        distractor_count: usize,
        strategy: Strategy,
        options: &BankOptions,
    ) -> WordBank {
        // Smart filters the avoid list itself; other strategies get headroom for it
        let requested = if strategy == Strategy::Smart || distractor_count == 0 {
            distractor_count
        } else {
            distractor_count.saturating_add(options.avoid_translations.len())
        };
        let distractors = self.distractors(strategy, correct, requested, options);

        let mut used = UsedTranslations::new(correct, &options.avoid_translations);
        let mut bank: WordBank = Vec::with_capacity(distractor_count + 1);
        bank.push(BankEntry::correct(correct.clone()));
        bank.extend(
            distractors
                .into_iter()
                .filter(|w| w.location != correct.location && used.claim(w))
                .take(distractor_count)
                .map(BankEntry::distractor),
        );

        if bank.len() <= distractor_count {
            tracing::debug!(
                "Word bank for {} has {} of {} distractors ({})",
                correct.location,
                bank.len() - 1,
                distractor_count,
                strategy.as_str()
            );
        }

        shuffle_array(&bank, &mut self.rng)
    }

    /// Build one bank per word of a verse for the "rebuild the verse" game.
    ///
    /// Each bank avoids the translations of the other words in the verse, so
    /// no slot offers another slot's answer as a distractor.
    pub fn verse_word_banks(&mut self, words: &[Word], distractor_count: usize) -> Vec<WordBank> {
        words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let options = BankOptions::avoiding(
                    words
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| *j != i)
                        .filter_map(|(_, other)| other.translation.clone()),
                );
                self.generate_word_bank(word, distractor_count, &options)
            })
            .collect()
    }
}
