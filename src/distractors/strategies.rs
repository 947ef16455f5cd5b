//! Distractor selection strategies.
//!
//! Each strategy returns up to `count` words, fewer when the corpus cannot
//! supply enough distinct candidates. A failing corpus query counts as an
//! empty result for that query only.

use rand::Rng;
use rand::seq::SliceRandom;

use super::{BankOptions, DistractorGenerator, QueryResult, UsedTranslations, WordCorpus};
use crate::config;
use crate::db::LogOnError;
use crate::domain::{Difficulty, Strategy, Word};

/// Phases of the smart strategy, in fallback order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SmartPhase {
    Semantic,
    Surah,
    Random,
}

fn fetch(query: &str, result: QueryResult<Vec<Word>>) -> Vec<Word> {
    result.log_warn_default(&format!("Corpus query '{}' failed", query))
}

impl<C: WordCorpus, R: Rng> DistractorGenerator<C, R> {
    /// Dispatch to the named strategy
    pub fn distractors(
        &mut self,
        strategy: Strategy,
        correct: &Word,
        count: usize,
        options: &BankOptions,
    ) -> Vec<Word> {
        if count == 0 {
            return Vec::new();
        }
        match strategy {
            Strategy::Semantic => self.semantic_distractors(correct, count),
            Strategy::Surah => self.surah_distractors(correct, count),
            Strategy::Phonetic => self.phonetic_distractors(correct, count),
            Strategy::Random => self.random_distractors(correct, count),
            Strategy::Easy => self.easy_distractors(correct, count),
            Strategy::LengthBased => self.length_based_distractors(correct, count),
            Strategy::DifferentSurah => self.different_surah_distractors(correct, count),
            Strategy::Simple => self.simple_distractors(correct, count),
            Strategy::Mixed => self.mixed_distractors(correct, count),
            Strategy::Smart => self.smart_distractors(correct, count, options),
        }
    }

    /// Distractors for an explicitly requested difficulty. Kept apart from
    /// smart mode, which never looks at `BankOptions::difficulty`.
    pub fn difficulty_distractors(
        &mut self,
        correct: &Word,
        count: usize,
        difficulty: Difficulty,
    ) -> Vec<Word> {
        self.distractors(difficulty.strategy(), correct, count, &BankOptions::default())
    }

    /// Filter, shuffle, dedup by translation (first wins) and truncate.
    fn pick(
        &mut self,
        correct: &Word,
        candidates: Vec<Word>,
        count: usize,
        keep: impl Fn(&Word) -> bool,
    ) -> Vec<Word> {
        let mut candidates: Vec<Word> = candidates
            .into_iter()
            .filter(|w| w.location != correct.location && keep(w))
            .collect();
        candidates.shuffle(&mut self.rng);

        let mut used = UsedTranslations::new(correct, &[]);
        candidates.retain(|w| used.claim(w));
        candidates.truncate(count);
        candidates
    }

    /// Words sharing the correct word's Arabic root
    pub fn semantic_distractors(&mut self, correct: &Word, count: usize) -> Vec<Word> {
        let Some(root) = correct.root_arabic.as_deref() else {
            tracing::debug!("{} has no root, no semantic distractors", correct.location);
            return Vec::new();
        };
        let found = fetch("root", self.corpus.query_by_root(root));
        self.pick(correct, found, count, |_| true)
    }

    /// Words from the same surah
    pub fn surah_distractors(&mut self, correct: &Word, count: usize) -> Vec<Word> {
        let found = fetch("surah", self.corpus.query_by_surah(correct.surah_number));
        self.pick(correct, found, count, |_| true)
    }

    /// Words whose transliteration length is close to the correct word's
    pub fn phonetic_distractors(&mut self, correct: &Word, count: usize) -> Vec<Word> {
        let len = correct.transliteration_len();
        let min_len = len.saturating_sub(config::PHONETIC_TOLERANCE);
        let max_len = len + config::PHONETIC_TOLERANCE;
        let found = fetch(
            "transliteration length",
            self.corpus.query_by_transliteration_length(min_len, max_len),
        );
        self.pick(correct, found, count, |w| {
            let other = w.transliteration_len();
            other >= min_len && other <= max_len
        })
    }

    /// Uniformly random words
    pub fn random_distractors(&mut self, correct: &Word, count: usize) -> Vec<Word> {
        let limit = count.saturating_mul(config::RANDOM_OVERFETCH);
        let found = fetch("random", self.corpus.query_random(limit));
        self.pick(correct, found, count, |_| true)
    }

    /// Obviously wrong words: another root, another surah and a longer gloss
    pub fn easy_distractors(&mut self, correct: &Word, count: usize) -> Vec<Word> {
        let limit = count.saturating_mul(config::RANDOM_OVERFETCH * 2);
        let found = fetch(
            "excluding surah",
            self.corpus.query_excluding_surah(correct.surah_number, limit),
        );
        let root = correct.root_arabic.clone();
        let surah = correct.surah_number;
        self.pick(correct, found, count, |w| {
            w.surah_number != surah
                && (root.is_none() || w.root_arabic != root)
                && w
                    .translation_len()
                    .is_some_and(|len| len > config::EASY_MIN_TRANSLATION_LEN)
        })
    }

    /// Words whose gloss is clearly shorter or longer than the correct one
    pub fn length_based_distractors(&mut self, correct: &Word, count: usize) -> Vec<Word> {
        let len = correct.translation_len().unwrap_or(0);
        let short_below = len.saturating_sub(config::LENGTH_GAP).max(config::LENGTH_FLOOR);
        let long_above = len + config::LENGTH_GAP;

        let mut found = fetch(
            "short translation",
            self.corpus.query_by_length_range(1, short_below - 1),
        );
        found.extend(fetch(
            "long translation",
            self.corpus.query_by_length_range(long_above + 1, usize::MAX),
        ));
        self.pick(correct, found, count, |w| {
            w.translation_len()
                .is_some_and(|other| other < short_below || other > long_above)
        })
    }

    /// Words from any other surah
    pub fn different_surah_distractors(&mut self, correct: &Word, count: usize) -> Vec<Word> {
        let limit = count.saturating_mul(config::RANDOM_OVERFETCH);
        let found = fetch(
            "excluding surah",
            self.corpus.query_excluding_surah(correct.surah_number, limit),
        );
        let surah = correct.surah_number;
        self.pick(correct, found, count, |w| w.surah_number != surah)
    }

    /// Words glossed with common English function words
    pub fn simple_distractors(&mut self, correct: &Word, count: usize) -> Vec<Word> {
        let found = fetch("simple words", self.corpus.query_simple_words());
        self.pick(correct, found, count, |_| true)
    }

    /// Roughly a third each from semantic, surah and random
    pub fn mixed_distractors(&mut self, correct: &Word, count: usize) -> Vec<Word> {
        let share = count.div_ceil(3);
        let mut combined = self.semantic_distractors(correct, share);
        combined.extend(self.surah_distractors(correct, share));
        combined.extend(self.random_distractors(correct, share));
        self.pick(correct, combined, count, |_| true)
    }

    /// Semantic first, then same surah, then random, until `count` distinct
    /// translations are collected. Later phases only run while short.
    pub fn smart_distractors(
        &mut self,
        correct: &Word,
        count: usize,
        options: &BankOptions,
    ) -> Vec<Word> {
        if count == 0 {
            return Vec::new();
        }

        let mut used = UsedTranslations::new(correct, &options.avoid_translations);
        let mut accepted: Vec<Word> = Vec::with_capacity(count);
        let fetch_count = count.saturating_mul(config::SEMANTIC_OVERFETCH);

        let phases = [
            (options.include_semantic, SmartPhase::Semantic),
            (options.include_surah, SmartPhase::Surah),
            (options.include_random, SmartPhase::Random),
        ];

        for (enabled, phase) in phases {
            if accepted.len() >= count {
                break;
            }
            if !enabled {
                continue;
            }

            let found = match phase {
                SmartPhase::Semantic => self.semantic_distractors(correct, fetch_count),
                SmartPhase::Surah => self.surah_distractors(correct, fetch_count),
                SmartPhase::Random => self.random_distractors(correct, fetch_count),
            };

            let before = accepted.len();
            accepted.extend(
                found
                    .into_iter()
                    .filter(|w| w.location != correct.location && used.claim(w)),
            );
            tracing::debug!(
                "Smart {:?} phase for {}: +{} ({} of {})",
                phase,
                correct.location,
                accepted.len() - before,
                accepted.len(),
                count
            );
        }

        accepted.shuffle(&mut self.rng);
        accepted.truncate(count);
        accepted
    }
}
