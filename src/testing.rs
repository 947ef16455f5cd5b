//! Test utilities: word fixtures, a scripted corpus and an on-disk database.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::path::Path;
use tempfile::TempDir;

use crate::db::{self, DbPool, SqliteCorpus};
use crate::distractors::{DistractorGenerator, QueryError, QueryResult, WordCorpus};
use crate::domain::{Location, Word};

/// Build a word from its location. Panics on a malformed location.
pub fn word(location: &str, translation: &str, transliteration: &str) -> Word {
    let location = Location::parse(location).expect("test location must be valid");
    Word::new(location, Some(translation.to_string()), transliteration.to_string())
}

pub fn rooted(location: &str, translation: &str, transliteration: &str, root: &str) -> Word {
    word(location, translation, transliteration).with_root(root, None)
}

/// Generator over `corpus` with a fixed seed
pub fn seeded_generator<C: WordCorpus>(corpus: C) -> DistractorGenerator<C, StdRng> {
    DistractorGenerator::with_rng(corpus, StdRng::seed_from_u64(0x5eed))
}

/// Small corpus from Al-Fatiha, Al-Baqarah, Al-Imran, Al-Ikhlas and An-Nas
pub fn sample_words() -> Vec<Word> {
    let mut words = vec![
        rooted("1:1:1", "In (the) name", "bis'mi", "سمو"),
        rooted("1:1:2", "(of) Allah", "l-lahi", "اله"),
        rooted("1:1:3", "the Most Gracious", "l-raḥmāni", "رحم"),
        rooted("1:1:4", "the Most Merciful", "l-raḥīmi", "رحم"),
        rooted("1:2:1", "All praises and thanks", "al-ḥamdu", "حمد"),
        rooted("1:2:2", "(be) to Allah", "lillahi", "اله"),
        rooted("1:2:3", "the Lord", "rabbi", "ربب"),
        rooted("1:2:4", "of the worlds", "l-ʿālamīna", "علم"),
        rooted("1:4:1", "(The) Master", "māliki", "ملك"),
        rooted("1:4:2", "(of the) Day", "yawmi", "يوم"),
        rooted("1:4:3", "(of the) Judgment", "l-dīni", "دين"),
        word("1:5:1", "You Alone", "iyyāka"),
        rooted("1:5:2", "we worship", "naʿbudu", "عبد"),
        word("2:2:1", "That", "dhālika"),
        rooted("2:2:2", "(is) the Book", "l-kitābu", "كتب"),
        word("2:2:3", "no", "lā"),
        rooted("2:2:4", "doubt", "rayba", "ريب"),
        word("2:2:5", "in it", "fīhi"),
        rooted("2:2:6", "a Guidance", "hudan", "هدي"),
        word("2:3:1", "Those who", "alladhīna"),
        rooted("2:3:2", "believe", "yu'minūna", "امن"),
        rooted("2:3:3", "in the unseen", "bil-ghaybi", "غيب"),
        rooted("2:255:1", "Allah", "al-lahu", "اله"),
        word("2:255:2", "(there is) no", "lā"),
        rooted("2:255:3", "god", "ilāha", "اله"),
        word("2:255:4", "except", "illā"),
        word("2:255:5", "Him", "huwa"),
        rooted("2:255:6", "the Ever-Living", "l-ḥayu", "حيي"),
        word("3:7:2", "and", "wa"),
        word("3:7:5", "of", "min"),
        word("3:7:8", "in", "fī"),
        word("3:7:10", "the", "al"),
        rooted("112:1:1", "Say", "qul", "قول"),
        word("112:1:2", "He", "huwa"),
        rooted("112:1:3", "(is) Allah", "l-lahu", "اله"),
        rooted("112:1:4", "the One", "aḥadun", "احد"),
        rooted("112:2:1", "Allah", "al-lahu", "اله"),
        rooted("112:2:2", "the Eternal, the Absolute", "l-ṣamadu", "صمد"),
        rooted("114:1:1", "Say", "qul", "قول"),
        rooted("114:1:2", "I seek refuge", "aʿūdhu", "عوذ"),
        rooted("114:1:3", "in (the) Lord", "birabbi", "ربب"),
        rooted("114:1:4", "(of) mankind", "l-nāsi", "انس"),
    ];

    // untranslated row, as found in incomplete exports
    let mut untranslated = word("2:2:7", "", "lil'muttaqīna");
    untranslated.translation = None;
    words.push(untranslated);

    words
}

/// Corpus returning fixed results per query and recording every call.
#[derive(Default)]
pub struct MockCorpus {
    pub by_root: Vec<Word>,
    pub by_surah: Vec<Word>,
    pub by_length: Vec<Word>,
    pub by_transliteration: Vec<Word>,
    pub random: Vec<Word>,
    pub excluding_surah: Vec<Word>,
    pub simple: Vec<Word>,
    /// Every query fails when set
    pub fail: bool,
    pub(crate) calls: RefCell<Vec<&'static str>>,
}

impl MockCorpus {
    pub fn calls(&self, query: &str) -> usize {
        self.calls.borrow().iter().filter(|&&q| q == query).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    fn answer(&self, query: &'static str, words: &[Word], limit: usize) -> QueryResult<Vec<Word>> {
        self.calls.borrow_mut().push(query);
        if self.fail {
            return Err(QueryError::Unavailable);
        }
        Ok(words.iter().take(limit).cloned().collect())
    }
}

impl WordCorpus for MockCorpus {
    fn find_by_location(&self, location: &str) -> QueryResult<Option<Word>> {
        let found = self.answer("location", &self.by_surah, usize::MAX)?;
        Ok(found.into_iter().find(|w| w.location == location))
    }

    fn query_by_verse(&self, _surah_number: u16, _verse: u32) -> QueryResult<Vec<Word>> {
        self.answer("verse", &self.by_surah, usize::MAX)
    }

    fn query_by_root(&self, _root_arabic: &str) -> QueryResult<Vec<Word>> {
        self.answer("root", &self.by_root, usize::MAX)
    }

    fn query_by_surah(&self, _surah_number: u16) -> QueryResult<Vec<Word>> {
        self.answer("surah", &self.by_surah, usize::MAX)
    }

    fn query_by_length_range(&self, _min_len: usize, _max_len: usize) -> QueryResult<Vec<Word>> {
        self.answer("length", &self.by_length, usize::MAX)
    }

    fn query_by_transliteration_length(
        &self,
        _min_len: usize,
        _max_len: usize,
    ) -> QueryResult<Vec<Word>> {
        self.answer("transliteration", &self.by_transliteration, usize::MAX)
    }

    fn query_random(&self, limit: usize) -> QueryResult<Vec<Word>> {
        self.answer("random", &self.random, limit)
    }

    fn query_excluding_surah(&self, _surah_number: u16, limit: usize) -> QueryResult<Vec<Word>> {
        self.answer("excluding surah", &self.excluding_surah, limit)
    }

    fn query_simple_words(&self) -> QueryResult<Vec<Word>> {
        self.answer("simple", &self.simple, usize::MAX)
    }
}

/// On-disk corpus database in a temporary directory, removed when dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    pub pool: DbPool,
}

impl TestEnv {
    /// Create an empty corpus database using the authoritative schema.
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let pool = db::init_db(&temp.path().join("quran.db"))?;
        Ok(Self { temp, pool })
    }

    /// Create a corpus database seeded with `sample_words()`.
    pub fn with_sample_words() -> rusqlite::Result<Self> {
        let env = Self::new()?;
        {
            let conn = env.pool.lock().expect("fresh test pool");
            db::insert_words(&conn, &sample_words())?;
        }
        Ok(env)
    }

    pub fn corpus(&self) -> SqliteCorpus {
        SqliteCorpus::new(self.pool.clone())
    }

    /// Get the temporary directory path for creating test files.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}
