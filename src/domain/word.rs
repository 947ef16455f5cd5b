use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Number of surahs in the Quran
pub const SURAH_COUNT: u16 = 114;

/// Verse identifier. Some sources store verses as numbers, others as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Verse {
    Number(u32),
    Text(String),
}

impl Verse {
    /// Parse a stored verse value, preferring the numeric form
    pub fn from_stored(s: &str) -> Self {
        match s.parse::<u32>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(s.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for Verse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parsed form of a word location (`"<surah>:<verse>:<position>"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub surah: u16,
    pub verse: u32,
    pub position: u32,
}

impl Location {
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(':');
        let surah: u16 = parts.next()?.parse().ok()?;
        let verse: u32 = parts.next()?.parse().ok()?;
        let position: u32 = parts.next()?.parse().ok()?;
        if parts.next().is_some() || surah == 0 || verse == 0 || position == 0 {
            return None;
        }
        Some(Self {
            surah,
            verse,
            position,
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.surah, self.verse, self.position)
    }
}

/// Reason a word record was rejected at the corpus boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    BadLocation(String),
    SurahOutOfRange(u16),
    SurahMismatch { location: String, surah_number: u16 },
    VerseMismatch { location: String, verse: Verse },
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordError::BadLocation(loc) => write!(f, "malformed location '{}'", loc),
            WordError::SurahOutOfRange(n) => write!(f, "surah {} is outside 1-{}", n, SURAH_COUNT),
            WordError::SurahMismatch {
                location,
                surah_number,
            } => write!(
                f,
                "location '{}' does not belong to surah {}",
                location, surah_number
            ),
            WordError::VerseMismatch { location, verse } => write!(
                f,
                "location '{}' does not belong to verse '{}'",
                location, verse
            ),
        }
    }
}

impl std::error::Error for WordError {}

/// A single word token from the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Unique per occurrence, e.g. "2:255:3"
    pub location: String,
    pub surah_number: u16,
    pub verse: Verse,
    /// English gloss being quizzed. Missing in some incomplete source rows.
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub transliteration: String,
    #[serde(default)]
    pub root_arabic: Option<String>,
    #[serde(default)]
    pub root_latin: Option<String>,
    #[serde(default)]
    pub grammar: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Word {
    pub fn new(location: Location, translation: Option<String>, transliteration: String) -> Self {
        Self {
            location: location.to_string(),
            surah_number: location.surah,
            verse: Verse::Number(location.verse),
            translation,
            transliteration,
            root_arabic: None,
            root_latin: None,
            grammar: None,
            image_url: None,
        }
    }

    pub fn with_root(mut self, root_arabic: &str, root_latin: Option<&str>) -> Self {
        self.root_arabic = Some(root_arabic.to_string());
        self.root_latin = root_latin.map(|s| s.to_string());
        self
    }

    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    /// Translation length in characters (not bytes)
    pub fn translation_len(&self) -> Option<usize> {
        self.translation.as_ref().map(|t| t.chars().count())
    }

    pub fn transliteration_len(&self) -> usize {
        self.transliteration.chars().count()
    }

    pub fn parsed_location(&self) -> Option<Location> {
        Location::parse(&self.location)
    }

    /// Check the structural invariants a corpus record must satisfy.
    pub fn validate(&self) -> Result<(), WordError> {
        if self.surah_number == 0 || self.surah_number > SURAH_COUNT {
            return Err(WordError::SurahOutOfRange(self.surah_number));
        }
        let location = self
            .parsed_location()
            .ok_or_else(|| WordError::BadLocation(self.location.clone()))?;
        if location.surah != self.surah_number {
            return Err(WordError::SurahMismatch {
                location: self.location.clone(),
                surah_number: self.surah_number,
            });
        }
        // text verses are accepted only in their numeric form
        if self.verse.as_number() != Some(location.verse) {
            return Err(WordError::VerseMismatch {
                location: self.location.clone(),
                verse: self.verse.clone(),
            });
        }
        Ok(())
    }

    /// Bring the Arabic root into NFC so roots from differently composed
    /// sources compare equal. Translations are left untouched.
    pub fn normalized(mut self) -> Self {
        if let Some(root) = self.root_arabic.take() {
            let root: String = root.trim().nfc().collect();
            self.root_arabic = if root.is_empty() { None } else { Some(root) };
        }
        self
    }
}

/// One option in a multiple-choice word bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankEntry {
    #[serde(flatten)]
    pub word: Word,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

impl BankEntry {
    pub fn correct(word: Word) -> Self {
        Self {
            word,
            is_correct: true,
        }
    }

    pub fn distractor(word: Word) -> Self {
        Self {
            word,
            is_correct: false,
        }
    }
}

/// The full set of options for one quiz question: one correct entry plus distractors
pub type WordBank = Vec<BankEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    #[test]
    fn test_location_parse() {
        let loc = Location::parse("2:255:3").unwrap();
        assert_eq!(loc.surah, 2);
        assert_eq!(loc.verse, 255);
        assert_eq!(loc.position, 3);
        assert_eq!(loc.to_string(), "2:255:3");
    }

    #[test]
    fn test_location_parse_rejects_malformed() {
        assert!(Location::parse("").is_none());
        assert!(Location::parse("2:255").is_none());
        assert!(Location::parse("2:255:3:1").is_none());
        assert!(Location::parse("a:b:c").is_none());
        assert!(Location::parse("0:1:1").is_none());
    }

    #[test]
    fn test_verse_from_stored() {
        assert_eq!(Verse::from_stored("255"), Verse::Number(255));
        assert_eq!(Verse::from_stored("255a"), Verse::Text("255a".to_string()));
        assert_eq!(Verse::Text("7".to_string()).as_number(), Some(7));
    }

    #[test]
    fn test_validate_ok() {
        let word = Word::new(loc("1:1:1"), Some("In the name".into()), "bis'mi".into());
        assert!(word.validate().is_ok());
    }

    #[test]
    fn test_validate_surah_mismatch() {
        let mut word = Word::new(loc("1:1:1"), None, String::new());
        word.surah_number = 2;
        assert!(matches!(word.validate(), Err(WordError::SurahMismatch { .. })));
    }

    #[test]
    fn test_validate_surah_out_of_range() {
        let mut word = Word::new(loc("115:1:1"), None, String::new());
        word.surah_number = 115;
        assert_eq!(word.validate(), Err(WordError::SurahOutOfRange(115)));
    }

    #[test]
    fn test_validate_verse_must_match_location() {
        let mut word = Word::new(loc("2:255:3"), None, String::new());
        word.verse = Verse::Text("255".to_string());
        assert!(word.validate().is_ok());

        word.verse = Verse::Text("255a".to_string());
        assert!(matches!(word.validate(), Err(WordError::VerseMismatch { .. })));

        word.verse = Verse::Number(256);
        assert!(matches!(word.validate(), Err(WordError::VerseMismatch { .. })));
    }

    #[test]
    fn test_validate_bad_location() {
        let mut word = Word::new(loc("1:1:1"), None, String::new());
        word.location = "1-1-1".to_string();
        assert!(matches!(word.validate(), Err(WordError::BadLocation(_))));
    }

    #[test]
    fn test_normalized_composes_root() {
        // alef + combining hamza above composes to U+0623
        let word = Word::new(loc("1:1:1"), None, String::new())
            .with_root("\u{0627}\u{0654}\u{0644}\u{0647}", None)
            .normalized();
        assert_eq!(word.root_arabic.as_deref(), Some("\u{0623}\u{0644}\u{0647}"));
    }

    #[test]
    fn test_normalized_blank_root_becomes_none() {
        let word = Word::new(loc("1:1:1"), None, String::new())
            .with_root("  ", None)
            .normalized();
        assert!(word.root_arabic.is_none());
    }

    #[test]
    fn test_translation_len_counts_chars() {
        let word = Word::new(loc("1:1:1"), Some("Raḥmān".into()), String::new());
        assert_eq!(word.translation_len(), Some(6));
    }

    #[test]
    fn test_word_accepts_string_or_number_verse() {
        let json = r#"[
            {"location": "2:255:3", "surah_number": 2, "verse": 255, "translation": "Allah"},
            {"location": "2:255:4", "surah_number": 2, "verse": "255", "translation": "not"}
        ]"#;
        let words: Vec<Word> = serde_json::from_str(json).unwrap();
        assert_eq!(words[0].verse, Verse::Number(255));
        assert_eq!(words[1].verse, Verse::Text("255".to_string()));
        assert_eq!(words[0].transliteration, "");
    }

    #[test]
    fn test_bank_entry_serializes_flat() {
        let word = Word::new(loc("2:255:3"), Some("Allah".into()), "l-lahu".into());
        let value = serde_json::to_value(BankEntry::correct(word)).unwrap();
        assert_eq!(value["location"], "2:255:3");
        assert_eq!(value["translation"], "Allah");
        assert_eq!(value["isCorrect"], true);
    }
}
