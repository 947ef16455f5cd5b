use serde::{Deserialize, Serialize};

/// Rule used to choose distractor candidates for a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Same Arabic root
    Semantic,
    /// Same surah
    Surah,
    /// Similar transliteration length
    Phonetic,
    Random,
    /// Unrelated root and surah, longer glosses
    Easy,
    /// Glosses clearly shorter or longer than the answer
    #[serde(rename = "length")]
    LengthBased,
    DifferentSurah,
    /// Common English function words only
    Simple,
    /// Thirds of semantic, surah and random
    Mixed,
    /// Semantic, then surah, then random until enough are found
    #[default]
    Smart,
}

impl Strategy {
    pub const ALL: [Strategy; 10] = [
        Self::Semantic,
        Self::Surah,
        Self::Phonetic,
        Self::Random,
        Self::Easy,
        Self::LengthBased,
        Self::DifferentSurah,
        Self::Simple,
        Self::Mixed,
        Self::Smart,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "semantic" => Some(Self::Semantic),
            "surah" => Some(Self::Surah),
            "phonetic" => Some(Self::Phonetic),
            "random" => Some(Self::Random),
            "easy" => Some(Self::Easy),
            "length" | "length-based" => Some(Self::LengthBased),
            "different-surah" => Some(Self::DifferentSurah),
            "simple" => Some(Self::Simple),
            "mixed" => Some(Self::Mixed),
            "smart" => Some(Self::Smart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::Surah => "surah",
            Self::Phonetic => "phonetic",
            Self::Random => "random",
            Self::Easy => "easy",
            Self::LengthBased => "length",
            Self::DifferentSurah => "different-surah",
            Self::Simple => "simple",
            Self::Mixed => "mixed",
            Self::Smart => "smart",
        }
    }
}

/// Requested quiz difficulty. Carried in bank options; the smart strategy ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Strategy used for this difficulty when a caller asks for it explicitly
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Easy => Strategy::Easy,
            Self::Medium => Strategy::Mixed,
            Self::Hard => Strategy::Smart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_as_str_roundtrip() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::from_str(strategy.as_str()), Some(strategy));
        }
    }

    #[test]
    fn test_strategy_length_alias() {
        assert_eq!(Strategy::from_str("length-based"), Some(Strategy::LengthBased));
    }

    #[test]
    fn test_strategy_from_str_invalid() {
        assert_eq!(Strategy::from_str(""), None);
        assert_eq!(Strategy::from_str("Smart"), None);
    }

    #[test]
    fn test_strategy_default_is_smart() {
        assert_eq!(Strategy::default(), Strategy::Smart);
    }

    #[test]
    fn test_strategy_serde_names_match_as_str() {
        for strategy in Strategy::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy.as_str()));
        }
    }

    #[test]
    fn test_difficulty_roundtrip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("extreme"), None);
    }

    #[test]
    fn test_difficulty_strategy_mapping() {
        assert_eq!(Difficulty::Easy.strategy(), Strategy::Easy);
        assert_eq!(Difficulty::Medium.strategy(), Strategy::Mixed);
        assert_eq!(Difficulty::Hard.strategy(), Strategy::Smart);
    }
}
