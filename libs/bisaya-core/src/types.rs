//! Core types for the practice engine.

use serde::{Deserialize, Serialize};

/// Highest progression level a learner can unlock.
pub const MAX_LEVEL: u8 = 6;

/// Number of example-sentence tiers per vocabulary entry.
pub const TIER_COUNT: usize = 3;

/// Marker substituted for the hidden word in a fill-in-the-blank sentence.
pub const BLANK: &str = "_____";

/// Most options offered by one exercise.
pub const MAX_OPTIONS: usize = 4;

/// Most exercises in one practice session.
pub const MAX_SESSION_SIZE: usize = 10;

/// Example-sentence difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for Tier {
    fn default() -> Self {
        Self::Beginner
    }
}

impl Tier {
    pub const ALL: [Tier; TIER_COUNT] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Convert to 1-based numeric value (1-3).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
        }
    }

    /// Create from 1-based numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Beginner),
            2 => Some(Self::Intermediate),
            3 => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Sentence tier read by a progression level.
    ///
    /// Levels pair up on tiers: 1-2 beginner, 3-4 intermediate, 5-6 advanced.
    pub fn for_level(level: u8) -> Option<Self> {
        match level {
            1 | 2 => Some(Self::Beginner),
            3 | 4 => Some(Self::Intermediate),
            5 | 6 => Some(Self::Advanced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    fn index(self) -> usize {
        usize::from(self.to_value() - 1)
    }
}

/// One example sentence with its translations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
    pub bisaya: String,
    pub english: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagalog: Option<String>,
}

/// A vocabulary entry from the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub source_word: String,
    pub english: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagalog: Option<String>,
    pub part_of_speech: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    pub examples: [ExampleSentence; TIER_COUNT],
}

impl VocabularyEntry {
    /// Example sentence for the given tier.
    pub fn example(&self, tier: Tier) -> &ExampleSentence {
        &self.examples[tier.index()]
    }
}

/// A generated fill-in-the-blank question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Example sentence with the answer replaced by [`BLANK`].
    pub masked_sentence: String,
    /// Byte offset of [`BLANK`] within `masked_sentence`.
    pub blank_offset: usize,
    /// The word exactly as it appears in the sentence.
    pub correct_answer: String,
    /// Shuffled choices; contains `correct_answer` exactly once.
    pub options: Vec<String>,
    pub source_word: String,
    pub tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

impl Exercise {
    /// Put the answer back into the masked sentence.
    pub fn reconstruct(&self) -> String {
        let start = self.blank_offset;
        let end = start + BLANK.len();
        match (
            self.masked_sentence.get(..start),
            self.masked_sentence.get(start..end),
            self.masked_sentence.get(end..),
        ) {
            (Some(before), Some(BLANK), Some(after)) => {
                format!("{}{}{}", before, self.correct_answer, after)
            }
            _ => self.masked_sentence.replacen(BLANK, &self.correct_answer, 1),
        }
    }
}

/// Tunable parameters for generation, validation and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSettings {
    /// Minimum Levenshtein similarity accepted as a typo.
    pub similarity_threshold: f64,
    /// Verbal markers prepended to a word when searching sentences.
    pub generator_affixes: Vec<String>,
    /// Prefixes stripped from answers before comparing base forms, in order.
    pub validator_affixes: Vec<String>,
    pub max_options: usize,
    pub session_size: usize,
    pub xp_per_correct: u32,
    pub perfect_bonus_xp: u32,
}

impl Default for PracticeSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.95,
            generator_affixes: ["mo", "nag", "gi", "mag", "na"]
                .into_iter()
                .map(String::from)
                .collect(),
            validator_affixes: ["maka", "nag", "mag", "mo", "gi", "na"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_options: MAX_OPTIONS,
            session_size: MAX_SESSION_SIZE,
            xp_per_correct: 10,
            perfect_bonus_xp: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_onto_tiers() {
        assert_eq!(Tier::for_level(1), Some(Tier::Beginner));
        assert_eq!(Tier::for_level(2), Some(Tier::Beginner));
        assert_eq!(Tier::for_level(3), Some(Tier::Intermediate));
        assert_eq!(Tier::for_level(6), Some(Tier::Advanced));
        assert_eq!(Tier::for_level(0), None);
        assert_eq!(Tier::for_level(7), None);
    }

    #[test]
    fn tier_value_conversion() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_value(tier.to_value()), Some(tier));
        }
        assert_eq!(Tier::from_value(4), None);
    }

    #[test]
    fn reconstruct_restores_sentence() {
        let exercise = Exercise {
            masked_sentence: format!("Gusto ko {} ug saging.", BLANK),
            blank_offset: 9,
            correct_answer: "mokaon".to_string(),
            options: vec!["mokaon".to_string(), "balay".to_string()],
            source_word: "kaon".to_string(),
            tier: Tier::Beginner,
            translation: None,
        };
        assert_eq!(exercise.reconstruct(), "Gusto ko mokaon ug saging.");
    }

    #[test]
    fn reconstruct_ignores_earlier_underscores() {
        let exercise = Exercise {
            masked_sentence: format!("Isulat sa {} ang {}.", BLANK, BLANK),
            blank_offset: 20,
            correct_answer: "pangalan".to_string(),
            options: vec!["pangalan".to_string(), "balay".to_string()],
            source_word: "pangalan".to_string(),
            tier: Tier::Beginner,
            translation: None,
        };
        assert_eq!(exercise.reconstruct(), "Isulat sa _____ ang pangalan.");
    }

    #[test]
    fn settings_defaults_within_bounds() {
        let settings = PracticeSettings::default();
        assert_eq!(settings.max_options, MAX_OPTIONS);
        assert_eq!(settings.session_size, MAX_SESSION_SIZE);
    }
}
