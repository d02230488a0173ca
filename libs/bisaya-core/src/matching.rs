//! Answer validation for typed and spoken practice answers.

use crate::morphology::{base_form, nfc};
use crate::types::PracticeSettings;
use serde::{Deserialize, Serialize};

/// Accepted spellings for common words, keyed by base word.
///
/// Both answers must be listed under the same entry to count as a match.
pub const KNOWN_VARIATIONS: &[(&str, &[&str])] = &[
    ("kumusta", &["kumusta", "kamusta", "komusta", "musta"]),
    ("maayo", &["maayo", "maayu", "mayo"]),
    ("palihug", &["palihug", "palihog"]),
    ("salamat", &["salamat", "salamat kaayo", "daghang salamat"]),
    ("unsa", &["unsa", "unsay", "onsa"]),
    ("asa", &["asa", "asa man"]),
    ("dili", &["dili", "di"]),
    ("oo", &["oo", "o-o"]),
    ("karon", &["karon", "karun"]),
    ("ugma", &["ugma", "ugmaa"]),
];

/// Which rule accepted (or rejected) an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    BaseForm,
    KnownVariation,
    Similarity,
    NoMatch,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::BaseForm => "base_form",
            Self::KnownVariation => "known_variation",
            Self::Similarity => "similarity",
            Self::NoMatch => "no_match",
        }
    }
}

/// Result of comparing a submitted answer to the correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// The rule that decided the outcome.
    pub matched_by: MatchKind,
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
    /// Normalized submitted answer (for display).
    pub typed_normalized: String,
    /// Normalized correct answer (for display).
    pub correct_normalized: String,
}

/// Validates answers against a canonical form.
#[derive(Debug, Clone)]
pub struct AnswerValidator {
    affixes: Vec<String>,
    threshold: f64,
}

impl Default for AnswerValidator {
    fn default() -> Self {
        Self::new(&PracticeSettings::default())
    }
}

impl AnswerValidator {
    pub fn new(settings: &PracticeSettings) -> Self {
        Self {
            affixes: settings
                .validator_affixes
                .iter()
                .map(|a| a.to_lowercase())
                .collect(),
            threshold: settings.similarity_threshold,
        }
    }

    /// Whether `user` should be accepted for `correct`.
    pub fn validate(&self, user: &str, correct: &str) -> bool {
        self.compare(user, correct).is_correct
    }

    /// Compare answers, reporting which rule matched.
    pub fn compare(&self, user: &str, correct: &str) -> ValidationResult {
        let typed_normalized = normalize_whitespace(user);
        let correct_normalized = normalize_whitespace(correct);
        let typed = typed_normalized.to_lowercase();
        let expected = correct_normalized.to_lowercase();

        let result = |matched_by: MatchKind, similarity: f64| ValidationResult {
            is_correct: matched_by != MatchKind::NoMatch,
            matched_by,
            similarity,
            typed_normalized: typed_normalized.clone(),
            correct_normalized: correct_normalized.clone(),
        };

        if typed == expected {
            return result(MatchKind::Exact, 1.0);
        }

        if typed.is_empty() || expected.is_empty() {
            return result(MatchKind::NoMatch, 0.0);
        }

        if base_form(&typed, &self.affixes) == base_form(&expected, &self.affixes) {
            return result(MatchKind::BaseForm, 1.0);
        }

        if is_known_variation(&typed, &expected) {
            return result(MatchKind::KnownVariation, 1.0);
        }

        let similarity = normalized_similarity(&typed, &expected);
        if similarity >= self.threshold {
            result(MatchKind::Similarity, similarity)
        } else {
            result(MatchKind::NoMatch, similarity)
        }
    }
}

/// Validate with the default settings.
pub fn validate_answer(user: &str, correct: &str) -> bool {
    AnswerValidator::default().validate(user, correct)
}

fn is_known_variation(typed: &str, expected: &str) -> bool {
    KNOWN_VARIATIONS
        .iter()
        .any(|(_, variants)| variants.contains(&typed) && variants.contains(&expected))
}

/// Normalize a string for comparison: NFC composition, trimmed, inner
/// whitespace collapsed to single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    nfc(s).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized similarity `(max_len - distance) / max_len`, over characters.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    (max_len - distance) as f64 / max_len as f64
}
