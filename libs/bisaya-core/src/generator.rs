//! Fill-in-the-blank exercise generation.
//!
//! An exercise hides one word of a tier's example sentence and offers the
//! hidden word alongside distractors drawn from other dataset entries.

use crate::morphology::{candidate_forms, find_whole_word, nfc};
use crate::types::{Exercise, PracticeSettings, Tier, VocabularyEntry, BLANK, MAX_OPTIONS};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Smallest acceptable option set: the answer plus one distractor.
pub const MIN_OPTIONS: usize = 2;

/// Generates exercises over a dataset snapshot.
#[derive(Debug, Clone)]
pub struct ExerciseGenerator<'a> {
    dataset: &'a [VocabularyEntry],
    affixes: Vec<String>,
    max_options: usize,
}

impl<'a> ExerciseGenerator<'a> {
    pub fn new(dataset: &'a [VocabularyEntry], settings: &PracticeSettings) -> Self {
        Self {
            dataset,
            affixes: settings.generator_affixes.clone(),
            max_options: settings.max_options.clamp(MIN_OPTIONS, MAX_OPTIONS),
        }
    }

    pub fn dataset(&self) -> &'a [VocabularyEntry] {
        self.dataset
    }

    /// Exercise for the entry's own source word.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        entry: &VocabularyEntry,
        tier: Tier,
        rng: &mut R,
    ) -> Option<Exercise> {
        self.generate_for_word(entry, &entry.source_word, tier, rng)
    }

    /// Exercise hiding `word` (or an affixed form of it) in the tier sentence.
    ///
    /// Returns `None` when the sentence is empty, the word cannot be found, or
    /// fewer than [`MIN_OPTIONS`] distinct options can be assembled.
    pub fn generate_for_word<R: Rng + ?Sized>(
        &self,
        entry: &VocabularyEntry,
        word: &str,
        tier: Tier,
        rng: &mut R,
    ) -> Option<Exercise> {
        let example = entry.example(tier);
        let sentence = nfc(&example.bisaya);
        let sentence = sentence.as_str();
        if sentence.trim().is_empty() {
            return None;
        }

        let span = candidate_forms(word, &self.affixes)
            .iter()
            .find_map(|form| find_whole_word(sentence, form))?;

        let correct_answer = sentence[span.clone()].to_string();
        let masked_sentence = format!("{}{}{}", &sentence[..span.start], BLANK, &sentence[span.end..]);

        let mut options = vec![correct_answer.clone()];
        options.extend(self.distractors(word, &correct_answer, rng));
        if options.len() < MIN_OPTIONS {
            return None;
        }
        options.shuffle(rng);

        debug_assert!(options.contains(&correct_answer));
        if !options.contains(&correct_answer) {
            options[0] = correct_answer.clone();
        }

        Some(Exercise {
            masked_sentence,
            blank_offset: span.start,
            correct_answer,
            options,
            source_word: entry.source_word.clone(),
            tier,
            translation: Some(example.english.clone()).filter(|t| !t.is_empty()),
        })
    }

    /// All exercises the dataset yields for a tier, skipping entries that fail.
    pub fn generate_all<R: Rng + ?Sized>(&self, tier: Tier, rng: &mut R) -> Vec<Exercise> {
        self.dataset
            .iter()
            .filter_map(|entry| self.generate(entry, tier, rng))
            .collect()
    }

    fn distractors<R: Rng + ?Sized>(&self, word: &str, correct: &str, rng: &mut R) -> Vec<String> {
        let target = word.trim().to_lowercase();
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(correct.to_lowercase());

        let mut pool: Vec<&str> = self
            .dataset
            .iter()
            .map(|e| e.source_word.trim())
            .filter(|w| !w.is_empty() && w.to_lowercase() != target)
            .filter(|w| seen.insert(w.to_lowercase()))
            .collect();

        pool.shuffle(rng);
        pool.into_iter()
            .take(self.max_options - 1)
            .map(String::from)
            .collect()
    }
}

/// Generate an exercise for `entry` using default settings.
pub fn generate_exercise<R: Rng + ?Sized>(
    dataset: &[VocabularyEntry],
    entry: &VocabularyEntry,
    tier: Tier,
    rng: &mut R,
) -> Option<Exercise> {
    ExerciseGenerator::new(dataset, &PracticeSettings::default()).generate(entry, tier, rng)
}
