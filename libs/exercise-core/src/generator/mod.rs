//! Question generation strategies, one per exercise type.

pub mod crossword;
pub mod fill_in_blank;
pub mod matching;
pub mod sentence;
pub mod synonym;
pub mod text;
pub mod true_false;

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::question::Question;
use crate::types::{ExerciseType, VocabularyWord};

/// Questions generated for one-question-per-word types.
pub const MAX_QUESTIONS: usize = 10;

/// Entries in an aggregate (matching, image matching, crossword) question.
pub const MAX_PAIRS: usize = 6;

/// Trait for per-type question generators.
pub trait QuestionStrategy: Send + Sync {
    /// Exercise type produced by this strategy.
    fn exercise_type(&self) -> ExerciseType;

    /// Build questions from a word pool. Returns an empty list when the pool
    /// cannot support this type.
    fn generate(&self, words: &[VocabularyWord], rng: &mut dyn RngCore) -> Vec<Question>;
}

/// Get the strategy for an exercise type.
pub fn get_strategy(exercise_type: ExerciseType) -> Box<dyn QuestionStrategy> {
    match exercise_type {
        ExerciseType::TrueFalse => Box::new(true_false::TrueFalse),
        ExerciseType::FillInBlank => Box::new(fill_in_blank::FillInBlank),
        ExerciseType::Matching => Box::new(matching::Matching),
        ExerciseType::ImageMatching => Box::new(matching::ImageMatching),
        ExerciseType::Crossword => Box::new(crossword::Crossword::default()),
        ExerciseType::SentenceCompletion => Box::new(sentence::SentenceCompletion),
        ExerciseType::SynonymAntonym => Box::new(synonym::SynonymAntonym),
    }
}

/// Generate questions of the given type.
pub fn generate<R: RngCore>(
    exercise_type: ExerciseType,
    words: &[VocabularyWord],
    rng: &mut R,
) -> Vec<Question> {
    if words.is_empty() {
        tracing::debug!(%exercise_type, "empty word pool, nothing to generate");
        return Vec::new();
    }
    let questions = get_strategy(exercise_type).generate(words, rng);
    tracing::debug!(%exercise_type, pool = words.len(), questions = questions.len(), "generated questions");
    questions
}

/// Generate questions from a type name. Unknown names yield no questions.
pub fn generate_named<R: RngCore>(name: &str, words: &[VocabularyWord], rng: &mut R) -> Vec<Question> {
    match ExerciseType::parse(name) {
        Some(exercise_type) => generate(exercise_type, words, rng),
        None => {
            tracing::debug!(name, "unsupported exercise type");
            Vec::new()
        }
    }
}

/// Random pool indices, sampled without replacement.
pub(crate) fn sample_indices(len: usize, limit: usize, rng: &mut dyn RngCore) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(rng);
    indices.truncate(limit);
    indices
}

/// Pool words other than `skip`, in random order.
pub(crate) fn shuffled_others<'a>(
    words: &'a [VocabularyWord],
    skip: usize,
    rng: &mut dyn RngCore,
) -> Vec<&'a VocabularyWord> {
    let mut others: Vec<&VocabularyWord> = words
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != skip)
        .map(|(_, w)| w)
        .collect();
    others.shuffle(rng);
    others
}
