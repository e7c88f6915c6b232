//! Gap-fill sentences with the term blanked out.

use rand::RngCore;

use super::text::gap_sentence;
use super::{sample_indices, QuestionStrategy, MAX_QUESTIONS};
use crate::question::{FillInBlankQuestion, Question};
use crate::types::{ExerciseType, VocabularyWord};

pub struct FillInBlank;

impl QuestionStrategy for FillInBlank {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::FillInBlank
    }

    fn generate(&self, words: &[VocabularyWord], rng: &mut dyn RngCore) -> Vec<Question> {
        sample_indices(words.len(), MAX_QUESTIONS, rng)
            .into_iter()
            .enumerate()
            .map(|(n, idx)| {
                let word = &words[idx];
                Question::FillInBlank(FillInBlankQuestion {
                    id: format!("fib-{n}-{}", word.id),
                    word_id: word.id.clone(),
                    sentence: gap_sentence(word),
                    answer: word.term.trim().to_lowercase(),
                    hint: word.definition.clone(),
                })
            })
            .collect()
    }
}
