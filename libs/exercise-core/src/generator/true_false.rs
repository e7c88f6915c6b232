//! True/false statements pairing a term with a real or borrowed definition.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::{sample_indices, QuestionStrategy, MAX_QUESTIONS};
use crate::question::{Question, TrueFalseQuestion};
use crate::types::{ExerciseType, VocabularyWord};

pub struct TrueFalse;

impl QuestionStrategy for TrueFalse {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::TrueFalse
    }

    fn generate(&self, words: &[VocabularyWord], rng: &mut dyn RngCore) -> Vec<Question> {
        let mut questions = Vec::new();

        for (n, idx) in sample_indices(words.len(), MAX_QUESTIONS, rng).into_iter().enumerate() {
            let word = &words[idx];
            let mut is_true = rng.gen_bool(0.5);

            let shown = if is_true {
                word.definition.clone()
            } else {
                // A borrowed definition that happens to equal the real one
                // would make a false statement true.
                let candidates: Vec<&VocabularyWord> = words
                    .iter()
                    .enumerate()
                    .filter(|(i, w)| *i != idx && w.definition.trim() != word.definition.trim())
                    .map(|(_, w)| w)
                    .collect();
                match candidates.choose(rng) {
                    Some(other) => other.definition.clone(),
                    None => alternate_meaning(word),
                }
            };
            if shown.trim() == word.definition.trim() {
                is_true = true;
            }

            questions.push(Question::TrueFalse(TrueFalseQuestion {
                id: format!("tf-{n}-{}", word.id),
                word_id: word.id.clone(),
                term: word.term.clone(),
                statement: statement(&word.term, &shown),
                is_true,
                correct_definition: word.definition.clone(),
            }));
        }

        questions
    }
}

/// `"<term>" betyder "<definition>"`
pub fn statement(term: &str, definition: &str) -> String {
    format!("\"{term}\" betyder \"{definition}\"")
}

fn alternate_meaning(word: &VocabularyWord) -> String {
    format!("motsatsen till {}", word.definition.trim())
}
