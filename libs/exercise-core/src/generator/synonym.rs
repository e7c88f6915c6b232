//! Synonym/antonym multiple choice with heuristic distractors.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::text::{antonym_of, content_word, descriptive_phrase, negation};
use super::{sample_indices, shuffled_others, QuestionStrategy, MAX_QUESTIONS};
use crate::question::{Question, Relation, SynonymAntonymQuestion};
use crate::types::{ExerciseType, VocabularyWord};

/// Distractors shown next to the correct option.
pub const DISTRACTORS: usize = 3;

pub struct SynonymAntonym;

impl QuestionStrategy for SynonymAntonym {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::SynonymAntonym
    }

    fn generate(&self, words: &[VocabularyWord], rng: &mut dyn RngCore) -> Vec<Question> {
        let mut questions = Vec::new();

        for (n, idx) in sample_indices(words.len(), MAX_QUESTIONS, rng).into_iter().enumerate() {
            let word = &words[idx];
            let relation = if rng.gen_bool(0.5) {
                Relation::Synonym
            } else {
                Relation::Antonym
            };

            let correct_answer = match relation {
                Relation::Synonym => {
                    content_word(&word.definition).unwrap_or_else(|| descriptive_phrase(word))
                }
                Relation::Antonym => antonym_of(&word.term)
                    .map(str::to_string)
                    .unwrap_or_else(|| negation(&word.term)),
            };

            let mut options = vec![correct_answer.clone()];
            for other in shuffled_others(words, idx, rng) {
                if options.len() > DISTRACTORS {
                    break;
                }
                let term = other.term.trim().to_lowercase();
                let candidate = distractor(relation, other);
                if !options.contains(&candidate) {
                    options.push(candidate);
                } else if !options.contains(&term) {
                    options.push(term);
                }
            }
            options.shuffle(rng);

            questions.push(Question::SynonymAntonym(SynonymAntonymQuestion {
                id: format!("sa-{n}-{}", word.id),
                word_id: word.id.clone(),
                target_word: word.term.clone(),
                relation,
                options,
                correct_answer,
            }));
        }

        questions
    }
}

fn distractor(relation: Relation, other: &VocabularyWord) -> String {
    match relation {
        Relation::Synonym => content_word(&other.definition)
            .unwrap_or_else(|| other.term.trim().to_lowercase()),
        Relation::Antonym => other.term.to_lowercase(),
    }
}
