//! Sentence completion in three flavours: gap fill, word bank, free sentence.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::text::gap_sentence;
use super::{sample_indices, shuffled_others, QuestionStrategy, MAX_QUESTIONS};
use crate::question::{Question, SentenceCompletionQuestion, SentenceSubtype};
use crate::types::{ExerciseType, VocabularyWord};

/// Distractor terms added to a word bank.
pub const BANK_DISTRACTORS: usize = 3;

pub struct SentenceCompletion;

impl QuestionStrategy for SentenceCompletion {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::SentenceCompletion
    }

    fn generate(&self, words: &[VocabularyWord], rng: &mut dyn RngCore) -> Vec<Question> {
        let mut questions = Vec::new();

        for (n, idx) in sample_indices(words.len(), MAX_QUESTIONS, rng).into_iter().enumerate() {
            let word = &words[idx];
            let subtype = match rng.gen_range(0..3) {
                0 => SentenceSubtype::FillBlank,
                1 => SentenceSubtype::WordBank,
                _ => SentenceSubtype::CreateSentence,
            };

            let (sentence, word_bank) = match subtype {
                SentenceSubtype::FillBlank => (gap_sentence(word), Vec::new()),
                SentenceSubtype::WordBank => (gap_sentence(word), word_bank(words, idx, rng)),
                SentenceSubtype::CreateSentence => (
                    format!("Skriv en egen mening med ordet \"{}\".", word.term),
                    Vec::new(),
                ),
            };

            questions.push(Question::SentenceCompletion(SentenceCompletionQuestion {
                id: format!("sc-{n}-{}", word.id),
                word_id: word.id.clone(),
                subtype,
                sentence,
                word_bank,
                answer: word.term.clone(),
            }));
        }

        questions
    }
}

/// The word's term plus up to three other distinct terms, shuffled.
fn word_bank(words: &[VocabularyWord], idx: usize, rng: &mut dyn RngCore) -> Vec<String> {
    let term = &words[idx].term;
    let mut bank = vec![term.clone()];
    for other in shuffled_others(words, idx, rng) {
        if bank.len() > BANK_DISTRACTORS {
            break;
        }
        if !bank.iter().any(|b| b.to_lowercase() == other.term.to_lowercase()) {
            bank.push(other.term.clone());
        }
    }
    bank.shuffle(rng);
    bank
}
