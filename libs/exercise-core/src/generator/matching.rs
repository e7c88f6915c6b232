//! Matching exercises: terms to definitions, and images to terms.

use rand::seq::SliceRandom;
use rand::RngCore;

use super::{sample_indices, QuestionStrategy, MAX_PAIRS};
use crate::question::{ImageItem, ImageMatchingQuestion, MatchingPair, MatchingQuestion, Question};
use crate::types::{ExerciseType, VocabularyWord};

/// Below this many pictured words, image-less words are mixed in as text.
pub const MIN_IMAGES: usize = 3;

pub struct Matching;

impl QuestionStrategy for Matching {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::Matching
    }

    fn generate(&self, words: &[VocabularyWord], rng: &mut dyn RngCore) -> Vec<Question> {
        let pairs: Vec<MatchingPair> = sample_indices(words.len(), MAX_PAIRS, rng)
            .into_iter()
            .map(|idx| {
                let word = &words[idx];
                MatchingPair {
                    id: word.id.clone(),
                    term: word.term.clone(),
                    definition: word.definition.clone(),
                }
            })
            .collect();

        if pairs.is_empty() {
            return Vec::new();
        }
        vec![Question::Matching(MatchingQuestion {
            id: "matching".to_string(),
            pairs,
        })]
    }
}

pub struct ImageMatching;

impl QuestionStrategy for ImageMatching {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::ImageMatching
    }

    fn generate(&self, words: &[VocabularyWord], rng: &mut dyn RngCore) -> Vec<Question> {
        let (mut pictured, mut plain): (Vec<&VocabularyWord>, Vec<&VocabularyWord>) =
            words.iter().partition(|w| w.has_image());
        pictured.shuffle(rng);

        let mut chosen = if pictured.len() >= MIN_IMAGES {
            pictured
        } else {
            plain.shuffle(rng);
            pictured.extend(plain);
            pictured
        };
        chosen.truncate(MAX_PAIRS);
        chosen.shuffle(rng);

        if chosen.is_empty() {
            return Vec::new();
        }

        let items = chosen
            .into_iter()
            .map(|word| ImageItem {
                id: word.id.clone(),
                term: word.term.clone(),
                image_url: word.has_image().then(|| word.image_url.clone()).flatten(),
            })
            .collect();

        vec![Question::ImageMatching(ImageMatchingQuestion {
            id: "image_matching".to_string(),
            items,
        })]
    }
}
