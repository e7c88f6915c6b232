//! Crossword exercise built on [`CrosswordLayoutPlanner`].

use rand::seq::SliceRandom;
use rand::RngCore;

use super::{QuestionStrategy, MAX_PAIRS};
use crate::crossword::{crossword_answer, qualifies, CrosswordLayoutPlanner};
use crate::question::{CrosswordQuestion, Question};
use crate::types::{ExerciseType, VocabularyWord};

/// Qualifying words needed for a real layout.
pub const MIN_CROSSWORD_WORDS: usize = 3;

/// Single-clue entries used when the pool is too small for a layout.
pub const MAX_FALLBACK_CLUES: usize = 3;

#[derive(Default)]
pub struct Crossword {
    pub planner: CrosswordLayoutPlanner,
}

impl QuestionStrategy for Crossword {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::Crossword
    }

    fn generate(&self, words: &[VocabularyWord], rng: &mut dyn RngCore) -> Vec<Question> {
        let mut qualifying: Vec<&VocabularyWord> = words.iter().filter(|w| qualifies(w)).collect();
        qualifying.shuffle(rng);

        let layout = if qualifying.len() < MIN_CROSSWORD_WORDS {
            tracing::debug!(
                qualifying = qualifying.len(),
                "too few crossword words, using single-clue fallback"
            );
            let mut usable: Vec<&VocabularyWord> = words
                .iter()
                .filter(|w| !crossword_answer(&w.term).is_empty())
                .collect();
            usable.shuffle(rng);
            usable.truncate(MAX_FALLBACK_CLUES);
            self.planner.fallback(&usable)
        } else {
            qualifying.truncate(MAX_PAIRS);
            self.planner.plan(&qualifying, rng)
        };

        if layout.clues.is_empty() {
            return Vec::new();
        }

        vec![Question::Crossword(CrosswordQuestion {
            id: "crossword".to_string(),
            grid_size: layout.grid_size,
            layout: layout.kind,
            clues: layout.clues,
        })]
    }
}
