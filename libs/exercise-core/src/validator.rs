//! Answer validation, one rule per question type.
//!
//! Validation never fails: an answer of the wrong shape, or a missing one,
//! is simply judged incorrect.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attempt::Answer;
use crate::question::{
    CrosswordQuestion, ImageMatchingQuestion, MatchingQuestion, Question, SentenceSubtype,
};

/// Free sentences must be longer than this after trimming.
pub const MIN_SENTENCE_LEN: usize = 10;

/// Outcome of validating one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_correct: bool,
    /// Canonical answer to show as feedback.
    pub correct_answer: String,
}

/// Validate `answer` against `question`.
pub fn validate(question: &Question, answer: &Answer) -> Verdict {
    let (is_correct, correct_answer) = match question {
        Question::TrueFalse(q) => (
            answer.as_bool() == Some(q.is_true),
            if q.is_true { "Sant" } else { "Falskt" }.to_string(),
        ),
        Question::FillInBlank(q) => (text_matches(answer, &q.answer), q.answer.clone()),
        Question::Matching(q) => (
            matches!(answer, Answer::Matches(m) if all_pairs_matched(q, m)),
            q.pairs
                .iter()
                .map(|p| format!("{}: {}", p.term, p.definition))
                .collect::<Vec<_>>()
                .join("; "),
        ),
        Question::ImageMatching(q) => (
            matches!(answer, Answer::Matches(m) if all_images_matched(q, m)),
            q.items
                .iter()
                .map(|i| i.term.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Question::Crossword(q) => (
            matches!(answer, Answer::Grid(g) if all_clues_solved(q, g)),
            q.clues
                .iter()
                .map(|c| format!("{}. {}", c.number, c.answer))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Question::SentenceCompletion(q) => {
            let is_correct = match q.subtype {
                SentenceSubtype::FillBlank | SentenceSubtype::WordBank => {
                    text_matches(answer, &q.answer)
                }
                SentenceSubtype::CreateSentence => answer
                    .as_text()
                    .is_some_and(|s| is_acceptable_sentence(s, &q.answer)),
            };
            (is_correct, q.answer.clone())
        }
        Question::SynonymAntonym(q) => (
            answer.as_text() == Some(q.correct_answer.as_str()),
            q.correct_answer.clone(),
        ),
    };

    Verdict {
        is_correct,
        correct_answer,
    }
}

/// Every pair has a recorded definition equal to its own.
pub fn all_pairs_matched(question: &MatchingQuestion, matches: &BTreeMap<String, String>) -> bool {
    question
        .pairs
        .iter()
        .all(|p| matches.get(&p.id) == Some(&p.definition))
}

/// Every image has a recorded term equal to its own.
pub fn all_images_matched(
    question: &ImageMatchingQuestion,
    matches: &BTreeMap<String, String>,
) -> bool {
    question
        .items
        .iter()
        .all(|i| matches.get(&i.id) == Some(&i.term))
}

/// Every clue's input matches its answer, ignoring case.
pub fn all_clues_solved(question: &CrosswordQuestion, grid: &BTreeMap<u32, String>) -> bool {
    question
        .clues
        .iter()
        .all(|c| grid.get(&c.number).is_some_and(|s| c.is_correct(s)))
}

/// Weak check for a free sentence: it mentions the term and has some length.
/// It does not judge whether the sentence makes sense.
pub fn is_acceptable_sentence(sentence: &str, term: &str) -> bool {
    let sentence = sentence.trim();
    sentence.to_lowercase().contains(&term.trim().to_lowercase())
        && sentence.chars().count() > MIN_SENTENCE_LEN
}

fn text_matches(answer: &Answer, expected: &str) -> bool {
    answer
        .as_text()
        .is_some_and(|s| s.trim().to_lowercase() == expected.trim().to_lowercase())
}
