//! User answers and in-progress input, kept apart from the questions.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::question::Question;

/// A raw answer as submitted by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// True/false choice.
    Choice(bool),
    /// Typed text or a picked option.
    Text(String),
    /// Matching input: pair/item id → chosen definition or term.
    Matches(BTreeMap<String, String>),
    /// Crossword input: clue number → typed word.
    Grid(BTreeMap<u32, String>),
}

impl Answer {
    /// Boolean reading of the answer, accepting common spelled-out forms.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Choice(b) => Some(*b),
            Self::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "sant" | "ja" => Some(true),
                "false" | "falskt" | "nej" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable form stored in results.
    pub fn display(&self) -> String {
        match self {
            Self::Choice(true) => "Sant".to_string(),
            Self::Choice(false) => "Falskt".to_string(),
            Self::Text(s) => s.clone(),
            Self::Matches(m) => m
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; "),
            Self::Grid(g) => g
                .iter()
                .map(|(n, v)| format!("{n}. {v}"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// In-progress input for one question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptInput {
    pub choice: Option<bool>,
    pub text: String,
    pub matches: BTreeMap<String, String>,
    pub grid: BTreeMap<u32, String>,
}

/// Per-question input keyed by question id.
#[derive(Debug, Clone, Default)]
pub struct AttemptBook {
    inputs: HashMap<String, AttemptInput>,
}

impl AttemptBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&AttemptInput> {
        self.inputs.get(question_id)
    }

    fn entry(&mut self, question_id: &str) -> &mut AttemptInput {
        self.inputs.entry(question_id.to_string()).or_default()
    }

    pub fn set_choice(&mut self, question_id: &str, choice: bool) {
        self.entry(question_id).choice = Some(choice);
    }

    pub fn set_text(&mut self, question_id: &str, text: impl Into<String>) {
        self.entry(question_id).text = text.into();
    }

    /// Record (or replace) a match for one pair or image.
    pub fn record_match(&mut self, question_id: &str, key: impl Into<String>, value: impl Into<String>) {
        self.entry(question_id).matches.insert(key.into(), value.into());
    }

    pub fn clear_match(&mut self, question_id: &str, key: &str) {
        if let Some(input) = self.inputs.get_mut(question_id) {
            input.matches.remove(key);
        }
    }

    pub fn set_cell_word(&mut self, question_id: &str, clue: u32, word: impl Into<String>) {
        self.entry(question_id).grid.insert(clue, word.into());
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
    }

    /// Build the submission for `question` from the recorded input.
    /// Missing input becomes an empty answer of the right shape.
    pub fn answer_for(&self, question: &Question) -> Answer {
        let input = self.inputs.get(question.id()).cloned().unwrap_or_default();
        match question {
            Question::TrueFalse(_) => match input.choice {
                Some(choice) => Answer::Choice(choice),
                None => Answer::Text(String::new()),
            },
            Question::Matching(_) | Question::ImageMatching(_) => Answer::Matches(input.matches),
            Question::Crossword(_) => Answer::Grid(input.grid),
            Question::FillInBlank(_)
            | Question::SentenceCompletion(_)
            | Question::SynonymAntonym(_) => Answer::Text(input.text),
        }
    }
}
