//! Core types for vocabulary exercises.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A vocabulary word supplied by the word pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyWord {
    pub id: String,
    pub term: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl VocabularyWord {
    /// Create a word with only term and definition set.
    pub fn new(id: impl Into<String>, term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            term: term.into(),
            definition: definition.into(),
            example: None,
            image_url: None,
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Whether the word carries a usable image reference.
    pub fn has_image(&self) -> bool {
        self.image_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Term length in characters.
    pub fn term_len(&self) -> usize {
        self.term.chars().count()
    }
}

/// A named collection of words that an exercise draws from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularySet {
    pub id: String,
    pub name: String,
    pub words: Vec<VocabularyWord>,
}

/// Exercise (question) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    TrueFalse,
    FillInBlank,
    Matching,
    ImageMatching,
    Crossword,
    SentenceCompletion,
    SynonymAntonym,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 7] = [
        Self::TrueFalse,
        Self::FillInBlank,
        Self::Matching,
        Self::ImageMatching,
        Self::Crossword,
        Self::SentenceCompletion,
        Self::SynonymAntonym,
    ];

    /// Get the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrueFalse => "true_false",
            Self::FillInBlank => "fill_in_blank",
            Self::Matching => "matching",
            Self::ImageMatching => "image_matching",
            Self::Crossword => "crossword",
            Self::SentenceCompletion => "sentence_completion",
            Self::SynonymAntonym => "synonym_antonym",
        }
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Matching-style types produce one aggregate question.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Matching | Self::ImageMatching | Self::Crossword)
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session timing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub auto_advance: bool,
    pub auto_advance_delay_ms: u64,
    pub manual_advance_delay_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            auto_advance: true,
            auto_advance_delay_ms: 3000,
            manual_advance_delay_ms: 1000,
        }
    }
}
