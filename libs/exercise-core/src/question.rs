//! Generated question shapes, one variant per exercise type.

use serde::{Deserialize, Serialize};

use crate::crossword::{CrosswordClue, LayoutKind};
use crate::types::ExerciseType;

/// A generated question. Immutable once generated; user input is tracked
/// separately in [`crate::attempt::AttemptBook`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    TrueFalse(TrueFalseQuestion),
    FillInBlank(FillInBlankQuestion),
    Matching(MatchingQuestion),
    ImageMatching(ImageMatchingQuestion),
    Crossword(CrosswordQuestion),
    SentenceCompletion(SentenceCompletionQuestion),
    SynonymAntonym(SynonymAntonymQuestion),
}

impl Question {
    pub fn id(&self) -> &str {
        match self {
            Self::TrueFalse(q) => &q.id,
            Self::FillInBlank(q) => &q.id,
            Self::Matching(q) => &q.id,
            Self::ImageMatching(q) => &q.id,
            Self::Crossword(q) => &q.id,
            Self::SentenceCompletion(q) => &q.id,
            Self::SynonymAntonym(q) => &q.id,
        }
    }

    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            Self::TrueFalse(_) => ExerciseType::TrueFalse,
            Self::FillInBlank(_) => ExerciseType::FillInBlank,
            Self::Matching(_) => ExerciseType::Matching,
            Self::ImageMatching(_) => ExerciseType::ImageMatching,
            Self::Crossword(_) => ExerciseType::Crossword,
            Self::SentenceCompletion(_) => ExerciseType::SentenceCompletion,
            Self::SynonymAntonym(_) => ExerciseType::SynonymAntonym,
        }
    }

    /// Question text as recorded in results.
    pub fn prompt(&self) -> String {
        match self {
            Self::TrueFalse(q) => q.statement.clone(),
            Self::FillInBlank(q) => q.sentence.clone(),
            Self::Matching(q) => format!("Para ihop {} ord med rätt betydelse", q.pairs.len()),
            Self::ImageMatching(q) => format!("Para ihop {} bilder med rätt ord", q.items.len()),
            Self::Crossword(q) => format!("Korsord med {} ledtrådar", q.clues.len()),
            Self::SentenceCompletion(q) => q.sentence.clone(),
            Self::SynonymAntonym(q) => match q.relation {
                Relation::Synonym => format!("Välj en synonym till \"{}\"", q.target_word),
                Relation::Antonym => format!("Välj en antonym till \"{}\"", q.target_word),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrueFalseQuestion {
    pub id: String,
    pub word_id: String,
    pub term: String,
    pub statement: String,
    /// Whether `statement` asserts the word's real definition.
    pub is_true: bool,
    pub correct_definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillInBlankQuestion {
    pub id: String,
    pub word_id: String,
    /// Sentence containing the blank marker.
    pub sentence: String,
    /// Lower-cased term.
    pub answer: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingPair {
    /// Word id; keys the user's match map.
    pub id: String,
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingQuestion {
    pub id: String,
    pub pairs: Vec<MatchingPair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Word id; keys the user's match map.
    pub id: String,
    pub term: String,
    /// `None` means the consumer renders the term as text instead of an image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ImageItem {
    pub fn is_text_fallback(&self) -> bool {
        self.image_url.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMatchingQuestion {
    pub id: String,
    pub items: Vec<ImageItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswordQuestion {
    pub id: String,
    pub grid_size: usize,
    pub layout: LayoutKind,
    pub clues: Vec<CrosswordClue>,
}

impl CrosswordQuestion {
    /// Sum of answer lengths; intersecting cells are counted twice.
    pub fn total_cells(&self) -> usize {
        self.clues.iter().map(CrosswordClue::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceSubtype {
    FillBlank,
    WordBank,
    CreateSentence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceCompletionQuestion {
    pub id: String,
    pub word_id: String,
    pub subtype: SentenceSubtype,
    pub sentence: String,
    /// Shuffled bank for `WordBank`, empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub word_bank: Vec<String>,
    /// The term, as written in the word pool.
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Synonym,
    Antonym,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymAntonymQuestion {
    pub id: String,
    pub word_id: String,
    pub target_word: String,
    pub relation: Relation,
    pub options: Vec<String>,
    pub correct_answer: String,
}
