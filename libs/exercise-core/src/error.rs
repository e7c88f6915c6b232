//! Error types for exercise-core.

use thiserror::Error;

use crate::types::ExerciseType;

/// Result type alias using ExerciseError.
pub type Result<T> = std::result::Result<T, ExerciseError>;

/// Errors raised by session transitions.
///
/// Generation and validation never fail; an unusable word pool or answer
/// shows up as an empty question list or an incorrect verdict instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExerciseError {
    #[error("vocabulary set {set_id} has no words")]
    EmptyWordPool { set_id: String },

    #[error("could not generate {exercise_type} questions from the word pool")]
    CannotGenerate { exercise_type: ExerciseType },

    #[error("unsupported exercise type: {0}")]
    UnsupportedType(String),

    #[error("cannot {action} while session is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    #[error("advance is not available yet")]
    AdvanceNotReady,
}
