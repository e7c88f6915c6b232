//! Vocabulary exercise engine.
//!
//! Provides:
//! - Question generation for seven exercise types
//! - Crossword grid layout
//! - Answer validation
//! - Practice session state machine with scoring, streaks and timed advance

pub mod attempt;
pub mod crossword;
pub mod error;
pub mod generator;
pub mod question;
pub mod report;
pub mod session;
pub mod types;
pub mod validator;

pub use attempt::{Answer, AttemptBook, AttemptInput};
pub use crossword::{CrosswordClue, CrosswordLayout, CrosswordLayoutPlanner, Direction, LayoutKind};
pub use error::{ExerciseError, Result};
pub use generator::{generate, generate_named, get_strategy, QuestionStrategy};
pub use question::{Question, Relation, SentenceSubtype};
pub use report::{ExerciseReport, ReportAnswers};
pub use session::{
    Advance, ExerciseResult, ExerciseSession, ScheduledTimer, SessionMachine, SessionPhase,
    SubmitOutcome, TimerHandle, TimerKind, TimerOutcome,
};
pub use types::{ExerciseType, SessionSettings, VocabularySet, VocabularyWord};
pub use validator::{all_pairs_matched, validate, Verdict};
