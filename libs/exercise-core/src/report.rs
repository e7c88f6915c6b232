//! Summary handed to the result reporter when a session completes.

use serde::{Deserialize, Serialize};

use crate::session::{ExerciseResult, ExerciseSession};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseReport {
    pub exercise_id: String,
    pub student_id: String,
    pub score: u32,
    pub max_score: u32,
    pub time_spent_seconds: u64,
    pub answers: ReportAnswers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnswers {
    pub responses: Vec<ExerciseResult>,
    pub total_questions: usize,
    pub correct_count: usize,
}

impl ExerciseReport {
    pub fn from_session(session: &ExerciseSession, exercise_id: &str, student_id: &str) -> Self {
        let elapsed = session
            .completed_at
            .map(|end| (end - session.start_timestamp).num_seconds().max(0) as u64)
            .unwrap_or(0);

        Self {
            exercise_id: exercise_id.to_string(),
            student_id: student_id.to_string(),
            score: session.score,
            max_score: session.max_score(),
            time_spent_seconds: elapsed,
            answers: ReportAnswers {
                responses: session.results.clone(),
                total_questions: session.total_questions,
                correct_count: session.correct_count(),
            },
        }
    }
}
