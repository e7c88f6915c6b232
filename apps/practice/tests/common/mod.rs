//! Shared helpers for runner integration tests.
//!
//! Runners are built with a seeded generator and in-memory reporters, so no
//! network or backend is needed.

pub mod fixtures;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use exercise_core::{Answer, ExerciseReport, Question, SessionMachine, SessionSettings};
use vocab_practice::{PracticeRunner, ReportError, ResultReporter};

/// Keeps every report it receives.
#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<ExerciseReport>>,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<ExerciseReport> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultReporter for RecordingReporter {
    async fn report(&self, report: &ExerciseReport) -> Result<(), ReportError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}

/// Rejects every report like an unavailable backend would.
pub struct FailingReporter;

#[async_trait]
impl ResultReporter for FailingReporter {
    async fn report(&self, _report: &ExerciseReport) -> Result<(), ReportError> {
        Err(ReportError::Backend {
            status: 503,
            message: "unavailable".to_string(),
        })
    }
}

/// Never answers, like a backend that accepted the connection and stalled.
pub struct StalledReporter;

#[async_trait]
impl ResultReporter for StalledReporter {
    async fn report(&self, _report: &ExerciseReport) -> Result<(), ReportError> {
        std::future::pending().await
    }
}

pub fn runner(settings: SessionSettings, reporter: Arc<dyn ResultReporter>) -> PracticeRunner {
    let machine = SessionMachine::with_rng(settings, StdRng::seed_from_u64(7));
    PracticeRunner::with_machine(machine, reporter, "ex-1", "student-1")
}

pub fn manual_settings() -> SessionSettings {
    SessionSettings {
        auto_advance: false,
        ..SessionSettings::default()
    }
}

/// The correct answer to the current fill-in-blank question.
pub fn correct_answer(runner: &PracticeRunner) -> Answer {
    match runner.machine().current_question() {
        Some(Question::FillInBlank(q)) => Answer::Text(q.answer.clone()),
        other => panic!("expected a fill-in-blank question, got {other:?}"),
    }
}
