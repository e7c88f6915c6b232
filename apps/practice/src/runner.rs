//! Async driver around [`SessionMachine`].
//!
//! Scheduled timers become tokio deadlines. Only the latest one is tracked,
//! so a reset or a manual advance drops any earlier deadline along with its
//! handle.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::RngCore;
use tokio::time::Instant;

use exercise_core::{
    Advance, Answer, AttemptBook, ExerciseError, ExerciseReport, ExerciseSession, ExerciseType,
    SessionMachine, SubmitOutcome, TimerHandle, TimerOutcome, VocabularySet,
};

use crate::config::PracticeConfig;
use crate::reporter::ResultReporter;

/// What happened to the finished session's report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Reported,
    /// The reporter failed; the local results are still complete.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub session: ExerciseSession,
    pub report: ExerciseReport,
    pub delivery: Delivery,
}

#[derive(Debug, Clone)]
pub enum RunnerEvent {
    /// Manual advance may now be triggered.
    AdvanceAvailable,
    NextQuestion { index: usize },
    Completed(Box<CompletedRun>),
    /// The session disappeared before it could complete.
    Dropped,
}

pub struct PracticeRunner<R = StdRng> {
    machine: SessionMachine<R>,
    reporter: Arc<dyn ResultReporter>,
    exercise_id: String,
    student_id: String,
    deadline: Option<(TimerHandle, Instant)>,
    last_delivery: Option<Delivery>,
    report_timeout: Duration,
}

/// Upper bound on one reporter call before the run is marked undelivered.
pub const DEFAULT_REPORT_TIMEOUT: Duration = Duration::from_secs(10);

impl PracticeRunner<StdRng> {
    pub fn new(config: &PracticeConfig, reporter: Arc<dyn ResultReporter>) -> Self {
        Self::with_machine(
            SessionMachine::new(config.session.clone()),
            reporter,
            &config.exercise_id,
            &config.student_id,
        )
        .with_report_timeout(config.report_timeout)
    }
}

impl<R: RngCore> PracticeRunner<R> {
    pub fn with_machine(
        machine: SessionMachine<R>,
        reporter: Arc<dyn ResultReporter>,
        exercise_id: &str,
        student_id: &str,
    ) -> Self {
        Self {
            machine,
            reporter,
            exercise_id: exercise_id.to_string(),
            student_id: student_id.to_string(),
            deadline: None,
            last_delivery: None,
            report_timeout: DEFAULT_REPORT_TIMEOUT,
        }
    }

    pub fn with_report_timeout(mut self, timeout: Duration) -> Self {
        self.report_timeout = timeout;
        self
    }

    pub fn machine(&self) -> &SessionMachine<R> {
        &self.machine
    }

    pub fn attempts_mut(&mut self) -> &mut AttemptBook {
        self.machine.attempts_mut()
    }

    pub fn has_pending_timer(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn last_delivery(&self) -> Option<&Delivery> {
        self.last_delivery.as_ref()
    }

    pub fn start(
        &mut self,
        set: &VocabularySet,
        exercise_type: ExerciseType,
    ) -> Result<usize, ExerciseError> {
        self.deadline = None;
        self.last_delivery = None;
        self.machine.start_exercise(set, exercise_type, Utc::now())
    }

    pub fn start_named(&mut self, set: &VocabularySet, name: &str) -> Result<usize, ExerciseError> {
        self.deadline = None;
        self.last_delivery = None;
        self.machine.start_named(set, name, Utc::now())
    }

    pub fn submit(&mut self, answer: &Answer) -> Result<SubmitOutcome, ExerciseError> {
        let outcome = self.machine.submit_answer(answer, Utc::now())?;
        self.arm(&outcome);
        Ok(outcome)
    }

    pub fn submit_recorded(&mut self) -> Result<SubmitOutcome, ExerciseError> {
        let outcome = self.machine.submit_recorded(Utc::now())?;
        self.arm(&outcome);
        Ok(outcome)
    }

    /// Manual advance. Completing the session reports it before returning.
    pub async fn advance(&mut self) -> Result<RunnerEvent, ExerciseError> {
        let advance = self.machine.advance(Utc::now())?;
        self.deadline = None;
        Ok(self.on_advance(advance).await)
    }

    pub fn reset(&mut self) {
        self.deadline = None;
        self.machine.reset_session();
    }

    /// Resolve once the pending timer is due. Never resolves while no timer
    /// is pending. Borrows the runner immutably and is cancel-safe, so it
    /// can sit in a `select!` next to user input.
    pub async fn timer_due(&self) -> TimerHandle {
        match self.deadline {
            Some((handle, at)) => {
                tokio::time::sleep_until(at).await;
                handle
            }
            None => std::future::pending().await,
        }
    }

    /// Apply a due timer. Returns `None` when the handle was superseded.
    pub async fn fire(&mut self, handle: TimerHandle) -> Option<RunnerEvent> {
        if self.deadline.is_some_and(|(pending, _)| pending == handle) {
            self.deadline = None;
        }
        match self.machine.fire_timer(handle, Utc::now()) {
            TimerOutcome::Stale => None,
            TimerOutcome::AdvanceRevealed => Some(RunnerEvent::AdvanceAvailable),
            TimerOutcome::Advanced(advance) => Some(self.on_advance(advance).await),
        }
    }

    /// Wait for the pending timer and apply it.
    pub async fn next_timer_event(&mut self) -> RunnerEvent {
        loop {
            let handle = self.timer_due().await;
            if let Some(event) = self.fire(handle).await {
                return event;
            }
        }
    }

    fn arm(&mut self, outcome: &SubmitOutcome) {
        let timer = outcome.timer;
        self.deadline = Some((timer.handle, Instant::now() + timer.delay()));
    }

    async fn on_advance(&mut self, advance: Advance) -> RunnerEvent {
        match advance {
            Advance::Next { index } => RunnerEvent::NextQuestion { index },
            Advance::Completed => match self.finish().await {
                Some(run) => RunnerEvent::Completed(Box::new(run)),
                None => RunnerEvent::Dropped,
            },
        }
    }

    async fn finish(&mut self) -> Option<CompletedRun> {
        let session = self.machine.session().cloned()?;
        let report = ExerciseReport::from_session(&session, &self.exercise_id, &self.student_id);

        let delivery =
            match tokio::time::timeout(self.report_timeout, self.reporter.report(&report)).await {
                Ok(Ok(())) => Delivery::Reported,
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "failed to report exercise results");
                    Delivery::Failed(e.to_string())
                }
                Err(_) => {
                    tracing::warn!(
                        timeout_ms = self.report_timeout.as_millis() as u64,
                        "reporting exercise results timed out"
                    );
                    Delivery::Failed(format!(
                        "timed out after {} ms",
                        self.report_timeout.as_millis()
                    ))
                }
            };
        self.last_delivery = Some(delivery.clone());

        Some(CompletedRun {
            session,
            report,
            delivery,
        })
    }
}
