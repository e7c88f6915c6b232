//! Practice session state machine.
//!
//! `Selecting → InProgress → Feedback → InProgress | Complete`
//!
//! The machine owns no clock. Callers pass `now` into every transition and
//! turn the returned [`ScheduledTimer`]s into real delays, calling
//! [`SessionMachine::fire_timer`] when one elapses. Only the most recently
//! scheduled timer is live; firing any other handle is a no-op.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::attempt::{Answer, AttemptBook};
use crate::error::{ExerciseError, Result};
use crate::generator;
use crate::question::Question;
use crate::report::ExerciseReport;
use crate::types::{ExerciseType, SessionSettings, VocabularySet};
use crate::validator::{validate, Verdict};

/// Score awarded per correct answer.
pub const POINTS_PER_CORRECT: u32 = 10;

/// Outcome of one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResult {
    pub question_id: String,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub time_spent_ms: u64,
}

/// Progress of one practice run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSession {
    pub set_id: String,
    pub exercise_type: ExerciseType,
    pub current_question_index: usize,
    pub total_questions: usize,
    pub score: u32,
    pub streak: u32,
    pub max_streak: u32,
    pub start_timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub results: Vec<ExerciseResult>,
}

impl ExerciseSession {
    fn new(
        set_id: &str,
        exercise_type: ExerciseType,
        total_questions: usize,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            set_id: set_id.to_string(),
            exercise_type,
            current_question_index: 0,
            total_questions,
            score: 0,
            streak: 0,
            max_streak: 0,
            start_timestamp: now,
            completed_at: None,
            results: Vec::new(),
        }
    }

    fn record(&mut self, result: ExerciseResult) {
        if result.is_correct {
            self.score += POINTS_PER_CORRECT;
            self.streak += 1;
            self.max_streak = self.max_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
        self.results.push(result);
    }

    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }

    pub fn max_score(&self) -> u32 {
        self.total_questions as u32 * POINTS_PER_CORRECT
    }

    /// Percentage of answered questions that were correct.
    pub fn accuracy(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.correct_count() as f64 / self.results.len() as f64 * 100.0
    }

    /// Fraction of questions answered.
    pub fn progress(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.results.len() as f64 / self.total_questions as f64
    }

    /// Seconds from start to completion, or to `now` while running.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        let end = self.completed_at.unwrap_or(now);
        (end - self.start_timestamp).num_seconds().max(0)
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Selecting,
    InProgress,
    Feedback,
    Complete,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Selecting => "selecting",
            Self::InProgress => "in_progress",
            Self::Feedback => "feedback",
            Self::Complete => "complete",
        }
    }
}

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Move on to the next question (or complete).
    AutoAdvance,
    /// Make manual `advance` available.
    RevealAdvance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTimer {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    pub delay_ms: u64,
}

impl ScheduledTimer {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub verdict: Verdict,
    pub result: ExerciseResult,
    pub timer: ScheduledTimer,
    /// Whether this was the last question of the session.
    pub is_last: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// The handle was cancelled or superseded.
    Stale,
    AdvanceRevealed,
    Advanced(Advance),
}

/// Drives one practice run at a time.
pub struct SessionMachine<R = StdRng> {
    settings: SessionSettings,
    rng: R,
    phase: SessionPhase,
    questions: Vec<Question>,
    session: Option<ExerciseSession>,
    attempts: AttemptBook,
    pending: Option<ScheduledTimer>,
    next_handle: u64,
    question_started_at: Option<DateTime<Utc>>,
    advance_available: bool,
    last_verdict: Option<Verdict>,
}

impl SessionMachine<StdRng> {
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }
}

impl<R: RngCore> SessionMachine<R> {
    pub fn with_rng(settings: SessionSettings, rng: R) -> Self {
        Self {
            settings,
            rng,
            phase: SessionPhase::Selecting,
            questions: Vec::new(),
            session: None,
            attempts: AttemptBook::new(),
            pending: None,
            next_handle: 0,
            question_started_at: None,
            advance_available: false,
            last_verdict: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn session(&self) -> Option<&ExerciseSession> {
        self.session.as_ref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question being answered or just answered.
    pub fn current_question(&self) -> Option<&Question> {
        let index = self.session.as_ref()?.current_question_index;
        self.questions.get(index)
    }

    pub fn attempts(&self) -> &AttemptBook {
        &self.attempts
    }

    /// Record in-progress input (matches, typed words) for the UI.
    pub fn attempts_mut(&mut self) -> &mut AttemptBook {
        &mut self.attempts
    }

    pub fn pending_timer(&self) -> Option<ScheduledTimer> {
        self.pending
    }

    pub fn last_verdict(&self) -> Option<&Verdict> {
        self.last_verdict.as_ref()
    }

    /// Whether `advance` would succeed now.
    pub fn can_advance(&self) -> bool {
        self.phase == SessionPhase::Feedback && (self.settings.auto_advance || self.advance_available)
    }

    /// Generate questions for `set` and begin a new session.
    pub fn start_exercise(
        &mut self,
        set: &VocabularySet,
        exercise_type: ExerciseType,
        now: DateTime<Utc>,
    ) -> Result<usize> {
        if !matches!(self.phase, SessionPhase::Selecting | SessionPhase::Complete) {
            return Err(self.invalid("start an exercise"));
        }
        self.reset_session();

        if set.words.is_empty() {
            return Err(ExerciseError::EmptyWordPool {
                set_id: set.id.clone(),
            });
        }

        let questions = generator::generate(exercise_type, &set.words, &mut self.rng);
        if questions.is_empty() {
            tracing::info!(set_id = %set.id, %exercise_type, "not enough content to start exercise");
            return Err(ExerciseError::CannotGenerate { exercise_type });
        }

        let total = questions.len();
        self.session = Some(ExerciseSession::new(&set.id, exercise_type, total, now));
        self.questions = questions;
        self.question_started_at = Some(now);
        self.phase = SessionPhase::InProgress;

        tracing::info!(set_id = %set.id, %exercise_type, total, "exercise started");
        Ok(total)
    }

    /// Start from a type name; unknown names are rejected.
    pub fn start_named(&mut self, set: &VocabularySet, name: &str, now: DateTime<Utc>) -> Result<usize> {
        let exercise_type =
            ExerciseType::parse(name).ok_or_else(|| ExerciseError::UnsupportedType(name.to_string()))?;
        self.start_exercise(set, exercise_type, now)
    }

    /// Judge `answer` for the current question and enter feedback.
    pub fn submit_answer(&mut self, answer: &Answer, now: DateTime<Utc>) -> Result<SubmitOutcome> {
        if self.phase != SessionPhase::InProgress {
            return Err(self.invalid("submit an answer"));
        }
        let Some(question) = self
            .session
            .as_ref()
            .and_then(|s| self.questions.get(s.current_question_index))
        else {
            return Err(self.invalid("submit an answer"));
        };

        let verdict = validate(question, answer);
        let started = self.question_started_at.unwrap_or(now);
        let result = ExerciseResult {
            question_id: question.id().to_string(),
            question: question.prompt(),
            user_answer: answer.display(),
            correct_answer: verdict.correct_answer.clone(),
            is_correct: verdict.is_correct,
            time_spent_ms: (now - started).num_milliseconds().max(0) as u64,
        };

        let Some(session) = self.session.as_mut() else {
            return Err(self.invalid("submit an answer"));
        };
        session.record(result.clone());
        let is_last = session.current_question_index + 1 >= session.total_questions;

        tracing::debug!(
            question_id = %result.question_id,
            correct = verdict.is_correct,
            score = session.score,
            streak = session.streak,
            "answer submitted"
        );

        self.phase = SessionPhase::Feedback;
        self.advance_available = false;
        self.last_verdict = Some(verdict.clone());

        let (kind, delay_ms) = if self.settings.auto_advance {
            (TimerKind::AutoAdvance, self.settings.auto_advance_delay_ms)
        } else {
            (TimerKind::RevealAdvance, self.settings.manual_advance_delay_ms)
        };
        let timer = self.schedule(kind, delay_ms);

        Ok(SubmitOutcome {
            verdict,
            result,
            timer,
            is_last,
        })
    }

    /// Submit whatever the attempt book holds for the current question.
    pub fn submit_recorded(&mut self, now: DateTime<Utc>) -> Result<SubmitOutcome> {
        let answer = match self.current_question() {
            Some(question) if self.phase == SessionPhase::InProgress => self.attempts.answer_for(question),
            _ => return Err(self.invalid("submit an answer")),
        };
        self.submit_answer(&answer, now)
    }

    /// Leave feedback for the next question, or complete the session.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance> {
        if self.phase != SessionPhase::Feedback {
            return Err(self.invalid("advance"));
        }
        if !self.can_advance() {
            return Err(ExerciseError::AdvanceNotReady);
        }
        Ok(self.step(now))
    }

    /// Apply an elapsed timer. Handles other than the pending one are ignored.
    pub fn fire_timer(&mut self, handle: TimerHandle, now: DateTime<Utc>) -> TimerOutcome {
        match self.pending {
            Some(timer) if timer.handle == handle => {
                self.pending = None;
                match timer.kind {
                    TimerKind::AutoAdvance => TimerOutcome::Advanced(self.step(now)),
                    TimerKind::RevealAdvance => {
                        self.advance_available = true;
                        TimerOutcome::AdvanceRevealed
                    }
                }
            }
            _ => {
                tracing::debug!(?handle, "ignoring stale timer");
                TimerOutcome::Stale
            }
        }
    }

    /// Drop the current session and cancel any pending timer.
    pub fn reset_session(&mut self) {
        if let Some(timer) = self.pending.take() {
            tracing::debug!(handle = ?timer.handle, "cancelled pending timer");
        }
        self.phase = SessionPhase::Selecting;
        self.questions.clear();
        self.session = None;
        self.attempts.clear();
        self.question_started_at = None;
        self.advance_available = false;
        self.last_verdict = None;
    }

    /// Summary of a completed session.
    pub fn report(&self, exercise_id: &str, student_id: &str) -> Option<ExerciseReport> {
        match (&self.session, self.phase) {
            (Some(session), SessionPhase::Complete) => {
                Some(ExerciseReport::from_session(session, exercise_id, student_id))
            }
            _ => None,
        }
    }

    fn step(&mut self, now: DateTime<Utc>) -> Advance {
        self.pending = None;
        self.advance_available = false;
        self.last_verdict = None;

        let Some(session) = self.session.as_mut() else {
            self.phase = SessionPhase::Selecting;
            return Advance::Completed;
        };

        session.current_question_index = (session.current_question_index + 1).min(session.total_questions);
        if session.current_question_index >= session.total_questions {
            session.completed_at = Some(now);
            self.phase = SessionPhase::Complete;
            tracing::info!(
                score = session.score,
                max_score = session.max_score(),
                max_streak = session.max_streak,
                "exercise complete"
            );
            Advance::Completed
        } else {
            self.question_started_at = Some(now);
            self.phase = SessionPhase::InProgress;
            Advance::Next {
                index: session.current_question_index,
            }
        }
    }

    fn schedule(&mut self, kind: TimerKind, delay_ms: u64) -> ScheduledTimer {
        self.next_handle += 1;
        let timer = ScheduledTimer {
            handle: TimerHandle(self.next_handle),
            kind,
            delay_ms,
        };
        self.pending = Some(timer);
        timer
    }

    fn invalid(&self, action: &'static str) -> ExerciseError {
        ExerciseError::InvalidTransition {
            action,
            phase: self.phase.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::test_support::animals;
    use chrono::Duration as ChronoDuration;
    use pretty_assertions::assert_eq;

    fn set(size: usize) -> VocabularySet {
        VocabularySet {
            id: "djur".to_string(),
            name: "Djur".to_string(),
            words: animals(size),
        }
    }

    fn machine(auto_advance: bool) -> SessionMachine {
        let settings = SessionSettings {
            auto_advance,
            ..SessionSettings::default()
        };
        SessionMachine::with_rng(settings, StdRng::seed_from_u64(42))
    }

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn tf_answer(question: &Question, correct: bool) -> Answer {
        match question {
            Question::TrueFalse(q) => Answer::Choice(q.is_true == correct),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_start_requires_words() {
        let mut m = machine(true);
        let empty = VocabularySet {
            id: "tom".to_string(),
            name: "Tom".to_string(),
            words: Vec::new(),
        };
        assert_eq!(
            m.start_exercise(&empty, ExerciseType::TrueFalse, t0()),
            Err(ExerciseError::EmptyWordPool {
                set_id: "tom".to_string()
            })
        );
        assert_eq!(m.phase(), SessionPhase::Selecting);
        assert!(m.session().is_none());
    }

    #[test]
    fn test_start_fails_when_nothing_generates() {
        let mut m = machine(true);
        let numbers = VocabularySet {
            id: "tal".to_string(),
            name: "Tal".to_string(),
            words: vec![crate::types::VocabularyWord::new("1", "42", "ett tal")],
        };
        assert_eq!(
            m.start_exercise(&numbers, ExerciseType::Crossword, t0()),
            Err(ExerciseError::CannotGenerate {
                exercise_type: ExerciseType::Crossword
            })
        );
        assert_eq!(m.phase(), SessionPhase::Selecting);
    }

    #[test]
    fn test_start_named_rejects_unknown_type() {
        let mut m = machine(true);
        assert_eq!(
            m.start_named(&set(3), "essay", t0()),
            Err(ExerciseError::UnsupportedType("essay".to_string()))
        );
        assert_eq!(m.start_named(&set(3), "matching", t0()), Ok(1));
    }

    #[test]
    fn test_score_and_streak_invariants() {
        let mut m = machine(true);
        assert_eq!(m.start_exercise(&set(8), ExerciseType::TrueFalse, t0()), Ok(8));

        let pattern = [true, true, false, true, true, true, false, true];
        let mut now = t0();
        let mut last_max = 0;
        for (i, correct) in pattern.iter().enumerate() {
            let answer = tf_answer(m.current_question().unwrap(), *correct);
            now += ChronoDuration::seconds(2);
            let outcome = m.submit_answer(&answer, now).unwrap();
            assert_eq!(outcome.verdict.is_correct, *correct);
            assert_eq!(outcome.result.time_spent_ms, 2000);
            assert_eq!(outcome.is_last, i == pattern.len() - 1);

            let session = m.session().unwrap();
            let correct_so_far = pattern[..=i].iter().filter(|c| **c).count() as u32;
            assert_eq!(session.score, 10 * correct_so_far);
            if !correct {
                assert_eq!(session.streak, 0);
            }
            assert!(session.max_streak >= last_max);
            last_max = session.max_streak;

            let timer = outcome.timer;
            assert_eq!(timer.kind, TimerKind::AutoAdvance);
            assert_eq!(timer.delay_ms, 3000);
            m.fire_timer(timer.handle, now);
        }

        let session = m.session().unwrap();
        assert_eq!(m.phase(), SessionPhase::Complete);
        assert_eq!(session.score, 60);
        assert_eq!(session.streak, 1);
        assert_eq!(session.max_streak, 3);
        assert_eq!(session.current_question_index, session.total_questions);
        assert_eq!(session.results.len(), 8);
        assert_eq!(session.correct_count(), 6);
        assert_eq!(session.accuracy(), 75.0);
    }

    #[test]
    fn test_auto_advance_moves_to_next_question() {
        let mut m = machine(true);
        m.start_exercise(&set(3), ExerciseType::TrueFalse, t0()).unwrap();
        let answer = tf_answer(m.current_question().unwrap(), true);
        let outcome = m.submit_answer(&answer, t0()).unwrap();
        assert_eq!(m.phase(), SessionPhase::Feedback);
        assert!(m.last_verdict().unwrap().is_correct);

        // A second submission during feedback is rejected.
        assert!(matches!(
            m.submit_answer(&answer, t0()),
            Err(ExerciseError::InvalidTransition { .. })
        ));

        assert_eq!(
            m.fire_timer(outcome.timer.handle, t0()),
            TimerOutcome::Advanced(Advance::Next { index: 1 })
        );
        assert_eq!(m.phase(), SessionPhase::InProgress);
        assert_eq!(m.fire_timer(outcome.timer.handle, t0()), TimerOutcome::Stale);
    }

    #[test]
    fn test_manual_advance_waits_for_reveal() {
        let mut m = machine(false);
        m.start_exercise(&set(2), ExerciseType::TrueFalse, t0()).unwrap();
        let answer = tf_answer(m.current_question().unwrap(), false);
        let outcome = m.submit_answer(&answer, t0()).unwrap();
        assert_eq!(outcome.timer.kind, TimerKind::RevealAdvance);
        assert_eq!(outcome.timer.delay_ms, 1000);

        assert!(!m.can_advance());
        assert_eq!(m.advance(t0()), Err(ExerciseError::AdvanceNotReady));

        assert_eq!(m.fire_timer(outcome.timer.handle, t0()), TimerOutcome::AdvanceRevealed);
        assert_eq!(m.phase(), SessionPhase::Feedback);
        assert_eq!(m.advance(t0()), Ok(Advance::Next { index: 1 }));

        let answer = tf_answer(m.current_question().unwrap(), true);
        let outcome = m.submit_answer(&answer, t0()).unwrap();
        assert!(outcome.is_last);
        m.fire_timer(outcome.timer.handle, t0());
        assert_eq!(m.advance(t0()), Ok(Advance::Completed));
        assert_eq!(m.phase(), SessionPhase::Complete);
        assert_eq!(m.advance(t0()), Err(ExerciseError::InvalidTransition {
            action: "advance",
            phase: "complete",
        }));
    }

    #[test]
    fn test_reset_cancels_pending_timer() {
        let mut m = machine(true);
        m.start_exercise(&set(3), ExerciseType::TrueFalse, t0()).unwrap();
        let answer = tf_answer(m.current_question().unwrap(), true);
        let stale = m.submit_answer(&answer, t0()).unwrap().timer;

        m.reset_session();
        assert_eq!(m.phase(), SessionPhase::Selecting);
        assert!(m.pending_timer().is_none());

        m.start_exercise(&set(3), ExerciseType::TrueFalse, t0()).unwrap();
        assert_eq!(m.fire_timer(stale.handle, t0()), TimerOutcome::Stale);
        assert_eq!(m.phase(), SessionPhase::InProgress);
        assert_eq!(m.session().unwrap().current_question_index, 0);
    }

    #[test]
    fn test_manual_advance_in_auto_mode_supersedes_timer() {
        let mut m = machine(true);
        m.start_exercise(&set(3), ExerciseType::TrueFalse, t0()).unwrap();
        let answer = tf_answer(m.current_question().unwrap(), true);
        let timer = m.submit_answer(&answer, t0()).unwrap().timer;
        assert_eq!(m.advance(t0()), Ok(Advance::Next { index: 1 }));
        assert_eq!(m.fire_timer(timer.handle, t0()), TimerOutcome::Stale);
        assert_eq!(m.session().unwrap().current_question_index, 1);
    }

    #[test]
    fn test_matching_through_attempt_book() {
        let mut m = machine(true);
        m.start_exercise(&set(8), ExerciseType::Matching, t0()).unwrap();
        let Some(Question::Matching(q)) = m.current_question().cloned() else {
            panic!("expected matching question");
        };
        assert_eq!(q.pairs.len(), 6);

        for pair in &q.pairs {
            m.attempts_mut().record_match(&q.id, &pair.id, &pair.definition);
        }
        let outcome = m.submit_recorded(t0()).unwrap();
        assert!(outcome.verdict.is_correct);
        assert!(outcome.is_last);

        m.fire_timer(outcome.timer.handle, t0() + ChronoDuration::seconds(30));
        let report = m.report("ex-1", "student-1").unwrap();
        assert_eq!(report.score, 10);
        assert_eq!(report.max_score, 10);
        assert_eq!(report.time_spent_seconds, 30);
        assert_eq!(report.answers.correct_count, 1);
        assert_eq!(report.answers.total_questions, 1);
    }

    #[test]
    fn test_report_only_when_complete() {
        let mut m = machine(true);
        assert!(m.report("ex", "st").is_none());
        m.start_exercise(&set(2), ExerciseType::FillInBlank, t0()).unwrap();
        assert!(m.report("ex", "st").is_none());
    }

    #[test]
    fn test_restart_after_complete() {
        let mut m = machine(true);
        m.start_exercise(&set(1), ExerciseType::FillInBlank, t0()).unwrap();
        let outcome = m.submit_answer(&Answer::Text("hund".to_string()), t0()).unwrap();
        assert!(outcome.verdict.is_correct);
        m.fire_timer(outcome.timer.handle, t0());
        assert_eq!(m.phase(), SessionPhase::Complete);

        assert_eq!(m.start_exercise(&set(4), ExerciseType::FillInBlank, t0()), Ok(4));
        let session = m.session().unwrap();
        assert_eq!(session.score, 0);
        assert!(session.results.is_empty());
    }

    #[test]
    fn test_start_rejected_mid_session() {
        let mut m = machine(true);
        m.start_exercise(&set(3), ExerciseType::TrueFalse, t0()).unwrap();
        assert!(matches!(
            m.start_exercise(&set(3), ExerciseType::TrueFalse, t0()),
            Err(ExerciseError::InvalidTransition { .. })
        ));
    }
}
