//! Delivery of finished sessions to the reporting backend.

use async_trait::async_trait;
use reqwest::Client;

use exercise_core::ExerciseReport;

/// Reporting errors. None of them affect the completed session.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },
}

/// Receives the summary of every completed session.
#[async_trait]
pub trait ResultReporter: Send + Sync {
    async fn report(&self, report: &ExerciseReport) -> Result<(), ReportError>;
}

/// Posts reports as JSON to `<base_url>/api/exercise-attempts`.
pub struct HttpResultReporter {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpResultReporter {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/exercise-attempts", self.base_url)
    }
}

#[async_trait]
impl ResultReporter for HttpResultReporter {
    async fn report(&self, report: &ExerciseReport) -> Result<(), ReportError> {
        let mut request = self.client.post(self.endpoint()).json(report);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ReportError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(ReportError::Backend { status, message });
        }

        tracing::info!(
            exercise_id = %report.exercise_id,
            score = report.score,
            "reported exercise attempt"
        );
        Ok(())
    }
}

/// Logs the summary instead of sending it anywhere.
pub struct LogReporter;

#[async_trait]
impl ResultReporter for LogReporter {
    async fn report(&self, report: &ExerciseReport) -> Result<(), ReportError> {
        tracing::info!(
            exercise_id = %report.exercise_id,
            student_id = %report.student_id,
            score = report.score,
            max_score = report.max_score,
            correct = report.answers.correct_count,
            total = report.answers.total_questions,
            seconds = report.time_spent_seconds,
            "exercise finished (no report endpoint configured)"
        );
        Ok(())
    }
}
