//! Runtime configuration read from the environment (and `.env`).

use std::time::Duration;

use exercise_core::SessionSettings;

use crate::runner::DEFAULT_REPORT_TIMEOUT;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeConfig {
    /// Base URL of the reporting backend. Results are only logged when unset.
    pub report_api_url: Option<String>,
    pub report_api_token: Option<String>,
    pub exercise_id: String,
    pub student_id: String,
    pub session: SessionSettings,
    /// How long a finished session waits for the reporter.
    pub report_timeout: Duration,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            report_api_url: None,
            report_api_token: None,
            exercise_id: "local".to_string(),
            student_id: "anonymous".to_string(),
            session: SessionSettings::default(),
            report_timeout: DEFAULT_REPORT_TIMEOUT,
        }
    }
}

impl PracticeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let session = SessionSettings {
            auto_advance: match get("AUTO_ADVANCE") {
                Some(v) => parse_bool("AUTO_ADVANCE", &v)?,
                None => defaults.session.auto_advance,
            },
            auto_advance_delay_ms: match get("AUTO_ADVANCE_DELAY_MS") {
                Some(v) => parse_ms("AUTO_ADVANCE_DELAY_MS", &v)?,
                None => defaults.session.auto_advance_delay_ms,
            },
            manual_advance_delay_ms: match get("MANUAL_ADVANCE_DELAY_MS") {
                Some(v) => parse_ms("MANUAL_ADVANCE_DELAY_MS", &v)?,
                None => defaults.session.manual_advance_delay_ms,
            },
        };

        Ok(Self {
            report_api_url: get("REPORT_API_URL").map(|u| u.trim_end_matches('/').to_string()),
            report_api_token: get("REPORT_API_TOKEN"),
            exercise_id: get("EXERCISE_ID").unwrap_or(defaults.exercise_id),
            student_id: get("STUDENT_ID").unwrap_or(defaults.student_id),
            session,
            report_timeout: match get("REPORT_TIMEOUT_MS") {
                Some(v) => Duration::from_millis(parse_ms("REPORT_TIMEOUT_MS", &v)?),
                None => defaults.report_timeout,
            },
        })
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

fn parse_ms(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
