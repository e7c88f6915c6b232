//! Terminal practice runner for vocabulary exercises.

pub mod cli;
pub mod config;
pub mod reporter;
pub mod runner;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::{ConfigError, PracticeConfig};
pub use reporter::{HttpResultReporter, LogReporter, ReportError, ResultReporter};
pub use runner::{CompletedRun, Delivery, PracticeRunner, RunnerEvent};

/// Initialize tracing. Logs go to stderr so they don't mix with the exercise.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
