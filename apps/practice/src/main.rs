use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use exercise_core::{SessionPhase, VocabularySet};
use vocab_practice::cli::{self, InputError};
use vocab_practice::{
    init_tracing, HttpResultReporter, LogReporter, PracticeConfig, PracticeRunner, ResultReporter,
    RunnerEvent,
};

const USAGE: &str = "usage: vocab-practice <set.json> [exercise-type]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let mut args = std::env::args().skip(1);
    let path = args.next().context(USAGE)?;
    let type_name = args.next().unwrap_or_else(|| "true_false".to_string());

    let config = PracticeConfig::from_env()?;
    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {path}"))?;
    let set: VocabularySet =
        serde_json::from_str(&raw).with_context(|| format!("invalid vocabulary set in {path}"))?;

    let reporter: Arc<dyn ResultReporter> = match &config.report_api_url {
        Some(url) => Arc::new(HttpResultReporter::new(url, config.report_api_token.clone())),
        None => Arc::new(LogReporter),
    };

    let mut runner = PracticeRunner::new(&config, reporter);
    let total = runner.start_named(&set, &type_name)?;
    println!("{} ({}): {} frågor", set.name, type_name, total);
    show_current(&runner);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let event = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match on_line(&mut runner, line.trim()).await? {
                    Some(event) => event,
                    None => continue,
                }
            }
            handle = runner.timer_due() => match runner.fire(handle).await {
                Some(event) => event,
                None => continue,
            },
        };

        match event {
            RunnerEvent::AdvanceAvailable => println!("Tryck Enter för nästa fråga."),
            RunnerEvent::NextQuestion { .. } => show_current(&runner),
            RunnerEvent::Completed(run) => {
                println!("{}", cli::render_summary(&run.session));
                break;
            }
            RunnerEvent::Dropped => break,
        }
    }

    Ok(())
}

/// Handle one typed line. `:q` quits, an empty line advances during feedback.
async fn on_line(runner: &mut PracticeRunner, line: &str) -> anyhow::Result<Option<RunnerEvent>> {
    if line == ":q" {
        runner.reset();
        return Ok(Some(RunnerEvent::Dropped));
    }

    match runner.machine().phase() {
        SessionPhase::Feedback => {
            if !line.is_empty() {
                return Ok(None);
            }
            match runner.advance().await {
                Ok(event) => Ok(Some(event)),
                Err(e) => {
                    println!("{e}");
                    Ok(None)
                }
            }
        }
        SessionPhase::InProgress => {
            let Some(question) = runner.machine().current_question() else {
                return Ok(None);
            };
            let answer = match cli::parse_answer(question, line) {
                Ok(answer) => answer,
                Err(InputError::Empty) => return Ok(None),
                Err(e) => {
                    println!("{e}");
                    return Ok(None);
                }
            };
            let outcome = runner.submit(&answer)?;
            println!("{}", cli::render_feedback(&outcome));
            Ok(None)
        }
        SessionPhase::Selecting | SessionPhase::Complete => Ok(Some(RunnerEvent::Dropped)),
    }
}

fn show_current(runner: &PracticeRunner) {
    let machine = runner.machine();
    if let (Some(question), Some(session)) = (machine.current_question(), machine.session()) {
        println!(
            "\n[{}/{}] poäng {} svit {}",
            session.current_question_index + 1,
            session.total_questions,
            session.score,
            session.streak
        );
        println!("{}", cli::render(question));
    }
}
