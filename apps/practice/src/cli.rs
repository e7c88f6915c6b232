//! Plain-text rendering of questions and parsing of typed answers.

use std::collections::BTreeMap;

use exercise_core::crossword::Direction;
use exercise_core::question::{CrosswordQuestion, SentenceCompletionQuestion};
use exercise_core::{Answer, ExerciseSession, Question, Relation, SentenceSubtype, SubmitOutcome};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("no answer given")]
    Empty,

    #[error("expected sant or falskt")]
    NotABool,

    #[error("expected entries like 1=a, got {0:?}")]
    Malformed(String),

    #[error("no choice numbered {0}")]
    OutOfRange(usize),

    #[error("no option labelled {0:?}")]
    UnknownLabel(String),
}

fn label(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

/// Candidates shown with letter labels, sorted so they don't line up with
/// the numbered side.
fn lettered<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut values: Vec<&str> = values.collect();
    values.sort_unstable();
    values
}

pub fn render(question: &Question) -> String {
    let mut out = String::new();
    match question {
        Question::TrueFalse(q) => {
            out.push_str(&format!("Sant eller falskt?\n  {}\n[sant/falskt]", q.statement));
        }
        Question::FillInBlank(q) => {
            out.push_str(&format!("{}\nLedtråd: {}", q.sentence, q.hint));
        }
        Question::Matching(q) => {
            out.push_str("Para ihop ord och betydelse (t.ex. 1=a, 2=c)\n");
            for (i, pair) in q.pairs.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, pair.term));
            }
            let defs = lettered(q.pairs.iter().map(|p| p.definition.as_str()));
            for (i, def) in defs.iter().enumerate() {
                out.push_str(&format!("  {}) {}\n", label(i), def));
            }
        }
        Question::ImageMatching(q) => {
            out.push_str("Para ihop bild och ord (t.ex. 1=a, 2=c)\n");
            for (i, item) in q.items.iter().enumerate() {
                match &item.image_url {
                    Some(url) => out.push_str(&format!("  {}. [bild] {}\n", i + 1, url)),
                    None => out.push_str(&format!("  {}. [text] {}\n", i + 1, item.term)),
                }
            }
            let terms = lettered(q.items.iter().map(|i| i.term.as_str()));
            for (i, term) in terms.iter().enumerate() {
                out.push_str(&format!("  {}) {}\n", label(i), term));
            }
        }
        Question::Crossword(q) => render_crossword(q, &mut out),
        Question::SentenceCompletion(q) => render_sentence(q, &mut out),
        Question::SynonymAntonym(q) => {
            let heading = match q.relation {
                Relation::Synonym => "Välj en synonym till",
                Relation::Antonym => "Välj en antonym till",
            };
            out.push_str(&format!("{heading} \"{}\"\n", q.target_word));
            for (i, option) in q.options.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, option));
            }
        }
    }
    out.trim_end().to_string()
}

fn render_sentence(q: &SentenceCompletionQuestion, out: &mut String) {
    out.push_str(&q.sentence);
    if q.subtype == SentenceSubtype::WordBank {
        out.push('\n');
        for (i, word) in q.word_bank.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, word));
        }
    }
}

fn render_crossword(q: &CrosswordQuestion, out: &mut String) {
    let mut rows = vec![vec!['#'; q.grid_size]; q.grid_size];
    for clue in &q.clues {
        for ((x, y), _) in clue.cells() {
            if let Some(cell) = rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = '_';
            }
        }
    }
    for row in rows {
        out.push_str("  ");
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str("Ledtrådar (svara t.ex. 1=katt, 2=tand)\n");
    for clue in &q.clues {
        let direction = match clue.direction {
            Direction::Across => "vågrätt",
            Direction::Down => "lodrätt",
        };
        out.push_str(&format!(
            "  {}. {} ({}, {} bokstäver)\n",
            clue.number,
            clue.clue,
            direction,
            clue.len()
        ));
    }
}

/// Turn a typed line into an answer for `question`.
pub fn parse_answer(question: &Question, line: &str) -> Result<Answer, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InputError::Empty);
    }

    match question {
        Question::TrueFalse(_) => match line.to_lowercase().as_str() {
            "s" | "j" | "t" => Ok(Answer::Choice(true)),
            "f" | "n" => Ok(Answer::Choice(false)),
            _ => Answer::Text(line.to_string())
                .as_bool()
                .map(Answer::Choice)
                .ok_or(InputError::NotABool),
        },
        Question::FillInBlank(_) => Ok(Answer::Text(line.to_string())),
        Question::Matching(q) => {
            let defs = lettered(q.pairs.iter().map(|p| p.definition.as_str()));
            let keys: Vec<&str> = q.pairs.iter().map(|p| p.id.as_str()).collect();
            parse_lettered(line, &keys, &defs).map(Answer::Matches)
        }
        Question::ImageMatching(q) => {
            let terms = lettered(q.items.iter().map(|i| i.term.as_str()));
            let keys: Vec<&str> = q.items.iter().map(|i| i.id.as_str()).collect();
            parse_lettered(line, &keys, &terms).map(Answer::Matches)
        }
        Question::Crossword(q) => {
            let mut grid = BTreeMap::new();
            for (number, word) in entries(line)? {
                if !q.clues.iter().any(|c| c.number as usize == number) {
                    return Err(InputError::OutOfRange(number));
                }
                grid.insert(number as u32, word.to_string());
            }
            Ok(Answer::Grid(grid))
        }
        Question::SentenceCompletion(q) => match q.subtype {
            SentenceSubtype::WordBank => pick(line, &q.word_bank),
            _ => Ok(Answer::Text(line.to_string())),
        },
        Question::SynonymAntonym(q) => pick(line, &q.options),
    }
}

/// A number picks from `options`; anything else is taken as typed.
fn pick(line: &str, options: &[String]) -> Result<Answer, InputError> {
    match line.parse::<usize>() {
        Ok(n) => options
            .get(n.wrapping_sub(1))
            .map(|o| Answer::Text(o.clone()))
            .ok_or(InputError::OutOfRange(n)),
        Err(_) => Ok(Answer::Text(line.to_string())),
    }
}

/// Split `1=a, 2=b` into numbered entries.
fn entries(line: &str) -> Result<Vec<(usize, &str)>, InputError> {
    line.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (number, value) = part
                .split_once('=')
                .ok_or_else(|| InputError::Malformed(part.to_string()))?;
            let number = number
                .trim()
                .parse::<usize>()
                .map_err(|_| InputError::Malformed(part.to_string()))?;
            Ok((number, value.trim()))
        })
        .collect()
}

fn parse_lettered(
    line: &str,
    keys: &[&str],
    values: &[&str],
) -> Result<BTreeMap<String, String>, InputError> {
    let mut matches = BTreeMap::new();
    for (number, letter) in entries(line)? {
        let key = keys
            .get(number.wrapping_sub(1))
            .ok_or(InputError::OutOfRange(number))?;
        let value = (0..values.len())
            .find(|i| label(*i).to_string() == letter.to_lowercase())
            .map(|i| values[i])
            .ok_or_else(|| InputError::UnknownLabel(letter.to_string()))?;
        matches.insert(key.to_string(), value.to_string());
    }
    Ok(matches)
}

pub fn render_feedback(outcome: &SubmitOutcome) -> String {
    if outcome.verdict.is_correct {
        "Rätt!".to_string()
    } else {
        format!("Fel. Rätt svar: {}", outcome.verdict.correct_answer)
    }
}

pub fn render_summary(session: &ExerciseSession) -> String {
    format!(
        "Klart! {} av {} rätt, {} / {} poäng, längsta svit {}",
        session.correct_count(),
        session.total_questions,
        session.score,
        session.max_score(),
        session.max_streak
    )
}
