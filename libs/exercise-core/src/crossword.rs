//! Crossword grid layout.
//!
//! Places clues on a fixed square grid. Word 1 runs across, word 2 runs down
//! through the first letter it shares with word 1, and the remaining words
//! alternate direction at random in-bounds positions. Only the first two
//! words are intersected; later words may collide with earlier ones.

use std::collections::BTreeMap;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::types::VocabularyWord;

/// Default grid edge length.
pub const GRID_SIZE: usize = 12;

/// Shortest and longest answer the planner accepts.
pub const MIN_ANSWER_LEN: usize = 3;
pub const MAX_ANSWER_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Across,
    Down,
}

/// How the clues of a layout relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Words 1 and 2 cross on a shared letter.
    Intersecting,
    /// Words 1 and 2 share no letter; word 2 sits in a separate column.
    Unlinked,
    /// Too few usable words; one clue per row, no crossing.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswordClue {
    pub number: u32,
    pub direction: Direction,
    /// The word's definition.
    pub clue: String,
    /// Upper-cased term, letters only.
    pub answer: String,
    pub start_x: usize,
    pub start_y: usize,
    pub word_id: String,
}

impl CrosswordClue {
    pub fn len(&self) -> usize {
        self.answer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    /// A clue is filled in once the input has as many letters as the answer.
    pub fn is_complete(&self, input: &str) -> bool {
        input.chars().count() == self.len()
    }

    /// Case-insensitive exact match.
    pub fn is_correct(&self, input: &str) -> bool {
        input.to_lowercase() == self.answer.to_lowercase()
    }

    /// Grid coordinates `(x, y)` and letter of each answer cell.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), char)> + '_ {
        self.answer.chars().enumerate().map(move |(i, ch)| {
            let pos = match self.direction {
                Direction::Across => (self.start_x + i, self.start_y),
                Direction::Down => (self.start_x, self.start_y + i),
            };
            (pos, ch)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswordLayout {
    pub grid_size: usize,
    pub kind: LayoutKind,
    pub clues: Vec<CrosswordClue>,
}

impl CrosswordLayout {
    /// Sum of answer lengths; intersecting cells are counted twice.
    pub fn total_cells(&self) -> usize {
        self.clues.iter().map(CrosswordClue::len).sum()
    }

    /// Occupied cells. Where answers collide the later clue wins.
    pub fn cells(&self) -> BTreeMap<(usize, usize), char> {
        self.clues.iter().flat_map(CrosswordClue::cells).collect()
    }

    /// Number of clues whose input has the full answer length.
    pub fn completed_clues(&self, inputs: &BTreeMap<u32, String>) -> usize {
        self.clues
            .iter()
            .filter(|c| inputs.get(&c.number).is_some_and(|s| c.is_complete(s)))
            .count()
    }

    /// Number of clues answered correctly.
    pub fn correct_clues(&self, inputs: &BTreeMap<u32, String>) -> usize {
        self.clues
            .iter()
            .filter(|c| inputs.get(&c.number).is_some_and(|s| c.is_correct(s)))
            .count()
    }
}

/// Normalize a term into a crossword answer.
pub fn crossword_answer(term: &str) -> String {
    term.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Whether a word can be placed by the planner.
pub fn qualifies(word: &VocabularyWord) -> bool {
    let len = crossword_answer(&word.term).chars().count();
    (MIN_ANSWER_LEN..=MAX_ANSWER_LEN).contains(&len)
}

#[derive(Debug, Clone)]
pub struct CrosswordLayoutPlanner {
    pub grid_size: usize,
}

impl Default for CrosswordLayoutPlanner {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
        }
    }
}

impl CrosswordLayoutPlanner {
    /// Lay out the given words in order.
    pub fn plan(&self, words: &[&VocabularyWord], rng: &mut dyn RngCore) -> CrosswordLayout {
        let size = self.grid_size;
        let answers: Vec<Vec<char>> = words
            .iter()
            .map(|w| crossword_answer(&w.term).chars().collect())
            .collect();

        let mut clues = Vec::with_capacity(words.len());
        let mut kind = LayoutKind::Unlinked;

        if let (Some(first), Some(first_word)) = (answers.first(), words.first()) {
            let x1 = size.saturating_sub(first.len()) / 2;
            let mut y1 = size / 2;

            if let (Some(second), Some(second_word)) = (answers.get(1), words.get(1)) {
                let (x2, y2) = match shared_letter(first, second) {
                    Some((i, j)) => {
                        // Shift word 1's row just enough for word 2 to fit vertically.
                        let max_row = (size + j).saturating_sub(second.len());
                        y1 = y1.clamp(j, max_row.max(j));
                        kind = LayoutKind::Intersecting;
                        (x1 + i, y1 - j)
                    }
                    None => {
                        let right = x1 + first.len() + 1;
                        let x2 = if right < size {
                            right
                        } else {
                            x1.saturating_sub(2)
                        };
                        let y2 = y1
                            .saturating_sub(second.len() / 2)
                            .min(size.saturating_sub(second.len()));
                        (x2, y2)
                    }
                };
                clues.push(clue(1, Direction::Across, first_word, x1, y1));
                clues.push(clue(2, Direction::Down, second_word, x2, y2));
            } else {
                clues.push(clue(1, Direction::Across, first_word, x1, y1));
            }
        }

        for (k, (word, answer)) in words.iter().zip(&answers).enumerate().skip(2) {
            let span = size.saturating_sub(answer.len());
            let (direction, x, y) = if k % 2 == 0 {
                (
                    Direction::Across,
                    rng.gen_range(0..=span),
                    rng.gen_range(0..size),
                )
            } else {
                (
                    Direction::Down,
                    rng.gen_range(0..size),
                    rng.gen_range(0..=span),
                )
            };
            clues.push(clue(k as u32 + 1, direction, word, x, y));
        }

        tracing::debug!(clues = clues.len(), ?kind, "planned crossword layout");

        CrosswordLayout {
            grid_size: size,
            kind,
            clues,
        }
    }

    /// One across clue per word, each on its own row.
    pub fn fallback(&self, words: &[&VocabularyWord]) -> CrosswordLayout {
        let clues: Vec<CrosswordClue> = words
            .iter()
            .filter(|w| !crossword_answer(&w.term).is_empty())
            .enumerate()
            .map(|(row, word)| clue(row as u32 + 1, Direction::Across, word, 0, row))
            .collect();
        let longest = clues.iter().map(CrosswordClue::len).max().unwrap_or(0);

        CrosswordLayout {
            grid_size: self.grid_size.max(longest),
            kind: LayoutKind::Fallback,
            clues,
        }
    }
}

/// First `(i, j)` with `a[i] == b[j]`, scanning `a` in the outer loop.
fn shared_letter(a: &[char], b: &[char]) -> Option<(usize, usize)> {
    a.iter().enumerate().find_map(|(i, ca)| {
        b.iter().position(|cb| cb == ca).map(|j| (i, j))
    })
}

fn clue(
    number: u32,
    direction: Direction,
    word: &VocabularyWord,
    start_x: usize,
    start_y: usize,
) -> CrosswordClue {
    CrosswordClue {
        number,
        direction,
        clue: word.definition.clone(),
        answer: crossword_answer(&word.term),
        start_x,
        start_y,
        word_id: word.id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(terms: &[&str]) -> Vec<VocabularyWord> {
        terms
            .iter()
            .enumerate()
            .map(|(i, t)| VocabularyWord::new(i.to_string(), *t, format!("betydelse {i}")))
            .collect()
    }

    fn plan(terms: &[&str]) -> CrosswordLayout {
        let words = words(terms);
        let refs: Vec<&VocabularyWord> = words.iter().collect();
        let mut rng = StdRng::seed_from_u64(7);
        CrosswordLayoutPlanner::default().plan(&refs, &mut rng)
    }

    #[test]
    fn test_answer_normalization() {
        assert_eq!(crossword_answer("glass-bil"), "GLASSBIL");
        assert_eq!(crossword_answer("Älg"), "ÄLG");
        assert_eq!(crossword_answer("42"), "");
    }

    #[test]
    fn test_qualifies_by_length() {
        let w = words(&["ko", "katt", "elefantunge"]);
        assert!(!qualifies(&w[0]));
        assert!(qualifies(&w[1]));
        assert!(!qualifies(&w[2]));
    }

    #[test]
    fn test_first_two_words_intersect() {
        let layout = plan(&["katt", "tand", "fisk"]);
        assert_eq!(layout.kind, LayoutKind::Intersecting);

        let first = &layout.clues[0];
        let second = &layout.clues[1];
        assert_eq!(first.direction, Direction::Across);
        assert_eq!(second.direction, Direction::Down);
        assert_eq!(first.start_x, (GRID_SIZE - 4) / 2);
        assert_eq!(first.start_y, GRID_SIZE / 2);

        let a: BTreeMap<_, _> = layout.clues[0].cells().collect();
        let b: BTreeMap<_, _> = layout.clues[1].cells().collect();
        let shared: Vec<_> = a.keys().filter(|k| b.contains_key(k)).collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(a[shared[0]], b[shared[0]]);
        assert_eq!(a[shared[0]], 'A');
    }

    #[test]
    fn test_long_second_word_still_fits() {
        let layout = plan(&["abc", "xxxxxxxxxc", "dog"]);
        assert_eq!(layout.kind, LayoutKind::Intersecting);
        let second = &layout.clues[1];
        assert!(second.start_y + second.len() <= GRID_SIZE);
        let a: BTreeMap<_, _> = layout.clues[0].cells().collect();
        assert!(second.cells().any(|(pos, ch)| a.get(&pos) == Some(&ch)));
    }

    #[test]
    fn test_no_shared_letter_is_unlinked() {
        let layout = plan(&["abc", "xyz", "dog"]);
        assert_eq!(layout.kind, LayoutKind::Unlinked);
        let second = &layout.clues[1];
        assert!(second.start_x < GRID_SIZE);
        assert!(second.start_y + second.len() <= GRID_SIZE);
    }

    #[test]
    fn test_remaining_words_alternate_and_stay_in_bounds() {
        let layout = plan(&["katt", "tand", "fisk", "orm", "hamster", "ekorre"]);
        assert_eq!(layout.clues.len(), 6);
        let directions: Vec<_> = layout.clues.iter().map(|c| c.direction).collect();
        assert_eq!(
            directions,
            vec![
                Direction::Across,
                Direction::Down,
                Direction::Across,
                Direction::Down,
                Direction::Across,
                Direction::Down,
            ]
        );
        for clue in &layout.clues {
            for ((x, y), _) in clue.cells() {
                assert!(x < GRID_SIZE && y < GRID_SIZE, "clue {} out of bounds", clue.number);
            }
        }
        let numbers: Vec<u32> = layout.clues.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_total_cells_double_counts_intersection() {
        let layout = plan(&["katt", "tand", "fisk"]);
        assert_eq!(layout.total_cells(), 12);
        assert!(layout.cells().len() < 12);
    }

    #[test]
    fn test_fallback_uses_private_rows() {
        let w = words(&["ko", "42", "ek"]);
        let refs: Vec<&VocabularyWord> = w.iter().collect();
        let layout = CrosswordLayoutPlanner::default().fallback(&refs);
        assert_eq!(layout.kind, LayoutKind::Fallback);
        assert_eq!(layout.clues.len(), 2);
        assert_eq!(layout.clues[0].start_y, 0);
        assert_eq!(layout.clues[1].start_y, 1);
        assert!(layout.clues.iter().all(|c| c.direction == Direction::Across));
    }

    #[test]
    fn test_clue_completion_and_correctness() {
        let layout = plan(&["katt", "tand", "fisk"]);
        let mut inputs = BTreeMap::new();
        inputs.insert(1, "kat".to_string());
        inputs.insert(2, "Tand".to_string());
        inputs.insert(3, "FISH".to_string());
        assert_eq!(layout.completed_clues(&inputs), 2);
        assert_eq!(layout.correct_clues(&inputs), 1);
    }
}
