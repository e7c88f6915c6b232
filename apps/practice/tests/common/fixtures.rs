//! Vocabulary sets used by the integration tests.

use exercise_core::{VocabularySet, VocabularyWord};

const WORDS: [(&str, &str, &str); 6] = [
    ("hund", "ett husdjur som skäller", "Vår hund springer i parken."),
    ("katt", "ett husdjur som jamar", "Katten sover i solen."),
    ("tand", "sitter i munnen", "Jag borstar varje tand noga."),
    ("bok", "något man läser", "Hon läser en bok om rymden."),
    ("stol", "något man sitter på", "Ställ stolen vid bordet."),
    ("lampa", "ger ljus i rummet", "Tänd lampan i hallen."),
];

/// A set with the first `count` words (at most six).
pub fn word_set(count: usize) -> VocabularySet {
    let words = WORDS
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, (term, definition, example))| {
            VocabularyWord::new(format!("w{}", i + 1), *term, *definition).with_example(*example)
        })
        .collect();

    VocabularySet {
        id: "vardag".to_string(),
        name: "Vardagsord".to_string(),
        words,
    }
}
