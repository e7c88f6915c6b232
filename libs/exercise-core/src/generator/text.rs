//! Text helpers shared by the generators: blanking, content-word extraction
//! and the fixed antonym dictionary.

use crate::types::VocabularyWord;

/// Marker that replaces the term in gap sentences.
pub const BLANK: &str = "_____";

/// Words skipped when looking for a definition's content word.
const STOP_WORDS: &[&str] = &[
    "andra", "annan", "annat", "bara", "blir", "denna", "dessa", "detta", "eller", "efter",
    "från", "inte", "mellan", "mycket", "någon", "något", "några", "också", "sådan", "sådant",
    "till", "under", "utan", "vara", "över", "been", "from", "have", "into", "something",
    "that", "there", "this", "when", "where", "which", "with",
];

const ANTONYMS: &[(&str, &str)] = &[
    ("stor", "liten"),
    ("varm", "kall"),
    ("glad", "ledsen"),
    ("snabb", "långsam"),
    ("ljus", "mörk"),
    ("gammal", "ung"),
    ("lätt", "svår"),
    ("hög", "låg"),
    ("rik", "fattig"),
    ("stark", "svag"),
    ("öppen", "stängd"),
    ("början", "slut"),
    ("dag", "natt"),
    ("upp", "ner"),
    ("vacker", "ful"),
    ("tidig", "sen"),
    ("bra", "dålig"),
    ("full", "tom"),
    ("våt", "torr"),
    ("mjuk", "hård"),
];

/// Replace every case-insensitive occurrence of `term` in `sentence` with
/// [`BLANK`]. Returns `None` when the term does not occur.
pub fn blank_out(sentence: &str, term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(sentence.len());
    let mut rest = sentence;
    let mut replaced = false;
    while let Some(ch) = rest.chars().next() {
        if let Some(len) = prefix_len_ignore_case(rest, term) {
            out.push_str(BLANK);
            rest = &rest[len..];
            replaced = true;
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    replaced.then_some(out)
}

/// Byte length of the prefix of `haystack` matching `needle` case-insensitively.
fn prefix_len_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.chars();
    let mut consumed = 0;
    for n in needle.chars() {
        let h = hay.next()?;
        if !h.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
        consumed += h.len_utf8();
    }
    Some(consumed)
}

/// Gap sentence for a word: its example with the term blanked, otherwise a
/// sentence built from the definition.
pub fn gap_sentence(word: &VocabularyWord) -> String {
    word.example
        .as_deref()
        .and_then(|example| blank_out(example, &word.term))
        .unwrap_or_else(|| definition_sentence(word))
}

fn definition_sentence(word: &VocabularyWord) -> String {
    format!("{BLANK} betyder \"{}\".", word.definition.trim())
}

/// First word longer than three letters that is not a stop word.
pub fn content_word(text: &str) -> Option<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .find(|w| w.chars().count() > 3 && !STOP_WORDS.contains(&w.as_str()))
}

/// Short phrase from the start of a definition.
pub fn descriptive_phrase(word: &VocabularyWord) -> String {
    let phrase = word
        .definition
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if phrase.is_empty() {
        word.term.to_lowercase()
    } else {
        phrase
    }
}

/// Dictionary antonym, looked up in both directions.
pub fn antonym_of(term: &str) -> Option<&'static str> {
    let term = term.trim().to_lowercase();
    ANTONYMS.iter().find_map(|&(a, b)| {
        if a == term {
            Some(b)
        } else if b == term {
            Some(a)
        } else {
            None
        }
    })
}

/// Fabricated antonym for terms missing from the dictionary.
pub fn negation(term: &str) -> String {
    format!("inte {}", term.trim().to_lowercase())
}
