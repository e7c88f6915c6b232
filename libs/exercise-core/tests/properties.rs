//! Generator and validator properties checked over several seeds.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use exercise_core::generator::true_false::statement;
use exercise_core::{
    all_pairs_matched, generate, generate_named, validate, Answer, ExerciseType, LayoutKind,
    Question, VocabularyWord,
};

const SEEDS: std::ops::Range<u64> = 0..8;

fn pool(size: usize) -> Vec<VocabularyWord> {
    const TERMS: [(&str, &str); 12] = [
        ("hund", "ett husdjur som skäller"),
        ("katt", "ett husdjur som jamar"),
        ("tand", "sitter i munnen"),
        ("bok", "något man läser"),
        ("stol", "möbel att sitta på"),
        ("lampa", "ger ljus i rummet"),
        ("glad", "känner glädje"),
        ("snabb", "rör sig fort"),
        ("fönster", "glasruta i väggen"),
        ("äpple", "en rund frukt"),
        ("skog", "många träd tillsammans"),
        ("moln", "vit massa på himlen"),
    ];
    TERMS
        .iter()
        .take(size)
        .enumerate()
        .map(|(i, (term, definition))| {
            let word = VocabularyWord::new(format!("w{i}"), *term, *definition)
                .with_example(format!("Här står ordet {term} i en mening."));
            if i % 2 == 0 {
                word.with_image(format!("https://bilder.example/{term}.png"))
            } else {
                word
            }
        })
        .collect()
}

#[test]
fn test_question_counts_stay_within_bounds() {
    for size in 1..=12 {
        let words = pool(size);
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            for exercise_type in ExerciseType::ALL {
                let questions = generate(exercise_type, &words, &mut rng);
                if exercise_type.is_aggregate() {
                    assert!(questions.len() <= 1, "{exercise_type} with {size} words");
                } else {
                    assert_eq!(questions.len(), size.min(10), "{exercise_type} with {size} words");
                }
                for question in &questions {
                    match question {
                        Question::Matching(q) => assert_eq!(q.pairs.len(), size.min(6)),
                        Question::ImageMatching(q) => assert!(q.items.len() <= size.min(6)),
                        Question::Crossword(q) => assert!(q.clues.len() <= 6),
                        _ => {}
                    }
                }
            }
        }
    }
}

#[test]
fn test_empty_pool_and_unknown_type_yield_nothing() {
    let mut rng = StdRng::seed_from_u64(1);
    for exercise_type in ExerciseType::ALL {
        assert!(generate(exercise_type, &[], &mut rng).is_empty());
    }
    assert!(generate_named("essay", &pool(5), &mut rng).is_empty());
}

#[test]
fn test_true_false_flag_matches_statement() {
    let words = pool(6);
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        for question in generate(ExerciseType::TrueFalse, &words, &mut rng) {
            let Question::TrueFalse(q) = &question else {
                panic!("expected true/false");
            };
            let asserts_real = q.statement == statement(&q.term, &q.correct_definition);
            assert_eq!(q.is_true, asserts_real);
            assert!(validate(&question, &Answer::Choice(q.is_true)).is_correct);
            assert!(!validate(&question, &Answer::Choice(!q.is_true)).is_correct);
        }
    }
}

#[test]
fn test_single_word_true_statement() {
    let words = vec![VocabularyWord::new("1", "hund", "ett husdjur")];
    let mut seen_true = false;
    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let questions = generate(ExerciseType::TrueFalse, &words, &mut rng);
        assert_eq!(questions.len(), 1);
        let Question::TrueFalse(q) = &questions[0] else {
            panic!("expected true/false");
        };
        if q.is_true {
            assert_eq!(q.statement, "\"hund\" betyder \"ett husdjur\"");
            seen_true = true;
        }
    }
    assert!(seen_true);
}

#[test]
fn test_fill_in_blank_accepts_term_in_any_case() {
    let words = pool(4);
    let mut rng = StdRng::seed_from_u64(3);
    for question in generate(ExerciseType::FillInBlank, &words, &mut rng) {
        let Question::FillInBlank(q) = &question else {
            panic!("expected fill in blank");
        };
        let shouted = format!("  {}\t", q.answer.to_uppercase());
        assert!(validate(&question, &Answer::Text(shouted)).is_correct);
        assert!(!validate(&question, &Answer::Text("moln".to_string())).is_correct);
        assert!(!validate(&question, &Answer::Choice(true)).is_correct);
    }
}

#[test]
fn test_matching_needs_every_pair() {
    let words = pool(8);
    let mut rng = StdRng::seed_from_u64(11);
    let questions = generate(ExerciseType::Matching, &words, &mut rng);
    assert_eq!(questions.len(), 1);
    let Question::Matching(q) = &questions[0] else {
        panic!("expected matching");
    };
    assert_eq!(q.pairs.len(), 6);

    let mut matches = BTreeMap::new();
    for pair in &q.pairs {
        assert!(!all_pairs_matched(q, &matches));
        matches.insert(pair.id.clone(), pair.definition.clone());
    }
    assert!(all_pairs_matched(q, &matches));
}

#[test]
fn test_crossword_with_shared_letters_intersects() {
    let words = vec![
        VocabularyWord::new("1", "katt", "ett husdjur som jamar"),
        VocabularyWord::new("2", "tand", "sitter i munnen"),
        VocabularyWord::new("3", "tak", "högst upp på huset"),
    ];
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let questions = generate(ExerciseType::Crossword, &words, &mut rng);
        let [Question::Crossword(q)] = questions.as_slice() else {
            panic!("expected one crossword");
        };
        assert_eq!(q.layout, LayoutKind::Intersecting);
        assert_eq!(q.clues.len(), 3);
        assert_eq!(q.total_cells(), 11);
    }
}

#[test]
fn test_crossword_falls_back_with_few_qualifying_words() {
    let words = vec![
        VocabularyWord::new("1", "katt", "ett husdjur som jamar"),
        VocabularyWord::new("2", "ö", "land omgivet av vatten"),
        VocabularyWord::new("3", "tand", "sitter i munnen"),
    ];
    let mut rng = StdRng::seed_from_u64(2);
    let questions = generate(ExerciseType::Crossword, &words, &mut rng);
    let [Question::Crossword(q)] = questions.as_slice() else {
        panic!("expected one crossword");
    };
    assert_eq!(q.layout, LayoutKind::Fallback);
    assert!(!q.clues.is_empty() && q.clues.len() <= 3);
    for (row, clue) in q.clues.iter().enumerate() {
        assert_eq!((clue.start_x, clue.start_y), (0, row));
    }
}
