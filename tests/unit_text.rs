// Unit tests for the text normalizer and stopword sets.
//
// Exercises the public API only: normalization order, missing input,
// idempotence over the bundled English list, and custom stopword files.

use std::sync::Arc;

use blogsift::text::{Normalizer, Stopwords};

fn english() -> Normalizer {
    Normalizer::new(Arc::new(Stopwords::english().unwrap()))
}

// ============================================================
// normalize — basic behaviour
// ============================================================

#[test]
fn missing_text_normalizes_to_empty() {
    assert_eq!(english().normalize(None), "");
}

#[test]
fn empty_and_whitespace_normalize_to_empty() {
    let n = english();
    assert_eq!(n.normalize(Some("")), "");
    assert_eq!(n.normalize(Some("   \t\n ")), "");
}

#[test]
fn punctuation_and_case_are_stripped() {
    let n = Normalizer::new(Arc::new(Stopwords::from_words(["for", "in"])));
    assert_eq!(
        n.normalize(Some("Dubai Apartments, for Sale in JVC!")),
        "dubai apartments sale jvc"
    );
}

#[test]
fn punctuation_joins_rather_than_splits_words() {
    let n = Normalizer::new(Arc::new(Stopwords::from_words(Vec::<String>::new())));
    assert_eq!(n.normalize(Some("off-plan 2-bed")), "offplan 2bed");
}

#[test]
fn non_ascii_characters_are_dropped() {
    let n = Normalizer::new(Arc::new(Stopwords::from_words(Vec::<String>::new())));
    assert_eq!(n.normalize(Some("Café in دبي Marina")), "caf in marina");
}

#[test]
fn only_stopwords_normalizes_to_empty() {
    assert_eq!(english().normalize(Some("The and for IN is")), "");
}

#[test]
fn english_list_keeps_real_estate_vocabulary() {
    let n = english();
    assert_eq!(n.normalize(Some("Top 10 areas to buy a home")), "top 10 areas buy home");
    assert_eq!(
        n.normalize(Some("Best new rooms: value of a million-dollar year")),
        "best new rooms value milliondollar year"
    );
}

// ============================================================
// normalize — properties
// ============================================================

#[test]
fn normalize_is_idempotent_with_english_list() {
    let n = english();
    let inputs = [
        "Top 10 Areas to Buy Property in Dubai (2024 Guide)",
        "Is it the right time to invest? Experts weigh in...",
        "Villa vs. Apartment: what's better for families?",
        "   multiple    spaces\tand\nnewlines  ",
        "Ünïcödé — ‘quotes’ and “dashes”",
    ];
    for input in inputs {
        let once = n.normalize(Some(input));
        let twice = n.normalize(Some(&once));
        assert_eq!(once, twice, "normalize not idempotent for {input:?}");
    }
}

#[test]
fn output_is_single_space_separated_lowercase_ascii() {
    let out = english().normalize(Some("Luxury  PENTHOUSES —\tPalm Jumeirah's finest!"));
    assert!(out.is_ascii());
    assert_eq!(out, out.to_lowercase());
    assert!(!out.contains("  "));
    assert!(!out.starts_with(' ') && !out.ends_with(' '));
    assert!(out.contains("penthouses"));
}

// ============================================================
// Stopwords — loading
// ============================================================

#[test]
fn custom_stopword_file_replaces_builtin_list() {
    let path = std::env::temp_dir().join(format!("blogsift-stopwords-{}.txt", std::process::id()));
    std::fs::write(&path, "# real-estate filler\ndubai\n\nProperty\n").unwrap();

    let sw = Stopwords::load(Some(&path)).unwrap();
    assert_eq!(sw.len(), 2);
    assert!(sw.contains("dubai"));
    assert!(sw.contains("property"));
    assert!(!sw.contains("the"));

    let n = Normalizer::new(Arc::new(sw));
    assert_eq!(n.normalize(Some("The Dubai property market")), "the market");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_stopword_file_is_an_error() {
    let path = std::env::temp_dir().join("blogsift-no-such-stopwords.txt");
    assert!(Stopwords::load(Some(&path)).is_err());
}

#[test]
fn empty_stopword_file_is_an_error() {
    let path = std::env::temp_dir().join(format!("blogsift-empty-stopwords-{}.txt", std::process::id()));
    std::fs::write(&path, "# nothing here\n\n").unwrap();
    assert!(Stopwords::load(Some(&path)).is_err());
    let _ = std::fs::remove_file(&path);
}
