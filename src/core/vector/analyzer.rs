//! Text analysis for the term-weighting model.
//!
//! Lowercases, folds accents (NFKD, combining marks dropped), extracts
//! word tokens of two or more characters and appends adjacent-token
//! bigrams. Documents and queries go through the same analyzer.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Lowercase and strip accents
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Word tokens of a folded text
pub fn tokens(folded: &str) -> Vec<&str> {
    TOKEN.find_iter(folded).map(|m| m.as_str()).collect()
}

/// Unigram and bigram terms, in order of appearance
///
/// Bigrams are the two tokens joined by a single space.
pub fn terms(text: &str) -> Vec<String> {
    let folded = fold(text);
    let unigrams = tokens(&folded);

    let mut terms: Vec<String> = Vec::with_capacity(unigrams.len() * 2);
    terms.extend(unigrams.iter().map(|t| t.to_string()));
    terms.extend(unigrams.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));

    terms
}
