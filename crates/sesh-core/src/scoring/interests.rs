//! Interest tokenization and Jaccard similarity.
//!
//! Free-text interests are compared as token sets. An earlier
//! embedding-based cosine similarity was dropped for its memory cost;
//! Jaccard still rewards overlapping vocabulary and is insensitive to
//! word order and case.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Connectives that carry no interest signal.
static STOPWORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["and", "or", "the", "of"]));

/// Splits free text on commas and whitespace, lowercases, drops stopwords
/// and returns the unique tokens.
pub fn interest_tokens(text: &str) -> HashSet<String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty() && !STOPWORDS.contains(token.as_str()))
        .collect()
}

/// Jaccard similarity of the two token sets: |intersection| / |union|.
///
/// Returns 0.0 when either side is empty (including when a user has no
/// interests recorded at all).
pub fn jaccard(a: &str, b: &str) -> f64 {
    let left = interest_tokens(a);
    let right = interest_tokens(b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let intersection = left.intersection(&right).count();
    let union = left.union(&right).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_token_over_union_of_three() {
        // shared "math"; union {science, math, arts}
        let similarity = jaccard("science, math", "math, arts");
        assert!((similarity - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_side_yields_zero() {
        assert_eq!(jaccard("", "anything"), 0.0);
        assert_eq!(jaccard("anything", ""), 0.0);
    }

    #[test]
    fn stopword_only_sides_yield_zero() {
        assert_eq!(jaccard("and or", "or and"), 0.0);
    }

    #[test]
    fn identical_sets_score_one() {
        assert_eq!(jaccard("rust, coffee", "coffee rust"), 1.0);
    }

    #[test]
    fn tokenization_is_case_insensitive_and_deduplicates() {
        let tokens = interest_tokens("Math, math,  MATH climbing");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("math"));
        assert!(tokens.contains("climbing"));
    }

    #[test]
    fn commas_and_whitespace_both_split() {
        let tokens = interest_tokens("a,b c,  d");
        assert_eq!(tokens.len(), 4);
    }
}
