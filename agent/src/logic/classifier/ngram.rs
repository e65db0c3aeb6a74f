//! Character n-gram extraction
//!
//! Counts are kept in a `BTreeMap` so downstream floating-point sums run in
//! a fixed order.

use std::collections::BTreeMap;

/// Inclusive n-gram length range
pub const NGRAM_RANGE: (usize, usize) = (2, 5);

/// Count lower-cased character n-grams of `text`
pub fn char_ngrams(text: &str) -> BTreeMap<String, u32> {
    let chars: Vec<char> = text.to_lowercase().chars().collect();
    let (min_n, max_n) = NGRAM_RANGE;
    let mut counts = BTreeMap::new();

    for n in min_n..=max_n {
        for window in chars.windows(n) {
            *counts.entry(window.iter().collect::<String>()).or_insert(0) += 1;
        }
    }

    counts
}
