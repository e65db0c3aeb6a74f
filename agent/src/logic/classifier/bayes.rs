//! Multinomial naive Bayes over sparse term counts

use std::collections::{BTreeMap, HashMap, HashSet};

/// Laplace smoothing
const ALPHA: f64 = 1.0;

#[derive(Debug, Clone, Default)]
struct ClassStats {
    docs: usize,
    term_counts: HashMap<String, u32>,
    total_terms: u64,
}

#[derive(Debug, Clone)]
pub struct MultinomialNb {
    classes: [ClassStats; 2],
    vocabulary: HashSet<String>,
    total_docs: usize,
}

impl MultinomialNb {
    /// Fit on `(term_counts, is_positive)` pairs
    pub fn fit<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (BTreeMap<String, u32>, bool)>,
    {
        let mut classes: [ClassStats; 2] = Default::default();
        let mut vocabulary = HashSet::new();
        let mut total_docs = 0;

        for (terms, positive) in samples {
            let stats = &mut classes[positive as usize];
            stats.docs += 1;
            total_docs += 1;
            for (term, count) in terms {
                stats.total_terms += count as u64;
                *stats.term_counts.entry(term.clone()).or_insert(0) += count;
                vocabulary.insert(term);
            }
        }

        Self { classes, vocabulary, total_docs }
    }

    /// Joint log-likelihood of (negative, positive). Unknown terms are ignored.
    pub fn log_likelihoods(&self, terms: &BTreeMap<String, u32>) -> (f64, f64) {
        let vocab = self.vocabulary.len() as f64;
        let score = |stats: &ClassStats| -> f64 {
            if stats.docs == 0 {
                return f64::NEG_INFINITY;
            }
            let prior = (stats.docs as f64 / self.total_docs as f64).ln();
            let denom = stats.total_terms as f64 + ALPHA * vocab;
            terms
                .iter()
                .filter(|(term, _)| self.vocabulary.contains(*term))
                .fold(prior, |acc, (term, &count)| {
                    let seen = stats.term_counts.get(term).copied().unwrap_or(0) as f64;
                    acc + count as f64 * ((seen + ALPHA) / denom).ln()
                })
        };
        (score(&self.classes[0]), score(&self.classes[1]))
    }

    /// Positive only when strictly more likely than negative
    pub fn predict(&self, terms: &BTreeMap<String, u32>) -> bool {
        let (negative, positive) = self.log_likelihoods(terms);
        positive > negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(words: &[&str]) -> BTreeMap<String, u32> {
        let mut m = BTreeMap::new();
        for w in words {
            *m.entry(w.to_string()).or_insert(0) += 1;
        }
        m
    }

    #[test]
    fn test_separates_classes() {
        let model = MultinomialNb::fit(vec![
            (doc(&["key", "secret"]), true),
            (doc(&["cat", "video"]), false),
        ]);

        assert!(model.predict(&doc(&["secret"])));
        assert!(!model.predict(&doc(&["video", "cat"])));
    }

    #[test]
    fn test_unknown_terms_fall_to_negative() {
        let model = MultinomialNb::fit(vec![
            (doc(&["key"]), true),
            (doc(&["cat"]), false),
        ]);

        let (neg, pos) = model.log_likelihoods(&doc(&["zebra"]));
        assert_eq!(neg, pos);
        assert!(!model.predict(&doc(&["zebra"])));
    }
}
