//! File Classifier
//!
//! Labels a file CRITICAL or JUNK from its name alone. Naive Bayes over
//! character n-grams, trained once on a fixed corpus.

pub mod bayes;
pub mod ngram;

use serde::{Deserialize, Serialize};

use bayes::MultinomialNb;
use ngram::char_ngrams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Critical,
    Junk,
}

/// Key, credential, database and record-like names
pub const CRITICAL_EXAMPLES: &[&str] = &[
    "id_rsa",
    "master_key.pem",
    "database.sql",
    "patient_records.csv",
    "credentials.json",
    "wallet.dat",
    "customers.db",
    "payroll.xlsx",
];

/// Media, executable and archive-like names
pub const JUNK_EXAMPLES: &[&str] = &[
    "movie.mp4",
    "vacation.jpg",
    "game.exe",
    "funny_cats.mkv",
    "setup.msi",
    "old_photos.zip",
    "song.mp3",
    "cache.tmp",
];

pub struct FileClassifier {
    model: MultinomialNb,
}

impl FileClassifier {
    /// Train on the built-in corpus
    pub fn train() -> Self {
        Self::train_on(CRITICAL_EXAMPLES, JUNK_EXAMPLES)
    }

    pub fn train_on(critical: &[&str], junk: &[&str]) -> Self {
        let samples = critical
            .iter()
            .map(|name| (char_ngrams(name), true))
            .chain(junk.iter().map(|name| (char_ngrams(name), false)));

        let model = MultinomialNb::fit(samples);
        log::info!(
            "File classifier trained: {} critical / {} junk examples",
            critical.len(),
            junk.len()
        );
        Self { model }
    }

    pub fn classify(&self, filename: &str) -> Label {
        if self.model.predict(&char_ngrams(filename)) {
            Label::Critical
        } else {
            Label::Junk
        }
    }
}
