//! Anomaly Monitor
//!
//! Isolation-forest outlier check over load samples. The model is fit once
//! at startup on a seeded synthetic corpus and never retrained, so a given
//! sample always gets the same verdict within a process.
//!
//! The verdict is advisory: the attack state machine keys off the
//! controller's command unless the agent is configured otherwise.

pub mod corpus;
pub mod forest;
pub mod sampler;

use rand::{rngs::StdRng, SeedableRng};

pub use forest::{ForestParams, IsolationForest};
pub use sampler::{LoadSample, LoadSampler};

/// Below this CPU percentage a sample is never anomalous
pub const LOW_LOAD_CUTOFF: f64 = 50.0;

/// Auxiliary feature values appended to every probe
const PROBE_AUX: [f64; 2] = [30.0, 300.0];

const TRAINING_SEED: u64 = 0x414d_414e_51;

pub struct AnomalyMonitor {
    forest: IsolationForest,
}

impl AnomalyMonitor {
    /// Fit the default model (100 trees, 5% contamination, 50k rows)
    pub fn train() -> Self {
        Self::train_with(ForestParams::default(), corpus::CORPUS_ROWS)
    }

    pub fn train_with(params: ForestParams, rows: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(TRAINING_SEED);
        let data = corpus::synthetic_load_corpus(&mut rng, rows);
        let forest = IsolationForest::fit(&data, params, &mut rng);
        log::info!(
            "Anomaly model trained: {} rows, {} trees, threshold {:.4}",
            rows, params.n_estimators, forest.threshold()
        );
        Self { forest }
    }

    /// Whether the current sample is an outlier
    pub fn check(&self, cpu: f64, ram: f64) -> bool {
        if cpu < LOW_LOAD_CUTOFF {
            return false;
        }
        self.forest.is_outlier(&probe(cpu, ram))
    }
}

fn probe(cpu: f64, ram: f64) -> [f64; 4] {
    [cpu, ram, PROBE_AUX[0], PROBE_AUX[1]]
}
