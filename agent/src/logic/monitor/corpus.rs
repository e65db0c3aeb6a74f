//! Synthetic load corpus
//!
//! Column 0 mixes a "normal" cluster N(20, 5) and an "idle" cluster N(2, 2)
//! in equal halves; columns 1-3 are drawn from N(30, 5).

use ndarray::Array2;
use rand::Rng;

/// Rows in the training corpus
pub const CORPUS_ROWS: usize = 50_000;

/// Features per row
pub const FEATURE_COUNT: usize = 4;

const NORMAL_MEAN: f64 = 20.0;
const NORMAL_STD: f64 = 5.0;
const IDLE_MEAN: f64 = 2.0;
const IDLE_STD: f64 = 2.0;
const AUX_MEAN: f64 = 30.0;
const AUX_STD: f64 = 5.0;

pub fn synthetic_load_corpus<R: Rng>(rng: &mut R, rows: usize) -> Array2<f64> {
    let half = rows / 2;
    Array2::from_shape_fn((rows, FEATURE_COUNT), |(row, col)| match col {
        0 if row < half => gaussian(rng, NORMAL_MEAN, NORMAL_STD),
        0 => gaussian(rng, IDLE_MEAN, IDLE_STD),
        _ => gaussian(rng, AUX_MEAN, AUX_STD),
    })
}

/// Box-Muller draw from N(mean, std)
fn gaussian<R: Rng>(rng: &mut R, mean: f64, std: f64) -> f64 {
    // 1 - u keeps the log argument in (0, 1]
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std * z
}
