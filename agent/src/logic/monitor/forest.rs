//! Isolation Forest
//!
//! Unsupervised outlier ensemble. Each tree isolates points with random
//! axis-aligned splits; outliers end up on short paths. The decision
//! threshold is the training score quantile implied by `contamination`.

use ndarray::{Array2, ArrayView1};
use rand::seq::SliceRandom;
use rand::Rng;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

#[derive(Debug, Clone, Copy)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_samples: usize,
    /// Expected share of outliers in the training data
    pub contamination: f64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_samples: 256,
            contamination: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf { size: usize },
    Split { feature: usize, threshold: f64, left: usize, right: usize },
}

/// Arena-allocated tree, root at index 0
#[derive(Debug, Clone)]
struct IsolationTree {
    nodes: Vec<Node>,
}

impl IsolationTree {
    fn fit<R: Rng>(data: &Array2<f64>, rows: Vec<usize>, max_depth: usize, rng: &mut R) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(data, rows, 0, max_depth, rng);
        tree
    }

    fn grow<R: Rng>(
        &mut self,
        data: &Array2<f64>,
        rows: Vec<usize>,
        depth: usize,
        max_depth: usize,
        rng: &mut R,
    ) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node::Leaf { size: rows.len() });

        if depth >= max_depth || rows.len() <= 1 {
            return index;
        }

        let mut features: Vec<usize> = (0..data.ncols()).collect();
        features.shuffle(rng);

        // First feature (in random order) that still varies over these rows
        let split = features.into_iter().find_map(|feature| {
            let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                let v = data[[r, feature]];
                (lo.min(v), hi.max(v))
            });
            (lo < hi).then_some((feature, lo, hi))
        });

        let Some((feature, lo, hi)) = split else {
            return index;
        };

        let threshold = rng.gen_range(lo..hi);
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
            rows.into_iter().partition(|&r| data[[r, feature]] < threshold);

        let left = self.grow(data, left_rows, depth + 1, max_depth, rng);
        let right = self.grow(data, right_rows, depth + 1, max_depth, rng);
        self.nodes[index] = Node::Split { feature, threshold, left, right };
        index
    }

    fn path_length(&self, sample: &[f64]) -> f64 {
        let mut index = 0;
        let mut depth = 0.0;
        loop {
            match self.nodes[index] {
                Node::Leaf { size } => return depth + average_path_length(size),
                Node::Split { feature, threshold, left, right } => {
                    index = if sample[feature] < threshold { left } else { right };
                    depth += 1.0;
                }
            }
        }
    }
}

/// Average unsuccessful-search path length in a BST of `n` nodes
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    sample_size: usize,
    threshold: f64,
}

impl IsolationForest {
    /// Fit on `data` (rows = samples). An empty corpus yields a forest that
    /// never flags anything.
    pub fn fit<R: Rng>(data: &Array2<f64>, params: ForestParams, rng: &mut R) -> Self {
        let n = data.nrows();
        let sample_size = params.max_samples.min(n).max(1);
        let max_depth = (sample_size as f64).log2().ceil() as usize;

        let trees = (0..params.n_estimators)
            .map(|_| {
                let rows = rand::seq::index::sample(rng, n.max(1), sample_size.min(n)).into_vec();
                IsolationTree::fit(data, rows, max_depth, rng)
            })
            .collect();

        let mut forest = Self {
            trees,
            sample_size,
            threshold: f64::INFINITY,
        };

        if n > 0 {
            let mut scores: Vec<f64> = data.rows().into_iter().map(|row| forest.score_row(row)).collect();
            forest.threshold = quantile(&mut scores, 1.0 - params.contamination);
        }

        forest
    }

    /// Anomaly score in (0, 1]; higher is more anomalous
    pub fn score(&self, sample: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let mean_path = self.trees.iter().map(|t| t.path_length(sample)).sum::<f64>()
            / self.trees.len() as f64;
        let norm = average_path_length(self.sample_size).max(f64::EPSILON);
        2f64.powf(-mean_path / norm)
    }

    pub fn is_outlier(&self, sample: &[f64]) -> bool {
        self.score(sample) > self.threshold
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn score_row(&self, row: ArrayView1<f64>) -> f64 {
        let sample: Vec<f64> = row.to_vec();
        self.score(&sample)
    }
}

/// Linear-interpolated quantile, `q` in [0, 1]
fn quantile(values: &mut [f64], q: f64) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let pos = q.clamp(0.0, 1.0) * (values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    values[lo] + (values[hi] - values[lo]) * frac
}
