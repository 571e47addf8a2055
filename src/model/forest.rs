//! Random forest regressor.
//!
//! CART regression trees grown on bootstrap samples; each split minimises the
//! summed squared error of the children. Prediction is the mean of the trees.

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::ModelError;

/// Forest hyper-parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees
    pub n_trees: usize,
    /// Depth limit per tree (`None` grows until leaves are pure)
    pub max_depth: Option<usize>,
    /// Minimum samples in each leaf
    pub min_samples_leaf: usize,
    /// Features considered per split (`None` uses all of them)
    pub max_features: Option<usize>,
    /// Draw a bootstrap sample per tree
    pub bootstrap: bool,
    /// RNG seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    fn predict(&self, sample: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if sample[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

/// Training view over a row-major matrix
struct Data<'a> {
    x: &'a [f64],
    n_features: usize,
    y: &'a [f64],
}

impl Data<'_> {
    fn value(&self, row: usize, feature: usize) -> f64 {
        self.x[row * self.n_features + feature]
    }
}

struct Grower<'a, 'b> {
    data: &'b Data<'a>,
    config: &'b ForestConfig,
    rng: &'b mut StdRng,
    nodes: Vec<Node>,
}

impl Grower<'_, '_> {
    fn grow(&mut self, indices: Vec<usize>, depth: usize) -> usize {
        let leaf_value = mean(self.data.y, &indices);
        let depth_reached = self.config.max_depth.is_some_and(|max| depth >= max);
        let too_small = indices.len() < 2 * self.config.min_samples_leaf.max(1);

        let first = self.data.y[indices[0]];
        let pure = indices.iter().all(|&i| self.data.y[i] == first);

        if depth_reached || too_small || pure {
            return self.leaf(leaf_value);
        }

        let candidates = self.candidate_features();
        let Some((feature, threshold)) = self.best_split(&indices, &candidates) else {
            return self.leaf(leaf_value);
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| self.data.value(i, feature) <= threshold);

        let node = self.nodes.len();
        self.nodes.push(Node::Leaf { value: leaf_value });
        let left = self.grow(left, depth + 1);
        let right = self.grow(right, depth + 1);
        self.nodes[node] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        node
    }

    fn leaf(&mut self, value: f64) -> usize {
        self.nodes.push(Node::Leaf { value });
        self.nodes.len() - 1
    }

    fn candidate_features(&mut self) -> Vec<usize> {
        let n = self.data.n_features;
        match self.config.max_features {
            Some(k) if k > 0 && k < n => {
                let mut chosen = sample(&mut *self.rng, n, k).into_vec();
                chosen.sort_unstable();
                chosen
            }
            _ => (0..n).collect(),
        }
    }

    /// Best (feature, threshold) by squared-error reduction
    fn best_split(&self, indices: &[usize], candidates: &[usize]) -> Option<(usize, f64)> {
        let n = indices.len();
        let min_leaf = self.config.min_samples_leaf.max(1);
        let total_sum: f64 = indices.iter().map(|&i| self.data.y[i]).sum();
        let total_sq: f64 = indices.iter().map(|&i| self.data.y[i] * self.data.y[i]).sum();
        let parent_sse = total_sq - total_sum * total_sum / n as f64;

        let mut best: Option<(usize, f64)> = None;
        let mut best_gain = 1e-12 * parent_sse.abs().max(1.0);

        let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(n);
        for &feature in candidates {
            pairs.clear();
            pairs.extend(indices.iter().map(|&i| (self.data.value(i, feature), self.data.y[i])));
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            for i in 0..n - 1 {
                left_sum += pairs[i].1;
                left_sq += pairs[i].1 * pairs[i].1;
                let left_n = i + 1;
                let right_n = n - left_n;

                if pairs[i].0 == pairs[i + 1].0 || left_n < min_leaf || right_n < min_leaf {
                    continue;
                }

                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;
                let sse = (left_sq - left_sum * left_sum / left_n as f64)
                    + (right_sq - right_sum * right_sum / right_n as f64);
                let gain = parent_sse - sse;

                if gain > best_gain {
                    best_gain = gain;
                    best = Some((feature, (pairs[i].0 + pairs[i + 1].0) / 2.0));
                }
            }
        }
        best
    }
}

fn mean(values: &[f64], indices: &[usize]) -> f64 {
    indices.iter().map(|&i| values[i]).sum::<f64>() / indices.len() as f64
}

/// Bagged ensemble of regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    /// Fit on a row-major `n_samples x n_features` matrix
    pub fn fit(x: &[f64], n_features: usize, y: &[f64], config: &ForestConfig) -> Result<Self, ModelError> {
        if n_features == 0 {
            return Err(ModelError::InvalidInput("no feature columns".to_string()));
        }
        if x.len() % n_features != 0 {
            return Err(ModelError::InvalidInput(format!(
                "matrix length {} is not a multiple of {} features",
                x.len(),
                n_features
            )));
        }
        let n_samples = x.len() / n_features;
        if n_samples == 0 {
            return Err(ModelError::InvalidInput("no training samples".to_string()));
        }
        if y.len() != n_samples {
            return Err(ModelError::InvalidInput(format!(
                "{} targets for {} samples",
                y.len(),
                n_samples
            )));
        }
        if config.n_trees == 0 {
            return Err(ModelError::InvalidInput("n_trees must be at least 1".to_string()));
        }
        if let Some(bad) = x.iter().chain(y).find(|v| !v.is_finite()) {
            return Err(ModelError::InvalidInput(format!("non-finite value {bad} in training data")));
        }

        let data = Data { x, n_features, y };
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);

        for _ in 0..config.n_trees {
            let indices: Vec<usize> = if config.bootstrap {
                (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
            } else {
                (0..n_samples).collect()
            };
            let mut grower = Grower {
                data: &data,
                config,
                rng: &mut rng,
                nodes: Vec::new(),
            };
            grower.grow(indices, 0);
            trees.push(RegressionTree { nodes: grower.nodes });
        }

        log::debug!(
            "Fitted {} trees on {} samples x {} features",
            trees.len(),
            n_samples,
            n_features
        );
        Ok(Self { n_features, trees })
    }

    /// Input width the forest was trained on
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Predict one sample
    pub fn predict_one(&self, sample: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict(sample)).sum();
        total / self.trees.len() as f64
    }

    /// Predict every row of a row-major matrix
    pub fn predict(&self, x: &[f64]) -> Result<Vec<f64>, ModelError> {
        if x.len() % self.n_features != 0 {
            return Err(ModelError::InvalidInput(format!(
                "matrix length {} is not a multiple of {} features",
                x.len(),
                self.n_features
            )));
        }
        Ok(x.chunks_exact(self.n_features).map(|row| self.predict_one(row)).collect())
    }

    /// Check that every split refers to a valid feature and node
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.trees.is_empty()
            && self.trees.iter().all(|tree| {
                !tree.nodes.is_empty()
                    && tree.nodes.iter().all(|node| match node {
                        Node::Split {
                            feature, left, right, ..
                        } => *feature < self.n_features && *left < tree.nodes.len() && *right < tree.nodes.len(),
                        Node::Leaf { .. } => true,
                    })
            })
    }
}
