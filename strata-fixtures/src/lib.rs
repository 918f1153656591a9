//! Deterministic fixtures for strata tests and benchmarks.
//!
//! Provides seeded linear structural equation models for estimator tests and
//! canonical precedence matrices (chains, cycles, random DAGs) for the
//! resolver.

use nalgebra::DMatrix;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;
use strata_core::PrecedenceMatrix;

/// Linear SEM with Gaussian noise: `x_e = sum_c w_ce * x_c + s_e * z_e`.
#[derive(Debug, Clone)]
pub struct LinearSem {
    order: Vec<usize>,
    edges: Vec<(usize, usize, f64)>,
    noise_std: Vec<f64>,
}

impl LinearSem {
    /// `n` independent standard-normal variables, generated in index order.
    pub fn new(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
            edges: Vec::new(),
            noise_std: vec![1.0; n],
        }
    }

    /// Generate variables in `order` instead of index order.
    ///
    /// # Panics
    /// Panics if `order` is not a permutation of `0..n`.
    pub fn with_order(mut self, order: Vec<usize>) -> Self {
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(
            sorted,
            (0..self.dim()).collect::<Vec<_>>(),
            "generation order must be a permutation of 0..{}",
            self.dim()
        );
        self.order = order;
        self
    }

    /// Add `cause -> effect` with coefficient `weight`.
    pub fn edge(mut self, cause: usize, effect: usize, weight: f64) -> Self {
        self.edges.push((cause, effect, weight));
        self
    }

    /// Set the noise standard deviation of `node`.
    pub fn noise(mut self, node: usize, std: f64) -> Self {
        self.noise_std[node] = std;
        self
    }

    pub fn dim(&self) -> usize {
        self.noise_std.len()
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// True coefficients laid out as `[effect, cause]`.
    pub fn weights(&self) -> DMatrix<f64> {
        let n = self.dim();
        let mut w = DMatrix::zeros(n, n);
        for &(cause, effect, weight) in &self.edges {
            w[(effect, cause)] += weight;
        }
        w
    }

    /// Binary precedence matrix of the direct edges.
    pub fn precedence(&self) -> PrecedenceMatrix {
        let pairs: Vec<(usize, usize)> = self.edges.iter().map(|&(c, e, _)| (c, e)).collect();
        PrecedenceMatrix::from_edges(self.dim(), &pairs)
            .unwrap_or_else(|e| panic!("invalid SEM edge: {e}"))
    }

    /// Draw `n_samples` rows with a seeded RNG.
    ///
    /// # Panics
    /// Panics if an edge points backwards in the generation order.
    pub fn sample(&self, n_samples: usize, seed: u64) -> DMatrix<f64> {
        let n = self.dim();
        let mut position = vec![0; n];
        for (pos, &node) in self.order.iter().enumerate() {
            position[node] = pos;
        }
        for &(cause, effect, _) in &self.edges {
            assert!(
                position[cause] < position[effect],
                "edge {cause} -> {effect} violates the generation order"
            );
        }

        let weights = self.weights();
        let normal = Normal::new(0.0, 1.0).unwrap_or_else(|e| panic!("standard normal: {e}"));
        let mut rng = StdRng::seed_from_u64(seed);
        let mut data = DMatrix::zeros(n_samples, n);
        for row in 0..n_samples {
            for &node in &self.order {
                let signal: f64 = (0..n)
                    .filter(|&cause| weights[(node, cause)] != 0.0)
                    .map(|cause| weights[(node, cause)] * data[(row, cause)])
                    .sum();
                data[(row, node)] = signal + self.noise_std[node] * normal.sample(&mut rng);
            }
        }
        data
    }
}

/// `0 -> 1 -> ... -> n-1`.
pub fn chain(n: usize) -> PrecedenceMatrix {
    let edges: Vec<(usize, usize)> = (1..n).map(|i| (i - 1, i)).collect();
    PrecedenceMatrix::from_edges(n, &edges).unwrap_or_else(|e| panic!("chain fixture: {e}"))
}

/// A single directed cycle through `members` on an `n`-node matrix.
pub fn cycle(n: usize, members: &[usize]) -> PrecedenceMatrix {
    let edges: Vec<(usize, usize)> = members
        .iter()
        .enumerate()
        .map(|(i, &node)| (node, members[(i + 1) % members.len()]))
        .collect();
    PrecedenceMatrix::from_edges(n, &edges).unwrap_or_else(|e| panic!("cycle fixture: {e}"))
}

/// Random DAG: shuffle the nodes, then keep each forward pair with
/// probability `density`.
pub fn random_dag(n: usize, density: f64, seed: u64) -> PrecedenceMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(&mut rng);

    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(density) {
                edges.push((perm[i], perm[j]));
            }
        }
    }
    PrecedenceMatrix::from_edges(n, &edges).unwrap_or_else(|e| panic!("random DAG fixture: {e}"))
}

/// The three-variable chain `x1 = 2 x0 + e`, `x2 = -x1 + e`.
pub fn three_node_chain_sem() -> LinearSem {
    LinearSem::new(3).edge(0, 1, 2.0).edge(1, 2, -1.0)
}
