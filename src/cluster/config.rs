//! Training options accepted by [`KMeans`](super::KMeans).

use super::empty::EmptyPolicy;
use super::init::InitMethod;
use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options for one `fit` call. The metric is configured separately since it
/// is a type parameter of [`KMeans`](super::KMeans).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KMeansConfig {
    /// Starting-centroid strategy.
    pub init_method: InitMethod,
    /// Explicit starting indices. When set, they are used regardless of
    /// `init_method`.
    pub centroid_indices: Option<Vec<usize>>,
    /// Seed for every random draw; `None` seeds from the thread RNG.
    pub random_seed: Option<u64>,
    /// Refinement iteration cap per attempt.
    pub max_iterations: usize,
    /// Number of independent attempts; the lowest-SSE one wins.
    pub restarts: usize,
    /// Empty-cluster policy.
    pub on_empty: EmptyPolicy,
    /// Keep a snapshot per iteration of the winning attempt.
    pub track_history: bool,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            init_method: InitMethod::Random,
            centroid_indices: None,
            random_seed: None,
            max_iterations: usize::MAX,
            restarts: 1,
            on_empty: EmptyPolicy::Eliminate,
            track_history: false,
        }
    }
}

impl KMeansConfig {
    /// The strategy actually used: supplying indices implies [`InitMethod::Indices`].
    pub fn effective_init(&self) -> InitMethod {
        if self.centroid_indices.is_some() {
            InitMethod::Indices
        } else {
            self.init_method
        }
    }

    /// Check every option against `k` clusters over `n` observations.
    pub fn validate(&self, k: usize, n: usize) -> Result<()> {
        if k == 0 {
            return Err(Error::invalid("k", "must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(Error::invalid("max_iterations", "must be at least 1"));
        }
        if self.restarts == 0 {
            return Err(Error::invalid("restarts", "must be at least 1"));
        }

        match &self.centroid_indices {
            Some(indices) => {
                if indices.len() != k {
                    return Err(Error::invalid(
                        "centroid_indices",
                        "length of centroid indices differs from the specified number of clusters",
                    ));
                }
                if let Some(bad) = indices.iter().find(|&&i| i >= n) {
                    return Err(Error::invalid(
                        "centroid_indices",
                        format!("invalid centroid index {bad}"),
                    ));
                }
            }
            None if self.init_method == InitMethod::Indices => {
                return Err(Error::invalid(
                    "centroid_indices",
                    "required by the indices init method",
                ));
            }
            None => {}
        }

        if k > n {
            return Err(Error::invalid(
                "k",
                format!("cannot create {k} clusters from {n} observations"),
            ));
        }
        Ok(())
    }
}
