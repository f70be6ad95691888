//! Starting-centroid selection.
//!
//! All strategies return *distinct* centroids: an observation equal to one
//! already chosen is skipped. When the data holds fewer than `k` distinct
//! observations the result is shorter than `k`.
//!
//! Equality compares whole observations, not positions under the metric. Two
//! rows that differ only in a coordinate the metric ignores (text, with the
//! default metric) are both kept as starts. They sit at the same point, so
//! every member ties to the lower index, the second cluster is empty on the
//! first pass and the empty-cluster policy takes over.
//!
//! ## K-means++
//!
//! 1. Choose the first centroid uniformly at random.
//! 2. Choose each next centroid with probability proportional to D(x), the
//!    metric distance to the nearest chosen centroid. With the default metric
//!    D(x) is already the squared Euclidean distance.

use super::distance::Distance;
use super::util::nearest;
use crate::data::Observation;
use crate::error::{Error, Result};
use rand::prelude::*;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the first set of centroids is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InitMethod {
    /// `k` observations drawn uniformly without replacement.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "random"))]
    Random,
    /// Caller-supplied observation indices (`centroid_indices`).
    #[cfg_attr(feature = "serde", serde(rename = "indices"))]
    Indices,
    /// Distance-weighted seeding.
    #[cfg_attr(feature = "serde", serde(rename = "kmeans++", alias = "kmeans_plus_plus"))]
    KmeansPlusPlus,
}

impl InitMethod {
    /// Tag used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            InitMethod::Random => "random",
            InitMethod::Indices => "indices",
            InitMethod::KmeansPlusPlus => "kmeans++",
        }
    }
}

impl fmt::Display for InitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(InitMethod::Random),
            "indices" => Ok(InitMethod::Indices),
            "kmeans++" | "kmeans_plus_plus" => Ok(InitMethod::KmeansPlusPlus),
            other => Err(Error::invalid(
                "init_method",
                format!("invalid value for init_method: {other}"),
            )),
        }
    }
}

/// Pick up to `k` distinct starting centroids.
///
/// `indices` is only read by [`InitMethod::Indices`] and must already be
/// validated against `data.len()`.
pub(crate) fn initial_centroids<D: Distance + ?Sized>(
    method: InitMethod,
    dist: &D,
    data: &[Observation],
    k: usize,
    indices: &[usize],
    rng: &mut impl Rng,
) -> Result<Vec<Observation>> {
    let centroids = match method {
        InitMethod::Random => {
            let order = rand::seq::index::sample(rng, data.len(), data.len());
            pick_distinct(data, order.into_iter(), k)
        }
        InitMethod::Indices => pick_distinct(data, indices.iter().copied(), k),
        InitMethod::KmeansPlusPlus => kmeans_plus_plus(dist, data, k, rng)?,
    };

    if centroids.len() < k {
        tracing::warn!(
            requested = k,
            distinct = centroids.len(),
            "duplicate starting observations, fewer clusters than requested"
        );
    }
    Ok(centroids)
}

fn pick_distinct(data: &[Observation], order: impl Iterator<Item = usize>, k: usize) -> Vec<Observation> {
    let mut centroids: Vec<Observation> = Vec::with_capacity(k);
    for idx in order {
        if centroids.len() == k {
            break;
        }
        if !centroids.contains(&data[idx]) {
            centroids.push(data[idx].clone());
        }
    }
    centroids
}

fn kmeans_plus_plus<D: Distance + ?Sized>(
    dist: &D,
    data: &[Observation],
    k: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Observation>> {
    let n = data.len();
    let mut centroids: Vec<Observation> = Vec::with_capacity(k);
    let mut chosen = vec![false; n];

    let first = rng.random_range(0..n);
    centroids.push(data[first].clone());
    chosen[first] = true;

    while centroids.len() < k {
        let mut weights = Vec::with_capacity(n);
        for (j, point) in data.iter().enumerate() {
            if chosen[j] || centroids.contains(point) {
                weights.push(0.0);
            } else {
                weights.push(nearest(dist, point, &centroids)?.1);
            }
        }

        // Sample proportional to distance
        let total: f64 = weights.iter().sum();
        let selected = if total > 0.0 {
            let threshold = rng.random::<f64>() * total;
            let mut cumsum = 0.0;
            let mut selected = None;
            for (j, &w) in weights.iter().enumerate() {
                cumsum += w;
                if w > 0.0 && cumsum >= threshold {
                    selected = Some(j);
                    break;
                }
            }
            // Rounding can leave the threshold just above the final cumsum.
            selected.or_else(|| weights.iter().rposition(|&w| w > 0.0))
        } else {
            // Every unchosen point sits on a centroid under this metric; fall
            // back to any observation not yet used by value.
            (0..n).find(|&j| !chosen[j] && !centroids.contains(&data[j]))
        };

        let Some(selected) = selected else {
            break;
        };
        chosen[selected] = true;
        centroids.push(data[selected].clone());
    }

    Ok(centroids)
}
