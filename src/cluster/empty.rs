//! What happens when an assignment pass leaves a centroid with no members.

use super::distance::Distance;
use super::util::{assign, counts};
use crate::data::Observation;
use crate::error::{Error, Result};
use rand::prelude::*;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Empty-cluster policy (`on_empty`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EmptyPolicy {
    /// Drop the centroid; the attempt continues with one cluster fewer.
    #[default]
    Eliminate,
    /// Fail the whole build with [`Error::EmptyCluster`].
    Terminate,
    /// Reseed the centroid to a uniformly random observation.
    Random,
    /// Reseed the centroid to the observation farthest from its own centroid.
    Outlier,
}

impl EmptyPolicy {
    /// Tag used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            EmptyPolicy::Eliminate => "eliminate",
            EmptyPolicy::Terminate => "terminate",
            EmptyPolicy::Random => "random",
            EmptyPolicy::Outlier => "outlier",
        }
    }
}

impl fmt::Display for EmptyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmptyPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eliminate" => Ok(EmptyPolicy::Eliminate),
            "terminate" => Ok(EmptyPolicy::Terminate),
            "random" => Ok(EmptyPolicy::Random),
            "outlier" => Ok(EmptyPolicy::Outlier),
            other => Err(Error::invalid(
                "on_empty",
                format!("invalid value for on_empty: {other}"),
            )),
        }
    }
}

/// Apply `policy` until no cluster is empty, returning the final labels.
///
/// `centroids` may shrink (eliminate, or reseeding ran out of candidates) or
/// have entries replaced (random, outlier). Reseeding never picks an
/// observation equal to a current centroid, and each observation is tried at
/// most once per call, so this always terminates.
pub(crate) fn resolve<D: Distance + ?Sized>(
    policy: EmptyPolicy,
    dist: &D,
    data: &[Observation],
    centroids: &mut Vec<Observation>,
    mut labels: Vec<usize>,
    iteration: usize,
    rng: &mut impl Rng,
) -> Result<Vec<usize>> {
    let mut tried = vec![false; data.len()];

    loop {
        let empty: Vec<usize> = counts(&labels, centroids.len())
            .iter()
            .enumerate()
            .filter(|&(_, &size)| size == 0)
            .map(|(c, _)| c)
            .collect();
        if empty.is_empty() {
            return Ok(labels);
        }

        tracing::warn!(iteration, clusters = ?empty, policy = %policy, "empty cluster");

        let candidates = match policy {
            EmptyPolicy::Terminate => {
                return Err(Error::EmptyCluster {
                    cluster: empty[0],
                    iteration,
                });
            }
            EmptyPolicy::Eliminate => {
                eliminate(centroids, &mut labels, &empty);
                return Ok(labels);
            }
            EmptyPolicy::Random => {
                let mut order: Vec<usize> = (0..data.len()).collect();
                order.shuffle(rng);
                order
            }
            EmptyPolicy::Outlier => farthest_first(dist, data, centroids, &labels)?,
        };

        let mut reseeded = false;
        let mut stranded = Vec::new();
        for &c in &empty {
            let pick = candidates
                .iter()
                .copied()
                .find(|&i| !tried[i] && !centroids.contains(&data[i]));
            match pick {
                Some(i) => {
                    tried[i] = true;
                    centroids[c] = data[i].clone();
                    reseeded = true;
                }
                None => stranded.push(c),
            }
        }

        eliminate(centroids, &mut labels, &stranded);
        if !reseeded {
            return Ok(labels);
        }
        labels = assign(dist, data, centroids)?;
    }
}

/// Observation indices ordered by distance to their own centroid, farthest
/// first. Equal distances keep data-set order.
fn farthest_first<D: Distance + ?Sized>(
    dist: &D,
    data: &[Observation],
    centroids: &[Observation],
    labels: &[usize],
) -> Result<Vec<usize>> {
    let mut scored = Vec::with_capacity(data.len());
    for (i, point) in data.iter().enumerate() {
        scored.push((i, dist.distance(point, &centroids[labels[i]])?));
    }
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(scored.into_iter().map(|(i, _)| i).collect())
}

/// Remove the (memberless) clusters in `drop` and renumber `labels`.
fn eliminate(centroids: &mut Vec<Observation>, labels: &mut [usize], drop: &[usize]) {
    if drop.is_empty() {
        return;
    }
    let mut remap = Vec::with_capacity(centroids.len());
    let mut next = 0;
    for c in 0..centroids.len() {
        remap.push(next);
        if !drop.contains(&c) {
            next += 1;
        }
    }
    let mut c = 0;
    centroids.retain(|_| {
        let keep = !drop.contains(&c);
        c += 1;
        keep
    });
    for l in labels.iter_mut() {
        *l = remap[*l];
    }
}
