//! K-means clustering over mixed-type observations.
//!
//! Partitions data into k clusters by minimizing the **sum of squared errors**
//! (SSE) between observations and their cluster centroid.
//!
//! # Lloyd's Algorithm
//!
//! 1. Initialize centroids (random, explicit indices, or k-means++)
//! 2. **Assign**: each observation → nearest centroid (ties → lowest index)
//! 3. **Recover**: apply the empty-cluster policy if a centroid lost all members
//! 4. **Update**: each centroid → mean of its members
//! 5. Repeat until no observation changes cluster, or the iteration cap
//!
//! # Restarts
//!
//! Lloyd only finds a local minimum, so the whole pipeline can be run several
//! times and the lowest-SSE attempt kept. Each attempt gets its own sub-seed,
//! drawn in order from the master seed before any attempt starts, so attempt
//! `i` is the same whatever the restart count. More restarts therefore never
//! raise the SSE for a fixed seed, and with the `parallel` feature the result
//! is identical to the sequential one.
//!
//! # Mixed attributes
//!
//! Centroids have the same shape as observations. Numeric coordinates are
//! averaged; non-numeric coordinates are copied from the cluster's first
//! member in data-set order. Whether non-numeric coordinates influence the
//! assignment is up to the metric; the default ignores them.

use super::config::KMeansConfig;
use super::distance::{Distance, MaybeSync, SquaredEuclidean};
use super::empty::{self, EmptyPolicy};
use super::history::{HistoryEntry, HistoryRecorder};
use super::init::{self, InitMethod};
use super::traits::Clustering;
use super::util;
use crate::data::{DataSet, Observation, Value};
use crate::error::{Error, Result};
use rand::prelude::*;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// K-means clusterer: cluster count, options and metric.
#[derive(Debug, Clone)]
pub struct KMeans<D = SquaredEuclidean> {
    k: usize,
    config: KMeansConfig,
    distance: D,
}

impl KMeans {
    /// Create a clusterer for `k` clusters with default options and metric.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            config: KMeansConfig::default(),
            distance: SquaredEuclidean,
        }
    }
}

impl<D: Distance> KMeans<D> {
    /// Replace every option at once.
    pub fn with_config(mut self, config: KMeansConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the metric.
    pub fn with_distance<D2: Distance>(self, distance: D2) -> KMeans<D2> {
        KMeans {
            k: self.k,
            config: self.config,
            distance,
        }
    }

    /// Set the starting-centroid strategy.
    pub fn with_init_method(mut self, method: InitMethod) -> Self {
        self.config.init_method = method;
        self
    }

    /// Start from these observation indices (implies [`InitMethod::Indices`]).
    pub fn with_centroid_indices(mut self, indices: impl Into<Vec<usize>>) -> Self {
        self.config.centroid_indices = Some(indices.into());
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = Some(seed);
        self
    }

    /// Set maximum iterations per attempt.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iterations = max_iter;
        self
    }

    /// Set the number of independent attempts.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.config.restarts = restarts;
        self
    }

    /// Set the empty-cluster policy.
    pub fn with_on_empty(mut self, policy: EmptyPolicy) -> Self {
        self.config.on_empty = policy;
        self
    }

    /// Record a snapshot per iteration.
    pub fn with_history(mut self, track: bool) -> Self {
        self.config.track_history = track;
        self
    }

    /// Requested number of clusters.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Current options.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Dissimilarity under the configured metric.
    pub fn distance(&self, a: &[Value], b: &[Value]) -> Result<f64> {
        self.distance.distance(a, b)
    }
}

impl<D: Distance + Clone + MaybeSync> KMeans<D> {
    /// Train on `data` and return the best model over all restarts.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] for an empty data set.
    /// - [`Error::InvalidArgument`] for a bad option, checked before any work.
    /// - [`Error::TypeMismatch`] if the metric cannot compare two rows.
    /// - [`Error::EmptyCluster`] under [`EmptyPolicy::Terminate`].
    #[tracing::instrument(level = "debug", skip_all, fields(k = self.k, n = data.len()))]
    pub fn fit(&self, data: &DataSet) -> Result<KMeansModel<D>> {
        let mut model = self.train(data.items())?;
        model.data_labels = data.labels().map(<[String]>::to_vec);
        Ok(model)
    }

    fn train(&self, data: &[Observation]) -> Result<KMeansModel<D>> {
        let Some(first) = data.first() else {
            return Err(Error::EmptyInput);
        };
        let width = first.len();
        if let Some(bad) = data.iter().find(|row| row.len() != width) {
            return Err(Error::DimensionMismatch {
                expected: width,
                found: bad.len(),
            });
        }
        self.config.validate(self.k, data.len())?;

        let base = self
            .config
            .random_seed
            .unwrap_or_else(|| rand::rng().random());
        let seeds = restart_seeds(base, self.config.restarts);

        #[cfg(feature = "parallel")]
        let attempts = seeds
            .par_iter()
            .map(|&seed| self.attempt(data, seed))
            .collect::<Vec<_>>()
            .into_iter();

        #[cfg(not(feature = "parallel"))]
        let attempts = seeds.iter().map(|&seed| self.attempt(data, seed));

        // First attempt wins ties.
        let mut best: Option<Attempt> = None;
        for (restart, attempt) in attempts.enumerate() {
            let attempt = attempt?;
            debug!(restart, sse = attempt.sse, iterations = attempt.iterations, "attempt finished");
            if best.as_ref().map_or(true, |b| attempt.sse < b.sse) {
                best = Some(attempt);
            }
        }
        let best = best.ok_or_else(|| Error::invalid("restarts", "must be at least 1"))?;

        info!(
            sse = best.sse,
            iterations = best.iterations,
            clusters = best.centroids.len(),
            "k-means finished"
        );

        let mut clusters = vec![Cluster::default(); best.centroids.len()];
        for (i, &c) in best.labels.iter().enumerate() {
            clusters[c].indices.push(i);
        }

        Ok(KMeansModel {
            centroids: best.centroids,
            clusters,
            labels: best.labels,
            iterations: best.iterations,
            sse: best.sse,
            on_empty: self.config.on_empty,
            history: best.history,
            data_labels: None,
            distance: self.distance.clone(),
        })
    }

    /// One init → converge run with its own random stream.
    fn attempt(&self, data: &[Observation], seed: u64) -> Result<Attempt> {
        let mut rng = StdRng::seed_from_u64(seed);
        let indices = self.config.centroid_indices.as_deref().unwrap_or(&[]);
        let mut centroids = init::initial_centroids(
            self.config.effective_init(),
            &self.distance,
            data,
            self.k,
            indices,
            &mut rng,
        )?;

        let mut history = HistoryRecorder::new(self.config.track_history);
        let mut previous: Option<Vec<usize>> = None;
        let mut iterations = 0;

        let labels = loop {
            iterations += 1;

            let labels = util::assign(&self.distance, data, &centroids)?;
            let labels = empty::resolve(
                self.config.on_empty,
                &self.distance,
                data,
                &mut centroids,
                labels,
                iterations,
                &mut rng,
            )?;
            util::update(data, &labels, &mut centroids)?;
            history.record(&labels, &centroids);

            let changed = previous.as_ref().map_or(data.len(), |prev| {
                prev.iter().zip(&labels).filter(|(a, b)| a != b).count()
            });
            debug!(iteration = iterations, clusters = centroids.len(), changed, "iteration");

            if changed == 0 || iterations >= self.config.max_iterations {
                break labels;
            }
            previous = Some(labels);
        };

        let sse = util::sse(&self.distance, data, &labels, &centroids)?;
        Ok(Attempt {
            centroids,
            labels,
            iterations,
            sse,
            history: history.finish(),
        })
    }
}

impl<D: Distance + Clone + MaybeSync> Clustering for KMeans<D> {
    fn fit_predict(&self, data: &[Observation]) -> Result<Vec<usize>> {
        Ok(self.train(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// One sub-seed per restart, drawn in order from the master seed.
fn restart_seeds(base: u64, restarts: usize) -> Vec<u64> {
    let mut master = StdRng::seed_from_u64(base);
    (0..restarts).map(|_| master.random()).collect()
}

struct Attempt {
    centroids: Vec<Observation>,
    labels: Vec<usize>,
    iterations: usize,
    sse: f64,
    history: Option<Vec<HistoryEntry>>,
}

/// Members of one cluster, as indices into the training data set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cluster {
    indices: Vec<usize>,
}

impl Cluster {
    /// Member indices, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Member observations, looked up in `data`.
    ///
    /// Pass the data set the model was trained on. Indices past the end of a
    /// shorter data set are skipped.
    pub fn items<'a>(&'a self, data: &'a DataSet) -> impl Iterator<Item = &'a Observation> + 'a {
        self.indices.iter().filter_map(move |&i| data.items().get(i))
    }
}

/// A trained k-means model: the winning attempt of a `fit` call.
#[derive(Debug, Clone)]
pub struct KMeansModel<D = SquaredEuclidean> {
    centroids: Vec<Observation>,
    clusters: Vec<Cluster>,
    labels: Vec<usize>,
    iterations: usize,
    sse: f64,
    on_empty: EmptyPolicy,
    history: Option<Vec<HistoryEntry>>,
    data_labels: Option<Vec<String>>,
    distance: D,
}

impl<D: Distance> KMeansModel<D> {
    /// Index of the nearest trained centroid. Does not change the model.
    pub fn classify(&self, observation: &[Value]) -> Result<usize> {
        let width = self.centroids.first().map_or(0, Vec::len);
        if observation.len() != width {
            return Err(Error::DimensionMismatch {
                expected: width,
                found: observation.len(),
            });
        }
        util::nearest(&self.distance, observation, &self.centroids).map(|(c, _)| c)
    }

    /// Dissimilarity under the metric the model was trained with.
    pub fn distance(&self, a: &[Value], b: &[Value]) -> Result<f64> {
        self.distance.distance(a, b)
    }

    /// Final centroids, one per cluster.
    pub fn centroids(&self) -> &[Observation] {
        &self.centroids
    }

    /// Final clusters, parallel to [`centroids`](Self::centroids).
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Cluster index per training observation.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of clusters after any elimination.
    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Refinement iterations of the winning attempt (1-based count).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Sum of squared errors of the winning attempt.
    pub fn sse(&self) -> f64 {
        self.sse
    }

    /// Empty-cluster policy used for training.
    pub fn on_empty(&self) -> EmptyPolicy {
        self.on_empty
    }

    /// Per-iteration snapshots, if tracking was requested.
    pub fn history(&self) -> Option<&[HistoryEntry]> {
        self.history.as_deref()
    }

    /// Column labels of the training data set, if it had any.
    pub fn data_labels(&self) -> Option<&[String]> {
        self.data_labels.as_deref()
    }
}
