//! K-means clustering for mixed-type tabular data.
//!
//! `lloyd` partitions observations (rows of numeric, categorical or missing
//! values) into k groups that minimize within-group dissimilarity.
//!
//! The primary public API is under [`cluster`], which provides:
//! - pluggable metrics (squared Euclidean by default)
//! - random, explicit-index and k-means++ seeding
//! - empty-cluster policies (eliminate, terminate, random, outlier)
//! - best-of-R restarts with deterministic per-restart seeding
//! - optional per-iteration history
//!
//! Training logs through `tracing`; install a subscriber to see it.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod data;
pub mod error;

pub use cluster::{
    Cluster, Clustering, Distance, EmptyPolicy, HistoryEntry, InitMethod, KMeans, KMeansConfig,
    KMeansModel, Manhattan, SquaredEuclidean,
};
pub use data::{numeric, DataSet, Observation, Value};
pub use error::{Error, Result};
