//! K-means clustering for tabular observations.
//!
//! ## The engine
//!
//! Assign each observation to the nearest centroid, then move each centroid
//! to the mean of its members. Repeat until no observation changes cluster.
//!
//! **Objective**: minimize the sum of squared errors:
//!
//! ```text
//! SSE = Σ_k Σ_{x ∈ C_k} d(x, μ_k)
//! ```
//!
//! where `d` is the metric, squared Euclidean by default.
//!
//! Every moving part is configurable:
//!
//! | Axis | Options |
//! |------|---------|
//! | Metric | [`SquaredEuclidean`] (default), [`Manhattan`], any `Fn(&[Value], &[Value]) -> f64` |
//! | Initialization | `random` (default), `indices`, `kmeans++` |
//! | Empty cluster | `eliminate` (default), `terminate`, `random`, `outlier` |
//! | Restarts | best of R independent attempts by SSE |
//!
//! ## Usage
//!
//! ```rust
//! use lloyd::cluster::{EmptyPolicy, KMeans};
//! use lloyd::DataSet;
//!
//! let data = DataSet::from_numeric(&[
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ])
//! .unwrap();
//!
//! let model = KMeans::new(2)
//!     .with_centroid_indices([0, 2])
//!     .with_on_empty(EmptyPolicy::Outlier)
//!     .fit(&data)
//!     .unwrap();
//!
//! let labels = model.labels();
//! assert_eq!(labels[0], labels[1]);  // First two together
//! assert_ne!(labels[0], labels[2]);  // Separate from last two
//! assert_eq!(model.classify(&lloyd::numeric(&[9.0, 9.0])).unwrap(), labels[2]);
//! ```
//!
//! [`Value`]: crate::Value

mod config;
mod distance;
mod empty;
mod history;
mod init;
mod kmeans;
mod traits;
mod util;

pub use config::KMeansConfig;
pub use distance::{Distance, Manhattan, MaybeSync, SquaredEuclidean};
pub use empty::EmptyPolicy;
pub use history::HistoryEntry;
pub use init::InitMethod;
pub use kmeans::{Cluster, KMeans, KMeansModel};
pub use traits::Clustering;
