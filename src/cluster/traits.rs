use crate::data::Observation;
use crate::error::Result;

/// Common interface for hard clustering algorithms (one label per observation).
pub trait Clustering {
    /// Fit the model and return one cluster label per input observation.
    fn fit_predict(&self, data: &[Observation]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    ///
    /// The fitted model may end up with fewer (eliminated empty clusters,
    /// duplicate starting observations).
    fn n_clusters(&self) -> usize;
}
