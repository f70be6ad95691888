use thiserror::Error;

/// Errors returned by the clustering engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The data set has no observations.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value, detected before any training work starts.
    #[error("invalid argument {name}: {message}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: String,
    },

    /// Observations (or labels, or a query) have inconsistent width.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected width.
        expected: usize,
        /// Found width.
        found: usize,
    },

    /// A numeric value was paired with a non-numeric one at the same coordinate.
    #[error("type mismatch at coordinate {index}: cannot compare numeric and non-numeric values")]
    TypeMismatch {
        /// Coordinate position.
        index: usize,
    },

    /// A cluster lost all of its members under the `terminate` policy.
    #[error("cluster {cluster} became empty at iteration {iteration}")]
    EmptyCluster {
        /// Index of the empty cluster.
        cluster: usize,
        /// 1-based iteration at which it happened.
        iteration: usize,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            message: message.into(),
        }
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
