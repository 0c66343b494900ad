//! Error types for k-means configuration.

use thiserror::Error;

/// What is wrong with a configuration, given the dataset it is applied to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Clustering an empty dataset is undefined.
    #[error("dataset is empty")]
    EmptyDataset,

    /// Number of clusters must be in [1, nb_point].
    #[error("number of clusters must be in [1, {nb_point}], got {nb_cluster}")]
    NbCluster { nb_cluster: usize, nb_point: usize },

    #[error("max_iter must be >= 1")]
    MaxIter,

    /// Tolerance must be a non negative number.
    #[error("tolerance must be >= 0, got {0}")]
    Tolerance(f64),

    #[error("nb_init must be >= 1")]
    NbInit,

    /// Initial centroids given by caller do not match the number of clusters.
    #[error("expected {expected} initial centroids, got {got}")]
    NbCentroids { expected: usize, got: usize },
}

/// Errors returned by the clusterer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KMeansError {
    /// Configuration does not fit the dataset. Not retryable, the caller must fix it.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
