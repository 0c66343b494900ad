//! k-means clustering of planar points with Lloyd's algorithm.
//!
//! - point : the data (and centroid) type
//! - params : parameters of the clusterer, deserializable
//! - affect : affectation of points to clusters
//! - cost : inertia of a clustering
//! - lloyd : the clusterer
pub mod affect;
pub mod cost;
pub mod error;
pub mod lloyd;
pub mod params;
pub mod point;

pub use affect::{Affectation, Assignment, UNASSIGNED};
pub use cost::inertia;
pub use error::{ConfigError, KMeansError};
pub use lloyd::{
    KMeansClusterer, KMeansResult, KMeansState, Termination, assign, has_converged, kmeans,
};
pub use params::{EmptyClusterPolicy, KMeansParams};
pub use point::{Point, points_from_pairs};
