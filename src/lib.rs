//! Lloyd's k-means on planar points.
//!
//! The [kmeans](mod@kmeans) module gathers points, parameters, affectation of points to clusters
//! and the clusterer itself. See [kmeans::KMeansClusterer] and the shortcut [kmeans::kmeans].

use lazy_static::lazy_static;

lazy_static! {
    static ref LOG: u64 = init_log();
}

// installs env_logger unless the application already set a logger
fn init_log() -> u64 {
    match env_logger::try_init() {
        Ok(()) => log::debug!("lloydclust installed env_logger"),
        Err(_) => log::debug!("lloydclust keeps the already installed logger"),
    }
    1
}

/// forces logger installation. Returns once env_logger has been tried.
pub fn log_init() {
    lazy_static::initialize(&LOG);
}

pub mod kmeans;

pub use kmeans::{
    Affectation, Assignment, EmptyClusterPolicy, KMeansClusterer, KMeansError, KMeansParams,
    KMeansResult, Point, Termination, kmeans,
};
