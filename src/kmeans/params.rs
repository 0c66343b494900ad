//! parameters driving a k-means run

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, KMeansError};

/// What to do with a centroid that received no point during an assignment pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyClusterPolicy {
    /// move the centroid to a dataset point chosen uniformly at random
    #[default]
    Reseed,
    /// leave the centroid where it is
    Keep,
}

/// Parameters of the clusterer. Every field has a default so a partial
/// configuration (json, toml ...) can be deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansParams {
    /// number of clusters (k)
    nb_cluster: usize,
    /// iteration budget of one run
    max_iter: usize,
    /// largest centroid displacement still considered as convergence
    tolerance: f64,
    /// seed of the random generator, None gives a non reproducible run
    seed: Option<u64>,
    /// number of random initializations, the best (lowest inertia) run is kept
    nb_init: usize,
    //
    empty_policy: EmptyClusterPolicy,
}

impl Default for KMeansParams {
    fn default() -> Self {
        KMeansParams {
            nb_cluster: 3,
            max_iter: 100,
            tolerance: 1.0e-9,
            seed: None,
            nb_init: 1,
            empty_policy: EmptyClusterPolicy::default(),
        }
    }
}

impl KMeansParams {
    /// parameters for nb_cluster clusters, other fields default
    pub fn new(nb_cluster: usize) -> Self {
        KMeansParams {
            nb_cluster,
            ..Default::default()
        }
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_nb_init(mut self, nb_init: usize) -> Self {
        self.nb_init = nb_init;
        self
    }

    pub fn with_empty_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_policy = policy;
        self
    }

    pub fn get_nb_cluster(&self) -> usize {
        self.nb_cluster
    }

    pub fn get_max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn get_tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_nb_init(&self) -> usize {
        self.nb_init
    }

    pub fn get_empty_policy(&self) -> EmptyClusterPolicy {
        self.empty_policy
    }

    /// checks parameters against a dataset of nb_point points.
    pub fn check(&self, nb_point: usize) -> Result<(), KMeansError> {
        let res = if nb_point == 0 {
            Err(ConfigError::EmptyDataset)
        } else if self.nb_cluster < 1 || self.nb_cluster > nb_point {
            Err(ConfigError::NbCluster {
                nb_cluster: self.nb_cluster,
                nb_point,
            })
        } else if self.max_iter < 1 {
            Err(ConfigError::MaxIter)
        } else if self.tolerance.is_nan() || self.tolerance < 0. {
            Err(ConfigError::Tolerance(self.tolerance))
        } else if self.nb_init < 1 {
            Err(ConfigError::NbInit)
        } else {
            Ok(())
        };
        //
        if let Err(e) = &res {
            log::error!("KMeansParams::check : {}", e);
        }
        res.map_err(KMeansError::from)
    } // end of check
} // end of impl KMeansParams

//========================================================

// end of mod tests
