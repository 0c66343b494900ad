//! Lloyd's algorithm.
//!
//! Centroids are initialized on distinct points of the dataset, drawn uniformly without replacement.
//! Then each iteration assigns every point to its nearest centroid (lowest centroid rank on ties)
//! and moves each centroid to the mean of its points, until centroids move less than the tolerance
//! or the iteration budget is exhausted.
//!
//! A run goes through the states of [KMeansState]:
//! Initializing -> Assigning -> Updating -> (Converged | MaxIterationsReached | Assigning)

use num_traits::NumCast;
use num_traits::float::Float;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use rayon::prelude::*;

use cpu_time::ProcessTime;
use std::fmt::Debug;
use std::time::SystemTime;

use super::affect::{Affectation, Assignment, UNASSIGNED};
use super::cost::inertia;
use super::error::{ConfigError, KMeansError};
use super::params::{EmptyClusterPolicy, KMeansParams};
use super::point::Point;

/// states of a run
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KMeansState {
    Initializing,
    Assigning,
    Updating,
    Converged,
    MaxIterationsReached,
}

/// the terminal state a run ended in
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Termination {
    /// no centroid moved more than tolerance during the last update
    Converged,
    /// the iteration budget was exhausted before convergence
    MaxIterationsReached,
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct KMeansResult<T> {
    centroids: Vec<Point<T>>,
    // computed in the last assignment step, from the centroids preceding the last update
    assignment: Assignment,
    nb_iter: usize,
    termination: Termination,
    // inertia of final assignment with final centroids
    inertia: T,
    // inertia after each assignment step
    inertia_trace: Vec<T>,
}

impl<T> KMeansResult<T>
where
    T: Float + Debug,
{
    pub fn get_centroids(&self) -> &[Point<T>] {
        &self.centroids
    }

    pub fn get_assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// cluster of each point of the dataset
    pub fn get_labels(&self) -> &[usize] {
        self.assignment.get_labels()
    }

    /// number of assignment/update passes done
    pub fn get_nb_iter(&self) -> usize {
        self.nb_iter
    }

    pub fn get_termination(&self) -> Termination {
        self.termination
    }

    pub fn is_converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// within cluster sum of squared distances of final assignment to final centroids
    pub fn get_inertia(&self) -> T {
        self.inertia
    }

    /// inertia measured after each assignment step, never increasing
    pub fn get_inertia_trace(&self) -> &[T] {
        &self.inertia_trace
    }

    /// rank of the final centroid nearest to point
    pub fn predict(&self, point: &Point<T>) -> usize {
        nearest(point, &self.centroids)
    }
} // end of impl KMeansResult

//========================================================

// rank of centroid nearest to point, the first one wins on ties
fn nearest<T>(point: &Point<T>, centroids: &[Point<T>]) -> usize
where
    T: Float + Debug,
{
    let mut best = 0;
    let mut best_dist = point.distance2(&centroids[0]);
    for (c, centroid) in centroids.iter().enumerate().skip(1) {
        let dist = point.distance2(centroid);
        if dist < best_dist {
            best = c;
            best_dist = dist;
        }
    }
    best
}

/// Assigns each point of dataset to its nearest centroid.
/// On equal distances the centroid of lowest rank is chosen, so the result is deterministic.
pub fn assign<T>(dataset: &[Point<T>], centroids: &[Point<T>]) -> Assignment
where
    T: Float + Debug + Send + Sync,
{
    assert!(!centroids.is_empty(), "assign needs at least one centroid");
    let labels = dataset
        .par_iter()
        .map(|p| nearest(p, centroids))
        .collect::<Vec<usize>>();
    Assignment::new(labels, centroids.len())
} // end of assign

/// true if no centroid moved by more than tolerance between old and new
pub fn has_converged<T>(old: &[Point<T>], new: &[Point<T>], tolerance: T) -> bool
where
    T: Float + Debug,
{
    old.len() == new.len()
        && old
            .iter()
            .zip(new.iter())
            .all(|(o, n)| o.distance(n) <= tolerance)
}

//========================================================

/// The k-means clusterer. It owns its parameters and a random generator seeded from them,
/// so two clusterers built from the same seeded parameters do the same computations.
pub struct KMeansClusterer {
    params: KMeansParams,
    //
    rng: Xoshiro256PlusPlus,
    // state of current (or last) run
    state: KMeansState,
}

impl KMeansClusterer {
    pub fn new(params: KMeansParams) -> Self {
        let rng = match params.get_seed() {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
        };
        KMeansClusterer {
            params,
            rng,
            state: KMeansState::Initializing,
        }
    }

    pub fn get_params(&self) -> &KMeansParams {
        &self.params
    }

    /// state reached by the last run
    pub fn get_state(&self) -> KMeansState {
        self.state
    }

    /// Draws initial centroids: copies of nb_cluster distinct points of the dataset.
    pub fn initialize<T>(&mut self, dataset: &[Point<T>]) -> Result<Vec<Point<T>>, KMeansError>
    where
        T: Float + Debug,
    {
        self.params.check(dataset.len())?;
        self.state = KMeansState::Initializing;
        Ok(self.draw_centroids(dataset))
    }

    fn draw_centroids<T>(&mut self, dataset: &[Point<T>]) -> Vec<Point<T>>
    where
        T: Float + Debug,
    {
        let indexes = rand::seq::index::sample(
            &mut self.rng,
            dataset.len(),
            self.params.get_nb_cluster(),
        );
        log::debug!("initial centroids at ranks {:?}", indexes);
        indexes.iter().map(|i| dataset[i]).collect()
    }

    /// Computes new centroids as the means of the points assigned to them.
    /// A centroid without points is handled according to the [EmptyClusterPolicy] of parameters.
    pub fn update<T>(
        &mut self,
        dataset: &[Point<T>],
        assignment: &Assignment,
        centroids: &[Point<T>],
    ) -> Vec<Point<T>>
    where
        T: Float + Debug,
    {
        self.update_centroids(dataset, assignment, centroids).0
    }

    // returns new centroids and the number of empty clusters reseeded.
    // A reseeded centroid goes to a point not lying on any centroid, if there is one.
    fn update_centroids<T>(
        &mut self,
        dataset: &[Point<T>],
        assignment: &Assignment,
        centroids: &[Point<T>],
    ) -> (Vec<Point<T>>, usize)
    where
        T: Float + Debug,
    {
        let nb_cluster = assignment.get_nb_cluster();
        assert_eq!(centroids.len(), nb_cluster);
        assert_eq!(dataset.len(), assignment.len());
        // (sum of x, sum of y, number of points) by cluster
        let mut sums = vec![(T::zero(), T::zero(), T::zero()); nb_cluster];
        for (p, c) in dataset.iter().zip(assignment.get_labels()) {
            if *c == UNASSIGNED {
                continue;
            }
            let s = &mut sums[*c];
            s.0 = s.0 + p.get_x();
            s.1 = s.1 + p.get_y();
            s.2 = s.2 + T::one();
        }
        let mut new_centroids: Vec<Point<T>> = sums
            .iter()
            .zip(centroids.iter())
            .map(|((sum_x, sum_y, count), old)| {
                if *count > T::zero() {
                    Point::new(*sum_x / *count, *sum_y / *count)
                } else {
                    *old
                }
            })
            .collect();
        //
        let sizes = assignment.get_cluster_sizes();
        let mut nb_reseeded = 0;
        for c in (0..nb_cluster).filter(|c| sizes[*c] == 0) {
            if self.params.get_empty_policy() == EmptyClusterPolicy::Keep {
                log::warn!("cluster {} is empty, centroid kept", c);
                continue;
            }
            let free: Vec<usize> = (0..dataset.len())
                .filter(|i| !new_centroids.contains(&dataset[*i]))
                .collect();
            if free.is_empty() {
                log::warn!("cluster {} is empty and all points are centroids, centroid kept", c);
                continue;
            }
            let rank = free[self.rng.random_range(0..free.len())];
            log::warn!("cluster {} is empty, centroid reseeded at point {}", c, rank);
            new_centroids[c] = dataset[rank];
            nb_reseeded += 1;
        }
        (new_centroids, nb_reseeded)
    } // end of update_centroids

    /// Runs the algorithm nb_init times from random initializations and returns the run
    /// with lowest inertia (the first one in case of equality).
    pub fn run<T>(&mut self, dataset: &[Point<T>]) -> Result<KMeansResult<T>, KMeansError>
    where
        T: Float + Debug + Send + Sync,
    {
        self.params.check(dataset.len())?;
        let tolerance = self.get_tolerance::<T>()?;
        //
        let cpu_start = ProcessTime::now();
        let sys_now = SystemTime::now();
        log::info!(
            "kmeans run, nb points : {}, nb cluster : {}, nb init : {}",
            dataset.len(),
            self.params.get_nb_cluster(),
            self.params.get_nb_init()
        );
        let mut best: Option<KMeansResult<T>> = None;
        for init in 0..self.params.get_nb_init() {
            let res = self.lloyd(dataset, None, tolerance);
            log::debug!(
                "init {} : {:?} after {} iterations, inertia {:?}",
                init,
                res.termination,
                res.nb_iter,
                res.inertia
            );
            best = match best {
                Some(b) if b.inertia <= res.inertia => Some(b),
                _ => Some(res),
            };
        }
        let best = best.ok_or(ConfigError::NbInit)?;
        self.state = match best.termination {
            Termination::Converged => KMeansState::Converged,
            Termination::MaxIterationsReached => KMeansState::MaxIterationsReached,
        };
        //
        log::info!(
            "kmeans end : {:?} after {} iterations, inertia {:?}, sys time(ms) {:?}, cpu time(ms) {:?}",
            best.termination,
            best.nb_iter,
            best.inertia,
            sys_now.elapsed().map(|d| d.as_millis()).unwrap_or(0),
            cpu_start.elapsed().as_millis()
        );
        Ok(best)
    } // end of run

    /// Runs the algorithm once from centroids given by the caller. nb_init is not used.
    pub fn run_from_centroids<T>(
        &mut self,
        dataset: &[Point<T>],
        centroids: &[Point<T>],
    ) -> Result<KMeansResult<T>, KMeansError>
    where
        T: Float + Debug + Send + Sync,
    {
        self.params.check(dataset.len())?;
        if centroids.len() != self.params.get_nb_cluster() {
            let e = ConfigError::NbCentroids {
                expected: self.params.get_nb_cluster(),
                got: centroids.len(),
            };
            log::error!("run_from_centroids : {}", e);
            return Err(e.into());
        }
        let tolerance = self.get_tolerance::<T>()?;
        Ok(self.lloyd(dataset, Some(centroids.to_vec()), tolerance))
    }

    fn get_tolerance<T: Float>(&self) -> Result<T, KMeansError> {
        let tolerance = self.params.get_tolerance();
        <T as NumCast>::from(tolerance).ok_or(KMeansError::from(ConfigError::Tolerance(tolerance)))
    }

    // one run of the state machine. Parameters are already checked
    fn lloyd<T>(
        &mut self,
        dataset: &[Point<T>],
        mut initial: Option<Vec<Point<T>>>,
        tolerance: T,
    ) -> KMeansResult<T>
    where
        T: Float + Debug + Send + Sync,
    {
        let max_iter = self.params.get_max_iter();
        let nb_cluster = self.params.get_nb_cluster();
        let mut centroids = Vec::<Point<T>>::new();
        let mut assignment = Assignment::unassigned(dataset.len(), nb_cluster);
        let mut inertia_trace = Vec::<T>::new();
        let mut nb_iter = 0;
        //
        self.state = KMeansState::Initializing;
        let termination = loop {
            match self.state {
                KMeansState::Initializing => {
                    centroids = match initial.take() {
                        Some(given) => given,
                        None => self.draw_centroids(dataset),
                    };
                    self.state = KMeansState::Assigning;
                }
                KMeansState::Assigning => {
                    nb_iter += 1;
                    let new_assignment = assign(dataset, &centroids);
                    let nb_changes = new_assignment.nb_changes(&assignment);
                    assignment = new_assignment;
                    let cost = inertia(dataset, &assignment, &centroids);
                    log::debug!(
                        "iteration {} : {} points changed cluster, inertia {:?}, cluster sizes {:?}",
                        nb_iter,
                        nb_changes,
                        cost,
                        assignment.get_cluster_sizes()
                    );
                    inertia_trace.push(cost);
                    self.state = KMeansState::Updating;
                }
                KMeansState::Updating => {
                    let (new_centroids, nb_reseeded) =
                        self.update_centroids(dataset, &assignment, &centroids);
                    // a reseeded centroid has not settled yet
                    let converged =
                        nb_reseeded == 0 && has_converged(&centroids, &new_centroids, tolerance);
                    centroids = new_centroids;
                    self.state = if converged {
                        KMeansState::Converged
                    } else if nb_iter >= max_iter {
                        KMeansState::MaxIterationsReached
                    } else {
                        KMeansState::Assigning
                    };
                }
                KMeansState::Converged => break Termination::Converged,
                KMeansState::MaxIterationsReached => break Termination::MaxIterationsReached,
            }
        };
        //
        let inertia = inertia(dataset, &assignment, &centroids);
        KMeansResult {
            centroids,
            assignment,
            nb_iter,
            termination,
            inertia,
            inertia_trace,
        }
    } // end of lloyd
} // end of impl KMeansClusterer

//========================================================

/// Clusters dataset in nb_cluster clusters with one random initialization.
/// seed set to None gives a non reproducible initialization.
pub fn kmeans<T>(
    dataset: &[Point<T>],
    nb_cluster: usize,
    max_iter: usize,
    tolerance: f64,
    seed: Option<u64>,
) -> Result<KMeansResult<T>, KMeansError>
where
    T: Float + Debug + Send + Sync,
{
    let mut params = KMeansParams::new(nb_cluster)
        .with_max_iter(max_iter)
        .with_tolerance(tolerance);
    if let Some(seed) = seed {
        params = params.with_seed(seed);
    }
    KMeansClusterer::new(params).run(dataset)
}

//========================================================

// end of mod tests
