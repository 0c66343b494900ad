//! clustering cost

use num_traits::float::Float;

use std::fmt::Debug;

use super::affect::{Assignment, UNASSIGNED};
use super::point::Point;

#[cfg_attr(doc, katexit::katexit)]
/// Inertia (within cluster sum of squared distances) of an assignment:
/// $$ \sum_{i} \Vert p_i - c_{a(i)} \Vert^2 $$
/// Unassigned points do not contribute.
pub fn inertia<T>(dataset: &[Point<T>], assignment: &Assignment, centroids: &[Point<T>]) -> T
where
    T: Float + Debug,
{
    assert_eq!(dataset.len(), assignment.len());
    dataset
        .iter()
        .zip(assignment.get_labels())
        .filter(|(_, c)| **c != UNASSIGNED)
        .fold(T::zero(), |acc, (p, c)| acc + p.distance2(&centroids[*c]))
} // end of inertia

//========================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::kmeans::point::points_from_pairs;

    #[test]
    fn inertia_sums_squared_distances() {
        let data = points_from_pairs(&[(0., 0.), (0., 2.), (5., 5.)]);
        let centroids = points_from_pairs(&[(0., 1.), (5., 5.)]);
        let assignment = Assignment::new(vec![0, 0, 1], 2);
        assert_eq!(inertia(&data, &assignment, &centroids), 2.);
        //
        let partial = Assignment::new(vec![0, UNASSIGNED, 0], 2);
        assert_eq!(inertia(&data, &partial, &centroids), 1. + 41.);
    }
}
