//! defines data description

use num_traits::float::Float;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A point of the plane. It is also used for centroids, which are copies of points and
/// never references into the dataset.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point<T> {
    x: T,
    y: T,
}

impl<T> Point<T>
where
    T: Float + Debug,
{
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }

    /// first coordinate
    pub fn get_x(&self) -> T {
        self.x
    }

    /// second coordinate
    pub fn get_y(&self) -> T {
        self.y
    }

    /// gets the points coordinate
    pub fn get_position(&self) -> [T; 2] {
        [self.x, self.y]
    }

    /// squared euclidean distance, used wherever only the ordering of distances matters
    pub fn distance2(&self, other: &Point<T>) -> T {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// euclidean distance
    pub fn distance(&self, other: &Point<T>) -> T {
        self.distance2(other).sqrt()
    }

    /// true if both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
} // end of impl Point

impl<T: Float + Debug> From<(T, T)> for Point<T> {
    fn from(xy: (T, T)) -> Self {
        Point::new(xy.0, xy.1)
    }
}

/// builds a dataset from coordinates pairs
pub fn points_from_pairs<T: Float + Debug>(pairs: &[(T, T)]) -> Vec<Point<T>> {
    pairs.iter().map(|xy| Point::from(*xy)).collect()
}

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::<f64>::new(0., 0.);
        let b = Point::<f64>::new(3., 4.);
        assert_eq!(a.distance2(&b), 25.);
        assert_eq!(a.distance(&b), 5.);
        assert_eq!(b.distance(&a), 5.);
        assert_eq!(a.distance(&a), 0.);
    }

    #[test]
    fn from_pairs_keeps_order() {
        let data = points_from_pairs(&[(1.0f32, 2.0f32), (3., 4.)]);
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].get_position(), [1., 2.]);
        assert_eq!(data[1].get_x(), 3.);
        assert_eq!(data[1].get_y(), 4.);
    }

    #[test]
    fn finiteness() {
        assert!(Point::new(1.0f64, -2.0).is_finite());
        assert!(!Point::new(f64::NAN, 0.).is_finite());
        assert!(!Point::new(0., f64::INFINITY).is_finite());
    }
} // end of mod tests
