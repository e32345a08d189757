//! Floating-point points used for box and image centers.

use serde::{Deserialize, Serialize};

/// A 2D point in absolute pixel units.
///
/// Centers of integer boxes can fall on half pixels, so coordinates are
/// kept as `f64` and only rounded when a distance is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    /// Creates a new coordinate with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Coord) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Euclidean distance to `other`, rounded half-to-even to whole pixels.
    #[inline]
    pub fn rounded_distance(&self, other: &Coord) -> i64 {
        self.distance(other).round_ties_even() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_creation() {
        let coord = Coord::new(10.0, 20.0);
        assert_eq!(coord.x, 10.0);
        assert_eq!(coord.y, 20.0);
    }

    #[test]
    fn test_coord_distance() {
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_rounded_distance_ties_to_even() {
        let origin = Coord::new(0.0, 0.0);
        assert_eq!(origin.rounded_distance(&Coord::new(2.5, 0.0)), 2);
        assert_eq!(origin.rounded_distance(&Coord::new(3.5, 0.0)), 4);
        assert_eq!(origin.rounded_distance(&Coord::new(2.6, 0.0)), 3);
    }
}
