//! Planar point type and distance functions.
//!
//! Scenario coordinates are plain Cartesian `f64` pairs; all route lengths
//! are Euclidean distances between them.

use crate::VertexId;

/// An immutable 2-D point tagged with the route-graph vertex it belongs to.
///
/// Equality is coordinate-based: two points at the same position compare
/// equal even when their `id`s differ.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x:  f64,
    pub y:  f64,
    pub id: VertexId,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64, id: VertexId) -> Self {
        Self { x, y, id }
    }

    /// Euclidean distance.  Symmetric by construction.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Sum of absolute coordinate differences.
    ///
    /// Not a lower bound on Euclidean edge costs; only the greedy search
    /// uses it as a priority.
    #[inline]
    pub fn manhattan(self, other: Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x.total_cmp(&other.x).is_eq() && self.y.total_cmp(&other.y).is_eq()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
