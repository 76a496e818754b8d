//! `Route`: a concrete depot → target path with its derived metrics.

use std::cmp::Ordering;

use cv_core::{DepotId, Point, TargetId};

/// An ordered point sequence from a depot to a target.
///
/// `distance` and `max_leg` are computed once at construction.  The return
/// journey walks the same points in reverse via [`return_legs`](Self::return_legs).
///
/// Two routes are equal when their endpoints and point sequences match
/// (point equality is coordinate-based), so the same physical route found
/// under two different leg limits collapses to one entry.
#[derive(Debug, Clone)]
pub struct Route {
    /// `points[0]` is the depot, the last point is the target.
    pub points: Vec<Point>,
    pub depot:  DepotId,
    pub target: TargetId,
    /// Total length.
    pub distance: f64,
    /// Longest single leg.
    pub max_leg: f64,
}

impl Route {
    pub fn new(points: Vec<Point>, depot: DepotId, target: TargetId) -> Self {
        let (distance, max_leg) = points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .fold((0.0, 0.0_f64), |(sum, max), d| (sum + d, max.max(d)));
        Self { points, depot, target, distance, max_leg }
    }

    /// Consecutive `(from, to)` pairs, depot first.
    pub fn legs(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Consecutive `(from, to)` pairs walking back from the target.
    pub fn return_legs(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).rev().map(|w| (w[1], w[0]))
    }

    pub fn leg_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// `true` for a single-point route (start equals end).
    pub fn is_trivial(&self) -> bool {
        self.points.len() <= 1
    }

    /// Ascending-distance comparison used to order route sets.
    pub fn cmp_distance(&self, other: &Route) -> Ordering {
        self.distance.total_cmp(&other.distance)
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.depot == other.depot && self.target == other.target && self.points == other.points
    }
}
