//! Path search trait and its two implementations.
//!
//! # Pluggability
//!
//! The route catalog calls searches through the [`PathSearch`] trait, so the
//! simulation can be run with either strategy without touching the engine:
//!
//! | Strategy        | Priority                         | Optimal? |
//! |-----------------|----------------------------------|----------|
//! | [`AStarSearch`] | `g + euclid(v, end)`             | yes      |
//! | [`GreedySearch`]| `manhattan(v, end)` only         | no       |
//!
//! `AStarSearch` is the default.  Its heuristic is the straight-line
//! distance, which never overestimates a Euclidean edge sum, so the first
//! time `end` is popped its path is a shortest one.  `GreedySearch` keeps
//! the coordinate-difference priority of the legacy planner; it returns
//! *a* path quickly but not necessarily the shortest.
//!
//! # Leg limit
//!
//! Both searches accept an optional `max_leg`.  A road is only admissible
//! when its length is strictly below the limit: a courier that cannot cross
//! one leg can never use that road, however often it refuels elsewhere.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use cv_core::{Point, VertexId};

use crate::graph::RouteGraph;
use crate::{SpatialError, SpatialResult};

// ── PathSearch trait ──────────────────────────────────────────────────────────

/// Pluggable point-to-point search over a [`RouteGraph`].
///
/// Implementations must be `Send + Sync` so the route catalog can be
/// precomputed on Rayon's pool.
pub trait PathSearch: Send + Sync {
    /// Vertex sequence `end → … → start`, or `None` if `end` is unreachable
    /// using only roads shorter than `max_leg`.
    ///
    /// Both vertices are guaranteed in range by the caller.
    fn search(
        &self,
        graph:   &RouteGraph,
        start:   VertexId,
        end:     VertexId,
        max_leg: Option<f64>,
    ) -> Option<Vec<VertexId>>;

    /// Unconstrained shortest path as points `end → … → start`.
    fn shortest_path(
        &self,
        graph: &RouteGraph,
        start: VertexId,
        end:   VertexId,
    ) -> SpatialResult<Vec<Point>> {
        self.constrained_shortest_path(graph, start, end, None)
    }

    /// Shortest path restricted to roads shorter than `max_leg`.
    ///
    /// `start == end` yields the single-point trivial path.
    fn constrained_shortest_path(
        &self,
        graph:   &RouteGraph,
        start:   VertexId,
        end:     VertexId,
        max_leg: Option<f64>,
    ) -> SpatialResult<Vec<Point>> {
        for v in [start, end] {
            if !graph.contains(v) {
                return Err(SpatialError::VertexNotFound(v));
            }
        }
        if start == end {
            return Ok(vec![graph.point(start)]);
        }
        self.search(graph, start, end, max_leg)
            .map(|path| path.into_iter().map(|v| graph.point(v)).collect())
            .ok_or(SpatialError::NoRoute { from: start, to: end })
    }
}

// ── Heap key ──────────────────────────────────────────────────────────────────

/// `f64` priority with a total order so it can live in a `BinaryHeap`.
#[derive(Copy, Clone, PartialEq)]
struct Score(f64);

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[inline]
fn admissible(len: f64, max_leg: Option<f64>) -> bool {
    max_leg.is_none_or(|limit| len < limit)
}

/// Walk `prev` back from `end`; yields `end → … → start`.
fn reconstruct(prev: &[VertexId], start: VertexId, end: VertexId) -> Vec<VertexId> {
    let mut path = vec![end];
    let mut cur = end;
    while cur != start {
        cur = prev[cur.index()];
        path.push(cur);
    }
    path
}

// ── AStarSearch ───────────────────────────────────────────────────────────────

/// A* over cumulative Euclidean distance with a straight-line heuristic.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStarSearch;

impl PathSearch for AStarSearch {
    fn search(
        &self,
        graph:   &RouteGraph,
        start:   VertexId,
        end:     VertexId,
        max_leg: Option<f64>,
    ) -> Option<Vec<VertexId>> {
        let n    = graph.vertex_count();
        let goal = graph.point(end);

        // g[v] = best known distance from start; prev[v] = predecessor.
        let mut g      = vec![f64::INFINITY; n];
        let mut prev   = vec![VertexId::INVALID; n];
        let mut closed = vec![false; n];

        g[start.index()] = 0.0;

        // Min-heap on (f, vertex); the vertex id breaks ties deterministically.
        let mut heap: BinaryHeap<Reverse<(Score, VertexId)>> = BinaryHeap::new();
        heap.push(Reverse((Score(graph.point(start).distance(goal)), start)));

        while let Some(Reverse((_, v))) = heap.pop() {
            if closed[v.index()] {
                continue;
            }
            closed[v.index()] = true;

            if v == end {
                return Some(reconstruct(&prev, start, end));
            }

            for (next, len) in graph.neighbors(v) {
                if closed[next.index()] || !admissible(len, max_leg) {
                    continue;
                }
                let cand = g[v.index()] + len;
                if cand < g[next.index()] {
                    g[next.index()]    = cand;
                    prev[next.index()] = v;
                    let f = cand + graph.point(next).distance(goal);
                    heap.push(Reverse((Score(f), next)));
                }
            }
        }

        None
    }
}

// ── GreedySearch ──────────────────────────────────────────────────────────────

/// Greedy best-first search ordered only by the Manhattan distance to
/// `end`.  A vertex's predecessor is fixed the first time it is discovered.
#[derive(Copy, Clone, Debug, Default)]
pub struct GreedySearch;

impl PathSearch for GreedySearch {
    fn search(
        &self,
        graph:   &RouteGraph,
        start:   VertexId,
        end:     VertexId,
        max_leg: Option<f64>,
    ) -> Option<Vec<VertexId>> {
        let n    = graph.vertex_count();
        let goal = graph.point(end);

        let mut seen = vec![false; n];
        let mut prev = vec![VertexId::INVALID; n];
        seen[start.index()] = true;

        let mut heap: BinaryHeap<Reverse<(Score, VertexId)>> = BinaryHeap::new();
        heap.push(Reverse((Score(0.0), start)));

        while let Some(Reverse((_, v))) = heap.pop() {
            if v == end {
                break;
            }
            for (next, len) in graph.neighbors(v) {
                if seen[next.index()] || !admissible(len, max_leg) {
                    continue;
                }
                seen[next.index()] = true;
                prev[next.index()] = v;
                heap.push(Reverse((Score(goal.manhattan(graph.point(next))), next)));
            }
        }

        seen[end.index()].then(|| reconstruct(&prev, start, end))
    }
}
