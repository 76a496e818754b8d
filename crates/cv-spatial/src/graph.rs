//! Route graph representation and builder.
//!
//! # Data layout
//!
//! The graph is undirected; every road is stored as two arcs in
//! **Compressed Sparse Row (CSR)** format.  Given a `VertexId v`, its
//! neighbours occupy the slice:
//!
//! ```text
//! adj_to[ adj_start[v] .. adj_start[v+1] ]
//! ```
//!
//! `adj_len` runs parallel to `adj_to` and caches each leg's Euclidean
//! length so the search inner loop never recomputes a square root.
//!
//! # Vertex numbering
//!
//! Vertex indices double as semantic ids: `[0, depot_count)` are depots,
//! `[depot_count, vertex_count)` are targets.

use std::fmt;

use cv_core::{DepotId, Point, TargetId, VertexId};

use crate::{SpatialError, SpatialResult};

// ── Place ─────────────────────────────────────────────────────────────────────

/// What a vertex is, in the scenario's own numbering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Place {
    Depot(DepotId),
    Target(TargetId),
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Depot(d)  => write!(f, "depot {}", d.0),
            Place::Target(t) => write!(f, "target {}", t.0),
        }
    }
}

// ── RouteGraph ────────────────────────────────────────────────────────────────

/// Undirected depot/target graph in CSR format.
///
/// Do not construct directly; use [`RouteGraphBuilder`].  Adjacency is
/// symmetric by construction.
pub struct RouteGraph {
    /// Position of each vertex.  `points[v].id == v`.
    pub points: Vec<Point>,

    /// CSR row pointer.  Length = `vertex_count + 1`.
    pub adj_start: Vec<u32>,

    /// Neighbour of each arc.
    pub adj_to: Vec<VertexId>,

    /// Euclidean length of each arc.
    pub adj_len: Vec<f64>,

    depot_count: usize,
}

impl RouteGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Number of undirected roads (half the arc count).
    pub fn road_count(&self) -> usize {
        self.adj_to.len() / 2
    }

    pub fn depot_count(&self) -> usize {
        self.depot_count
    }

    pub fn target_count(&self) -> usize {
        self.points.len() - self.depot_count
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // ── Vertex lookup ─────────────────────────────────────────────────────

    pub fn contains(&self, v: VertexId) -> bool {
        v.index() < self.points.len()
    }

    /// Position of `v`.
    ///
    /// # Panics
    /// Panics if `v` is out of range; use [`contains`](Self::contains) first
    /// for untrusted ids.
    #[inline]
    pub fn point(&self, v: VertexId) -> Point {
        self.points[v.index()]
    }

    #[inline]
    pub fn depot_vertex(&self, depot: DepotId) -> VertexId {
        VertexId(depot.0)
    }

    #[inline]
    pub fn target_vertex(&self, target: TargetId) -> VertexId {
        VertexId(self.depot_count as u32 + target.0)
    }

    /// Classify `v` as a depot or a target.
    #[inline]
    pub fn place(&self, v: VertexId) -> Place {
        if v.index() < self.depot_count {
            Place::Depot(DepotId(v.0))
        } else {
            Place::Target(TargetId(v.0 - self.depot_count as u32))
        }
    }

    pub fn depots(&self) -> impl Iterator<Item = DepotId> + '_ {
        (0..self.depot_count as u32).map(DepotId)
    }

    pub fn targets(&self) -> impl Iterator<Item = TargetId> + '_ {
        (0..self.target_count() as u32).map(TargetId)
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// `(neighbour, leg length)` for every road incident to `v`, in
    /// ascending neighbour order.
    #[inline]
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        let start = self.adj_start[v.index()] as usize;
        let end   = self.adj_start[v.index() + 1] as usize;
        self.adj_to[start..end]
            .iter()
            .copied()
            .zip(self.adj_len[start..end].iter().copied())
    }

    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        (self.adj_start[v.index() + 1] - self.adj_start[v.index()]) as usize
    }

    pub fn has_road(&self, a: VertexId, b: VertexId) -> bool {
        self.contains(a) && self.neighbors(a).any(|(n, _)| n == b)
    }
}

// ── RouteGraphBuilder ─────────────────────────────────────────────────────────

/// Construct a [`RouteGraph`] incrementally, then call [`build`](Self::build).
///
/// Depots must be added before targets so that vertex indices follow the
/// depot-then-target numbering.
///
/// # Example
///
/// ```
/// use cv_spatial::RouteGraphBuilder;
///
/// let mut b = RouteGraphBuilder::new();
/// let depot  = b.add_vertex(0.0, 0.0);
/// let target = b.add_vertex(10.0, 0.0);
/// b.add_road(depot, target).unwrap();
/// let graph = b.build(1).unwrap();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.road_count(), 1);
/// ```
#[derive(Default)]
pub struct RouteGraphBuilder {
    points: Vec<Point>,
    roads:  Vec<(VertexId, VertexId)>,
}

impl RouteGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, roads: usize) -> Self {
        Self {
            points: Vec::with_capacity(vertices),
            roads:  Vec::with_capacity(roads),
        }
    }

    /// Add a vertex and return its `VertexId` (sequential from 0).
    pub fn add_vertex(&mut self, x: f64, y: f64) -> VertexId {
        let id = VertexId(self.points.len() as u32);
        self.points.push(Point::new(x, y, id));
        id
    }

    /// Add an undirected road between `a` and `b`.
    ///
    /// Duplicate roads collapse and self-loops are dropped at build time.
    pub fn add_road(&mut self, a: VertexId, b: VertexId) -> SpatialResult<()> {
        for v in [a, b] {
            if v.index() >= self.points.len() {
                return Err(SpatialError::VertexNotFound(v));
            }
        }
        self.roads.push((a, b));
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Consume the builder and produce a [`RouteGraph`] whose first
    /// `depot_count` vertices are depots.
    pub fn build(self, depot_count: usize) -> SpatialResult<RouteGraph> {
        let vertex_count = self.points.len();
        if depot_count > vertex_count {
            return Err(SpatialError::DepotCountExceedsVertices {
                depots:   depot_count,
                vertices: vertex_count,
            });
        }

        // Expand each road into two arcs, then sort + dedup so neighbour
        // iteration order is deterministic.
        let mut arcs: Vec<(VertexId, VertexId)> = self
            .roads
            .iter()
            .filter(|(a, b)| a != b)
            .flat_map(|&(a, b)| [(a, b), (b, a)])
            .collect();
        arcs.sort_unstable();
        arcs.dedup();

        let mut adj_start = vec![0u32; vertex_count + 1];
        for &(from, _) in &arcs {
            adj_start[from.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            adj_start[i] += adj_start[i - 1];
        }
        debug_assert_eq!(adj_start[vertex_count] as usize, arcs.len());

        let adj_to: Vec<VertexId> = arcs.iter().map(|&(_, to)| to).collect();
        let adj_len: Vec<f64> = arcs
            .iter()
            .map(|&(from, to)| self.points[from.index()].distance(self.points[to.index()]))
            .collect();

        Ok(RouteGraph {
            points: self.points,
            adj_start,
            adj_to,
            adj_len,
            depot_count,
        })
    }
}
