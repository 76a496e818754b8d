//! Per-target route sets, computed lazily and cached for the whole run.
//!
//! For a target `t`, the catalog runs one constrained search per
//! `(depot, leg limit)` pair, where the leg limits are the effective ranges
//! of the courier types.  Searches start at the target and end at the depot,
//! so the returned `end → start` point sequence already reads
//! depot → … → target.
//!
//! A physical route found under several leg limits is stored once.  Each
//! depot's routes are ordered by ascending total distance; equal distances
//! keep discovery order (stable sort).

use cv_core::{DepotId, TargetId};

use crate::graph::RouteGraph;
use crate::route::Route;
use crate::search::PathSearch;

#[cfg(feature = "fx-hash")]
type RouteMap = rustc_hash::FxHashMap<TargetId, Vec<DepotRoutes>>;

#[cfg(not(feature = "fx-hash"))]
type RouteMap = std::collections::HashMap<TargetId, Vec<DepotRoutes>>;

/// All distinct feasible routes from one depot to one target.
#[derive(Debug, Clone)]
pub struct DepotRoutes {
    pub depot:  DepotId,
    /// Ascending by distance.
    pub routes: Vec<Route>,
}

impl DepotRoutes {
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Lazily populated `TargetId → [DepotRoutes]` cache.
///
/// Depots that cannot reach the target under any leg limit are omitted, so
/// an unreachable target maps to an empty slice.
#[derive(Default)]
pub struct RouteCatalog {
    cache: RouteMap,
}

impl RouteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route sets for `target`, running the searches on first use.
    pub fn routes_for<S: PathSearch + ?Sized>(
        &mut self,
        graph:      &RouteGraph,
        search:     &S,
        target:     TargetId,
        leg_limits: &[f64],
    ) -> &[DepotRoutes] {
        self.cache
            .entry(target)
            .or_insert_with(|| compute_target(graph, search, target, leg_limits))
    }

    /// Cached route sets for `target`, if already computed.
    pub fn get(&self, target: TargetId) -> Option<&[DepotRoutes]> {
        self.cache.get(&target).map(Vec::as_slice)
    }

    /// Fill the cache for every target in the graph.
    pub fn precompute_all<S: PathSearch + ?Sized>(
        &mut self,
        graph:      &RouteGraph,
        search:     &S,
        leg_limits: &[f64],
    ) {
        let missing: Vec<TargetId> = graph
            .targets()
            .filter(|t| !self.cache.contains_key(t))
            .collect();

        #[cfg(feature = "parallel")]
        let computed: Vec<(TargetId, Vec<DepotRoutes>)> = {
            use rayon::prelude::*;
            missing
                .into_par_iter()
                .map(|t| (t, compute_target(graph, search, t, leg_limits)))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let computed: Vec<(TargetId, Vec<DepotRoutes>)> = missing
            .into_iter()
            .map(|t| (t, compute_target(graph, search, t, leg_limits)))
            .collect();

        self.cache.extend(computed);
    }

    pub fn is_cached(&self, target: TargetId) -> bool {
        self.cache.contains_key(&target)
    }

    /// Number of targets with a cached route set.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn compute_target<S: PathSearch + ?Sized>(
    graph:      &RouteGraph,
    search:     &S,
    target:     TargetId,
    leg_limits: &[f64],
) -> Vec<DepotRoutes> {
    let from = graph.target_vertex(target);
    let mut out = Vec::new();

    for depot in graph.depots() {
        let to = graph.depot_vertex(depot);
        let mut routes: Vec<Route> = Vec::new();

        for &limit in leg_limits {
            // Both endpoints come from the graph, so the only error is NoRoute.
            let Ok(points) = search.constrained_shortest_path(graph, from, to, Some(limit)) else {
                continue;
            };
            let route = Route::new(points, depot, target);
            if !routes.contains(&route) {
                routes.push(route);
            }
        }

        if !routes.is_empty() {
            routes.sort_by(Route::cmp_distance);
            out.push(DepotRoutes { depot, routes });
        }
    }

    out
}
