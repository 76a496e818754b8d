//! Fluent builder for constructing a [`Sim`] from a parsed scenario.

use std::collections::BTreeSet;

use cv_core::{DepotId, RequestId, SimClock, SimConfig, SimRng, SimTime, VertexId};
use cv_dispatch::EventLog;
use cv_fleet::{CourierArena, Depot, TypeCatalog};
use cv_scenario::Scenario;
use cv_schedule::{Request, RequestQueue, ReturnQueue, SupplySchedule};
use cv_spatial::{PathSearch, RouteCatalog, RouteGraphBuilder};
use tracing::debug;

use crate::sim::{RunStats, SimStatus};
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<S>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, spawn budget, range floor, …
/// - [`Scenario`]: from [`cv_scenario::load_scenario`] or
///   [`cv_scenario::parse_scenario`]
/// - `S: PathSearch`: e.g. [`cv_spatial::AStarSearch`]
///
/// # Optional inputs
///
/// | Method                  | Default                          |
/// |-------------------------|----------------------------------|
/// | `.precompute_routes(b)` | `config.precompute_routes`       |
///
/// # Example
///
/// ```rust,ignore
/// let scenario = load_scenario(path)?;
/// let mut sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch)
///     .precompute_routes(true)
///     .build()?;
/// let summary = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<S: PathSearch> {
    config:   SimConfig,
    scenario: Scenario,
    search:   S,
}

impl<S: PathSearch> SimBuilder<S> {
    pub fn new(config: SimConfig, scenario: Scenario, search: S) -> Self {
        Self { config, scenario, search }
    }

    /// Compute every target's routes at build time instead of on first use.
    pub fn precompute_routes(mut self, yes: bool) -> Self {
        self.config.precompute_routes = yes;
        self
    }

    /// Validate inputs, build the route graph, depots, and queues, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<S>> {
        self.config.validate()?;
        let Scenario { depots: depot_records, targets, roads, courier_types, requests } = self.scenario;

        // ── Route graph: depots first, then targets ───────────────────────
        let mut builder = RouteGraphBuilder::with_capacity(depot_records.len() + targets.len(), roads.len());
        for d in &depot_records {
            builder.add_vertex(d.x, d.y);
        }
        for t in &targets {
            builder.add_vertex(t.x, t.y);
        }
        for &(a, b) in &roads {
            builder.add_road(VertexId(a as u32), VertexId(b as u32))?;
        }
        let graph = builder.build(depot_records.len())?;

        // ── Fleet ─────────────────────────────────────────────────────────
        let catalog = TypeCatalog::new(courier_types)?;
        let depots = depot_records
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let id = DepotId(i as u32);
                Depot::new(id, graph.point(graph.depot_vertex(id)), d.supply_amount, d.supply_timeout, d.loading_time)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sim_rng = SimRng::new(self.config.seed);
        let rngs = depots.iter().map(|d| sim_rng.depot(d.id)).collect();
        let supplies: SupplySchedule = depots.iter().map(|d| (d.next_supply(), d.id)).collect();

        // ── Requests ──────────────────────────────────────────────────────
        let target_count = targets.len();
        let requests: RequestQueue = requests
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                if r.target.index() >= target_count {
                    return Err(SimError::InvalidScenario(format!(
                        "request {i} names target {} but only {target_count} exist",
                        r.target.0
                    )));
                }
                if !(r.arrival_time.is_finite() && r.timeout.is_finite()) {
                    return Err(SimError::InvalidScenario(format!(
                        "request {i} has a non-finite arrival time or timeout"
                    )));
                }
                Ok(Request::new(RequestId(i as u32), SimTime(r.arrival_time), r.target, r.goods, r.timeout))
            })
            .collect::<SimResult<_>>()?;

        // ── Routes ────────────────────────────────────────────────────────
        let leg_limits = catalog.effective_ranges();
        let mut routes = RouteCatalog::new();
        if self.config.precompute_routes {
            routes.precompute_all(&graph, &self.search, &leg_limits);
        }

        debug!(
            vertices = graph.vertex_count(),
            roads = graph.road_count(),
            depots = depots.len(),
            targets = graph.target_count(),
            courier_types = catalog.len(),
            requests = requests.len(),
            cached_targets = routes.len(),
            "simulation built"
        );

        Ok(Sim {
            config: self.config,
            clock: SimClock::new(),
            graph,
            search: self.search,
            routes,
            leg_limits,
            catalog,
            depots,
            arena: CourierArena::new(),
            rngs,
            requests,
            returns: ReturnQueue::new(),
            supplies,
            events: EventLog::new(),
            status: SimStatus::Running,
            failure: None,
            stats: RunStats {
                served:     0,
                deferrals:  0,
                trips:      0,
                dispatched: BTreeSet::new(),
                end_time:   SimTime::ZERO,
            },
        })
    }
}
