//! The `Sim` struct and its wake-time event loop.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use cv_core::{CourierId, DepotRng, SimClock, SimConfig, SimTime};
use cv_dispatch::{
    match_request, select_courier, traverse, Assignment, DispatchError, EventKind, EventLog, Match,
};
use cv_fleet::{CourierArena, CourierStatus, Depot, TypeCatalog};
use cv_schedule::{Request, RequestQueue, ReturnQueue, SupplySchedule};
use cv_spatial::{PathSearch, RouteCatalog, RouteGraph};
use tracing::{debug, info, warn};

use crate::summary::{Failure, FailureReason, Outcome, RunSummary, TypeCount};
use crate::{SimError, SimObserver, SimResult};

// ── State ─────────────────────────────────────────────────────────────────────

/// Loop state.  `Succeeded` and `Failed` are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimStatus {
    Running,
    Succeeded,
    Failed,
}

impl SimStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != SimStatus::Running
    }
}

/// Counters accumulated over a run.
#[derive(Debug, Default)]
pub(crate) struct RunStats {
    pub(crate) served:     usize,
    pub(crate) deferrals:  usize,
    pub(crate) trips:      usize,
    pub(crate) dispatched: BTreeSet<CourierId>,
    /// Latest of the clock and every flushed event.
    pub(crate) end_time:   SimTime,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// `Sim<S>` owns all simulation state and drives one iteration per distinct
/// wake time (the smallest `deferred_until` in the request queue):
///
/// 1. **Wake**: pop the request batch and advance the clock to its time.
/// 2. **Returns**: couriers due home rejoin their depot's idle pool, in
///    return-time order.
/// 3. **Resupply**: every due depot resupply is applied.
/// 4. **Flush**: buffered events up to now go to the observer.
/// 5. **Serve**: each request in slack order is matched and dispatched
///    until fully served, deferred to the next resupply, or failed.
///
/// An empty request queue ends the run as [`SimStatus::Succeeded`] once
/// every in-flight courier has been brought home.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: PathSearch> {
    pub config:   SimConfig,
    pub clock:    SimClock,
    pub graph:    RouteGraph,
    pub search:   S,
    /// Lazily filled route sets per target.
    pub routes:   RouteCatalog,
    pub catalog:  TypeCatalog,
    /// Indexed by `DepotId`.
    pub depots:   Vec<Depot>,
    /// Every courier ever synthesized.
    pub arena:    CourierArena,
    pub requests: RequestQueue,
    /// In-flight couriers keyed by return time.
    pub returns:  ReturnQueue,
    pub supplies: SupplySchedule,
    /// Events recorded ahead of the clock, not yet flushed.
    pub events:   EventLog,

    /// One deterministic stream per depot, indexed by `DepotId`.
    pub(crate) rngs:       Vec<DepotRng>,
    /// Effective range of every courier type, in catalog order.
    pub(crate) leg_limits: Vec<f64>,
    pub(crate) status:     SimStatus,
    pub(crate) failure:    Option<Failure>,
    pub(crate) stats:      RunStats,
}

impl<S: PathSearch> Sim<S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the request queue is empty or a request cannot be served.
    ///
    /// A simulated failure is reported through the returned summary; `Err`
    /// means the run itself could not continue.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        let started = Instant::now();
        info!(
            requests = self.requests.len(),
            depots = self.depots.len(),
            courier_types = self.catalog.len(),
            seed = self.config.seed,
            "simulation started"
        );

        while self.step(observer)? == SimStatus::Running {}

        let summary = self.summary(started.elapsed());
        observer.on_sim_end(&summary);
        info!(
            outcome = %summary.outcome,
            end_time = %summary.end_time,
            served = summary.requests_served,
            spawned = summary.couriers_spawned,
            "simulation finished"
        );
        Ok(summary)
    }

    /// Process one wake time, or finish the run when no request is left.
    ///
    /// Returns the status afterwards.  [`run`](Self::run) is `step` until a
    /// terminal status followed by the summary; stepping by hand leaves the
    /// sim between wake times, where [`verify_ownership`](Self::verify_ownership)
    /// holds.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimStatus> {
        if self.status.is_terminal() {
            return Ok(self.status);
        }
        let Some((now, batch)) = self.requests.pop_batch() else {
            self.finish(observer)?;
            return Ok(self.status);
        };
        self.clock.advance_to(now);
        observer.on_wake(now, batch.len());
        debug!(time = %now, batch = batch.len(), in_flight = self.returns.len(), "wake");

        self.return_due(now)?;
        self.apply_resupplies(now);
        self.flush(now, observer);

        for request in batch {
            if let Some(failure) = self.serve(request, now, observer)? {
                self.fail(failure, observer);
                break;
            }
        }
        Ok(self.status)
    }

    #[inline]
    pub fn status(&self) -> SimStatus {
        self.status
    }

    /// The request that ended a failed run.
    #[inline]
    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    /// Check that every courier ever created is owned by exactly one place:
    /// its home depot's idle pool, or the return queue.
    ///
    /// Holds between wake times; within one dispatch a courier is briefly
    /// owned by neither.
    pub fn verify_ownership(&self) -> SimResult<()> {
        let mut in_flight: BTreeMap<CourierId, usize> = BTreeMap::new();
        for id in self.returns.couriers() {
            *in_flight.entry(id).or_default() += 1;
        }

        for courier in self.arena.iter() {
            let id = courier.id;
            let violation = |detail: String| SimError::OwnershipViolation { courier: id, detail };

            let pools: Vec<_> = self.depots.iter().filter(|d| d.pool.contains(id)).map(|d| d.id).collect();
            let queued = in_flight.remove(&id).unwrap_or(0);

            match (pools.as_slice(), queued) {
                ([depot], 0) => {
                    if *depot != courier.home {
                        return Err(violation(format!("idle at {depot} but its home is {}", courier.home)));
                    }
                    if courier.status != CourierStatus::Idle {
                        return Err(violation(format!("in an idle pool with status {}", courier.status)));
                    }
                }
                ([], 1) => {
                    if courier.status != CourierStatus::Returning {
                        return Err(violation(format!("queued for return with status {}", courier.status)));
                    }
                }
                (pools, queued) => {
                    return Err(violation(format!(
                        "found in {} idle pools and {queued} return entries",
                        pools.len()
                    )));
                }
            }
        }

        if let Some((&id, _)) = in_flight.iter().next() {
            return Err(SimError::OwnershipViolation {
                courier: id,
                detail:  "queued for return but never created".into(),
            });
        }
        Ok(())
    }

    // ── Wake phases ───────────────────────────────────────────────────────

    /// Bring every courier due by `now` back into its home pool.
    fn return_due(&mut self, now: SimTime) -> SimResult<()> {
        for (time, id) in self.returns.pop_due(now) {
            self.return_courier(time, id)?;
        }
        Ok(())
    }

    fn return_courier(&mut self, time: SimTime, id: CourierId) -> SimResult<()> {
        let courier = self.arena.get_mut(id)?;
        courier.status = CourierStatus::Idle;
        courier.return_time = None;
        let home = courier.home;
        self.depots[home.index()].pool.insert(id);
        self.events.push(time, EventKind::Return { courier: id, depot: home });
        Ok(())
    }

    fn apply_resupplies(&mut self, now: SimTime) {
        while let Some((time, id)) = self.supplies.pop_due(now) {
            let depot = &mut self.depots[id.index()];
            let amount = depot.resupply();
            self.supplies.push(depot.next_supply(), id);
            self.events.push(time, EventKind::Resupply { depot: id, amount });
            debug!(depot = %id, amount, goods = depot.goods(), "resupplied");
        }
    }

    /// Hand every buffered event up to `until` to the observer.
    fn flush<O: SimObserver>(&mut self, until: SimTime, observer: &mut O) {
        for event in self.events.drain_until(until) {
            self.stats.end_time = self.stats.end_time.max(event.time);
            observer.on_event(&event);
        }
        self.stats.end_time = self.stats.end_time.max(self.clock.now());
    }

    // ── Serving ───────────────────────────────────────────────────────────

    /// Dispatch trips for `request` until it is served, deferred, or fails.
    fn serve<O: SimObserver>(
        &mut self,
        mut request: Request,
        now:         SimTime,
        observer:    &mut O,
    ) -> SimResult<Option<Failure>> {
        while !request.is_served() {
            let routes = self.routes.routes_for(&self.graph, &self.search, request.target, &self.leg_limits);
            let found = match_request(
                &self.depots,
                &self.catalog,
                routes,
                request.remaining_goods,
                request.window(now),
            );

            match found {
                Match::Found(assignment) => {
                    if !self.dispatch(&mut request, assignment, now)? {
                        return Ok(Some(self.failure_for(&request, now, FailureReason::NoCourier)));
                    }
                }
                Match::NoGoods => {
                    let next = self.supplies.next_time();
                    if request.defer_to(next) {
                        self.stats.deferrals += 1;
                        debug!(request = %request.id, until = %next, remaining = request.remaining_goods, "deferred");
                        observer.on_request_deferred(&request);
                        self.requests.push(request);
                        return Ok(None);
                    }
                    warn!(
                        request = %request.id,
                        next_supply = %next,
                        deadline = %request.deadline(),
                        "no goods and no resupply before the deadline"
                    );
                    return Ok(Some(self.failure_for(&request, now, FailureReason::NoGoods)));
                }
                Match::NoMatch => {
                    return Ok(Some(self.failure_for(&request, now, FailureReason::NoFeasibleMatch)));
                }
            }
        }

        self.stats.served += 1;
        observer.on_request_served(&request, now);
        Ok(None)
    }

    /// Carry out one trip: load, outbound journey, arrival, return journey.
    ///
    /// Returns `false` when the depot cannot produce a fitting courier.
    fn dispatch(&mut self, request: &mut Request, assignment: Assignment, now: SimTime) -> SimResult<bool> {
        let d = assignment.depot().index();
        let id = match select_courier(
            &mut self.depots[d],
            &mut self.arena,
            &self.catalog,
            &mut self.rngs[d],
            &assignment,
            &self.config,
        ) {
            Ok(id) => id,
            Err(DispatchError::Unattainable { .. } | DispatchError::SpawnExhausted { .. }) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let depot = &mut self.depots[d];
        let goods = assignment.goods;
        depot.debit(goods)?;
        let handling = depot.handling_time(goods);
        let depot_id = depot.id;

        let departs_at = now + handling;
        self.events.push(now, EventKind::Load { courier: id, depot: depot_id, goods, departs_at });

        let kind = self.catalog.get(assignment.kind);
        let courier = self.arena.get_mut(id)?;
        let route = &assignment.route;

        let arrival = traverse(
            courier,
            kind,
            route.legs(),
            self.graph.depot_vertex(depot_id),
            departs_at,
            &self.graph,
            &mut self.events,
        );
        let unloaded_at = arrival + handling;
        self.events.push(arrival, EventKind::Arrival {
            courier: id,
            target: request.target,
            goods,
            unloaded_at,
            slack: request.deadline() - unloaded_at,
        });

        let back = traverse(
            courier,
            kind,
            route.return_legs(),
            self.graph.target_vertex(request.target),
            unloaded_at,
            &self.graph,
            &mut self.events,
        );
        courier.return_time = Some(back);
        courier.status = CourierStatus::Returning;
        self.returns.push(back, id);

        request.deliver(goods);
        self.stats.trips += 1;
        self.stats.dispatched.insert(id);
        debug!(
            request = %request.id,
            courier = %id,
            depot = %depot_id,
            goods,
            arrival = %arrival,
            returns_at = %back,
            "trip dispatched"
        );
        Ok(true)
    }

    // ── Termination ───────────────────────────────────────────────────────

    fn failure_for(&self, request: &Request, now: SimTime, reason: FailureReason) -> Failure {
        Failure { request: request.id, target: request.target, time: now, reason }
    }

    /// Bring every courier home, flush the whole log, and succeed.
    fn finish<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        for (time, id) in self.returns.drain_all() {
            self.return_courier(time, id)?;
        }
        self.flush(SimTime::INFINITY, observer);
        self.status = SimStatus::Succeeded;
        Ok(())
    }

    /// Flush up to the failure time, drop later events, and stop.
    fn fail<O: SimObserver>(&mut self, failure: Failure, observer: &mut O) {
        self.flush(failure.time, observer);
        let dropped = self.events.discard();
        warn!(%failure, dropped_events = dropped, "simulation failed");
        observer.on_failure(&failure);
        self.failure = Some(failure);
        self.status = SimStatus::Failed;
    }

    fn summary(&self, elapsed: Duration) -> RunSummary {
        let counts = self.arena.count_by_type(self.catalog.len());
        let spawned_per_type = self
            .catalog
            .iter()
            .map(|(id, kind)| TypeCount {
                name:            kind.name.clone(),
                herd_proportion: kind.herd_proportion,
                spawned:         counts.get(id.index()).copied().unwrap_or(0),
            })
            .collect();

        RunSummary {
            outcome: match self.status {
                SimStatus::Failed => Outcome::Failed,
                _ => Outcome::Succeeded,
            },
            failure: self.failure.clone(),
            end_time: self.stats.end_time,
            requests_served: self.stats.served,
            deferrals: self.stats.deferrals,
            couriers_spawned: self.arena.len(),
            couriers_dispatched: self.stats.dispatched.len(),
            trips: self.stats.trips,
            spawned_per_type,
            elapsed,
        }
    }
}
