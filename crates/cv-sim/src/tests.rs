//! End-to-end tests for cv-sim.

use cv_core::{RequestId, SimConfig, SimTime, TargetId};
use cv_dispatch::Event;
use cv_fleet::CourierType;
use cv_scenario::{DepotRecord, RequestRecord, Scenario, TargetRecord, parse_scenario};
use cv_schedule::Request;
use cv_spatial::{AStarSearch, GreedySearch};

use crate::{Failure, FailureReason, NoopObserver, Outcome, SimBuilder, SimError, SimObserver, SimStatus};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SINGLE: &str = "\
🐪 one depot 🏜 1  0 0 100 1000 0.1
🐪 one target 🏜 1  10 0
1  1 2
1  dromedary 5 5 20 20 1 50 1.0
1  0 1 10 100
";

fn dromedary(range: f64, capacity: u32) -> CourierType {
    CourierType {
        name:            "dromedary".into(),
        min_speed:       5.0,
        max_speed:       5.0,
        min_range:       range,
        max_range:       range,
        refuel_time:     1.0,
        load_capacity:   capacity,
        herd_proportion: 1.0,
    }
}

fn depot(supply_amount: u32, supply_timeout: f64) -> DepotRecord {
    DepotRecord { x: 0.0, y: 0.0, supply_amount, supply_timeout, loading_time: 0.1 }
}

fn request(arrival_time: f64, target: u32, goods: u32) -> RequestRecord {
    RequestRecord { arrival_time, target: TargetId(target), goods, timeout: 100.0 }
}

/// One depot at the origin, one target at (10, 0), one road.
fn single(supply_amount: u32, supply_timeout: f64, requests: Vec<RequestRecord>) -> Scenario {
    Scenario {
        depots:        vec![depot(supply_amount, supply_timeout)],
        targets:       vec![TargetRecord { x: 10.0, y: 0.0 }],
        roads:         vec![(0, 1)],
        courier_types: vec![dromedary(20.0, 50)],
        requests,
    }
}

/// Depot at the origin, targets at (10, 0) and (20, 0), roads in a line.
fn line(range: f64) -> Scenario {
    Scenario {
        depots:        vec![depot(100, 1000.0)],
        targets:       vec![TargetRecord { x: 10.0, y: 0.0 }, TargetRecord { x: 20.0, y: 0.0 }],
        roads:         vec![(0, 1), (1, 2)],
        courier_types: vec![dromedary(range, 50)],
        requests:      vec![request(0.0, 1, 10)],
    }
}

#[derive(Default)]
struct Recorder {
    events:   Vec<Event>,
    wakes:    Vec<(SimTime, usize)>,
    served:   Vec<RequestId>,
    deferred: Vec<(RequestId, SimTime)>,
    failures: Vec<Failure>,
    ended:    usize,
}

impl Recorder {
    fn labels(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.kind.label()).collect()
    }

    fn times(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.time.0).collect()
    }
}

impl SimObserver for Recorder {
    fn on_wake(&mut self, time: SimTime, batch: usize) {
        self.wakes.push((time, batch));
    }
    fn on_event(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
    fn on_request_served(&mut self, request: &Request, _time: SimTime) {
        self.served.push(request.id);
    }
    fn on_request_deferred(&mut self, request: &Request) {
        self.deferred.push((request.id, request.deferred_until()));
    }
    fn on_failure(&mut self, failure: &Failure) {
        self.failures.push(failure.clone());
    }
    fn on_sim_end(&mut self, _summary: &crate::RunSummary) {
        self.ended += 1;
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn builds_from_parsed_text() {
        let scenario = parse_scenario(SINGLE).unwrap();
        let sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().unwrap();
        assert_eq!(sim.graph.vertex_count(), 2);
        assert_eq!(sim.depots.len(), 1);
        assert_eq!(sim.depots[0].goods(), 100);
        assert_eq!(sim.requests.len(), 1);
        assert_eq!(sim.status(), SimStatus::Running);
        assert!(sim.routes.is_empty());
    }

    #[test]
    fn precompute_fills_route_cache() {
        let sim = SimBuilder::new(SimConfig::default(), line(20.0), AStarSearch)
            .precompute_routes(true)
            .build()
            .unwrap();
        assert_eq!(sim.routes.len(), 2);
        assert!(sim.routes.is_cached(TargetId(1)));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SimConfig { max_spawn_rounds: 0, ..SimConfig::default() };
        let err = SimBuilder::new(config, single(100, 1000.0, vec![]), AStarSearch).build().err();
        assert!(matches!(err, Some(SimError::Config(_))));
    }

    #[test]
    fn rejects_request_for_unknown_target() {
        let scenario = single(100, 1000.0, vec![request(0.0, 3, 10)]);
        let err = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().err();
        assert!(matches!(err, Some(SimError::InvalidScenario(_))));
    }

    #[test]
    fn rejects_road_to_missing_vertex() {
        let mut scenario = single(100, 1000.0, vec![]);
        scenario.roads.push((0, 7));
        let err = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().err();
        assert!(matches!(err, Some(SimError::Spatial(_))));
    }

    #[test]
    fn rejects_empty_courier_catalog() {
        let mut scenario = single(100, 1000.0, vec![]);
        scenario.courier_types.clear();
        let err = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().err();
        assert!(matches!(err, Some(SimError::Fleet(_))));
    }
}

// ── Single-trip scenario ──────────────────────────────────────────────────────

#[cfg(test)]
mod single_trip {
    use super::*;

    #[test]
    fn one_request_succeeds_in_one_trip() {
        let scenario = parse_scenario(SINGLE).unwrap();
        let mut sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().unwrap();
        let mut rec = Recorder::default();
        let summary = sim.run(&mut rec).unwrap();

        assert_eq!(summary.outcome, Outcome::Succeeded);
        assert!(summary.failure.is_none());
        assert_eq!(summary.requests_served, 1);
        assert_eq!(summary.trips, 1);
        assert_eq!(summary.couriers_dispatched, 1);
        // One batch of ceil(1 / 1.0) * 2 couriers.
        assert_eq!(summary.couriers_spawned, 2);
        assert_eq!(summary.spawned_per_type.len(), 1);
        assert_eq!(summary.spawned_per_type[0].spawned, 2);
        assert_eq!(summary.end_time, SimTime(6.0));

        assert_eq!(rec.labels(), vec!["load", "arrival", "return"]);
        assert_eq!(rec.times(), vec![0.0, 3.0, 6.0]);
        assert_eq!(rec.served, vec![RequestId(0)]);
        assert_eq!(rec.wakes, vec![(SimTime(0.0), 1)]);
        assert_eq!(rec.ended, 1);
        assert_eq!(sim.status(), SimStatus::Succeeded);
    }

    #[test]
    fn goods_debited_and_couriers_home() {
        let mut sim = SimBuilder::new(SimConfig::default(), single(100, 1000.0, vec![request(0.0, 0, 10)]), AStarSearch)
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        assert_eq!(sim.depots[0].goods(), 90);
        assert_eq!(sim.depots[0].pool.len(), 2);
        assert!(sim.returns.is_empty());
        assert!(sim.events.is_empty());
        sim.verify_ownership().unwrap();
    }

    #[test]
    fn arrival_reports_slack_after_unloading() {
        let scenario = parse_scenario(SINGLE).unwrap();
        let mut sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let arrival = &rec.events[1];
        match &arrival.kind {
            cv_dispatch::EventKind::Arrival { unloaded_at, slack, goods, .. } => {
                assert_eq!(*unloaded_at, SimTime(4.0));
                assert_eq!(*slack, 96.0);
                assert_eq!(*goods, 10);
            }
            other => panic!("expected arrival, got {other:?}"),
        }
    }

    #[test]
    fn greedy_search_also_serves() {
        let scenario = parse_scenario(SINGLE).unwrap();
        let mut sim = SimBuilder::new(SimConfig::default(), scenario, GreedySearch).build().unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.outcome, Outcome::Succeeded);
        assert_eq!(summary.end_time, SimTime(6.0));
    }

    #[test]
    fn empty_request_list_succeeds_immediately() {
        let mut sim = SimBuilder::new(SimConfig::default(), single(100, 1000.0, vec![]), AStarSearch)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let summary = sim.run(&mut rec).unwrap();
        assert_eq!(summary.outcome, Outcome::Succeeded);
        assert_eq!(summary.couriers_spawned, 0);
        assert_eq!(summary.end_time, SimTime::ZERO);
        assert!(rec.events.is_empty());
        assert!(rec.wakes.is_empty());
    }
}

// ── Goods, deferral and failure ───────────────────────────────────────────────

#[cfg(test)]
mod goods {
    use super::*;

    #[test]
    fn short_supply_without_resupply_fails() {
        let scenario = single(5, 1000.0, vec![request(0.0, 0, 10)]);
        let mut sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().unwrap();
        let mut rec = Recorder::default();
        let summary = sim.run(&mut rec).unwrap();

        assert_eq!(summary.outcome, Outcome::Failed);
        let failure = summary.failure.unwrap();
        assert_eq!(failure.reason, FailureReason::NoGoods);
        assert_eq!(failure.request, RequestId(0));
        assert_eq!(failure.time, SimTime::ZERO);
        assert_eq!(summary.couriers_spawned, 0);
        assert_eq!(summary.requests_served, 0);
        assert_eq!(rec.failures.len(), 1);
        assert!(rec.deferred.is_empty());
        assert_eq!(sim.status(), SimStatus::Failed);
        assert!(sim.failure().is_some());
    }

    #[test]
    fn deferred_until_resupply_then_served() {
        let scenario = single(5, 10.0, vec![request(0.0, 0, 10)]);
        let mut sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().unwrap();
        let mut rec = Recorder::default();
        let summary = sim.run(&mut rec).unwrap();

        assert_eq!(summary.outcome, Outcome::Succeeded);
        assert_eq!(summary.deferrals, 1);
        assert_eq!(rec.deferred, vec![(RequestId(0), SimTime(10.0))]);
        assert_eq!(rec.wakes, vec![(SimTime(0.0), 1), (SimTime(10.0), 1)]);
        assert_eq!(rec.labels(), vec!["resupply", "load", "arrival", "return"]);
        assert_eq!(rec.times(), vec![10.0, 10.0, 13.0, 16.0]);
        assert_eq!(sim.depots[0].goods(), 0);
    }

    #[test]
    fn large_order_split_across_trips() {
        let scenario = single(200, 1000.0, vec![request(0.0, 0, 120)]);
        let mut sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().unwrap();
        let mut rec = Recorder::default();
        let summary = sim.run(&mut rec).unwrap();

        assert_eq!(summary.outcome, Outcome::Succeeded);
        assert_eq!(summary.trips, 3);
        assert_eq!(summary.couriers_dispatched, 3);
        // Two couriers per batch; the third trip needs a second batch.
        assert_eq!(summary.couriers_spawned, 4);
        assert_eq!(sim.depots[0].goods(), 80);
        assert_eq!(rec.labels().iter().filter(|l| **l == "load").count(), 3);
        sim.verify_ownership().unwrap();
    }

    #[test]
    fn failure_drops_events_after_failure_time() {
        let scenario = single(15, 1000.0, vec![request(0.0, 0, 10), request(1.0, 0, 10)]);
        let mut sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().unwrap();
        let mut rec = Recorder::default();
        let summary = sim.run(&mut rec).unwrap();

        assert_eq!(summary.outcome, Outcome::Failed);
        assert_eq!(summary.requests_served, 1);
        let failure = summary.failure.unwrap();
        assert_eq!(failure.request, RequestId(1));
        assert_eq!(failure.time, SimTime(1.0));
        assert_eq!(summary.end_time, SimTime(1.0));
        assert_eq!(rec.labels(), vec!["load"]);
        assert!(sim.events.is_empty());
        // The first courier is still on its way home.
        sim.verify_ownership().unwrap();
    }

    #[test]
    fn unreachable_target_is_no_feasible_match() {
        let mut scenario = single(100, 1000.0, vec![request(0.0, 1, 10)]);
        scenario.targets.push(TargetRecord { x: 0.0, y: 10.0 });
        let mut sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(summary.outcome, Outcome::Failed);
        let failure = summary.failure.unwrap();
        assert_eq!(failure.reason, FailureReason::NoFeasibleMatch);
        assert_eq!(failure.target, TargetId(1));
        assert_eq!(summary.couriers_spawned, 0);
    }

    #[test]
    fn deadline_too_tight_is_no_feasible_match() {
        let mut scenario = single(100, 1000.0, vec![request(0.0, 0, 10)]);
        // Handling alone takes 2 time units.
        scenario.requests[0].timeout = 2.0;
        let mut sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.failure.map(|f| f.reason), Some(FailureReason::NoFeasibleMatch));
    }
}

// ── Courier synthesis ─────────────────────────────────────────────────────────

#[cfg(test)]
mod synthesis {
    use super::*;

    /// Speed drawn from `[1, 5]`; the request leaves `10 / required_speed`
    /// for travel after two time units of handling.
    fn tight(required_speed: f64) -> Scenario {
        let mut scenario = single(100, 1000.0, vec![request(0.0, 0, 10)]);
        scenario.courier_types[0].min_speed = 1.0;
        scenario.requests[0].timeout = 2.0 + 10.0 / required_speed;
        scenario
    }

    #[test]
    fn rare_fast_courier_is_synthesized_for_every_seed() {
        for seed in 0..20 {
            let config = SimConfig::default().with_seed(seed);
            let mut sim = SimBuilder::new(config, tight(4.99), AStarSearch).build().unwrap();
            let summary = sim
                .run(&mut NoopObserver)
                .unwrap_or_else(|e| panic!("seed {seed}: {e}"));

            assert_eq!(summary.outcome, Outcome::Succeeded, "seed {seed}");
            assert_eq!(summary.trips, 1);
            assert!(summary.couriers_spawned >= 2);
            sim.verify_ownership().unwrap();
        }
    }

    #[test]
    fn impossible_speed_fails_with_summary() {
        let mut sim = SimBuilder::new(SimConfig::default(), tight(5.0), AStarSearch).build().unwrap();
        let mut rec = Recorder::default();
        let summary = sim.run(&mut rec).unwrap();

        assert_eq!(summary.outcome, Outcome::Failed);
        let failure = summary.failure.unwrap();
        assert_eq!(failure.reason, FailureReason::NoCourier);
        assert_eq!(failure.time, SimTime::ZERO);
        assert_eq!(summary.couriers_spawned, 0);
        assert_eq!(sim.depots[0].goods(), 100);
        assert_eq!(rec.failures.len(), 1);
        assert_eq!(rec.ended, 1);
    }

    #[test]
    fn exhausted_spawn_budget_fails_with_summary() {
        let config = SimConfig { max_spawn_rounds: 1, ..SimConfig::default() };
        let mut sim = SimBuilder::new(config, tight(5.0 - 1e-9), AStarSearch).build().unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(summary.outcome, Outcome::Failed);
        assert_eq!(summary.failure.map(|f| f.reason), Some(FailureReason::NoCourier));
        assert_eq!(summary.couriers_spawned, 2);
        sim.verify_ownership().unwrap();
    }
}

// ── Ownership between wakes ───────────────────────────────────────────────────

#[cfg(test)]
mod ownership {
    use super::*;

    #[test]
    fn holds_after_every_wake_with_couriers_in_flight() {
        let scenario = single(100, 1000.0, vec![request(0.0, 0, 10), request(1.0, 0, 10), request(2.0, 0, 10)]);
        let mut sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().unwrap();
        let mut rec = Recorder::default();

        let mut in_flight = Vec::new();
        while sim.step(&mut rec).unwrap() == SimStatus::Running {
            sim.verify_ownership().unwrap();
            in_flight.push(sim.returns.len());
        }
        sim.verify_ownership().unwrap();

        assert_eq!(in_flight, vec![1, 2, 3]);
        assert_eq!(sim.status(), SimStatus::Succeeded);
        assert!(sim.returns.is_empty());
        assert_eq!(sim.arena.len(), 4);
        assert_eq!(sim.depots[0].pool.len(), 4);
        assert_eq!(sim.depots[0].goods(), 70);
        assert_eq!(sim.step(&mut rec).unwrap(), SimStatus::Succeeded);
    }
}

// ── Travel along multi-leg routes ─────────────────────────────────────────────

#[cfg(test)]
mod travel {
    use super::*;

    #[test]
    fn short_range_refuels_on_both_legs() {
        let mut sim = SimBuilder::new(SimConfig::default(), line(12.0), AStarSearch).build().unwrap();
        let mut rec = Recorder::default();
        let summary = sim.run(&mut rec).unwrap();

        assert_eq!(summary.outcome, Outcome::Succeeded);
        assert_eq!(rec.labels(), vec!["load", "refuel", "arrival", "refuel", "refuel", "return"]);
        assert_eq!(rec.times(), vec![0.0, 3.0, 6.0, 7.0, 10.0, 13.0]);
        assert_eq!(summary.end_time, SimTime(13.0));
    }

    #[test]
    fn long_range_passes_through() {
        let mut sim = SimBuilder::new(SimConfig::default(), line(50.0), AStarSearch).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.labels(), vec!["load", "transit", "arrival", "transit", "return"]);
        assert_eq!(rec.times(), vec![0.0, 3.0, 5.0, 8.0, 10.0]);
    }

    #[test]
    fn returning_courier_is_reused() {
        let scenario = single(100, 1000.0, vec![request(0.0, 0, 10), request(20.0, 0, 10), request(40.0, 0, 10)]);
        let mut sim = SimBuilder::new(SimConfig::default(), scenario, AStarSearch).build().unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(summary.trips, 3);
        assert_eq!(summary.couriers_spawned, 2);
        assert_eq!(summary.couriers_dispatched, 1);
        sim.verify_ownership().unwrap();
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism {
    use super::*;

    fn varied() -> Scenario {
        let mut scenario = line(30.0);
        scenario.courier_types[0].min_speed = 2.0;
        scenario.courier_types[0].min_range = 20.0;
        scenario.courier_types[0].max_range = 40.0;
        scenario.requests = vec![request(0.0, 0, 30), request(0.0, 1, 60), request(3.0, 1, 10)];
        scenario
    }

    fn messages(seed: u64) -> Vec<String> {
        let config = SimConfig::default().with_seed(seed);
        let mut sim = SimBuilder::new(config, varied(), AStarSearch).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        rec.events.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn same_seed_same_event_stream() {
        assert_eq!(messages(7), messages(7));
    }

    #[test]
    fn events_flush_in_time_order() {
        let mut sim = SimBuilder::new(SimConfig::default(), varied(), AStarSearch).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert!(rec.events.windows(2).all(|w| w[0] <= w[1]));
    }
}
