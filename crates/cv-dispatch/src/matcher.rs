//! Request matching: pick the first feasible `(route, type, min speed)`.
//!
//! # Search order
//!
//! 1. Depots holding a route to the target, by descending priority
//!    (`goods / loading_time`), ties by ascending depot id.
//! 2. Within a depot, routes by ascending distance.
//! 3. For each route, courier types by descending efficiency.
//!
//! The first combination that passes every check wins; there is no
//! global optimisation.
//!
//! # Checks per combination
//!
//! | Check   | Rejects when                                           |
//! |---------|--------------------------------------------------------|
//! | goods   | `depot.goods < min(remaining, load_capacity)`          |
//! | leg     | `route.max_leg > effective_range`                      |
//! | time    | `window <= handling + refuel stops`                    |
//! | speed   | `distance / (window - overhead) > max_speed`           |
//!
//! If every evaluated combination failed the goods check, the result is
//! [`Match::NoGoods`]; any other exhaustion is [`Match::NoMatch`].

use cv_core::{CourierTypeId, DepotId};
use cv_fleet::{CourierType, Depot, TypeCatalog};
use cv_spatial::{DepotRoutes, Route};

/// A feasible plan for one trip.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub route:     Route,
    pub kind:      CourierTypeId,
    /// Slowest courier speed that still meets the deadline.
    pub min_speed: f64,
    /// Units this trip carries: `min(remaining, load_capacity)`.
    pub goods:     u32,
}

impl Assignment {
    #[inline]
    pub fn depot(&self) -> DepotId {
        self.route.depot
    }
}

/// Outcome of [`match_request`].
#[derive(Debug, Clone)]
pub enum Match {
    Found(Assignment),
    /// Every depot that could be tried was short of goods.
    NoGoods,
    /// Goods exist, but no route and type combination fits.
    NoMatch,
}

/// Time a trip costs beyond pure travel: loading plus unloading, plus one
/// `refuel_time` whenever a leg would overdraw stamina reset to
/// `effective_range`.
pub fn trip_overhead(route: &Route, kind: &CourierType, depot: &Depot, goods: u32) -> f64 {
    let full = kind.effective_range();
    let mut stamina = full;
    let mut time = 2.0 * depot.handling_time(goods);
    for (a, b) in route.legs() {
        let d = a.distance(b);
        if stamina < d {
            time += kind.refuel_time;
            stamina = full;
        }
        stamina -= d;
    }
    time
}

/// Find the first feasible trip for a request with `remaining` units left
/// and `window` time until its deadline.
///
/// `depots` is indexed by `DepotId`; `routes` are the target's route sets.
pub fn match_request(
    depots:    &[Depot],
    catalog:   &TypeCatalog,
    routes:    &[DepotRoutes],
    remaining: u32,
    window:    f64,
) -> Match {
    let mut order: Vec<&DepotRoutes> = routes.iter().filter(|r| !r.is_empty()).collect();
    order.sort_by(|a, b| {
        let pa = depots[a.depot.index()].priority();
        let pb = depots[b.depot.index()].priority();
        pb.total_cmp(&pa).then(a.depot.cmp(&b.depot))
    });

    let mut only_goods_failures = true;
    let mut evaluated = false;

    for set in order {
        let depot = &depots[set.depot.index()];
        for route in &set.routes {
            for (kind_id, kind) in catalog.iter() {
                evaluated = true;
                let goods = remaining.min(kind.load_capacity);
                if depot.goods() < goods {
                    continue;
                }
                only_goods_failures = false;

                if route.max_leg > kind.effective_range() {
                    continue;
                }
                let overhead = trip_overhead(route, kind, depot, goods);
                if window <= overhead {
                    continue;
                }
                let min_speed = route.distance / (window - overhead);
                if min_speed > kind.max_speed {
                    continue;
                }
                return Match::Found(Assignment {
                    route: route.clone(),
                    kind: kind_id,
                    min_speed,
                    goods,
                });
            }
        }
    }

    if evaluated && only_goods_failures {
        Match::NoGoods
    } else {
        Match::NoMatch
    }
}
