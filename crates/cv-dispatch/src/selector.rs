//! Pick a concrete idle courier for an [`Assignment`], synthesizing batches
//! into the depot's pool when none qualifies.

use cv_core::{CourierId, DepotRng, SimConfig};
use cv_fleet::{CourierArena, CourierStatus, CourierType, Depot, TypeCatalog};
use tracing::{debug, warn};

use crate::matcher::Assignment;
use crate::{DispatchError, DispatchResult};

fn qualifies(arena: &CourierArena, id: CourierId, assignment: &Assignment) -> bool {
    arena.get(id).is_ok_and(|c| {
        c.kind == assignment.kind
            && c.speed >= assignment.min_speed
            && c.range >= assignment.route.max_leg
    })
}

/// Lowest-id idle courier at `depot` of the assigned type that is fast
/// enough and can cover the route's longest leg.
pub fn find_idle(depot: &Depot, arena: &CourierArena, assignment: &Assignment) -> Option<CourierId> {
    depot.pool.iter().find(|&id| qualifies(arena, id, assignment))
}

/// Whether a freshly drawn courier of `kind` meets the assignment with
/// non-zero probability.
///
/// Speed is uniform on `[min_speed, max_speed]`, so a requirement strictly
/// inside the interval can be met while one equal to a wider interval's
/// upper bound cannot.  Range is normal and unbounded above unless its
/// deviation is zero, in which case the clamped mean must already suffice.
pub fn draw_can_qualify(kind: &CourierType, assignment: &Assignment, min_range: f64) -> bool {
    let speed_ok = assignment.min_speed <= kind.min_speed || assignment.min_speed < kind.max_speed;
    let range_ok = kind.range_deviation() > 0.0
        || kind.range_mean().max(min_range) >= assignment.route.max_leg;
    speed_ok && range_ok
}

/// Take a suitable courier out of `depot`'s pool and mark it outbound.
///
/// When no idle courier qualifies, batches are synthesized until one does.
/// Fails with [`DispatchError::Unattainable`] without spawning when no draw
/// can qualify, and with [`DispatchError::SpawnExhausted`] after
/// `config.max_spawn_rounds` unlucky batches.
pub fn select_courier(
    depot:      &mut Depot,
    arena:      &mut CourierArena,
    catalog:    &TypeCatalog,
    rng:        &mut DepotRng,
    assignment: &Assignment,
    config:     &SimConfig,
) -> DispatchResult<CourierId> {
    let mut rounds = 0;
    let id = match find_idle(depot, arena, assignment) {
        Some(id) => id,
        None => {
            let kind = catalog.get(assignment.kind);
            if !draw_can_qualify(kind, assignment, config.min_courier_range) {
                warn!(depot = %depot.id, kind = %kind.name, min_speed = assignment.min_speed, "no courier draw can qualify");
                return Err(DispatchError::Unattainable { depot: depot.id, kind: kind.name.clone() });
            }
            loop {
                if rounds == config.max_spawn_rounds {
                    warn!(depot = %depot.id, kind = %kind.name, rounds, "courier synthesis exhausted");
                    return Err(DispatchError::SpawnExhausted { depot: depot.id, kind: kind.name.clone(), rounds });
                }
                // Earlier couriers were already rejected; only the new batch needs scanning.
                let first = arena.len();
                let spawned = depot.spawn_batch(catalog, arena, rng, config.min_courier_range);
                rounds += 1;
                let mut fresh = (first..first + spawned).map(|i| CourierId(i as u32));
                if let Some(id) = fresh.find(|&id| qualifies(arena, id, assignment)) {
                    break id;
                }
            }
        }
    };

    depot.pool.remove(id);
    let courier = arena.get_mut(id)?;
    courier.status = CourierStatus::Outbound;
    debug!(courier = %id, depot = %depot.id, spawn_rounds = rounds, "courier selected");
    Ok(id)
}
