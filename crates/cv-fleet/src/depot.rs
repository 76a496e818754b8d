//! Depots: goods inventory, periodic resupply, and the idle courier pool.

use std::collections::BTreeSet;

use cv_core::{CourierId, DepotId, DepotRng, Point, SimTime};
use tracing::debug;

use crate::courier::CourierArena;
use crate::kind::TypeCatalog;
use crate::{FleetError, FleetResult};

// ── CourierPool ───────────────────────────────────────────────────────────────

/// Idle couriers at one depot, iterated in ascending id order.
#[derive(Debug, Default, Clone)]
pub struct CourierPool {
    idle: BTreeSet<CourierId>,
}

impl CourierPool {
    /// Returns `false` if the courier was already present.
    pub fn insert(&mut self, id: CourierId) -> bool {
        self.idle.insert(id)
    }

    /// Returns `false` if the courier was not present.
    pub fn remove(&mut self, id: CourierId) -> bool {
        self.idle.remove(&id)
    }

    pub fn contains(&self, id: CourierId) -> bool {
        self.idle.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.idle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idle.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CourierId> + '_ {
        self.idle.iter().copied()
    }
}

// ── Depot ─────────────────────────────────────────────────────────────────────

/// A resupplied source of goods and couriers.
///
/// A new depot starts full (`goods = supply_amount`) with its first resupply
/// due at `supply_timeout`.
#[derive(Debug, Clone)]
pub struct Depot {
    pub id:             DepotId,
    pub location:       Point,
    goods:              u32,
    pub supply_amount:  u32,
    pub supply_timeout: f64,
    /// Loading (and unloading) time per unit of goods.
    pub loading_time:   f64,
    next_supply:        SimTime,
    pub pool:           CourierPool,
}

impl Depot {
    pub fn new(
        id:             DepotId,
        location:       Point,
        supply_amount:  u32,
        supply_timeout: f64,
        loading_time:   f64,
    ) -> FleetResult<Self> {
        let invalid = |reason: &str| FleetError::InvalidDepot { depot: id, reason: reason.to_string() };
        if !(supply_timeout > 0.0 && supply_timeout.is_finite()) {
            return Err(invalid("supply timeout must be positive and finite"));
        }
        if !(loading_time > 0.0 && loading_time.is_finite()) {
            return Err(invalid("loading time per unit must be positive and finite"));
        }
        Ok(Self {
            id,
            location,
            goods: supply_amount,
            supply_amount,
            supply_timeout,
            loading_time,
            next_supply: SimTime(supply_timeout),
            pool: CourierPool::default(),
        })
    }

    #[inline]
    pub fn goods(&self) -> u32 {
        self.goods
    }

    #[inline]
    pub fn next_supply(&self) -> SimTime {
        self.next_supply
    }

    /// `goods / loading_time`; higher means faster turnaround.
    #[inline]
    pub fn priority(&self) -> f64 {
        self.goods as f64 / self.loading_time
    }

    /// Time to load or unload `goods` units here.
    #[inline]
    pub fn handling_time(&self, goods: u32) -> f64 {
        goods as f64 * self.loading_time
    }

    /// Apply one resupply: add `supply_amount` and schedule the next one.
    /// Returns the amount added.
    pub fn resupply(&mut self) -> u32 {
        self.goods = self.goods.saturating_add(self.supply_amount);
        self.next_supply += self.supply_timeout;
        self.supply_amount
    }

    /// Remove `amount` units for a dispatch.
    pub fn debit(&mut self, amount: u32) -> FleetResult<()> {
        if amount > self.goods {
            return Err(FleetError::InsufficientGoods {
                depot:     self.id,
                requested: amount,
                available: self.goods,
            });
        }
        self.goods -= amount;
        Ok(())
    }

    /// Synthesize one batch of couriers into this depot's idle pool.
    ///
    /// Each type contributes `round(proportion * batch_size)` couriers.
    /// Speed is uniform on `[min_speed, max_speed]`; range is normal around
    /// `range_mean` with `range_deviation`, clamped below at `min_range`.
    /// Returns the number of couriers created.
    pub fn spawn_batch(
        &mut self,
        catalog:   &TypeCatalog,
        arena:     &mut CourierArena,
        rng:       &mut DepotRng,
        min_range: f64,
    ) -> usize {
        let mut spawned = 0;
        for (kind, count) in catalog.batch_quotas() {
            let t = catalog.get(kind);
            for _ in 0..count {
                let speed = rng.uniform(t.min_speed, t.max_speed);
                let range = rng.gaussian(t.range_mean(), t.range_deviation()).max(min_range);
                let id = arena.spawn(kind, self.id, speed, range);
                self.pool.insert(id);
                spawned += 1;
            }
        }
        debug!(depot = %self.id, spawned, idle = self.pool.len(), "courier batch synthesized");
        spawned
    }
}
