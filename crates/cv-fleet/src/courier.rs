//! Courier instances and the arena that owns them.
//!
//! Couriers live in a single `CourierArena` indexed by `CourierId`; depots
//! hold only id sets.  Ids are assigned by the arena in creation order and
//! never reused, so `CourierId(i)` is always `arena[i]`.

use std::fmt;

use cv_core::{CourierId, CourierTypeId, DepotId, SimTime};

use crate::{FleetError, FleetResult};

// ── CourierStatus ─────────────────────────────────────────────────────────────

/// Which collection currently owns a courier.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum CourierStatus {
    /// In its home depot's idle pool.
    #[default]
    Idle,
    /// Selected for a request and travelling to the target.
    Outbound,
    /// In the return queue, heading home.
    Returning,
}

impl CourierStatus {
    #[inline]
    pub fn is_in_flight(self) -> bool {
        !matches!(self, CourierStatus::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CourierStatus::Idle      => "idle",
            CourierStatus::Outbound  => "outbound",
            CourierStatus::Returning => "returning",
        }
    }
}

impl fmt::Display for CourierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Courier ───────────────────────────────────────────────────────────────────

/// One synthesized courier.  `speed` and `range` are fixed at creation.
#[derive(Debug, Clone)]
pub struct Courier {
    pub id:          CourierId,
    pub kind:        CourierTypeId,
    pub home:        DepotId,
    pub speed:       f64,
    /// Distance coverable between refuels.
    pub range:       f64,
    /// Distance left before the next refuel.
    pub stamina:     f64,
    /// When the courier is due back home; `None` while idle.
    pub return_time: Option<SimTime>,
    pub status:      CourierStatus,
}

impl Courier {
    /// Reset stamina to full range.
    #[inline]
    pub fn refuel(&mut self) {
        self.stamina = self.range;
    }

    #[inline]
    pub fn consume(&mut self, distance: f64) {
        self.stamina -= distance;
    }

    /// `true` if the next leg of length `distance` needs a refuel first.
    #[inline]
    pub fn needs_refuel(&self, distance: f64) -> bool {
        self.stamina < distance
    }
}

// ── CourierArena ──────────────────────────────────────────────────────────────

/// Owner of every courier ever created in a run.
#[derive(Debug, Default)]
pub struct CourierArena {
    couriers: Vec<Courier>,
}

impl CourierArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle courier with full stamina and return its id.
    pub fn spawn(&mut self, kind: CourierTypeId, home: DepotId, speed: f64, range: f64) -> CourierId {
        let id = CourierId(self.couriers.len() as u32);
        self.couriers.push(Courier {
            id,
            kind,
            home,
            speed,
            range,
            stamina: range,
            return_time: None,
            status: CourierStatus::Idle,
        });
        id
    }

    pub fn get(&self, id: CourierId) -> FleetResult<&Courier> {
        self.couriers.get(id.index()).ok_or(FleetError::UnknownCourier(id))
    }

    pub fn get_mut(&mut self, id: CourierId) -> FleetResult<&mut Courier> {
        self.couriers.get_mut(id.index()).ok_or(FleetError::UnknownCourier(id))
    }

    /// Number of couriers ever created.
    pub fn len(&self) -> usize {
        self.couriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.couriers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Courier> + '_ {
        self.couriers.iter()
    }

    /// Couriers ever created per type, indexed by `CourierTypeId`.
    pub fn count_by_type(&self, type_count: usize) -> Vec<usize> {
        let mut counts = vec![0usize; type_count];
        for c in &self.couriers {
            if let Some(n) = counts.get_mut(c.kind.index()) {
                *n += 1;
            }
        }
        counts
    }

    pub fn in_flight(&self) -> usize {
        self.couriers.iter().filter(|c| c.status.is_in_flight()).count()
    }
}
