//! Courier breeds and the efficiency-ranked catalog.
//!
//! # Derived quantities
//!
//! | Quantity         | Formula                                   |
//! |------------------|-------------------------------------------|
//! | `range_deviation`| `(max_range - min_range) / 4`             |
//! | `range_mean`     | `(max_range + min_range) / 2`             |
//! | `effective_range`| `range_mean + 2 * range_deviation`        |
//! | `avg_speed`      | `(min_speed + max_speed) / 2`             |
//! | `efficiency`     | `avg_speed * effective_range * load_capacity` |
//!
//! `effective_range` is the single-leg cutoff used by the route search and
//! the matcher.  A catalog position (`CourierTypeId`) is the rank in
//! descending efficiency.

use cv_core::CourierTypeId;

use crate::{FleetError, FleetResult};

/// Largest synthesized batch a catalog may ask for.  Bounds the smallest
/// accepted herd proportion at `2 / MAX_BATCH_SIZE`.
pub const MAX_BATCH_SIZE: usize = 10_000;

// ── CourierType ───────────────────────────────────────────────────────────────

/// Static breed template.  Identity is the `name`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CourierType {
    pub name:            String,
    pub min_speed:       f64,
    pub max_speed:       f64,
    pub min_range:       f64,
    pub max_range:       f64,
    /// Time spent at one refuel stop.
    pub refuel_time:     f64,
    /// Goods carried per trip.
    pub load_capacity:   u32,
    /// Share of this breed in a freshly synthesized batch.
    pub herd_proportion: f64,
}

impl CourierType {
    /// Reject parameters that would make sampling or matching meaningless.
    pub fn validate(&self) -> FleetResult<()> {
        let fail = |reason: &str| {
            Err(FleetError::InvalidCourierType {
                name:   self.name.clone(),
                reason: reason.to_string(),
            })
        };
        let all_finite = [
            self.min_speed,
            self.max_speed,
            self.min_range,
            self.max_range,
            self.refuel_time,
            self.herd_proportion,
        ]
        .iter()
        .all(|v| v.is_finite());

        if self.name.is_empty() {
            return fail("name is empty");
        }
        if !all_finite {
            return fail("parameters must be finite");
        }
        if self.min_speed <= 0.0 || self.max_speed < self.min_speed {
            return fail("speeds must satisfy 0 < min_speed <= max_speed");
        }
        if self.min_range < 0.0 || self.max_range < self.min_range {
            return fail("ranges must satisfy 0 <= min_range <= max_range");
        }
        if self.refuel_time < 0.0 {
            return fail("refuel_time is negative");
        }
        if self.load_capacity == 0 {
            return fail("load_capacity is zero");
        }
        if self.herd_proportion <= 0.0 {
            return fail("herd_proportion must be positive");
        }
        if (1.0 / self.herd_proportion).ceil() * 2.0 > MAX_BATCH_SIZE as f64 {
            return fail(&format!(
                "herd_proportion {} would need batches of more than {MAX_BATCH_SIZE} couriers",
                self.herd_proportion
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn range_deviation(&self) -> f64 {
        (self.max_range - self.min_range) / 4.0
    }

    #[inline]
    pub fn range_mean(&self) -> f64 {
        (self.max_range + self.min_range) / 2.0
    }

    #[inline]
    pub fn effective_range(&self) -> f64 {
        self.range_mean() + 2.0 * self.range_deviation()
    }

    #[inline]
    pub fn avg_speed(&self) -> f64 {
        (self.min_speed + self.max_speed) / 2.0
    }

    pub fn efficiency(&self) -> f64 {
        self.avg_speed() * self.effective_range() * self.load_capacity as f64
    }
}

impl PartialEq for CourierType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CourierType {}

// ── TypeCatalog ───────────────────────────────────────────────────────────────

/// All courier breeds of a scenario, sorted by descending efficiency.
///
/// Equal efficiencies keep declaration order.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    types: Vec<CourierType>,
}

impl TypeCatalog {
    pub fn new(mut types: Vec<CourierType>) -> FleetResult<Self> {
        if types.is_empty() {
            return Err(FleetError::EmptyCatalog);
        }
        for (i, t) in types.iter().enumerate() {
            t.validate()?;
            if types[..i].contains(t) {
                return Err(FleetError::DuplicateType(t.name.clone()));
            }
        }
        types.sort_by(|a, b| b.efficiency().total_cmp(&a.efficiency()));
        Ok(Self { types })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// # Panics
    /// Panics if `id` did not come from this catalog.
    #[inline]
    pub fn get(&self, id: CourierTypeId) -> &CourierType {
        &self.types[id.index()]
    }

    pub fn find(&self, name: &str) -> Option<CourierTypeId> {
        self.types
            .iter()
            .position(|t| t.name == name)
            .map(|i| CourierTypeId(i as u16))
    }

    /// Types in descending efficiency order.
    pub fn iter(&self) -> impl Iterator<Item = (CourierTypeId, &CourierType)> + '_ {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| (CourierTypeId(i as u16), t))
    }

    /// Effective range of every type, in catalog order.
    pub fn effective_ranges(&self) -> Vec<f64> {
        self.types.iter().map(CourierType::effective_range).collect()
    }

    pub fn min_herd_proportion(&self) -> f64 {
        self.types
            .iter()
            .map(|t| t.herd_proportion)
            .fold(f64::INFINITY, f64::min)
    }

    /// Size of one synthesized batch: `ceil(1 / min_proportion) * 2`, so the
    /// rarest breed contributes at least one courier.  Never above
    /// [`MAX_BATCH_SIZE`].
    pub fn batch_size(&self) -> usize {
        ((1.0 / self.min_herd_proportion()).ceil() as usize)
            .checked_mul(2)
            .map_or(MAX_BATCH_SIZE, |n| n.min(MAX_BATCH_SIZE))
    }

    /// Per-type head count of one batch: `round(proportion * batch_size)`.
    pub fn batch_quotas(&self) -> Vec<(CourierTypeId, usize)> {
        let batch = self.batch_size() as f64;
        self.iter()
            .map(|(id, t)| (id, (t.herd_proportion * batch).round() as usize))
            .collect()
    }
}
