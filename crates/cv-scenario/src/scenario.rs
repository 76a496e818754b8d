//! Typed scenario records and the section-by-section parser.
//!
//! # Layout
//!
//! | Section       | Count token | Fields per record                                   |
//! |---------------|-------------|-----------------------------------------------------|
//! | depots        | `W`         | `x y supply_amount supply_timeout loading_time`     |
//! | targets       | `O`         | `x y`                                               |
//! | roads         | `E`         | `from to` (1-based over all `W + O` vertices)       |
//! | courier types | `T`         | `name min_speed max_speed min_range max_range refuel_time load_capacity proportion` |
//! | requests      | `R`         | `arrival target goods timeout` (`target` 1-based)   |
//!
//! Integer fields are `supply_amount`, `load_capacity`, `goods`, all counts
//! and all indices; everything else is a finite real.  Indices are converted
//! to 0-based here.

use std::path::Path;

use cv_core::TargetId;
use cv_fleet::CourierType;
use tracing::debug;

use crate::lexer::Tokens;
use crate::{ScenarioError, ScenarioResult};

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DepotRecord {
    pub x:              f64,
    pub y:              f64,
    pub supply_amount:  u32,
    pub supply_timeout: f64,
    pub loading_time:   f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetRecord {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    pub arrival_time: f64,
    pub target:       TargetId,
    pub goods:        u32,
    pub timeout:      f64,
}

/// A fully parsed scenario.  All indices are 0-based.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub depots:        Vec<DepotRecord>,
    pub targets:       Vec<TargetRecord>,
    /// Undirected roads as vertex indices (depots first, then targets).
    pub roads:         Vec<(usize, usize)>,
    pub courier_types: Vec<CourierType>,
    pub requests:      Vec<RequestRecord>,
}

impl Scenario {
    pub fn vertex_count(&self) -> usize {
        self.depots.len() + self.targets.len()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Read and parse a scenario file.
pub fn load_scenario(path: &Path) -> ScenarioResult<Scenario> {
    let text = std::fs::read_to_string(path)?;
    parse_scenario(&text)
}

/// Parse scenario text.  Fails on the first malformed or missing token.
pub fn parse_scenario(text: &str) -> ScenarioResult<Scenario> {
    let mut t = Tokens::new(text);

    let depot_count: usize = t.parse("depot count")?;
    let depots = (0..depot_count)
        .map(|_| {
            Ok(DepotRecord {
                x:              t.real("depot x")?,
                y:              t.real("depot y")?,
                supply_amount:  t.parse("depot supply amount")?,
                supply_timeout: t.real("depot supply timeout")?,
                loading_time:   t.real("depot loading time")?,
            })
        })
        .collect::<ScenarioResult<Vec<_>>>()?;

    let target_count: usize = t.parse("target count")?;
    let targets = (0..target_count)
        .map(|_| Ok(TargetRecord { x: t.real("target x")?, y: t.real("target y")? }))
        .collect::<ScenarioResult<Vec<_>>>()?;

    let vertex_count = depot_count + target_count;
    let road_count: usize = t.parse("road count")?;
    let roads = (0..road_count)
        .map(|_| Ok((t.index("road endpoint", vertex_count)?, t.index("road endpoint", vertex_count)?)))
        .collect::<ScenarioResult<Vec<_>>>()?;

    let type_count: usize = t.parse("courier type count")?;
    let courier_types = (0..type_count)
        .map(|_| {
            Ok(CourierType {
                name:            t.next_token("courier type name")?.to_string(),
                min_speed:       t.real("courier min speed")?,
                max_speed:       t.real("courier max speed")?,
                min_range:       t.real("courier min range")?,
                max_range:       t.real("courier max range")?,
                refuel_time:     t.real("courier refuel time")?,
                load_capacity:   t.parse("courier load capacity")?,
                herd_proportion: t.real("courier herd proportion")?,
            })
        })
        .collect::<ScenarioResult<Vec<_>>>()?;

    let request_count: usize = t.parse("request count")?;
    let requests = (0..request_count)
        .map(|_| {
            Ok(RequestRecord {
                arrival_time: t.real("request arrival time")?,
                target:       TargetId(t.index("request target", target_count)? as u32),
                goods:        t.parse("request goods")?,
                timeout:      t.real("request timeout")?,
            })
        })
        .collect::<ScenarioResult<Vec<_>>>()?;

    if t.remaining() > 0 {
        return Err(ScenarioError::TrailingTokens { count: t.remaining() });
    }

    debug!(
        depots = depots.len(),
        targets = targets.len(),
        roads = roads.len(),
        courier_types = courier_types.len(),
        requests = requests.len(),
        "scenario parsed"
    );

    Ok(Scenario { depots, targets, roads, courier_types, requests })
}
