//! Run configuration: JSON file plus command-line overrides.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use cv_core::SimConfig;
use serde::{Deserialize, Serialize};

// ── SearchKind ────────────────────────────────────────────────────────────────

/// Which `PathSearch` implementation builds the routes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// A* with a Euclidean heuristic.
    #[default]
    AStar,
    /// Greedy best-first on Manhattan distance.
    Greedy,
}

impl FromStr for SearchKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "astar" => Ok(SearchKind::AStar),
            "greedy" => Ok(SearchKind::Greedy),
            other => bail!("unknown search '{other}' (expected astar or greedy)"),
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchKind::AStar => "astar",
            SearchKind::Greedy => "greedy",
        })
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Everything that shapes a run apart from the scenario itself.
///
/// ```json
/// {
///   "sim":     { "seed": 7, "max_spawn_rounds": 32, "precompute_routes": true },
///   "search":  "greedy",
///   "out_dir": "output/run-7"
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub sim:     SimConfig,
    pub search:  SearchKind,
    /// Directory for `events.csv` and `summary.csv`; no files when absent.
    pub out_dir: Option<PathBuf>,
    /// Suppress per-event console output.
    pub quiet:   bool,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading run config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing run config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

// ── Command line ──────────────────────────────────────────────────────────────

pub const USAGE: &str = "\
usage: caravan <scenario> [--config FILE] [--seed N] [--out DIR] [--search astar|greedy] [--quiet]";

/// Parsed command line.  Flags override the config file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    pub scenario: PathBuf,
    pub config:   Option<PathBuf>,
    pub seed:     Option<u64>,
    pub out_dir:  Option<PathBuf>,
    pub search:   Option<SearchKind>,
    pub quiet:    bool,
}

impl Args {
    /// Parse arguments, program name excluded.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut args = args.into_iter();
        let mut out = Args::default();
        let mut scenario = None;

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next().with_context(|| format!("{flag} needs a value\n{USAGE}"))
            };
            match arg.as_str() {
                "--config" => out.config = Some(value("--config")?.into()),
                "--seed" => {
                    let v = value("--seed")?;
                    out.seed = Some(v.parse().with_context(|| format!("invalid seed '{v}'"))?);
                }
                "--out" => out.out_dir = Some(value("--out")?.into()),
                "--search" => out.search = Some(value("--search")?.parse()?),
                "--quiet" => out.quiet = true,
                flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
                path => {
                    if scenario.replace(PathBuf::from(path)).is_some() {
                        bail!("more than one scenario file given\n{USAGE}");
                    }
                }
            }
        }

        out.scenario = scenario.with_context(|| format!("missing scenario file\n{USAGE}"))?;
        Ok(out)
    }

    /// The config file (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.sim.seed = seed;
        }
        if let Some(search) = self.search {
            config.search = search;
        }
        if let Some(dir) = &self.out_dir {
            config.out_dir = Some(dir.clone());
        }
        config.quiet |= self.quiet;
        Ok(config)
    }
}
