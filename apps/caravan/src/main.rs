//! caravan: run one logistics scenario and report the outcome.
//!
//! Reads a scenario file, simulates it, streams events to the console
//! (and to CSV files with `--out`), then prints the run summary.  The
//! exit status is non-zero only when the scenario or config could not be
//! read or the event output could not be written; a simulated `FAILED`
//! outcome is a normal result.

mod config;


use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cv_output::{ConsoleWriter, CsvEventWriter, EventWriter, OutputObserver, TeeWriter};
use cv_scenario::{Scenario, load_scenario};
use cv_sim::{RunSummary, SimBuilder};
use cv_spatial::{AStarSearch, GreedySearch, PathSearch};

use config::{Args, RunConfig, SearchKind};

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    let config = args.resolve()?;

    let scenario = load_scenario(&args.scenario)
        .with_context(|| format!("loading scenario {}", args.scenario.display()))?;
    info!(
        path = %args.scenario.display(),
        depots = scenario.depots.len(),
        targets = scenario.targets.len(),
        requests = scenario.requests.len(),
        search = %config.search,
        "scenario loaded"
    );

    let csv = match &config.out_dir {
        Some(dir) => Some(
            CsvEventWriter::new(dir).with_context(|| format!("opening output directory {}", dir.display()))?,
        ),
        None => None,
    };
    let console = (!config.quiet).then(ConsoleWriter::new);
    let writer = TeeWriter::new(csv, console);

    let summary = match config.search {
        SearchKind::AStar => run_with(scenario, &config, AStarSearch, writer)?,
        SearchKind::Greedy => run_with(scenario, &config, GreedySearch, writer)?,
    };

    println!("{summary}");
    Ok(())
}

fn run_with<S, W>(scenario: Scenario, config: &RunConfig, search: S, writer: W) -> Result<RunSummary>
where
    S: PathSearch,
    W: EventWriter,
{
    let mut sim = SimBuilder::new(config.sim.clone(), scenario, search).build()?;
    let mut observer = OutputObserver::new(writer);
    let summary = sim.run(&mut observer)?;

    if let Some(e) = observer.take_error() {
        warn!(error = %e, outcome = %summary.outcome, "event output incomplete");
        return Err(e).context("writing event output");
    }
    Ok(summary)
}
