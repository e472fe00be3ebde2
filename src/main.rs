use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use supply_costing::io::reporting;
use supply_costing::simulation::scenarios::Scenario;
use supply_costing::TrialRunner;

/// Supply-chain cost simulation
///
/// Runs Monte Carlo trials over randomized cost structures and prints a
/// summary per scenario.
#[derive(Parser, Debug)]
#[command(name = "supply-costing")]
#[command(version, about, long_about = None)]
struct Args {
    /// Scenario to run. Runs every scenario when omitted.
    #[arg(value_enum)]
    scenario: Option<ScenarioArg>,

    /// Number of trials, overriding the scenario default
    #[arg(short = 't', long)]
    times: Option<usize>,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Write every trial result to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write one summary row per scenario to this CSV file
    #[arg(long)]
    summary_csv: Option<PathBuf>,

    /// Log every sampler draw
    #[arg(short, long)]
    verbose: bool,
}

/// Command-line names of the bundled scenarios.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ScenarioArg {
    CenterFixedCost,
    ProductVariableCost,
    ProductStorageCost,
    OptimumInventoryLevel,
    Sample,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::CenterFixedCost => Scenario::CenterFixedCost,
            ScenarioArg::ProductVariableCost => Scenario::ProductVariableCost,
            ScenarioArg::ProductStorageCost => Scenario::ProductStorageCost,
            ScenarioArg::OptimumInventoryLevel => Scenario::OptimumInventoryLevel,
            ScenarioArg::Sample => Scenario::Sample,
        }
    }
}

fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose)?;

    println!("=== Supply Chain Cost Simulation ===");

    // 1. PICK SCENARIOS
    let scenarios: Vec<Scenario> = match args.scenario {
        Some(scenario) => vec![scenario.into()],
        None => Scenario::ALL.to_vec(),
    };

    // 2. SEED THE SAMPLER
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "Sampler seeded");
    let mut rng = StdRng::seed_from_u64(seed);

    // 3. RUN TRIALS
    // A failing scenario stops everything, no partial summaries.
    let mut runners = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let mut runner = TrialRunner::from_config(scenario.config(args.times))?;
        runner.run(|| scenario.trial(&mut rng))?;
        runners.push(runner);
    }

    // 4. EXPORT RESULTS
    if let Some(path) = &args.csv {
        reporting::write_trial_log(path, &runners)
            .map_err(|e| anyhow::anyhow!("error writing CSV {}: {e}", path.display()))?;
    }
    if let Some(path) = &args.summary_csv {
        let summaries = runners
            .iter()
            .map(TrialRunner::summary)
            .collect::<Result<Vec<_>, _>>()?;
        reporting::write_summaries(path, &summaries)
            .map_err(|e| anyhow::anyhow!("error writing CSV {}: {e}", path.display()))?;
    }

    println!("\nSimulation Complete.");
    Ok(())
}
