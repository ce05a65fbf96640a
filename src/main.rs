use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use containers::SignatureVerifier;
use replay::{
    BeaconTransition, CommitmentVerifier, DirectorySource, FixtureLoader, ReplayConfig, Replayer,
    Scenario, USECASES,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Replays blocks across the phase0 to altair fork and checks state roots")]
struct Args {
    /// Directory holding state-{slot}.ssz and block-{slot}.json fixtures
    #[arg(short, long)]
    fixtures: Option<PathBuf>,

    /// YAML run configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run only the given scenarios (1-based, repeatable)
    #[arg(short, long)]
    scenario: Vec<usize>,

    /// Abort a scenario when a state root differs from its block's
    #[arg(long)]
    strict: bool,
}

fn selected_scenarios(filter: &[usize]) -> Result<Vec<Scenario>> {
    if filter.is_empty() {
        return Ok(USECASES.to_vec());
    }
    filter
        .iter()
        .map(|&number| match number.checked_sub(1).and_then(|index| USECASES.get(index)) {
            Some(scenario) => Ok(*scenario),
            None => bail!("no scenario {number}, expected 1..={}", USECASES.len()),
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ReplayConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ReplayConfig::default(),
    };
    if let Some(fixtures) = args.fixtures {
        config.fixtures_dir = fixtures;
    }
    config.strict_commitments |= args.strict;

    let scenarios = selected_scenarios(&args.scenario)?;

    info!(
        fixtures = %config.fixtures_dir.display(),
        fork_slot = config.chain.altair_fork_slot(),
        strict = config.strict_commitments,
        options = ?config.options,
        "Starting replay"
    );

    let mut replayer = Replayer::new(
        FixtureLoader::new(DirectorySource::new(&config.fixtures_dir), config.chain),
        BeaconTransition::new(SignatureVerifier::init()),
        config.options,
        CommitmentVerifier::new(config.strict_commitments),
    );

    let reports: Vec<_> = scenarios
        .iter()
        .map(|scenario| replayer.run(scenario))
        .collect();

    let completed = reports.iter().filter(|report| report.is_completed()).count();
    for report in &reports {
        info!(
            title = report.title,
            completed = report.is_completed(),
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            final_state_root = ?report.final_state_root.map(|root| root.to_string()),
            "Summary"
        );
    }
    info!(completed, total = reports.len(), "All scenarios attempted");

    Ok(())
}
