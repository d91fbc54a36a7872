//! damage_sim - Runs a scenario file of hits through the damage engine
//!
//! Usage:
//!   damage_sim <scenario.toml> [--json] [--seed N]

mod scenario;

use clap::Parser;
use damage_core::{damage_entity_with_rng, render_log, DamageError, DamageReport};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use scenario::{Scenario, ScenarioError};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum SimError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error("Hit {index} rejected: {source}")]
    Damage {
        index: usize,
        #[source]
        source: DamageError,
    },
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run a scenario of hits through the damage engine
#[derive(Parser, Debug)]
#[command(name = "damage_sim")]
#[command(about = "Resolve the hits of a scenario file and print the report log")]
struct Args {
    /// Scenario TOML file
    scenario: PathBuf,

    /// Print the reports as JSON instead of the rendered log
    #[arg(short, long)]
    json: bool,

    /// Override the scenario's random seed
    #[arg(short, long)]
    seed: Option<u64>,
}

fn run(args: &Args) -> Result<(), SimError> {
    let scenario = Scenario::load(&args.scenario)?;
    let mut roster = scenario.roster()?;
    let seed = args.seed.unwrap_or(scenario.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    info!(
        units = roster.len(),
        hits = scenario.hits.len(),
        seed,
        "scenario loaded"
    );

    let mut reports: Vec<DamageReport> = Vec::with_capacity(scenario.hits.len());
    for (index, request) in scenario.hits.iter().enumerate() {
        debug!(index, unit = %request.unit, damage = request.damage, "resolving hit");
        let report = damage_entity_with_rng(&mut roster, &scenario.rules, request, &mut rng)
            .map_err(|source| SimError::Damage { index, source })?;

        if !args.json {
            let target = roster
                .get(request.unit)
                .map_or_else(|| request.unit.to_string(), |u| u.name.clone());
            println!("=== Hit {}: {} damage to {} ===", index + 1, request.damage, target);
            for line in render_log(&report.events, &roster) {
                println!("  {}", line);
            }
            println!("  -> {}", report.summary());
            println!();
        }
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("=== Final state ===");
        for unit in roster.iter() {
            let status = if unit.is_destroyed() { "destroyed" } else { "active" };
            println!(
                "  {} ({}): armor {}, structure {}, {}",
                unit.name,
                unit.id,
                unit.total_armor(),
                unit.total_structure(),
                status
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
