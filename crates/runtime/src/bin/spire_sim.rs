//! Runs a scenario file to completion and prints the result as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use spire_content::{ContentFactory, ContentRegistry};
use spire_core::Policy;
use spire_runtime::{
    AttackFirstPolicy, FirstLegalPolicy, GreedySearchPolicy, PolicyKind, RandomPolicy, Runner,
    RunnerConfig, Scenario, logging,
};

/// Deterministic Watcher combat simulator
#[derive(Parser)]
#[command(name = "spire-sim")]
#[command(version)]
struct Cli {
    /// Scenario file (RON)
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Content directory with cards.ron, enemies.ron and config.toml
    /// (defaults to the built-in catalogs)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Policy that picks the player's actions
    #[arg(short, long, value_enum, default_value = "attack-first")]
    policy: PolicyKind,

    /// Seed for the random and greedy policies
    #[arg(long, default_value_t = 0)]
    policy_seed: i64,

    /// Override the configured turn cap
    #[arg(long)]
    turn_cap: Option<u32>,

    /// Log a summary at the start of every turn (visible with RUST_LOG=debug)
    #[arg(long)]
    turn_snapshots: bool,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let registry = match &cli.data_dir {
        Some(dir) => ContentFactory::new(dir).load_registry()?,
        None => ContentRegistry::builtin()?,
    };
    let scenario = Scenario::load_from_file(&cli.scenario)
        .with_context(|| format!("Failed to load {}", cli.scenario.display()))?;

    let mut config = RunnerConfig::from_combat_config(&registry.config)
        .with_turn_snapshots(cli.turn_snapshots);
    if let Some(cap) = cli.turn_cap {
        config = config.with_turn_cap(cap);
    }
    let engine = registry.engine();
    let runner = Runner::new(engine, &config);

    let mut policy: Box<dyn Policy + '_> = match cli.policy {
        PolicyKind::AttackFirst => Box::new(AttackFirstPolicy),
        PolicyKind::FirstLegal => Box::new(FirstLegalPolicy),
        PolicyKind::Random => Box::new(RandomPolicy::new(cli.policy_seed)),
        PolicyKind::Greedy => Box::new(GreedySearchPolicy::new(engine, cli.policy_seed)),
    };

    let report = runner.run(&scenario.combat_setup()?, policy.as_mut())?;
    let output = serde_json::json!({
        "scenario": scenario.name,
        "result": report.result,
        "damage_taken": report.damage_taken,
        "actions": report.actions,
        "final_state": engine.observe(&report.combat),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
