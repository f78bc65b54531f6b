//! Headless Encounter Simulator
//!
//! Rolls one travel encounter per run for a fixed risk profile and plays it
//! out with the auto-pilot. Reports how often each encounter kind and
//! outcome came up.

use std::collections::BTreeMap;

use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use star_smuggler::core::choice::AutoPilot;
use star_smuggler::core::config::{GameConfig, ShipConfig};
use star_smuggler::core::events::GameEvent;
use star_smuggler::encounter::{run_random_encounter, EncounterOutcome};
use star_smuggler::entity::player::Stone;
use star_smuggler::game::GameSession;

#[derive(Parser, Debug)]
#[command(name = "encounter_sim")]
#[command(about = "Simulate travel encounters for a given heat/threat/stones profile")]
struct Args {
    /// Number of independent encounters
    #[arg(long, default_value_t = 10_000)]
    runs: u64,

    /// Base seed; run i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 0)]
    heat: u32,

    /// Cartel threat level
    #[arg(long, default_value_t = 0)]
    threat: u32,

    /// Stones held (0-6)
    #[arg(long, default_value_t = 0)]
    stones: usize,

    #[arg(long, default_value_t = 1)]
    speed: u32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

struct RunResult {
    kind: &'static str,
    outcome: EncounterOutcome,
    hp_lost: i32,
    heat_after: u32,
}

#[derive(Serialize)]
struct Report {
    runs: u64,
    seed: u64,
    heat: u32,
    threat: u32,
    stones: usize,
    speed: u32,
    kinds: BTreeMap<&'static str, u64>,
    outcomes: BTreeMap<&'static str, u64>,
    survival_rate: f64,
    mean_hp_lost: f64,
    mean_heat_after: f64,
}

fn simulate_one(args: &Args, seed: u64) -> RunResult {
    let config = GameConfig {
        seed: Some(seed),
        ship: ShipConfig {
            fuel: 10,
            speed: args.speed.max(1),
            ..ShipConfig::default()
        },
        ..GameConfig::default()
    };
    let mut game = GameSession::new(&config);
    game.player.heat = args.heat;
    game.player.cartel_threat_level = args.threat;
    for stone in Stone::ALL.iter().take(args.stones) {
        game.player.collect_stone(*stone);
    }

    let hp_before = game.player.hp;
    let outcome = run_random_encounter(&mut game, &mut AutoPilot);
    let kind = game
        .events
        .iter()
        .find_map(|e| match e {
            GameEvent::EncounterStarted { kind } => Some(kind.label()),
            _ => None,
        })
        .unwrap_or("none");

    RunResult {
        kind,
        outcome,
        hp_lost: hp_before - game.player.hp,
        heat_after: game.player.heat,
    }
}

fn build_report(args: &Args, seed: u64, results: &[RunResult]) -> Report {
    let mut kinds = BTreeMap::new();
    let mut outcomes = BTreeMap::new();
    for r in results {
        *kinds.entry(r.kind).or_insert(0) += 1;
        *outcomes.entry(r.outcome.label()).or_insert(0) += 1;
    }
    let n = results.len().max(1) as f64;
    let deaths = results
        .iter()
        .filter(|r| r.outcome == EncounterOutcome::GameOver)
        .count() as f64;

    Report {
        runs: results.len() as u64,
        seed,
        heat: args.heat,
        threat: args.threat,
        stones: args.stones,
        speed: args.speed,
        kinds,
        outcomes,
        survival_rate: 1.0 - deaths / n,
        mean_hp_lost: results.iter().map(|r| r.hp_lost as f64).sum::<f64>() / n,
        mean_heat_after: results.iter().map(|r| r.heat_after as f64).sum::<f64>() / n,
    }
}

fn print_text(report: &Report) {
    println!("Encounter Simulation");
    println!("====================");
    println!(
        "{} runs | seed {} | heat {} | threat {} | stones {} | speed {}",
        report.runs, report.seed, report.heat, report.threat, report.stones, report.speed
    );
    let n = report.runs.max(1) as f64;
    println!("\n--- Encounter kinds ---");
    for (kind, count) in &report.kinds {
        println!("{:<26} {:>7} ({:5.1}%)", kind, count, *count as f64 * 100.0 / n);
    }
    println!("\n--- Outcomes ---");
    for (outcome, count) in &report.outcomes {
        println!("{:<26} {:>7} ({:5.1}%)", outcome, count, *count as f64 * 100.0 / n);
    }
    println!("\nSurvival rate:   {:.1}%", report.survival_rate * 100.0);
    println!("Mean HP lost:    {:.1}", report.mean_hp_lost);
    println!("Mean heat after: {:.1}", report.mean_heat_after);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "star_smuggler=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(runs = args.runs, seed, "simulating encounters");

    let results: Vec<RunResult> = (0..args.runs)
        .into_par_iter()
        .map(|i| simulate_one(&args, seed.wrapping_add(i)))
        .collect();
    let report = build_report(&args, seed, &results);

    match args.format.as_str() {
        "text" => print_text(&report),
        _ => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to serialize report: {e}"),
        },
    }
}
