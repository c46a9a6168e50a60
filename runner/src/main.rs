// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for pass-and-play rounds and fairness audits
// ═══════════════════════════════════════════════════════════════════════

mod play;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use impostor_audit::{audit, make_seats, run_round, AuditConfig, SeatKind};
use impostor_engine::{Catalog, FairDraw, RoundEngine, TopicCatalog};
use play::PassAndPlay;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "impostor", about = "Find the impostor: a pass-and-play party game")]
struct Cli {
    /// JSON topic catalog to use instead of the built-in topics
    #[arg(long, global = true, env = "IMPOSTOR_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play on this terminal, passing it from player to player
    Play {
        /// Fixed seed for reproducible rounds (default: OS entropy)
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Simulate a single round with scripted seats
    Simulate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value_t = 5)]
        players: usize,
        #[arg(short, long, default_value = "Video Games")]
        topic: String,
        /// Seat behaviour: "prompt", "random" or "mixed"
        #[arg(long, default_value = "random")]
        seats: SeatKind,
    },
    /// Simulate many rounds and test the draws for uniformity
    Audit {
        #[arg(short, long, default_value_t = 10_000)]
        rounds: u64,
        #[arg(short, long, default_value_t = 5)]
        players: usize,
        #[arg(short, long, default_value = "Video Games")]
        topic: String,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value = "prompt")]
        seats: SeatKind,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the available topics
    Topics,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(EnvFilter::DEFAULT_ENV))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Play { seed } => cmd_play(catalog, seed),
        Commands::Simulate { seed, players, topic, seats } => {
            cmd_simulate(&catalog, seed, players, &topic, seats)
        }
        Commands::Audit { rounds, players, topic, seed, seats, json } => {
            let config = AuditConfig { topic, players, rounds, seed, seats };
            cmd_audit(&catalog, &config, json)
        }
        Commands::Topics => cmd_topics(&catalog),
    }
}

/// Filter from the `var` environment variable, `info` when it is unset or
/// does not parse.
fn env_filter(var: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else { return Ok(Catalog::builtin()) };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog = Catalog::from_json(&json)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    tracing::info!(path = %path.display(), topics = catalog.topic_names().count(), "loaded topic catalog");
    Ok(catalog)
}

fn cmd_play(catalog: Catalog, seed: Option<u64>) -> Result<()> {
    let draw = match seed {
        Some(seed) => FairDraw::seeded(seed),
        None => FairDraw::from_entropy(),
    };
    let engine = RoundEngine::new(catalog, draw);
    let stdin = std::io::stdin();
    let mut game = PassAndPlay::new(engine, stdin.lock(), std::io::stdout());
    game.run()
}

fn cmd_simulate(catalog: &Catalog, seed: u64, players: usize, topic: &str, seats: SeatKind) -> Result<()> {
    println!("=== Simulated round: seed={}, players={}, topic={} ===\n", seed, players, topic);

    let mut engine = RoundEngine::new(catalog, FairDraw::seeded(seed));
    let names: Vec<String> = (1..=players).map(|i| format!("Seat {}", i)).collect();
    engine.start_selection(&names)?;
    let mut seats = make_seats(seats, players, seed);

    let result = run_round(&mut engine, &mut seats, topic, seed, 50_000)?;
    println!("  Secret word:      {}", result.word);
    println!("  Impostor:         {}", names[result.impostor_index]);
    println!("  Actions taken:    {}", result.actions);
    println!("  Refused advances: {}", result.refused_advances);
    Ok(())
}

fn cmd_audit(catalog: &Catalog, config: &AuditConfig, json: bool) -> Result<()> {
    let report = audit(catalog, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("=== Fairness audit: {} rounds, {} players, topic={} ===\n",
            report.rounds, report.players, report.topic);
        println!("  Impostor seats:");
        for (i, count) in report.impostor_counts.iter().enumerate() {
            let pct = *count as f64 / report.rounds.max(1) as f64 * 100.0;
            println!("    seat {:>2}: {:>7} ({:.2}%)", i + 1, count, pct);
        }
        println!("  chi-square {:.2} (critical {:.2})", report.impostor_chi_square, report.impostor_critical);
        println!();
        println!("  Words: chi-square {:.2} over {} words (critical {:.2})",
            report.word_chi_square, report.word_counts.len(), report.word_critical);
        println!("  Refused advances: {}", report.refused_advances);
        println!("\n  Result: {}", if report.passed() { "PASS" } else { "FAIL" });
    }

    if !report.passed() {
        bail!("draws deviate from uniform at p = 0.001");
    }
    Ok(())
}

fn cmd_topics(catalog: &Catalog) -> Result<()> {
    println!("{:<24} {:>6}", "Topic", "Words");
    println!("{}", "-".repeat(31));
    for name in catalog.topic_names() {
        match catalog.lookup(name) {
            Some(words) if !words.is_empty() => println!("{:<24} {:>6}", name, words.len()),
            _ => println!("{:<24} {:>6}", name, "soon"),
        }
    }
    Ok(())
}
