// ═══════════════════════════════════════════════════════════════════════
// Fairness Audit — many simulated rounds, chi-square over the outcomes
//
// Every round runs on its own engine with a seed derived from the audit
// seed, so the audit is reproducible and rounds can run in parallel.
// ═══════════════════════════════════════════════════════════════════════

use crate::runner::{run_round, AuditError, RoundResult};
use impostor_agents::{PromptSeat, RandomSeat, Seat};
use impostor_engine::draw::{chi_square_critical_001, chi_square_uniform};
use impostor_engine::{Catalog, FairDraw, GameError, RoundEngine, TopicCatalog};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

const MAX_ACTIONS_PER_ROUND: usize = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatKind {
    Prompt,
    Random,
    /// Alternate prompt and random seats around the table.
    Mixed,
}

impl std::str::FromStr for SeatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prompt" => Ok(SeatKind::Prompt),
            "random" => Ok(SeatKind::Random),
            "mixed" => Ok(SeatKind::Mixed),
            other => Err(format!("unknown seat kind {:?} (prompt, random, mixed)", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub topic: String,
    pub players: usize,
    pub rounds: u64,
    pub seed: u64,
    pub seats: SeatKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct FairnessReport {
    pub topic: String,
    pub players: usize,
    pub rounds: u64,
    pub seed: u64,
    pub impostor_counts: Vec<u64>,
    pub word_counts: BTreeMap<String, u64>,
    pub impostor_chi_square: f64,
    pub impostor_critical: f64,
    pub word_chi_square: f64,
    pub word_critical: f64,
    pub total_actions: u64,
    pub refused_advances: u64,
}

impl FairnessReport {
    /// True when neither distribution deviates from uniform at p = 0.001.
    pub fn passed(&self) -> bool {
        let words_ok = self.word_counts.len() < 2 || self.word_chi_square < self.word_critical;
        self.impostor_chi_square < self.impostor_critical && words_ok
    }
}

pub fn make_seats(kind: SeatKind, count: usize, seed: u64) -> Vec<Box<dyn Seat>> {
    (0..count)
        .map(|i| {
            let seat_seed = seed.wrapping_add(i as u64);
            let seat: Box<dyn Seat> = match kind {
                SeatKind::Prompt => Box::new(PromptSeat::new()),
                SeatKind::Random => Box::new(RandomSeat::new(seat_seed)),
                SeatKind::Mixed => {
                    if i % 2 == 0 {
                        Box::new(PromptSeat::new())
                    } else {
                        Box::new(RandomSeat::new(seat_seed))
                    }
                }
            };
            seat
        })
        .collect()
}

fn round_seed(audit_seed: u64, round: u64) -> u64 {
    audit_seed.wrapping_add(round.wrapping_mul(1000))
}

/// Play one round on a fresh engine.
pub fn simulate_round(
    catalog: &Catalog,
    config: &AuditConfig,
    round: u64,
) -> Result<RoundResult, AuditError> {
    let seed = round_seed(config.seed, round);
    let mut engine = RoundEngine::new(catalog, FairDraw::seeded(seed));
    let names: Vec<String> = (1..=config.players).map(|i| format!("Seat {}", i)).collect();
    engine.start_selection(&names)?;

    let mut seats = make_seats(config.seats, config.players, seed);
    run_round(&mut engine, &mut seats, &config.topic, seed, MAX_ACTIONS_PER_ROUND)
}

/// Run the whole audit in parallel and test both draws for uniformity.
pub fn audit(catalog: &Catalog, config: &AuditConfig) -> Result<FairnessReport, AuditError> {
    if config.rounds == 0 {
        return Err(AuditError::NoRounds);
    }
    let words = match catalog.lookup(&config.topic) {
        Some(words) if !words.is_empty() => words,
        _ => return Err(GameError::UnknownTopic(config.topic.clone()).into()),
    };

    info!(topic = %config.topic, players = config.players, rounds = config.rounds, "starting fairness audit");

    let results: Vec<RoundResult> = (0..config.rounds)
        .into_par_iter()
        .map(|round| simulate_round(catalog, config, round))
        .collect::<Result<_, _>>()?;

    let mut impostor_counts = vec![0u64; config.players];
    let mut word_counts: BTreeMap<String, u64> = words.iter().map(|w| (w.clone(), 0)).collect();
    let mut total_actions = 0u64;
    let mut refused_advances = 0u64;

    for result in &results {
        impostor_counts[result.impostor_index] += 1;
        *word_counts.entry(result.word.clone()).or_insert(0) += 1;
        total_actions += result.actions as u64;
        refused_advances += result.refused_advances as u64;
    }
    debug!(total_actions, refused_advances, "rounds complete");

    let word_values: Vec<u64> = word_counts.values().copied().collect();
    let report = FairnessReport {
        topic: config.topic.clone(),
        players: config.players,
        rounds: config.rounds,
        seed: config.seed,
        impostor_chi_square: chi_square_uniform(&impostor_counts),
        impostor_critical: chi_square_critical_001(config.players.saturating_sub(1)),
        word_chi_square: chi_square_uniform(&word_values),
        word_critical: chi_square_critical_001(word_values.len().saturating_sub(1)),
        impostor_counts,
        word_counts,
        total_actions,
        refused_advances,
    };

    info!(passed = report.passed(), impostor_chi_square = report.impostor_chi_square,
        word_chi_square = report.word_chi_square, "fairness audit finished");
    Ok(report)
}
