// ═══════════════════════════════════════════════════════════════════════
// Round Runner — plays one complete headless round with seats
// ═══════════════════════════════════════════════════════════════════════

use impostor_agents::Seat;
use impostor_engine::{
    turn_view, ActionOutcome, Card, EntropySource, GameError, Phase, RoundEngine, TopicCatalog,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("{seats} seats for {players} players")]
    SeatMismatch { seats: usize, players: usize },

    #[error("round exceeded {0} actions without finishing")]
    TooManyActions(usize),

    #[error("round invariant broken: {0}")]
    InvariantBroken(String),

    #[error("an audit needs at least one round")]
    NoRounds,
}

/// What one simulated round looked like from the seats' side.
#[derive(Debug, Clone, Serialize)]
pub struct RoundResult {
    pub seed: u64,
    pub player_count: usize,
    pub impostor_index: usize,
    pub word: String,
    pub actions: usize,
    /// `advance` attempts refused because the player had not looked yet.
    pub refused_advances: usize,
}

/// Choose `topic` and let the seats walk the reveal to the end.
///
/// The engine must already be in `Selecting`. The impostor seat and the
/// word are reconstructed only from what the seats themselves saw, then
/// checked: exactly one impostor, one shared word, and a stable card per
/// player across repeated peeks.
pub fn run_round<C: TopicCatalog, S: EntropySource>(
    engine: &mut RoundEngine<C, S>,
    seats: &mut [Box<dyn Seat>],
    topic: &str,
    seed: u64,
    max_actions: usize, // safety limit against seats that never advance
) -> Result<RoundResult, AuditError> {
    let players = engine.roster().map_or(0, |r| r.len());
    if seats.len() != players {
        return Err(AuditError::SeatMismatch { seats: seats.len(), players });
    }

    engine.choose_topic(topic)?;

    let mut cards: Vec<Option<Card>> = vec![None; players];
    let mut actions = 0;
    let mut refused_advances = 0;

    while engine.phase() == Phase::Revealing {
        let view = turn_view(engine);
        let index = view.player_index.ok_or_else(|| {
            AuditError::InvariantBroken("revealing without a current player".to_string())
        })?;

        let action = seats[index].decide(&view);
        actions += 1;
        if actions > max_actions {
            return Err(AuditError::TooManyActions(max_actions));
        }

        match engine.apply_action(action) {
            Ok(ActionOutcome::Shown(card)) => {
                if let Some(previous) = &cards[index] {
                    if previous != &card {
                        return Err(AuditError::InvariantBroken(format!(
                            "player {} saw two different cards", index
                        )));
                    }
                }
                seats[index].observe(&card);
                cards[index] = Some(card);
            }
            Ok(_) => {}
            Err(GameError::NotReady) => refused_advances += 1,
            Err(e) => return Err(e.into()),
        }
    }

    summarize(cards, seed, actions, refused_advances)
}

fn summarize(
    cards: Vec<Option<Card>>,
    seed: u64,
    actions: usize,
    refused_advances: usize,
) -> Result<RoundResult, AuditError> {
    let player_count = cards.len();
    let mut impostors = Vec::new();
    let mut word: Option<String> = None;

    for (i, card) in cards.into_iter().enumerate() {
        match card {
            None => {
                return Err(AuditError::InvariantBroken(format!(
                    "player {} passed the device without looking", i
                )))
            }
            Some(Card::Impostor) => impostors.push(i),
            Some(Card::Word(w)) => match &word {
                Some(seen) if *seen != w => {
                    return Err(AuditError::InvariantBroken(format!(
                        "players saw different words ({:?} and {:?})", seen, w
                    )))
                }
                Some(_) => {}
                None => word = Some(w),
            },
        }
    }

    if impostors.len() != 1 {
        return Err(AuditError::InvariantBroken(format!(
            "{} impostors instead of one", impostors.len()
        )));
    }

    Ok(RoundResult {
        seed,
        player_count,
        impostor_index: impostors[0],
        word: word.unwrap_or_default(),
        actions,
        refused_advances,
    })
}
