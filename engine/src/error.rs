// ═══════════════════════════════════════════════════════════════════════
// Errors — everything the engine can refuse to do
//
// All variants are locally recoverable: the engine is left exactly as it
// was before the rejected call.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::Phase;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a roster was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterProblem {
    TooFewPlayers { count: usize, min: usize },
    TooManyPlayers { count: usize, max: usize },
    /// Entry at this position is empty after trimming.
    BlankName { index: usize },
}

impl std::fmt::Display for RosterProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterProblem::TooFewPlayers { count, min } => {
                write!(f, "{} player(s), at least {} are needed", count, min)
            }
            RosterProblem::TooManyPlayers { count, max } => {
                write!(f, "{} players, at most {} can play", count, max)
            }
            RosterProblem::BlankName { index } => {
                write!(f, "player {} has a blank name", index + 1)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid roster: {0}")]
    InvalidRoster(RosterProblem),

    #[error("cannot {operation} while {phase}")]
    InvalidPhase { operation: &'static str, phase: Phase },

    #[error("topic {0:?} has no words yet, pick another one")]
    UnknownTopic(String),

    #[error("word list is empty")]
    EmptyWordList,

    #[error("view your card first before passing the device on")]
    NotReady,
}

impl GameError {
    /// `InvalidPhase` means the caller sequenced operations wrongly; the rest
    /// are ordinary user-facing conditions.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::InvalidPhase { .. })
    }
}

/// Why a topic catalog was refused at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A civilian card reading the impostor marker would be indistinguishable
    /// from the impostor card.
    #[error("topic {topic:?} lists the reserved word {word:?}")]
    ReservedWord { topic: String, word: String },
}
