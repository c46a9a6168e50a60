// ═══════════════════════════════════════════════════════════════════════
// Core types — phases, cards, and the per-round secret state
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 20;

/// Text shown on the impostor's card.
pub const IMPOSTOR_MARKER: &str = "IMPOSTOR";

// ── Phases ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No roster committed yet; names are still being edited.
    Idle,
    /// Roster accepted, waiting for a topic.
    Selecting,
    /// Cards are being handed out one player at a time.
    Revealing,
    /// Every player has seen their card. Terminal for the round.
    Discussing,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Selecting => write!(f, "selecting a topic"),
            Phase::Revealing => write!(f, "revealing cards"),
            Phase::Discussing => write!(f, "discussing"),
        }
    }
}

// ── Cards ──────────────────────────────────────────────────────────────

/// What a single player sees when they peek.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Word(String),
    Impostor,
}

impl Card {
    pub fn is_impostor(&self) -> bool {
        matches!(self, Card::Impostor)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Word(word) => write!(f, "{}", word),
            Card::Impostor => write!(f, "{}", IMPOSTOR_MARKER),
        }
    }
}

// ── Round state ────────────────────────────────────────────────────────

/// Result of the draw. Built once per round and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundAssignment {
    secret_word: String,
    impostor_index: usize,
}

impl RoundAssignment {
    pub(crate) fn new(secret_word: String, impostor_index: usize) -> Self {
        RoundAssignment { secret_word, impostor_index }
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn impostor_index(&self) -> usize {
        self.impostor_index
    }

    /// Card for the player at `index`.
    pub fn card_for(&self, index: usize) -> Card {
        if index == self.impostor_index {
            Card::Impostor
        } else {
            Card::Word(self.secret_word.clone())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealCursor {
    pub current_player_index: usize,
    pub has_peeked: bool,
    /// Transient: true only while the card is held open.
    pub is_card_visible: bool,
}

impl RevealCursor {
    pub fn start() -> Self {
        RevealCursor { current_player_index: 0, has_peeked: false, is_card_visible: false }
    }

    /// Hand the device to the next player.
    pub(crate) fn pass_to(&mut self, index: usize) {
        self.current_player_index = index;
        self.has_peeked = false;
        self.is_card_visible = false;
    }
}
