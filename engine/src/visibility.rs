// ═══════════════════════════════════════════════════════════════════════
// Visibility — what anyone holding the device may see without peeking
//
// PUBLIC  — phase, roster, whose turn it is, whether they have looked
// PRIVATE — the current player's card, available only through `peek()`
// HIDDEN  — the secret word and impostor seat as a whole
//
// Seats and front ends receive a `TurnView`, never the engine's round
// state, so nothing secret can leak through rendering.
// ═══════════════════════════════════════════════════════════════════════

use crate::catalog::TopicCatalog;
use crate::draw::EntropySource;
use crate::engine::RoundEngine;
use crate::types::Phase;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnView {
    pub phase: Phase,
    pub player_count: usize,
    /// Set only while revealing.
    pub player_index: Option<usize>,
    pub player_name: Option<String>,
    pub has_peeked: bool,
    pub is_card_visible: bool,
}

impl TurnView {
    /// Whether `advance()` would be accepted right now.
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::Revealing && self.has_peeked
    }
}

pub fn turn_view<C: TopicCatalog, S: EntropySource>(engine: &RoundEngine<C, S>) -> TurnView {
    let cursor = engine.cursor();
    let current = engine.current_player();
    TurnView {
        phase: engine.phase(),
        player_count: engine.roster().map_or(0, |r| r.len()),
        player_index: current.map(|(i, _)| i),
        player_name: current.map(|(_, name)| name.to_string()),
        has_peeked: cursor.map_or(false, |c| c.has_peeked),
        is_card_visible: cursor.map_or(false, |c| c.is_card_visible),
    }
}
