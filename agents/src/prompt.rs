// ═══════════════════════════════════════════════════════════════════════
// Prompt Seat — looks once, hides the card, passes the device on.
// The well-behaved player every front end is designed around.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::Seat;
use impostor_engine::{Action, Card, TurnView};

#[derive(Debug, Clone, Default)]
pub struct PromptSeat {
    card: Option<Card>,
}

impl PromptSeat {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Seat for PromptSeat {
    fn name(&self) -> &str { "Prompt" }

    fn decide(&mut self, view: &TurnView) -> Action {
        if !view.has_peeked {
            Action::Peek
        } else if view.is_card_visible {
            Action::Conceal
        } else {
            Action::Advance
        }
    }

    fn observe(&mut self, card: &Card) {
        self.card = Some(card.clone());
    }

    fn remembered(&self) -> Option<&Card> {
        self.card.as_ref()
    }
}
