// ═══════════════════════════════════════════════════════════════════════
// Random Seat — fidgets with the card and sometimes tries to pass the
// device on before looking. Exercises the engine's guards.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::Seat;
use impostor_engine::{Action, Card, TurnView};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct RandomSeat {
    rng: ChaCha8Rng,
    card: Option<Card>,
    /// Chance of trying `advance` before peeking.
    impatience: f64,
}

impl RandomSeat {
    pub fn new(seed: u64) -> Self {
        RandomSeat {
            rng: ChaCha8Rng::seed_from_u64(seed),
            card: None,
            impatience: 0.3,
        }
    }

    pub fn with_impatience(mut self, impatience: f64) -> Self {
        self.impatience = impatience.clamp(0.0, 1.0);
        self
    }
}

impl Seat for RandomSeat {
    fn name(&self) -> &str { "Random" }

    fn decide(&mut self, view: &TurnView) -> Action {
        if !view.has_peeked {
            if self.rng.gen_bool(self.impatience) {
                return Action::Advance;
            }
            return Action::Peek;
        }
        if view.is_card_visible {
            // Hold it open a little longer, or let go.
            return if self.rng.gen_bool(0.3) { Action::Peek } else { Action::Conceal };
        }
        match self.rng.gen_range(0..4) {
            0 => Action::Peek,
            1 => Action::Conceal,
            _ => Action::Advance,
        }
    }

    fn observe(&mut self, card: &Card) {
        self.card = Some(card.clone());
    }

    fn remembered(&self) -> Option<&Card> {
        self.card.as_ref()
    }
}
