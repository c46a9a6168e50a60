// ═══════════════════════════════════════════════════════════════════════
// Seat Trait — a simulated player holding the device during the reveal
//
// KEY DESIGN PRINCIPLE:
//   Seats receive a `TurnView` (not the engine), which only says whose
//   turn it is and whether the card has been looked at. The only way a
//   seat learns anything secret is the card handed back by its own peek.
// ═══════════════════════════════════════════════════════════════════════

use impostor_engine::{Action, Card, TurnView};

pub trait Seat: Send + Sync {
    /// Human-readable name for this behaviour (e.g. "Random", "Prompt").
    fn name(&self) -> &str;

    /// Next thing to do with the device.
    fn decide(&mut self, view: &TurnView) -> Action;

    /// Called with the seat's own card after every successful peek.
    fn observe(&mut self, card: &Card) {
        let _ = card;
    }

    /// Card this seat last saw, if it remembers one.
    fn remembered(&self) -> Option<&Card> {
        None
    }
}
