// ═══════════════════════════════════════════════════════════════════════
// Round Engine — lifecycle of a single impostor round
//
// Architecture:
//   The engine is a pure state machine. It never does I/O and never
//   decides anything on its own; the presentation layer calls one
//   operation at a time and renders whatever comes back.
//
// Flow:
//   1. `start_selection(names)`   Idle → Selecting
//   2. `choose_topic(topic)`      Selecting → Revealing (word + impostor drawn)
//   3. per player: `peek()` / `conceal()` any number of times, then
//      `advance()` hands the device on
//   4. after the last player `advance()` returns Discussing
//   5. `reset()` goes back to Selecting for another round
//
// Every operation checks all of its preconditions before touching state,
// so a rejected call leaves the engine exactly as it was.
// ═══════════════════════════════════════════════════════════════════════

use crate::catalog::{Catalog, TopicCatalog};
use crate::draw::{EntropySource, FairDraw};
use crate::error::GameError;
use crate::roster::Roster;
use crate::types::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Things a player can do with the device during the reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Peek,
    Conceal,
    Advance,
}

/// What came back from `apply_action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The current player's own card.
    Shown(Card),
    Hidden,
    Moved(Phase),
}

/// Phase-specific data. The assignment and cursor only exist while cards
/// are being revealed.
#[derive(Debug, Clone)]
enum RoundState {
    Idle,
    Selecting {
        roster: Roster,
    },
    Revealing {
        roster: Roster,
        assignment: RoundAssignment,
        cursor: RevealCursor,
    },
    Discussing {
        roster: Roster,
    },
}

pub struct RoundEngine<C = Catalog, S = ChaCha8Rng> {
    catalog: C,
    draw: FairDraw<S>,
    state: RoundState,
    rounds_drawn: u64,
}

impl RoundEngine<Catalog, ChaCha8Rng> {
    /// Built-in topics with reproducible draws.
    pub fn seeded(seed: u64) -> Self {
        RoundEngine::new(Catalog::builtin(), FairDraw::seeded(seed))
    }
}

impl<C: TopicCatalog, S: EntropySource> RoundEngine<C, S> {
    pub fn new(catalog: C, draw: FairDraw<S>) -> Self {
        RoundEngine {
            catalog,
            draw,
            state: RoundState::Idle,
            rounds_drawn: 0,
        }
    }

    // ── Read-only accessors ────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        match self.state {
            RoundState::Idle => Phase::Idle,
            RoundState::Selecting { .. } => Phase::Selecting,
            RoundState::Revealing { .. } => Phase::Revealing,
            RoundState::Discussing { .. } => Phase::Discussing,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn roster(&self) -> Option<&Roster> {
        match &self.state {
            RoundState::Idle => None,
            RoundState::Selecting { roster }
            | RoundState::Revealing { roster, .. }
            | RoundState::Discussing { roster } => Some(roster),
        }
    }

    /// Non-secret reveal progress, only while revealing.
    pub fn cursor(&self) -> Option<RevealCursor> {
        match &self.state {
            RoundState::Revealing { cursor, .. } => Some(*cursor),
            _ => None,
        }
    }

    /// Index and name of the player who should be holding the device.
    pub fn current_player(&self) -> Option<(usize, &str)> {
        match &self.state {
            RoundState::Revealing { roster, cursor, .. } => {
                let i = cursor.current_player_index;
                roster.name(i).map(|name| (i, name))
            }
            _ => None,
        }
    }

    /// Number of rounds drawn by this engine so far.
    pub fn rounds_drawn(&self) -> u64 {
        self.rounds_drawn
    }

    pub(crate) fn assignment(&self) -> Option<&RoundAssignment> {
        match &self.state {
            RoundState::Revealing { assignment, .. } => Some(assignment),
            _ => None,
        }
    }

    // ── Operations ─────────────────────────────────────────────────────

    /// Commit a roster and move to topic selection.
    pub fn start_selection<I, N>(&mut self, names: I) -> Result<(), GameError>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        self.expect_phase("start selection", Phase::Idle)?;
        let roster = Roster::new(names)?;
        self.commit_roster(roster);
        Ok(())
    }

    /// Same as `start_selection` for a roster that is already validated.
    pub fn start_with(&mut self, roster: Roster) -> Result<(), GameError> {
        self.expect_phase("start selection", Phase::Idle)?;
        self.commit_roster(roster);
        Ok(())
    }

    fn commit_roster(&mut self, roster: Roster) {
        debug!(players = roster.len(), "roster accepted, selecting topic");
        self.state = RoundState::Selecting { roster };
    }

    /// Draw the secret word and the impostor for `topic` and start the
    /// reveal at the first player. Returns the new phase; the secret itself
    /// is only ever exposed through `peek`.
    pub fn choose_topic(&mut self, topic: &str) -> Result<Phase, GameError> {
        let phase = self.phase();
        let RoundState::Selecting { roster } = &self.state else {
            return Err(Self::rejected("choose a topic", phase));
        };

        let words = match self.catalog.lookup(topic) {
            Some(words) if !words.is_empty() => words,
            _ => {
                debug!(topic, "topic has no usable words");
                return Err(GameError::UnknownTopic(topic.to_string()));
            }
        };

        let assignment = self.draw.draw_round(words, roster.len())?;
        let roster = roster.clone();
        self.rounds_drawn += 1;
        debug!(topic, players = roster.len(), round = self.rounds_drawn, "round drawn, revealing");

        self.state = RoundState::Revealing {
            roster,
            assignment,
            cursor: RevealCursor::start(),
        };
        Ok(Phase::Revealing)
    }

    /// Show the current player's card.
    pub fn peek(&mut self) -> Result<Card, GameError> {
        let phase = self.phase();
        let RoundState::Revealing { assignment, cursor, .. } = &mut self.state else {
            return Err(Self::rejected("peek", phase));
        };
        cursor.is_card_visible = true;
        cursor.has_peeked = true;
        Ok(assignment.card_for(cursor.current_player_index))
    }

    /// Hide the card again. Safe to call repeatedly.
    pub fn conceal(&mut self) -> Result<(), GameError> {
        let phase = self.phase();
        let RoundState::Revealing { cursor, .. } = &mut self.state else {
            return Err(Self::rejected("conceal", phase));
        };
        cursor.is_card_visible = false;
        Ok(())
    }

    /// Pass the device to the next player, or end the reveal after the
    /// last one. The current player must have peeked first.
    pub fn advance(&mut self) -> Result<Phase, GameError> {
        let phase = self.phase();
        let RoundState::Revealing { roster, cursor, .. } = &mut self.state else {
            return Err(Self::rejected("advance", phase));
        };

        if !cursor.has_peeked {
            debug!(player = cursor.current_player_index, "advance before peek");
            return Err(GameError::NotReady);
        }

        if cursor.current_player_index < roster.last_index() {
            cursor.pass_to(cursor.current_player_index + 1);
            debug!(player = cursor.current_player_index, "device passed on");
            return Ok(Phase::Revealing);
        }

        let roster = roster.clone();
        debug!("all cards seen, discussion begins");
        self.state = RoundState::Discussing { roster };
        Ok(Phase::Discussing)
    }

    /// Abandon the current round and go back to topic selection with the
    /// same players. From Idle this does nothing.
    pub fn reset(&mut self) -> Phase {
        let state = std::mem::replace(&mut self.state, RoundState::Idle);
        self.state = match state {
            RoundState::Idle => RoundState::Idle,
            RoundState::Selecting { roster }
            | RoundState::Revealing { roster, .. }
            | RoundState::Discussing { roster } => RoundState::Selecting { roster },
        };
        debug!(phase = %self.phase(), "reset");
        self.phase()
    }

    /// Give the roster back to the editor and return to Idle, discarding
    /// any round in progress.
    pub fn release_roster(&mut self) -> Option<Roster> {
        let state = std::mem::replace(&mut self.state, RoundState::Idle);
        match state {
            RoundState::Idle => None,
            RoundState::Selecting { roster }
            | RoundState::Revealing { roster, .. }
            | RoundState::Discussing { roster } => {
                debug!("roster released, back to editing");
                Some(roster)
            }
        }
    }

    /// Dispatch a reveal action to `peek`, `conceal` or `advance`.
    pub fn apply_action(&mut self, action: Action) -> Result<ActionOutcome, GameError> {
        match action {
            Action::Peek => self.peek().map(ActionOutcome::Shown),
            Action::Conceal => self.conceal().map(|_| ActionOutcome::Hidden),
            Action::Advance => self.advance().map(ActionOutcome::Moved),
        }
    }

    // ── Helpers ────────────────────────────────────────────────────────

    fn expect_phase(&self, operation: &'static str, expected: Phase) -> Result<(), GameError> {
        let phase = self.phase();
        if phase == expected {
            Ok(())
        } else {
            Err(Self::rejected(operation, phase))
        }
    }

    fn rejected(operation: &'static str, phase: Phase) -> GameError {
        warn!(operation, %phase, "operation not allowed in this phase");
        GameError::InvalidPhase { operation, phase }
    }
}
