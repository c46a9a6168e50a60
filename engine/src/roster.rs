// ═══════════════════════════════════════════════════════════════════════
// Roster — the ordered list of players for a round
//
// `RosterDraft` is the editable list shown while names are typed in;
// `Roster` is the validated, read-only list the engine plays with.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::{GameError, RosterProblem};
use crate::types::{MAX_PLAYERS, MIN_PLAYERS};
use std::sync::Arc;

/// Validated player list. Cheap to clone; the names are shared and never
/// change once accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Arc<[String]>,
}

impl Roster {
    /// Accepts 3 to 20 names. Names are trimmed; a blank name is rejected.
    pub fn new<I, S>(names: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .collect();

        if let Some(index) = names.iter().position(|n| n.is_empty()) {
            return Err(GameError::InvalidRoster(RosterProblem::BlankName { index }));
        }
        if names.len() < MIN_PLAYERS {
            return Err(GameError::InvalidRoster(RosterProblem::TooFewPlayers {
                count: names.len(),
                min: MIN_PLAYERS,
            }));
        }
        if names.len() > MAX_PLAYERS {
            return Err(GameError::InvalidRoster(RosterProblem::TooManyPlayers {
                count: names.len(),
                max: MAX_PLAYERS,
            }));
        }

        Ok(Roster { names: names.into() })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|n| n.as_str())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn last_index(&self) -> usize {
        self.names.len() - 1
    }
}

// ── Draft ──────────────────────────────────────────────────────────────

/// Names being entered before a game starts.
#[derive(Debug, Clone, Default)]
pub struct RosterDraft {
    names: Vec<String>,
}

impl RosterDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a player. Fails on a blank name or a full table.
    pub fn add(&mut self, name: &str) -> Result<(), GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidRoster(RosterProblem::BlankName {
                index: self.names.len(),
            }));
        }
        if self.names.len() >= MAX_PLAYERS {
            return Err(GameError::InvalidRoster(RosterProblem::TooManyPlayers {
                count: self.names.len() + 1,
                max: MAX_PLAYERS,
            }));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    /// Remove the player at `index` (e.g. after a typo).
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.names.len() {
            Some(self.names.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// "3 / 20 players" style counter.
    pub fn counter(&self) -> String {
        format!("{} / {} players", self.names.len(), MAX_PLAYERS)
    }

    pub fn finish(&self) -> Result<Roster, GameError> {
        Roster::new(&self.names)
    }
}

impl From<Roster> for RosterDraft {
    fn from(roster: Roster) -> Self {
        RosterDraft { names: roster.names.to_vec() }
    }
}
