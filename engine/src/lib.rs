pub mod types;
pub mod error;
pub mod roster;
pub mod catalog;
pub mod draw;
pub mod engine;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use types::*;
pub use error::{CatalogError, GameError, RosterProblem};
pub use roster::{Roster, RosterDraft};
pub use catalog::{Catalog, Topic, TopicCatalog};
pub use draw::{EntropySource, FairDraw, ScriptedSource};
pub use engine::{Action, ActionOutcome, RoundEngine};
pub use visibility::{turn_view, TurnView};
