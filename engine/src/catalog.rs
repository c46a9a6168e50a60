// ═══════════════════════════════════════════════════════════════════════
// Topic catalog — topic names and their candidate secret words
// ═══════════════════════════════════════════════════════════════════════

use crate::error::CatalogError;
use crate::types::IMPOSTOR_MARKER;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Anything that can map a topic key to a list of candidate words.
pub trait TopicCatalog {
    /// `None` when the topic is unknown. An empty slice is possible and
    /// means the topic exists but has no words yet.
    fn lookup(&self, topic: &str) -> Option<&[String]>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default)]
    pub words: Vec<String>,
}

impl Topic {
    pub fn is_playable(&self) -> bool {
        !self.words.is_empty()
    }

    /// Refuses the impostor marker as a word and keeps only the first copy
    /// of a repeated word, so every distinct word is equally likely.
    fn checked(mut self) -> Result<Self, CatalogError> {
        let reserved = self.words.iter().find(|w| w.trim().eq_ignore_ascii_case(IMPOSTOR_MARKER));
        if let Some(word) = reserved {
            let word = word.clone();
            return Err(CatalogError::ReservedWord { topic: self.name, word });
        }

        let listed = self.words.len();
        let mut seen = HashSet::new();
        self.words.retain(|w| seen.insert(w.clone()));
        if self.words.len() < listed {
            warn!(topic = %self.name, dropped = listed - self.words.len(), "dropped repeated words");
        }
        Ok(self)
    }
}

/// Ordered list of topics, in the order they are offered to players.
/// Only built through [`Catalog::new`], which checks every word list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    topics: Vec<Topic>,
}

#[derive(Deserialize)]
struct RawCatalog {
    topics: Vec<Topic>,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        Catalog::new(raw.topics)
    }
}

impl Catalog {
    pub fn new(topics: Vec<Topic>) -> Result<Self, CatalogError> {
        let topics = topics.into_iter().map(Topic::checked).collect::<Result<_, _>>()?;
        Ok(Catalog { topics })
    }

    /// Parse a catalog from JSON: `{"topics":[{"name":..,"words":[..]}]}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// The catalog that ships with the game. Only some topics have words;
    /// the others are listed so players can see what is coming.
    pub fn builtin() -> Self {
        fn topic(name: &str, words: &[&str]) -> Topic {
            Topic {
                name: name.to_string(),
                words: words.iter().map(|w| w.to_string()).collect(),
            }
        }

        // Fixed lists, already free of repeats and of the impostor marker.
        Catalog {
            topics: vec![
                topic("Video Games", VIDEO_GAMES),
                topic("Movies & Series", MOVIES_SERIES),
                topic("Objects", &[]),
                topic("Food", &[]),
                topic("Animals", &[]),
                topic("Professions", &[]),
                topic("Superheroes", &[]),
            ],
        }
    }
}

impl TopicCatalog for Catalog {
    fn lookup(&self, topic: &str) -> Option<&[String]> {
        self.get(topic).map(|t| t.words.as_slice())
    }
}

impl<T: TopicCatalog + ?Sized> TopicCatalog for &T {
    fn lookup(&self, topic: &str) -> Option<&[String]> {
        (**self).lookup(topic)
    }
}

// ── Word lists ─────────────────────────────────────────────────────────

const VIDEO_GAMES: &[&str] = &[
    "Minecraft",
    "Fortnite",
    "Tetris",
    "Pac-Man",
    "Super Mario",
    "The Legend of Zelda",
    "Pokémon",
    "Grand Theft Auto",
    "The Sims",
    "Counter-Strike",
    "League of Legends",
    "Street Fighter",
    "Sonic",
    "Among Us",
    "God of War",
    "FIFA",
    "Call of Duty",
    "Roblox",
    "Halo",
    "Dark Souls",
];

const MOVIES_SERIES: &[&str] = &[
    "Titanic",
    "Star Wars",
    "Harry Potter",
    "Friends",
    "Breaking Bad",
    "The Lion King",
    "Stranger Things",
    "Game of Thrones",
    "Toy Story",
    "The Matrix",
    "Jurassic Park",
    "The Office",
    "Avatar",
    "Shrek",
    "Frozen",
    "The Simpsons",
    "Back to the Future",
    "The Godfather",
    "Squid Game",
    "Lord of the Rings",
];
