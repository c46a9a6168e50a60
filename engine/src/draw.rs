// ═══════════════════════════════════════════════════════════════════════
// Fair Draw — uniform, independent selection of word and impostor
//
// The word and the impostor come from two separate entropy streams, so
// the outcome of one draw carries no information about the other. With
// a ChaCha seed both streams share the key but use distinct stream ids.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::{GameError, RosterProblem};
use crate::types::{RoundAssignment, MIN_PLAYERS};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

const WORD_STREAM: u64 = 0;
const IMPOSTOR_STREAM: u64 = 1;

/// Source of uniformly distributed indices.
pub trait EntropySource {
    /// Returns an index in `0..bound`. Callers never pass `bound == 0`.
    fn below(&mut self, bound: usize) -> usize;
}

impl EntropySource for ChaCha8Rng {
    fn below(&mut self, bound: usize) -> usize {
        // gen_range rejects out-of-zone samples, so there is no modulo bias.
        self.gen_range(0..bound)
    }
}

/// Replays a fixed list of indices. Useful for forcing a specific word or
/// impostor in tests and demos. Values are reduced modulo `bound`; once the
/// script runs out every draw returns 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: VecDeque<usize>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        ScriptedSource { script: script.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl EntropySource for ScriptedSource {
    fn below(&mut self, bound: usize) -> usize {
        self.script.pop_front().map_or(0, |v| v % bound)
    }
}

// ── FairDraw ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FairDraw<S = ChaCha8Rng> {
    words: S,
    impostors: S,
}

impl FairDraw<ChaCha8Rng> {
    /// Reproducible draws: the same seed always yields the same rounds.
    pub fn seeded(seed: u64) -> Self {
        let mut words = ChaCha8Rng::seed_from_u64(seed);
        words.set_stream(WORD_STREAM);
        let mut impostors = ChaCha8Rng::seed_from_u64(seed);
        impostors.set_stream(IMPOSTOR_STREAM);
        FairDraw { words, impostors }
    }

    /// Draws seeded from the operating system, for live play.
    pub fn from_entropy() -> Self {
        FairDraw {
            words: ChaCha8Rng::from_entropy(),
            impostors: ChaCha8Rng::from_entropy(),
        }
    }
}

impl<S: EntropySource> FairDraw<S> {
    pub fn with_sources(words: S, impostors: S) -> Self {
        FairDraw { words, impostors }
    }

    /// Pick one word with probability `1 / words.len()`.
    pub fn draw_word<'a, T: AsRef<str>>(&mut self, words: &'a [T]) -> Result<&'a str, GameError> {
        if words.is_empty() {
            return Err(GameError::EmptyWordList);
        }
        let i = self.words.below(words.len());
        Ok(words[i].as_ref())
    }

    /// Pick the impostor seat, uniform over `0..player_count`.
    pub fn draw_impostor(&mut self, player_count: usize) -> Result<usize, GameError> {
        if player_count < MIN_PLAYERS {
            return Err(GameError::InvalidRoster(RosterProblem::TooFewPlayers {
                count: player_count,
                min: MIN_PLAYERS,
            }));
        }
        Ok(self.impostors.below(player_count))
    }

    /// Both draws for one round. Preconditions are checked before any
    /// entropy is consumed.
    pub fn draw_round<T: AsRef<str>>(
        &mut self,
        words: &[T],
        player_count: usize,
    ) -> Result<RoundAssignment, GameError> {
        if words.is_empty() {
            return Err(GameError::EmptyWordList);
        }
        if player_count < MIN_PLAYERS {
            return Err(GameError::InvalidRoster(RosterProblem::TooFewPlayers {
                count: player_count,
                min: MIN_PLAYERS,
            }));
        }
        let word = self.draw_word(words)?.to_string();
        let impostor = self.draw_impostor(player_count)?;
        Ok(RoundAssignment::new(word, impostor))
    }
}

// ── Goodness of fit ────────────────────────────────────────────────────

/// Pearson chi-square statistic of observed counts against a uniform
/// expectation.
pub fn chi_square_uniform(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    if counts.is_empty() || total == 0 {
        return 0.0;
    }
    let expected = total as f64 / counts.len() as f64;
    counts.iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum()
}

/// Upper critical value of the chi-square distribution with `dof` degrees
/// of freedom at significance 0.001 (Wilson–Hilferty approximation).
pub fn chi_square_critical_001(dof: usize) -> f64 {
    const Z_999: f64 = 3.090_232;
    if dof == 0 {
        return 0.0;
    }
    let k = dof as f64;
    let h = 2.0 / (9.0 * k);
    k * (1.0 - h + Z_999 * h.sqrt()).powi(3)
}
