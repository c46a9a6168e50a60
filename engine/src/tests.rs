// ═══════════════════════════════════════════════════════════════════════
// Test suite for the round engine and fair draw
// ═══════════════════════════════════════════════════════════════════════

use crate::catalog::{Catalog, Topic};
use crate::draw::{chi_square_critical_001, chi_square_uniform, FairDraw, ScriptedSource};
use crate::engine::RoundEngine;
use crate::error::{GameError, RosterProblem};
use crate::types::*;
use crate::visibility::turn_view;

// ── Helpers ────────────────────────────────────────────────────────────

fn fruit_catalog() -> Catalog {
    Catalog::new(vec![
        Topic {
            name: "Fruit".to_string(),
            words: ["Banana", "Kiwi", "Mango", "Pear", "Plum"].iter().map(|w| w.to_string()).collect(),
        },
        Topic { name: "Single".to_string(), words: vec!["Banana".to_string()] },
        Topic { name: "Soon".to_string(), words: vec![] },
    ])
    .unwrap()
}

fn seeded_engine(seed: u64) -> RoundEngine {
    RoundEngine::new(fruit_catalog(), FairDraw::seeded(seed))
}

/// Engine whose first draw picks word `word` and impostor seat `impostor`.
fn scripted_engine(word: usize, impostor: usize) -> RoundEngine<Catalog, ScriptedSource> {
    RoundEngine::new(
        fruit_catalog(),
        FairDraw::with_sources(ScriptedSource::new([word]), ScriptedSource::new([impostor])),
    )
}

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Player {}", i + 1)).collect()
}

/// Peek every player in turn, returning what each one saw.
fn reveal_all<C: crate::TopicCatalog, S: crate::EntropySource>(
    engine: &mut RoundEngine<C, S>,
) -> Vec<Card> {
    let mut seen = Vec::new();
    loop {
        seen.push(engine.peek().unwrap());
        engine.conceal().unwrap();
        if engine.advance().unwrap() == Phase::Discussing {
            return seen;
        }
    }
}

// ── Roster validation ──────────────────────────────────────────────────

#[test]
fn every_valid_roster_size_starts_and_draws_in_range() {
    for n in MIN_PLAYERS..=MAX_PLAYERS {
        for seed in 0..20 {
            let mut engine = seeded_engine(seed * 31 + n as u64);
            engine.start_selection(names(n)).unwrap();
            assert_eq!(engine.phase(), Phase::Selecting);
            engine.choose_topic("Fruit").unwrap();
            let impostor = engine.assignment().unwrap().impostor_index();
            assert!(impostor < n, "n={} impostor={}", n, impostor);
        }
    }
}

#[test]
fn two_players_are_rejected() {
    let mut engine = seeded_engine(1);
    let err = engine.start_selection(["Ana", "Bob"]).unwrap_err();
    assert_eq!(err, GameError::InvalidRoster(RosterProblem::TooFewPlayers { count: 2, min: 3 }));
    assert_eq!(engine.phase(), Phase::Idle);
}

#[test]
fn blank_and_oversized_rosters_are_rejected() {
    let mut engine = seeded_engine(1);
    assert!(matches!(
        engine.start_selection(["Ana", "", "Cid"]),
        Err(GameError::InvalidRoster(RosterProblem::BlankName { index: 1 }))
    ));
    assert!(matches!(
        engine.start_selection(names(21)),
        Err(GameError::InvalidRoster(RosterProblem::TooManyPlayers { .. }))
    ));
    assert_eq!(engine.phase(), Phase::Idle);
}

#[test]
fn start_selection_twice_is_a_phase_error() {
    let mut engine = seeded_engine(1);
    engine.start_selection(names(4)).unwrap();
    let err = engine.start_selection(names(5)).unwrap_err();
    assert_eq!(err, GameError::InvalidPhase { operation: "start selection", phase: Phase::Selecting });
    assert_eq!(engine.roster().unwrap().len(), 4);
}

// ── Topic selection ────────────────────────────────────────────────────

#[test]
fn unknown_and_empty_topics_stay_in_selecting() {
    let mut engine = scripted_engine(0, 2);
    engine.start_selection(names(3)).unwrap();

    assert_eq!(engine.choose_topic("Cars"), Err(GameError::UnknownTopic("Cars".to_string())));
    assert_eq!(engine.phase(), Phase::Selecting);
    assert_eq!(engine.choose_topic("Soon"), Err(GameError::UnknownTopic("Soon".to_string())));
    assert_eq!(engine.phase(), Phase::Selecting);

    // The failed attempts consumed no entropy: the script still applies.
    engine.choose_topic("Fruit").unwrap();
    let assignment = engine.assignment().unwrap();
    assert_eq!(assignment.secret_word(), "Banana");
    assert_eq!(assignment.impostor_index(), 2);
    assert_eq!(engine.rounds_drawn(), 1);
}

#[test]
fn choose_topic_requires_selecting() {
    let mut engine = seeded_engine(3);
    assert!(matches!(
        engine.choose_topic("Fruit"),
        Err(GameError::InvalidPhase { phase: Phase::Idle, .. })
    ));

    engine.start_selection(names(3)).unwrap();
    engine.choose_topic("Fruit").unwrap();
    let before = engine.assignment().cloned();
    assert!(matches!(
        engine.choose_topic("Fruit"),
        Err(GameError::InvalidPhase { phase: Phase::Revealing, .. })
    ));
    assert_eq!(engine.assignment().cloned(), before, "no redraw mid-round");
}

#[test]
fn banana_scenario() {
    for seed in 0..50 {
        let mut engine = seeded_engine(seed);
        engine.start_selection(["Ana", "Bob", "Cid"]).unwrap();
        engine.choose_topic("Single").unwrap();
        let seen = reveal_all(&mut engine);
        assert_eq!(seen.len(), 3);
        assert_eq!(seen.iter().filter(|c| c.is_impostor()).count(), 1);
        for card in seen.iter().filter(|c| !c.is_impostor()) {
            assert_eq!(card, &Card::Word("Banana".to_string()));
        }
    }
}

// ── Reveal sequence ────────────────────────────────────────────────────

#[test]
fn exactly_one_impostor_and_everyone_else_sees_the_word() {
    for seed in 0..100 {
        let mut engine = seeded_engine(seed);
        engine.start_selection(names(7)).unwrap();
        engine.choose_topic("Fruit").unwrap();
        let assignment = engine.assignment().cloned().unwrap();

        let seen = reveal_all(&mut engine);
        for (i, card) in seen.iter().enumerate() {
            if i == assignment.impostor_index() {
                assert_eq!(card, &Card::Impostor);
                assert_eq!(card.to_string(), IMPOSTOR_MARKER);
            } else {
                assert_eq!(card, &Card::Word(assignment.secret_word().to_string()));
            }
        }
    }
}

#[test]
fn advance_before_peek_is_not_ready() {
    let mut engine = scripted_engine(0, 0);
    engine.start_selection(names(3)).unwrap();
    engine.choose_topic("Fruit").unwrap();

    assert_eq!(engine.advance(), Err(GameError::NotReady));
    assert_eq!(engine.cursor().unwrap().current_player_index, 0);

    engine.peek().unwrap();
    assert_eq!(engine.advance(), Ok(Phase::Revealing));
    // A double tap must not skip the next player's reveal.
    assert_eq!(engine.advance(), Err(GameError::NotReady));
    assert_eq!(engine.cursor().unwrap().current_player_index, 1);
}

#[test]
fn advance_steps_by_one_then_ends_in_discussion() {
    let n = 5;
    let mut engine = seeded_engine(9);
    engine.start_selection(names(n)).unwrap();
    engine.choose_topic("Fruit").unwrap();

    for expected in 0..n {
        let cursor = engine.cursor().unwrap();
        assert_eq!(cursor.current_player_index, expected);
        assert!(!cursor.has_peeked);
        assert!(!cursor.is_card_visible);

        engine.peek().unwrap();
        let phase = engine.advance().unwrap();
        if expected + 1 < n {
            assert_eq!(phase, Phase::Revealing);
        } else {
            assert_eq!(phase, Phase::Discussing);
        }
    }

    assert_eq!(engine.phase(), Phase::Discussing);
    assert!(engine.cursor().is_none());
    assert!(engine.current_player().is_none());
    assert!(matches!(engine.peek(), Err(GameError::InvalidPhase { phase: Phase::Discussing, .. })));
    assert!(matches!(engine.advance(), Err(GameError::InvalidPhase { phase: Phase::Discussing, .. })));
    assert!(matches!(engine.conceal(), Err(GameError::InvalidPhase { .. })));
}

#[test]
fn conceal_then_peek_shows_the_same_card() {
    let mut engine = scripted_engine(3, 1);
    engine.start_selection(["Ana", "Bob", "Cid"]).unwrap();
    engine.choose_topic("Fruit").unwrap();

    let first = engine.peek().unwrap();
    assert!(engine.cursor().unwrap().is_card_visible);
    engine.conceal().unwrap();
    engine.conceal().unwrap();
    let cursor = engine.cursor().unwrap();
    assert!(!cursor.is_card_visible);
    assert!(cursor.has_peeked, "conceal keeps the peek");
    assert_eq!(engine.peek().unwrap(), first);
    assert_eq!(first, Card::Word("Pear".to_string()));

    engine.advance().unwrap();
    assert_eq!(engine.peek().unwrap(), Card::Impostor);
}

#[test]
fn peek_before_topic_is_a_phase_error() {
    let mut engine = seeded_engine(2);
    assert!(matches!(engine.peek(), Err(GameError::InvalidPhase { phase: Phase::Idle, .. })));
    engine.start_selection(names(3)).unwrap();
    let err = engine.peek().unwrap_err();
    assert!(!err.is_recoverable());
    assert_eq!(engine.phase(), Phase::Selecting);
}

// ── Reset and roster release ───────────────────────────────────────────

#[test]
fn reset_returns_to_selecting_from_any_round_phase() {
    let mut engine = seeded_engine(4);
    assert_eq!(engine.reset(), Phase::Idle);

    engine.start_selection(["Ana", "Bob", "Cid"]).unwrap();
    assert_eq!(engine.reset(), Phase::Selecting);

    engine.choose_topic("Fruit").unwrap();
    engine.peek().unwrap();
    assert_eq!(engine.reset(), Phase::Selecting);
    assert!(engine.cursor().is_none());

    engine.choose_topic("Fruit").unwrap();
    reveal_all(&mut engine);
    assert_eq!(engine.reset(), Phase::Selecting);
    assert_eq!(engine.roster().unwrap().names(), ["Ana", "Bob", "Cid"]);

    engine.choose_topic("Fruit").unwrap();
    assert_eq!(engine.rounds_drawn(), 3);
    assert_eq!(engine.cursor().unwrap().current_player_index, 0);
}

#[test]
fn release_roster_goes_back_to_idle() {
    let mut engine = seeded_engine(4);
    assert!(engine.release_roster().is_none());

    engine.start_selection(["Ana", "Bob", "Cid"]).unwrap();
    engine.choose_topic("Fruit").unwrap();
    let roster = engine.release_roster().unwrap();
    assert_eq!(engine.phase(), Phase::Idle);
    assert!(engine.assignment().is_none());

    let mut draft = crate::RosterDraft::from(roster);
    draft.add("Dee").unwrap();
    engine.start_with(draft.finish().unwrap()).unwrap();
    assert_eq!(engine.roster().unwrap().len(), 4);
}

// ── Visibility ─────────────────────────────────────────────────────────

#[test]
fn turn_view_carries_no_secret() {
    let mut engine = scripted_engine(0, 2);
    engine.start_selection(["Ana", "Bob", "Cid"]).unwrap();
    assert_eq!(turn_view(&engine).player_index, None);

    engine.choose_topic("Fruit").unwrap();
    let view = turn_view(&engine);
    assert_eq!(view.player_name.as_deref(), Some("Ana"));
    assert!(!view.can_advance());

    engine.peek().unwrap();
    let view = turn_view(&engine);
    assert!(view.can_advance());
    assert!(view.is_card_visible);

    let json = serde_json::to_string(&view).unwrap();
    assert!(!json.contains("Banana"));
    assert!(!json.contains(IMPOSTOR_MARKER));
}

// ── Fairness ───────────────────────────────────────────────────────────

#[test]
fn same_seed_same_rounds() {
    let run = |seed| {
        let mut engine = seeded_engine(seed);
        engine.start_selection(names(6)).unwrap();
        (0..10).map(|_| {
            engine.choose_topic("Fruit").unwrap();
            let a = engine.assignment().cloned().unwrap();
            engine.reset();
            a
        }).collect::<Vec<_>>()
    };
    assert_eq!(run(77), run(77));
    assert_ne!(run(77), run(78));
}

#[test]
fn impostor_draw_is_uniform() {
    for n in [3usize, 7, 20] {
        let mut draw = FairDraw::seeded(1000 + n as u64);
        let mut counts = vec![0u64; n];
        for _ in 0..10_000 {
            counts[draw.draw_impostor(n).unwrap()] += 1;
        }
        let stat = chi_square_uniform(&counts);
        assert!(stat < chi_square_critical_001(n - 1), "n={} chi2={} counts={:?}", n, stat, counts);
    }
}

#[test]
fn word_draw_is_uniform() {
    let words = ["Banana", "Kiwi", "Mango", "Pear", "Plum", "Fig"];
    let mut draw = FairDraw::seeded(2024);
    let mut counts = vec![0u64; words.len()];
    for _ in 0..10_000 {
        let w = draw.draw_word(&words).unwrap();
        counts[words.iter().position(|x| *x == w).unwrap()] += 1;
    }
    let stat = chi_square_uniform(&counts);
    assert!(stat < chi_square_critical_001(words.len() - 1), "chi2={} counts={:?}", stat, counts);
}

#[test]
fn word_and_impostor_are_jointly_uniform() {
    // If the two draws were coupled, some (word, seat) cells would be
    // over- or under-represented.
    let words = ["a", "b", "c"];
    let n = 4;
    let mut draw = FairDraw::seeded(55);
    let mut cells = vec![0u64; words.len() * n];
    for _ in 0..12_000 {
        let round = draw.draw_round(&words, n).unwrap();
        let w = words.iter().position(|x| *x == round.secret_word()).unwrap();
        cells[w * n + round.impostor_index()] += 1;
    }
    let stat = chi_square_uniform(&cells);
    assert!(stat < chi_square_critical_001(cells.len() - 1), "chi2={} cells={:?}", stat, cells);
}

#[test]
fn empty_word_list_and_small_tables_are_rejected_by_the_draw() {
    let mut draw = FairDraw::seeded(0);
    let empty: [&str; 0] = [];
    assert_eq!(draw.draw_word(&empty), Err(GameError::EmptyWordList));
    assert!(matches!(draw.draw_impostor(2), Err(GameError::InvalidRoster(_))));
}

#[test]
fn apply_action_dispatches() {
    use crate::engine::{Action, ActionOutcome};

    let mut engine = scripted_engine(1, 0);
    engine.start_selection(names(3)).unwrap();
    engine.choose_topic("Fruit").unwrap();

    assert_eq!(engine.apply_action(Action::Advance), Err(GameError::NotReady));
    assert_eq!(engine.apply_action(Action::Peek), Ok(ActionOutcome::Shown(Card::Impostor)));
    assert_eq!(engine.apply_action(Action::Conceal), Ok(ActionOutcome::Hidden));
    assert_eq!(engine.apply_action(Action::Advance), Ok(ActionOutcome::Moved(Phase::Revealing)));
    assert_eq!(engine.apply_action(Action::Peek), Ok(ActionOutcome::Shown(Card::Word("Kiwi".to_string()))));
}
