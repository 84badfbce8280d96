//! Engine tests - swap handling, cascade loop and the documented scenarios

use match_three::core::{find_match_groups, generate_board, has_any_legal_move, Board, SimpleRng};
use match_three::engine::{Engine, EngineConfig, EngineEvent, Phase, Stage};
use match_three::types::{Color, EngineError, Position, Token, TokenKind};

/// Moving (1,2) up turns row 0 into R R R R B ...
const SCENARIO: &str = "RRGRBORO
                        PGRRYYRB
                        BRPPRROO
                        PYYRGGPY
                        YRBPBYOO
                        BBGOPRBG
                        ROYGYPPO
                        PGGBOOGY";

fn scenario_engine() -> Engine {
    let board = Board::from_text(SCENARIO).unwrap();
    Engine::with_board(EngineConfig::default(), board).unwrap()
}

#[test]
fn test_four_run_scenario() {
    let mut engine = scenario_engine();
    let swap = engine.attempt_swap(Position::new(1, 2), Position::new(0, 2));
    assert!(swap.accepted);
    assert_eq!(swap.moves_consumed, 1);
    let row0: Vec<Color> = swap.board.row(0).unwrap().iter().map(|t| t.color()).collect();
    assert_eq!(&row0[..5], &[Color::Red, Color::Red, Color::Red, Color::Red, Color::Blue]);

    let step = engine.advance_cascade();
    assert_eq!(step.stage, Stage::Resolved);
    assert_eq!(
        step.board.get(Position::new(0, 1)),
        Some(Token::special(Color::Red, TokenKind::ColumnClear))
    );
    assert!(step.score_delta >= 680);
}

#[test]
fn test_bomb_pair_scenario() {
    let mut board = Board::from_text(SCENARIO).unwrap();
    board.set(Position::new(6, 3), Token::color_bomb());
    board.set(Position::new(6, 4), Token::color_bomb());
    let mut engine = Engine::with_board(EngineConfig::default(), board).unwrap();

    let swap = engine.attempt_swap(Position::new(6, 3), Position::new(6, 4));
    assert!(swap.accepted);
    assert_eq!(swap.moves_consumed, 1);
    assert_eq!(swap.score_delta, 5000);
    assert_eq!(swap.board.count_empty(), 64);
    assert!(engine
        .drain_events()
        .iter()
        .any(|e| matches!(e, EngineEvent::ComboTriggered { .. })));
}

#[test]
fn test_non_adjacent_swap_is_a_no_op() {
    let mut engine = scenario_engine();
    let before = engine.board().clone();
    let swap = engine.attempt_swap(Position::new(0, 0), Position::new(0, 2));

    assert!(!swap.accepted);
    assert_eq!(swap.moves_consumed, 0);
    assert_eq!(swap.score_delta, 0);
    assert_eq!(swap.board, before);
    assert!(matches!(swap.rejection, Some(EngineError::InvalidMove { .. })));
    assert_eq!(engine.board(), &before);
    assert_eq!(engine.phase(), Phase::Idle);
}

#[test]
fn test_out_of_bounds_swap_is_rejected() {
    let mut engine = scenario_engine();
    let swap = engine.attempt_swap(Position::new(7, 7), Position::new(7, 8));
    assert!(!swap.accepted);
    assert_eq!(swap.rejection.map(|e| e.code()), Some("invalid_move"));
}

#[test]
fn test_swap_refused_mid_cascade() {
    let mut engine = scenario_engine();
    assert!(engine.attempt_swap(Position::new(0, 2), Position::new(1, 2)).accepted);
    let second = engine.attempt_swap(Position::new(6, 5), Position::new(6, 6));
    assert_eq!(second.rejection, Some(EngineError::Busy));
    assert_eq!(second.moves_consumed, 0);
}

#[test]
fn test_generated_boards_are_playable() {
    for seed in 1..60 {
        for colors in [4usize, 5, 6] {
            let board = generate_board(8, &Color::PALETTE[..colors], 10, &mut SimpleRng::new(seed));
            assert!(find_match_groups(&board).is_empty(), "seed {seed} colors {colors}");
            assert!(has_any_legal_move(&board), "seed {seed} colors {colors}");
        }
    }
}

#[test]
fn test_cascades_terminate_and_settle() {
    let config = EngineConfig::default();
    // resolve + settle per step, plus the final idle transition
    let max_calls = config.max_cascade_steps * 2 + 2;
    for seed in 1..40 {
        let mut engine = Engine::new(config.clone().with_seed(seed)).unwrap();
        for _ in 0..5 {
            let hint = engine.find_hint_move().unwrap();
            assert!(engine.attempt_swap(hint.from, hint.to).accepted);

            let mut calls = 0;
            while !engine.advance_cascade().settled {
                calls += 1;
                assert!(calls <= max_calls, "seed {seed} did not settle");
            }
            let overflowed = engine
                .drain_events()
                .iter()
                .any(|e| matches!(e, EngineEvent::CascadeOverflow { .. }));
            assert!(overflowed || find_match_groups(engine.board()).is_empty());
            assert_eq!(engine.board().count_empty(), 0);
        }
    }
}

#[test]
fn test_advance_on_settled_board_is_idempotent() {
    let mut engine = Engine::new(EngineConfig::default().with_seed(77)).unwrap();
    let before = engine.board().clone();
    for _ in 0..3 {
        let step = engine.advance_cascade();
        assert!(step.settled);
        assert_eq!(step.score_delta, 0);
        assert_eq!(step.board, before);
    }
    assert_eq!(engine.total_score(), 0);
}

#[test]
fn test_hint_hidden_while_resolving() {
    let mut engine = scenario_engine();
    assert!(engine.find_hint().is_some());
    engine.attempt_swap(Position::new(0, 2), Position::new(1, 2));
    assert_eq!(engine.find_hint(), None);
    engine.run_to_idle();
    assert!(engine.find_hint().is_some());
}

#[test]
fn test_snapshot_ids_survive_swap() {
    let mut engine = scenario_engine();
    let before = engine.snapshot();
    let id_a = before.rows[0][2].id;
    let id_b = before.rows[1][2].id;
    assert!(id_a.is_some() && id_b.is_some());

    engine.attempt_swap(Position::new(0, 2), Position::new(1, 2));
    let after = engine.snapshot();
    assert_eq!(after.rows[0][2].id, id_b);
    assert_eq!(after.rows[1][2].id, id_a);
}

#[test]
fn test_invalid_config_is_refused() {
    let config = EngineConfig {
        colors: 9,
        ..EngineConfig::default()
    };
    assert!(matches!(Engine::new(config), Err(EngineError::InvalidConfig(_))));
}
