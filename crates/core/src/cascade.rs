//! Stateless cascade stepping
//!
//! One step is a full detect → resolve → gravity cycle. The stateful
//! orchestrator in the engine crate splits the same cycle into separate
//! resolve and settle phases so callers can render the holes in between; this
//! module is the single-call form used by tests, benchmarks and batch play.

use crate::board::Board;
use crate::gravity::{apply_gravity, GravityReport};
use crate::matcher::find_match_groups;
use crate::resolve::{resolve_matches, Resolution};
use crate::rng::TokenRng;
use crate::types::Color;

/// Result of one cascade step
#[derive(Debug, Clone)]
pub struct CascadePass {
    pub board: Board,
    pub score_delta: u32,
    /// No match was found; `board` is the input unchanged
    pub settled: bool,
    pub resolution: Option<Resolution>,
    pub gravity: Option<GravityReport>,
}

/// Run one detect → resolve → gravity cycle.
///
/// On a board without matches this is the identity with a zero delta.
pub fn advance_cascade(board: &Board, palette: &[Color], rng: &mut impl TokenRng) -> CascadePass {
    let groups = find_match_groups(board);
    if groups.is_empty() {
        return CascadePass {
            board: board.clone(),
            score_delta: 0,
            settled: true,
            resolution: None,
            gravity: None,
        };
    }

    let resolution = resolve_matches(board, &groups);
    let mut next = resolution.board.clone();
    let gravity = apply_gravity(&mut next, palette, rng);
    CascadePass {
        board: next,
        score_delta: resolution.score,
        settled: false,
        resolution: Some(resolution),
        gravity: Some(gravity),
    }
}

/// Summary of [`settle`]
#[derive(Debug, Clone)]
pub struct Settled {
    pub board: Board,
    pub score: u32,
    /// Resolving steps taken
    pub steps: u32,
    /// Stopped at the ceiling with matches possibly left on the board
    pub overflowed: bool,
}

/// Step until no match remains or `max_steps` resolving steps have run.
pub fn settle(board: &Board, palette: &[Color], rng: &mut impl TokenRng, max_steps: u32) -> Settled {
    let mut current = board.clone();
    let mut score = 0u32;
    let mut steps = 0u32;
    loop {
        if steps >= max_steps {
            let overflowed = !find_match_groups(&current).is_empty();
            return Settled {
                board: current,
                score,
                steps,
                overflowed,
            };
        }
        let pass = advance_cascade(&current, palette, rng);
        if pass.settled {
            return Settled {
                board: pass.board,
                score,
                steps,
                overflowed: false,
            };
        }
        score += pass.score_delta;
        steps += 1;
        current = pass.board;
    }
}
