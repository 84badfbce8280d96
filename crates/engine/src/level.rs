//! Levels and play sessions
//!
//! The engine only reports score deltas and consumed moves. Deciding whether a
//! level is won is the caller's business; [`Session`] is the stock bookkeeping
//! for that, fed from a [`LevelProvider`].
//!
//! # Standard Levels
//!
//! | Level | Moves | Target |
//! |-------|-------|--------|
//! | 1 | 15 | 1000 |
//! | 2 | 20 | 2500 |
//! | 3 | 25 | 4000 |
//! | 4 | 20 | 5000 |
//! | 5 | 30 | 8000 |
//! | n > 5 | `min(45, 20 + ((n-5)/5)*2)` | `5000 + (n-5)*2500` |

use serde::Serialize;
use tracing::info;

use match_three_core::types::Position;
use match_three_core::TokenRng;

use crate::engine::{CascadeStep, Engine, SwapOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelConfig {
    pub id: u32,
    pub moves: u32,
    pub target_score: u32,
}

pub trait LevelProvider {
    fn level(&self, id: u32) -> LevelConfig;
}

const FIXED_LEVELS: [(u32, u32); 5] = [(15, 1000), (20, 2500), (25, 4000), (20, 5000), (30, 8000)];

/// Five hand-tuned levels followed by an endless procedural ramp
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLevels;

impl LevelProvider for StandardLevels {
    fn level(&self, id: u32) -> LevelConfig {
        let id = id.max(1);
        if let Some(&(moves, target_score)) = FIXED_LEVELS.get(id as usize - 1) {
            return LevelConfig {
                id,
                moves,
                target_score,
            };
        }
        let past = id - 5;
        LevelConfig {
            id,
            moves: (20 + (past / 5) * 2).min(45),
            target_score: 5000u32.saturating_add(past.saturating_mul(2500)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum LevelOutcome {
    Won { stars: u8 },
    Lost,
}

/// Stars for `score` against `target`: 30%, 60% and 100% thresholds
pub fn stars_for(score: u64, target: u32) -> u8 {
    let target = u64::from(target.max(1));
    let tenths = score * 10;
    if tenths >= target * 10 {
        3
    } else if tenths >= target * 6 {
        2
    } else if tenths >= target * 3 {
        1
    } else {
        0
    }
}

/// Score and move bookkeeping for one level attempt
#[derive(Debug, Clone)]
pub struct Session {
    level: LevelConfig,
    score: u64,
    moves_left: u32,
    outcome: Option<LevelOutcome>,
}

impl Session {
    pub fn new(level: LevelConfig) -> Self {
        Self {
            level,
            score: 0,
            moves_left: level.moves,
            outcome: None,
        }
    }

    pub fn level(&self) -> LevelConfig {
        self.level
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn stars(&self) -> u8 {
        stars_for(self.score, self.level.target_score)
    }

    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Swap through the engine, `None` once the level has an outcome
    pub fn attempt_swap<R: TokenRng>(
        &mut self,
        engine: &mut Engine<R>,
        a: Position,
        b: Position,
    ) -> Option<SwapOutcome> {
        if self.is_over() {
            return None;
        }
        let outcome = engine.attempt_swap(a, b);
        self.record_swap(&outcome);
        Some(outcome)
    }

    /// One cascade step through the engine
    pub fn advance<R: TokenRng>(&mut self, engine: &mut Engine<R>) -> CascadeStep {
        let step = engine.advance_cascade();
        self.record_step(&step);
        step
    }

    pub fn record_swap(&mut self, outcome: &SwapOutcome) {
        self.score += u64::from(outcome.score_delta);
        self.moves_left = self.moves_left.saturating_sub(outcome.moves_consumed);
    }

    /// Add the step's delta and, once the board has settled with no moves
    /// left, fix the outcome
    pub fn record_step(&mut self, step: &CascadeStep) {
        self.score += u64::from(step.score_delta);
        if step.settled && self.moves_left == 0 && self.outcome.is_none() {
            let stars = self.stars();
            let outcome = if stars >= 1 {
                LevelOutcome::Won { stars }
            } else {
                LevelOutcome::Lost
            };
            info!(
                level = self.level.id,
                score = self.score,
                target = self.level.target_score,
                ?outcome,
                "level finished"
            );
            self.outcome = Some(outcome);
        }
    }
}
