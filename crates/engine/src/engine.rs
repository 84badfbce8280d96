//! Cascade orchestrator
//!
//! The engine owns the board and is advanced by discrete calls: one
//! [`Engine::attempt_swap`] per player move, then [`Engine::advance_cascade`]
//! until it reports `settled`. Every call returns immediately; timing between
//! steps belongs to the caller.
//!
//! # Phases
//!
//! - **Idle**: waiting for a swap. Only here are swaps and hints accepted.
//! - **Resolving**: the board holds matches; the next step clears one pass.
//! - **Settling**: the board holds holes; the next step applies gravity and
//!   re-checks for matches.
//!
//! Entering Idle runs the deadlock check. A board without a legal move is
//! regenerated on the spot and a [`EngineEvent::Reshuffled`] event is queued.

use tracing::{debug, info, warn};

use match_three_core::types::{EngineError, Move, Position, TokenKind};
use match_three_core::{
    apply_gravity, find_hint_move, find_match_groups, generate_board, has_any_legal_move,
    has_match, resolve_combo, resolve_matches, validate_swap, Board, BoardSnapshot, ComboKind,
    SimpleRng, SwapKind, TokenRng,
};

use crate::config::EngineConfig;
use crate::identity::TokenIds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Resolving,
    Settling,
}

/// Which transition an [`Engine::advance_cascade`] call ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// One resolution pass cleared cells; gravity is pending
    Resolved,
    /// Gravity and refill ran
    Refilled,
    /// The board deadlocked on settling and was regenerated
    Reshuffled,
    /// Nothing to do
    Idle,
}

/// Notifications the caller may surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Reshuffled,
    CascadeOverflow { steps: u32 },
    SpecialCreated { pos: Position, kind: TokenKind },
    ComboTriggered { kind: ComboKind, at: Position },
}

/// Result of [`Engine::attempt_swap`]
#[derive(Debug, Clone)]
pub struct SwapOutcome {
    pub accepted: bool,
    /// Board after the swap (or the combo clear); the current board if rejected
    pub board: Board,
    /// Intermediate board of a bomb + special combo
    pub transformed: Option<Board>,
    pub score_delta: u32,
    /// 1 for any accepted swap, 0 otherwise
    pub moves_consumed: u32,
    pub rejection: Option<EngineError>,
}

/// Result of [`Engine::advance_cascade`]
#[derive(Debug, Clone)]
pub struct CascadeStep {
    pub board: Board,
    pub score_delta: u32,
    /// The engine is idle; stop polling
    pub settled: bool,
    pub stage: Stage,
}

/// The engine, generic over its source of randomness
///
/// [`Engine::new`] seeds a [`SimpleRng`] from the config; [`Engine::with_rng`]
/// and [`Engine::with_board_and_rng`] take any [`TokenRng`].
#[derive(Debug)]
pub struct Engine<R: TokenRng = SimpleRng> {
    config: EngineConfig,
    board: Board,
    rng: R,
    phase: Phase,
    /// Resolving steps since the last accepted swap
    cascade_steps: u32,
    ids: TokenIds,
    events: Vec<EngineEvent>,
    score: u64,
}

impl Engine<SimpleRng> {
    /// Engine with a freshly generated board, seeded from `config.seed`
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let rng = SimpleRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Engine around an existing board, seeded from `config.seed`
    pub fn with_board(config: EngineConfig, board: Board) -> Result<Self, EngineError> {
        let rng = SimpleRng::new(config.seed);
        Self::with_board_and_rng(config, board, rng)
    }
}

impl<R: TokenRng> Engine<R> {
    /// Engine with a freshly generated board drawn from `rng`
    pub fn with_rng(config: EngineConfig, mut rng: R) -> Result<Self, EngineError> {
        config.validate()?;
        let board = generate_board(
            config.grid_size,
            config.palette(),
            config.max_generate_attempts,
            &mut rng,
        );
        let ids = TokenIds::new(&board);
        let mut engine = Self {
            config,
            board,
            rng,
            phase: Phase::Idle,
            cascade_steps: 0,
            ids,
            events: Vec::new(),
            score: 0,
        };
        engine.enter_idle();
        Ok(engine)
    }

    /// Engine around an existing board. The grid size is taken from the board.
    ///
    /// A board with holes starts Settling and one with matches starts
    /// Resolving, so the caller drives it to rest like any other cascade. A
    /// settled board goes through the deadlock check right away.
    pub fn with_board_and_rng(
        config: EngineConfig,
        board: Board,
        rng: R,
    ) -> Result<Self, EngineError> {
        let config = EngineConfig {
            grid_size: board.size(),
            ..config
        };
        config.validate()?;
        let phase = if board.count_empty() > 0 {
            Phase::Settling
        } else if has_match(&board) {
            Phase::Resolving
        } else {
            Phase::Idle
        };
        let mut engine = Self {
            rng,
            ids: TokenIds::new(&board),
            config,
            board,
            phase,
            cascade_steps: 0,
            events: Vec::new(),
            score: 0,
        };
        if phase == Phase::Idle {
            engine.enter_idle();
        }
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Sum of every score delta this engine has produced
    pub fn total_score(&self) -> u64 {
        self.score
    }

    pub fn ids(&self) -> &TokenIds {
        &self.ids
    }

    /// Read-only view with token identities attached
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::with_ids(&self.board, |idx| self.ids.id_at(idx))
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Origin of the first legal swap, `None` while a cascade is running
    pub fn find_hint(&self) -> Option<Position> {
        self.find_hint_move().map(|m| m.from)
    }

    pub fn find_hint_move(&self) -> Option<Move> {
        if self.phase != Phase::Idle {
            return None;
        }
        find_hint_move(&self.board)
    }

    /// Throw the board away and generate a new one
    pub fn regenerate(&mut self) {
        self.board = generate_board(
            self.config.grid_size,
            self.config.palette(),
            self.config.max_generate_attempts,
            &mut self.rng,
        );
        self.ids.reset(&self.board);
        self.phase = Phase::Idle;
        self.cascade_steps = 0;
    }

    fn reject(&self, err: EngineError) -> SwapOutcome {
        debug!(code = err.code(), "swap rejected");
        SwapOutcome {
            accepted: false,
            board: self.board.clone(),
            transformed: None,
            score_delta: 0,
            moves_consumed: 0,
            rejection: Some(err),
        }
    }

    /// Try to swap `a` and `b`.
    ///
    /// Rejections leave the engine untouched. An ordinary swap only moves the
    /// two tokens and hands over to the cascade; a combo clears immediately and
    /// leaves gravity pending.
    pub fn attempt_swap(&mut self, a: Position, b: Position) -> SwapOutcome {
        if self.phase != Phase::Idle {
            return self.reject(EngineError::Busy);
        }
        let kind = match validate_swap(&self.board, a, b) {
            Ok(kind) => kind,
            Err(err) => return self.reject(err),
        };
        self.cascade_steps = 0;

        match kind {
            SwapKind::Match => {
                self.board.swap(a, b);
                self.ids.swap(a, b);
                self.phase = Phase::Resolving;
                SwapOutcome {
                    accepted: true,
                    board: self.board.clone(),
                    transformed: None,
                    score_delta: 0,
                    moves_consumed: 1,
                    rejection: None,
                }
            }
            SwapKind::Combo => {
                let Some(combo) = resolve_combo(&self.board, a, b, &mut self.rng) else {
                    return self.reject(EngineError::NoMatch);
                };
                self.ids.remove(a);
                self.ids.remove(b);
                self.ids.clear(&combo.cleared);
                self.board = combo.board;
                self.phase = Phase::Settling;
                self.score += u64::from(combo.score);
                self.events.push(EngineEvent::ComboTriggered {
                    kind: combo.kind,
                    at: b,
                });
                SwapOutcome {
                    accepted: true,
                    board: self.board.clone(),
                    transformed: combo.transformed,
                    score_delta: combo.score,
                    moves_consumed: 1,
                    rejection: None,
                }
            }
        }
    }

    /// Run the next cascade transition.
    ///
    /// Idempotent while idle: the board comes back unchanged with a zero delta.
    pub fn advance_cascade(&mut self) -> CascadeStep {
        match self.phase {
            Phase::Idle => self.step(0, true, Stage::Idle),
            Phase::Resolving => self.resolve_step(),
            Phase::Settling => self.settle_step(),
        }
    }

    /// Poll [`Self::advance_cascade`] until settled, returning the summed delta
    pub fn run_to_idle(&mut self) -> u32 {
        let mut total = 0u32;
        loop {
            let step = self.advance_cascade();
            total += step.score_delta;
            if step.settled {
                return total;
            }
        }
    }

    fn step(&self, score_delta: u32, settled: bool, stage: Stage) -> CascadeStep {
        CascadeStep {
            board: self.board.clone(),
            score_delta,
            settled,
            stage,
        }
    }

    fn resolve_step(&mut self) -> CascadeStep {
        let groups = find_match_groups(&self.board);
        if groups.is_empty() {
            let stage = self.enter_idle();
            return self.step(0, true, stage);
        }

        let resolution = resolve_matches(&self.board, &groups);
        self.cascade_steps += 1;
        self.ids.clear(&resolution.cleared);
        for creation in &resolution.created {
            self.ids.replace(creation.pos);
            self.events.push(EngineEvent::SpecialCreated {
                pos: creation.pos,
                kind: creation.token.kind(),
            });
        }
        self.board = resolution.board;
        self.score += u64::from(resolution.score);
        self.phase = Phase::Settling;
        self.step(resolution.score, false, Stage::Resolved)
    }

    fn settle_step(&mut self) -> CascadeStep {
        let report = apply_gravity(&mut self.board, self.config.palette(), &mut self.rng);
        self.ids.apply_gravity(&report);

        if !has_match(&self.board) {
            let stage = match self.enter_idle() {
                Stage::Reshuffled => Stage::Reshuffled,
                _ => Stage::Refilled,
            };
            return self.step(0, true, stage);
        }

        if self.cascade_steps >= self.config.max_cascade_steps {
            let steps = self.cascade_steps;
            warn!(
                steps,
                code = EngineError::CascadeOverflow { steps }.code(),
                "cascade ceiling reached, forcing settle"
            );
            self.events.push(EngineEvent::CascadeOverflow { steps });
            let stage = match self.enter_idle() {
                Stage::Reshuffled => Stage::Reshuffled,
                _ => Stage::Refilled,
            };
            return self.step(0, true, stage);
        }

        self.phase = Phase::Resolving;
        self.step(0, false, Stage::Refilled)
    }

    /// Switch to Idle and run the deadlock check
    fn enter_idle(&mut self) -> Stage {
        self.phase = Phase::Idle;
        self.cascade_steps = 0;
        if has_any_legal_move(&self.board) {
            return Stage::Idle;
        }
        info!(
            code = EngineError::Deadlock.code(),
            "no legal move left, regenerating board"
        );
        self.regenerate();
        self.events.push(EngineEvent::Reshuffled);
        Stage::Reshuffled
    }
}
