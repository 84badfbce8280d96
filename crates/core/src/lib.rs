//! Core game logic - pure, deterministic, and testable
//!
//! Every algorithm of the puzzle lives here as a function of a board (and an
//! injected RNG where colors are drawn). Nothing in this crate holds state
//! between calls; the stateful orchestrator is in `match-three-engine`.
//!
//! # Module Structure
//!
//! - [`board`]: square token grid in flat row-major storage
//! - [`rng`]: seeded color draws behind the [`TokenRng`] seam
//! - [`generator`]: match-free initial boards with at least one legal move
//! - [`matcher`]: maximal horizontal and vertical runs
//! - [`resolve`]: special creation, chain expansion and scoring for one pass
//! - [`gravity`]: column compaction and refill
//! - [`combo`]: special+special and color bomb swaps
//! - [`moves`]: swap validation, hints and deadlock detection
//! - [`cascade`]: one detect → resolve → gravity step, and a run-to-settle loop
//! - [`snapshot`]: serializable read-only board views
//!
//! # Example
//!
//! ```
//! use match_three_core::{find_hint_move, generate_board, has_match, SimpleRng};
//! use match_three_core::types::Color;
//!
//! let mut rng = SimpleRng::new(12345);
//! let board = generate_board(8, &Color::PALETTE, 10, &mut rng);
//!
//! assert!(!has_match(&board));
//! assert!(find_hint_move(&board).is_some());
//! ```

pub mod board;
pub mod cascade;
pub mod combo;
pub mod generator;
pub mod gravity;
pub mod matcher;
pub mod moves;
pub mod resolve;
pub mod rng;
pub mod snapshot;

pub use match_three_types as types;

// Re-export commonly used items for convenience
pub use board::Board;
pub use cascade::{advance_cascade, settle, CascadePass, Settled};
pub use combo::{resolve_combo, ComboKind, ComboOutcome};
pub use generator::generate_board;
pub use gravity::{apply_gravity, Fall, GravityReport};
pub use matcher::{find_match_groups, has_match, MatchGroup};
pub use moves::{
    find_hint, find_hint_move, has_any_legal_move, is_combo_pair, is_legal_swap, validate_swap,
    SwapKind,
};
pub use resolve::{expand_chain, resolve_matches, ClearSet, Creation, Resolution};
pub use rng::{ScriptedRng, SimpleRng, TokenRng};
pub use snapshot::{BoardSnapshot, TokenView};
