//! Stateful orchestration on top of `match-three-core`
//!
//! - [`engine`]: the cascade state machine that owns a board
//! - [`config`]: engine tunables, with environment overrides
//! - [`identity`]: token ids for presentation continuity
//! - [`level`]: level provider and play session bookkeeping
//!
//! # Example
//!
//! ```
//! use match_three_engine::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::default().with_seed(7)).unwrap();
//! let hint = engine.find_hint_move().expect("fresh boards always have a move");
//!
//! let swap = engine.attempt_swap(hint.from, hint.to);
//! assert!(swap.accepted);
//! assert_eq!(swap.moves_consumed, 1);
//!
//! let gained = swap.score_delta + engine.run_to_idle();
//! assert!(engine.is_idle());
//! assert_eq!(u64::from(gained), engine.total_score());
//! ```

pub mod config;
pub mod engine;
pub mod identity;
pub mod level;

pub use match_three_core::types;

pub use config::EngineConfig;
pub use engine::{CascadeStep, Engine, EngineEvent, Phase, Stage, SwapOutcome};
pub use identity::TokenIds;
pub use level::{stars_for, LevelConfig, LevelOutcome, LevelProvider, Session, StandardLevels};
