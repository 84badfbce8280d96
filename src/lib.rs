//! Match-three puzzle engine (workspace facade crate).
//!
//! Exposes `match_three::{types, core, engine}` while the implementation lives in
//! dedicated crates under `crates/`.

pub mod demo;

pub use match_three_core as core;
pub use match_three_engine as engine;
pub use match_three_types as types;
