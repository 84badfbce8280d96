//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond their invariants, which makes
//! them usable in any context (core algorithms, orchestration, presentation).
//!
//! # Board Dimensions
//!
//! The board is a square grid addressed as `(row, col)`:
//!
//! - **Rows**: indexed top to bottom, row 0 is the top edge (where refills enter)
//! - **Columns**: indexed left to right
//! - **Default size**: 8x8
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SCORE_SPECIAL_CREATED` | 500 | Per special token created by a match |
//! | `SCORE_CELL_CLEARED` | 60 | Per ordinary cleared cell |
//! | `SCORE_SPECIAL_DESTROYED` | 200 | Extra per cleared cell that held a special |
//! | `SCORE_COMBO_BOMB_BOMB` | 5000 | Two color bombs swapped |
//! | `SCORE_COMBO_LINE_LINE` | 2000 | Two directional clears swapped |
//! | `SCORE_COMBO_AREA_AREA` | 3000 | Two area clears swapped |
//! | `SCORE_COMBO_AREA_LINE` | 2500 | Area clear swapped with a directional clear |
//! | `SCORE_COMBO_BOMB_SPECIAL` | 3000 | Bomb swapped with another special (+100 per cell) |
//! | `SCORE_COMBO_BOMB_NORMAL` | 1500 | Bomb swapped with an ordinary token |
//!
//! # Examples
//!
//! ```
//! use match_three_types::{Color, Position, Token, TokenKind};
//!
//! let token = Token::special(Color::Red, TokenKind::RowClear);
//! assert!(token.is_special());
//! assert!(!Token::EMPTY.is_special());
//!
//! assert!(Position::new(2, 3).is_adjacent(Position::new(2, 4)));
//! assert!(!Position::new(2, 3).is_adjacent(Position::new(3, 4)));
//!
//! assert_eq!(Color::from_str("purple"), Some(Color::Purple));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default board edge length (8x8)
pub const DEFAULT_GRID_SIZE: usize = 8;

/// Smallest board on which a 3-run fits
pub const MIN_GRID_SIZE: usize = 3;

/// Largest supported board edge
pub const MAX_GRID_SIZE: usize = 32;

/// Default number of palette colors in play
pub const DEFAULT_COLOR_COUNT: usize = 6;

/// Fewest palette colors the generator can work with
pub const MIN_COLOR_COUNT: usize = 3;

/// Minimum run length that forms a match
pub const MIN_MATCH_LEN: usize = 3;

/// Hard ceiling on resolution passes within one cascade
pub const MAX_CASCADE_STEPS: u32 = 15;

/// Board generation retries before the last attempt is accepted as-is
pub const MAX_GENERATE_ATTEMPTS: u32 = 10;

/// Suggested idle time before a caller surfaces a hint (milliseconds)
pub const HINT_IDLE_MS: u32 = 5000;

pub const SCORE_SPECIAL_CREATED: u32 = 500;
pub const SCORE_CELL_CLEARED: u32 = 60;
pub const SCORE_SPECIAL_DESTROYED: u32 = 200;

pub const SCORE_COMBO_BOMB_BOMB: u32 = 5000;
pub const SCORE_COMBO_LINE_LINE: u32 = 2000;
pub const SCORE_COMBO_AREA_AREA: u32 = 3000;
pub const SCORE_COMBO_AREA_LINE: u32 = 2500;
pub const SCORE_COMBO_BOMB_SPECIAL: u32 = 3000;
/// Per cell cleared by a bomb+special combo, on top of `SCORE_COMBO_BOMB_SPECIAL`
pub const SCORE_COMBO_BOMB_SPECIAL_PER_CELL: u32 = 100;
pub const SCORE_COMBO_BOMB_NORMAL: u32 = 1500;

/// Token colors
///
/// The six basic colors form the palette. Two sentinels complete the set:
/// - **Empty**: no token present in the cell
/// - **Multi**: carried by color bombs; never matches an ordinary color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Empty,
    Multi,
}

impl Color {
    /// The basic palette, in draw order
    pub const PALETTE: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
    ];

    /// True for palette colors (not EMPTY, not MULTI)
    pub fn is_basic(&self) -> bool {
        !matches!(self, Color::Empty | Color::Multi)
    }

    /// Parse color from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" | "r" => Some(Color::Red),
            "blue" | "b" => Some(Color::Blue),
            "green" | "g" => Some(Color::Green),
            "yellow" | "y" => Some(Color::Yellow),
            "purple" | "p" => Some(Color::Purple),
            "orange" | "o" => Some(Color::Orange),
            "empty" | "." => Some(Color::Empty),
            "multi" | "*" => Some(Color::Multi),
            _ => None,
        }
    }

    /// Single-character glyph used by text renderings of the board
    pub fn glyph(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Purple => 'P',
            Color::Orange => 'O',
            Color::Empty => '.',
            Color::Multi => '*',
        }
    }
}

/// Behavior attached to a token
///
/// - **Normal**: plain token, cleared by matches only
/// - **RowClear**: clears its whole row when destroyed
/// - **ColumnClear**: clears its whole column when destroyed
/// - **AreaClear**: clears the 3x3 block centered on it
/// - **ColorBomb**: clears every token of a target color when swapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Normal,
    RowClear,
    ColumnClear,
    AreaClear,
    ColorBomb,
}

impl TokenKind {
    /// Row and column clears
    pub fn is_directional(&self) -> bool {
        matches!(self, TokenKind::RowClear | TokenKind::ColumnClear)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Normal => "normal",
            TokenKind::RowClear => "row_clear",
            TokenKind::ColumnClear => "column_clear",
            TokenKind::AreaClear => "area_clear",
            TokenKind::ColorBomb => "color_bomb",
        }
    }
}

/// A token on the board
///
/// Constructed only through the associated constructors so an EMPTY cell can
/// never carry a special kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    color: Color,
    kind: TokenKind,
}

impl Token {
    /// An empty cell
    pub const EMPTY: Token = Token {
        color: Color::Empty,
        kind: TokenKind::Normal,
    };

    pub fn normal(color: Color) -> Self {
        Self {
            color,
            kind: TokenKind::Normal,
        }
    }

    /// Special token of the given kind.
    ///
    /// An EMPTY color collapses to [`Token::EMPTY`]; a `ColorBomb` kind always
    /// carries MULTI.
    pub fn special(color: Color, kind: TokenKind) -> Self {
        match (color, kind) {
            (Color::Empty, _) => Self::EMPTY,
            (_, TokenKind::ColorBomb) => Self::color_bomb(),
            _ => Self { color, kind },
        }
    }

    pub fn color_bomb() -> Self {
        Self {
            color: Color::Multi,
            kind: TokenKind::ColorBomb,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.color == Color::Empty
    }

    pub fn is_special(&self) -> bool {
        self.kind != TokenKind::Normal
    }

    pub fn is_color_bomb(&self) -> bool {
        self.kind == TokenKind::ColorBomb
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Cell coordinate, `(row, col)` with row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance exactly 1
    pub fn is_adjacent(&self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Offset by a signed delta; `None` if it would go negative
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orientation of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A proposed swap of two cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

/// Engine error taxonomy
///
/// None of these are fatal. The orchestrator turns them into rejected swaps,
/// recovery actions, or notification events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Coordinates out of bounds or not orthogonally adjacent
    #[error("invalid move between {a} and {b}")]
    InvalidMove { a: Position, b: Position },
    /// Adjacent swap that neither forms a match nor triggers a combo
    #[error("swap does not produce a match")]
    NoMatch,
    /// A cascade is still in flight
    #[error("engine is resolving a cascade")]
    Busy,
    /// Settled board with no legal swap left
    #[error("no legal move remains on the board")]
    Deadlock,
    /// Cascade hit the iteration ceiling and was forced to settle
    #[error("cascade exceeded {steps} resolution steps")]
    CascadeOverflow { steps: u32 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidMove { .. } => "invalid_move",
            EngineError::NoMatch => "no_match",
            EngineError::Busy => "busy",
            EngineError::Deadlock => "deadlock",
            EngineError::CascadeOverflow { .. } => "cascade_overflow",
            EngineError::InvalidConfig(_) => "invalid_config",
        }
    }
}
