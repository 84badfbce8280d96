//! Combo resolver - special+special and color bomb swaps
//!
//! A combo swap skips match detection entirely. Both swapped cells are emptied,
//! then a pattern chosen by the pair of kinds is cleared around the second cell
//! of the swap. Every pattern goes through [`expand_chain`] so specials caught in
//! it still fire.
//!
//! | Pair | Pattern | Score |
//! |------|---------|-------|
//! | bomb + bomb | whole board | 5000 |
//! | directional + directional | row and column | 2000 |
//! | area + area | 5x5 block | 3000 |
//! | area + directional | three rows and three columns | 2500 |
//! | bomb + special | every token of that color turned into that special | 3000 + 100/cell |
//! | bomb + normal | every token of that color | 1500 |

use tracing::info;

use crate::board::Board;
use crate::moves::is_combo_pair;
use crate::resolve::{apply_clear, expand_chain, square, ClearSet};
use crate::rng::TokenRng;
use crate::types::{
    Color, Position, Token, TokenKind, SCORE_COMBO_AREA_AREA, SCORE_COMBO_AREA_LINE,
    SCORE_COMBO_BOMB_BOMB, SCORE_COMBO_BOMB_NORMAL, SCORE_COMBO_BOMB_SPECIAL,
    SCORE_COMBO_BOMB_SPECIAL_PER_CELL, SCORE_COMBO_LINE_LINE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboKind {
    BombBomb,
    LineLine,
    AreaArea,
    AreaLine,
    /// Bomb with a directional or area special
    BombSpecial,
    BombNormal,
}

impl ComboKind {
    /// Classify a pair of tokens, `None` if they do not form a combo
    pub fn classify(a: Token, b: Token) -> Option<Self> {
        if !is_combo_pair(a, b) {
            return None;
        }
        let kind = match (a.is_color_bomb(), b.is_color_bomb()) {
            (true, true) => ComboKind::BombBomb,
            (true, false) | (false, true) => {
                let other = if a.is_color_bomb() { b } else { a };
                if other.is_special() {
                    ComboKind::BombSpecial
                } else {
                    ComboKind::BombNormal
                }
            }
            (false, false) => {
                match (a.kind().is_directional(), b.kind().is_directional()) {
                    (true, true) => ComboKind::LineLine,
                    (false, false) => ComboKind::AreaArea,
                    _ => ComboKind::AreaLine,
                }
            }
        };
        Some(kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComboKind::BombBomb => "bomb_bomb",
            ComboKind::LineLine => "line_line",
            ComboKind::AreaArea => "area_area",
            ComboKind::AreaLine => "area_line",
            ComboKind::BombSpecial => "bomb_special",
            ComboKind::BombNormal => "bomb_normal",
        }
    }
}

/// Result of a combo swap, before gravity
#[derive(Debug, Clone)]
pub struct ComboOutcome {
    pub kind: ComboKind,
    /// Board with the pattern cleared (EMPTY holes, gravity pending)
    pub board: Board,
    /// Intermediate board of the bomb + special path, after the color scan
    /// turned every matching token into the special but before anything cleared
    pub transformed: Option<Board>,
    pub cleared: ClearSet,
    pub score: u32,
}

/// Resolve a combo swap between `a` and `b`.
///
/// Returns `None` when either cell is out of bounds or the pair is not a combo.
pub fn resolve_combo(
    board: &Board,
    a: Position,
    b: Position,
    rng: &mut impl TokenRng,
) -> Option<ComboOutcome> {
    let (ta, tb) = (board.get(a)?, board.get(b)?);
    let kind = ComboKind::classify(ta, tb)?;
    let size = board.size();

    let mut work = board.clone();
    work.set(a, Token::EMPTY);
    work.set(b, Token::EMPTY);

    let mut transformed = None;
    let (cleared, score) = match kind {
        ComboKind::BombBomb => {
            let cleared = expand_chain(&work, board.positions(), &[]);
            (cleared, SCORE_COMBO_BOMB_BOMB)
        }
        ComboKind::LineLine => {
            let seeds = lines_through(size, b, 0);
            (expand_chain(&work, seeds, &[]), SCORE_COMBO_LINE_LINE)
        }
        ComboKind::AreaArea => {
            let seeds = square(size, b, 2);
            (expand_chain(&work, seeds, &[]), SCORE_COMBO_AREA_AREA)
        }
        ComboKind::AreaLine => {
            let seeds = lines_through(size, b, 1);
            (expand_chain(&work, seeds, &[]), SCORE_COMBO_AREA_LINE)
        }
        ComboKind::BombSpecial => {
            let other = if ta.is_color_bomb() { tb } else { ta };
            let loaded = load_color(&work, other, rng);
            let seeds: Vec<Position> = loaded
                .positions()
                .filter(|p| loaded.color_at(*p) == other.color())
                .collect();
            let cleared = expand_chain(&loaded, seeds, &[]);
            let hit = cleared
                .iter()
                .filter(|p| loaded.get(*p).is_some_and(|t| !t.is_empty()))
                .count() as u32;
            work = loaded.clone();
            transformed = Some(loaded);
            (
                cleared,
                SCORE_COMBO_BOMB_SPECIAL + hit * SCORE_COMBO_BOMB_SPECIAL_PER_CELL,
            )
        }
        ComboKind::BombNormal => {
            let other = if ta.is_color_bomb() { tb } else { ta };
            let seeds = cells_of_color(&work, other.color());
            (expand_chain(&work, seeds, &[]), SCORE_COMBO_BOMB_NORMAL)
        }
    };

    apply_clear(&mut work, &cleared);
    info!(
        combo = kind.as_str(),
        at = %b,
        cleared = cleared.len(),
        score,
        "combo triggered"
    );

    Some(ComboOutcome {
        kind,
        board: work,
        transformed,
        cleared,
        score,
    })
}

/// Every row within `band` of `center.row` plus every column within `band` of
/// `center.col`
fn lines_through(size: usize, center: Position, band: usize) -> Vec<Position> {
    let rows = center.row.saturating_sub(band)..=(center.row + band).min(size - 1);
    let cols = center.col.saturating_sub(band)..=(center.col + band).min(size - 1);
    let mut cells = Vec::new();
    for row in rows {
        cells.extend((0..size).map(|col| Position::new(row, col)));
    }
    for col in cols {
        cells.extend((0..size).map(|row| Position::new(row, col)));
    }
    cells
}

fn cells_of_color(board: &Board, color: Color) -> Vec<Position> {
    board
        .positions()
        .filter(|p| board.color_at(*p) == color)
        .collect()
}

/// Turn every token sharing `special`'s color into that special kind.
/// Directional kinds pick row or column per cell.
fn load_color(board: &Board, special: Token, rng: &mut impl TokenRng) -> Board {
    let color = special.color();
    let mut loaded = board.clone();
    for pos in cells_of_color(board, color) {
        let kind = if special.kind().is_directional() {
            if rng.next_bool() {
                TokenKind::RowClear
            } else {
                TokenKind::ColumnClear
            }
        } else {
            special.kind()
        };
        loaded.set(pos, Token::special(color, kind));
    }
    loaded
}
