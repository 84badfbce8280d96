//! Move validation, hints and deadlock detection
//!
//! A swap is legal when the two cells are orthogonally adjacent and either
//! forms a combo (two specials, or any color bomb) or produces at least one match
//! after swapping. The combo test is checked first because it needs no board copy.

use crate::board::Board;
use crate::matcher::has_match;
use crate::types::{EngineError, Move, Position, Token};

/// Why a swap was accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapKind {
    /// Bypasses match detection; resolved by the combo resolver
    Combo,
    /// Produces at least one match group
    Match,
}

/// Two specials, or a color bomb with anything non-empty
pub fn is_combo_pair(a: Token, b: Token) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.is_color_bomb() || b.is_color_bomb() {
        return true;
    }
    a.is_special() && b.is_special()
}

/// Classify a swap without mutating `board`.
pub fn validate_swap(board: &Board, a: Position, b: Position) -> Result<SwapKind, EngineError> {
    let (Some(ta), Some(tb)) = (board.get(a), board.get(b)) else {
        return Err(EngineError::InvalidMove { a, b });
    };
    if !a.is_adjacent(b) {
        return Err(EngineError::InvalidMove { a, b });
    }
    if is_combo_pair(ta, tb) {
        return Ok(SwapKind::Combo);
    }

    let mut probe = board.clone();
    probe.swap(a, b);
    if has_match(&probe) {
        Ok(SwapKind::Match)
    } else {
        Err(EngineError::NoMatch)
    }
}

pub fn is_legal_swap(board: &Board, a: Position, b: Position) -> bool {
    validate_swap(board, a, b).is_ok()
}

/// First legal swap in row-major order, testing right then down neighbors
pub fn find_hint_move(board: &Board) -> Option<Move> {
    let size = board.size();
    for pos in board.positions() {
        if pos.col + 1 < size {
            let right = Position::new(pos.row, pos.col + 1);
            if is_legal_swap(board, pos, right) {
                return Some(Move::new(pos, right));
            }
        }
        if pos.row + 1 < size {
            let down = Position::new(pos.row + 1, pos.col);
            if is_legal_swap(board, pos, down) {
                return Some(Move::new(pos, down));
            }
        }
    }
    None
}

/// Origin cell of the first legal swap
pub fn find_hint(board: &Board) -> Option<Position> {
    find_hint_move(board).map(|m| m.from)
}

pub fn has_any_legal_move(board: &Board) -> bool {
    find_hint_move(board).is_some()
}
