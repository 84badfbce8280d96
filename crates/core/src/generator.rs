//! Initial board generation
//!
//! Cells are filled row-major. A color is forbidden at a cell when the two cells
//! to its left, or the two cells above it, already share that color, so the
//! fresh board never contains a match. The whole board is redrawn until at least
//! one legal move exists or the attempt budget runs out.

use tracing::{debug, warn};

use crate::board::Board;
use crate::moves::has_any_legal_move;
use crate::rng::TokenRng;
use crate::types::{Color, Position, Token};

/// Generate a match-free board of `size` x `size` over `colors`.
///
/// After `max_attempts` redraws without a legal move the last board is
/// returned as is; callers detect the deadlock and reshuffle later.
pub fn generate_board(
    size: usize,
    colors: &[Color],
    max_attempts: u32,
    rng: &mut impl TokenRng,
) -> Board {
    let attempts = max_attempts.max(1);
    let mut board = fill_without_matches(size, colors, rng);
    for attempt in 1..attempts {
        if has_any_legal_move(&board) {
            debug!(attempt, size, "generated board");
            return board;
        }
        board = fill_without_matches(size, colors, rng);
    }
    if !has_any_legal_move(&board) {
        warn!(attempts, size, "generated board has no legal move");
    }
    board
}

/// One pass of constrained fill, no legal-move check
pub fn fill_without_matches(size: usize, colors: &[Color], rng: &mut impl TokenRng) -> Board {
    let mut board = Board::new(size);
    let mut allowed: Vec<Color> = Vec::with_capacity(colors.len());

    for pos in board.positions() {
        let left = run_color(&board, pos, 0, 1);
        let up = run_color(&board, pos, 1, 0);

        allowed.clear();
        allowed.extend(
            colors
                .iter()
                .copied()
                .filter(|c| Some(*c) != left && Some(*c) != up),
        );
        let color = if allowed.is_empty() {
            rng.pick_color(colors)
        } else {
            rng.pick_color(&allowed)
        };
        board.set(pos, Token::normal(color));
    }
    board
}

/// Shared color of the two cells preceding `pos` along a direction, if any
fn run_color(board: &Board, pos: Position, d_row: usize, d_col: usize) -> Option<Color> {
    let back1 = Position::new(pos.row.checked_sub(d_row)?, pos.col.checked_sub(d_col)?);
    let back2 = Position::new(
        pos.row.checked_sub(2 * d_row)?,
        pos.col.checked_sub(2 * d_col)?,
    );
    let color = board.color_at(back1);
    (color.is_basic() && board.color_at(back2) == color).then_some(color)
}
