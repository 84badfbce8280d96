//! Gravity and refill
//!
//! Each column is compacted independently: surviving tokens slide down keeping
//! their relative order, and the vacated top cells receive fresh NORMAL tokens.
//! Refills are unconstrained; new matches here are what drives cascades.

use crate::board::Board;
use crate::rng::TokenRng;
use crate::types::{Color, Position, Token};

/// A token that moved down during compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall {
    pub col: usize,
    pub from_row: usize,
    pub to_row: usize,
}

/// What gravity did, for animation and identity tracking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GravityReport {
    pub falls: Vec<Fall>,
    /// Cells filled with freshly drawn tokens, top-down per column
    pub spawned: Vec<Position>,
}

impl GravityReport {
    pub fn is_noop(&self) -> bool {
        self.falls.is_empty() && self.spawned.is_empty()
    }
}

/// Compact every column downward and refill from the top.
///
/// `palette` must be non-empty; refill colors are drawn uniformly from it.
pub fn apply_gravity(
    board: &mut Board,
    palette: &[Color],
    rng: &mut impl TokenRng,
) -> GravityReport {
    let size = board.size();
    let mut report = GravityReport::default();

    for col in 0..size {
        // Scan bottom-up, moving each survivor to the lowest free slot.
        let mut write = size;
        for read in (0..size).rev() {
            let pos = Position::new(read, col);
            let Some(token) = board.get(pos) else {
                continue;
            };
            if token.is_empty() {
                continue;
            }
            write -= 1;
            if write != read {
                board.set(Position::new(write, col), token);
                board.set(pos, Token::EMPTY);
                report.falls.push(Fall {
                    col,
                    from_row: read,
                    to_row: write,
                });
            }
        }

        for row in 0..write {
            let pos = Position::new(row, col);
            board.set(pos, Token::normal(rng.pick_color(palette)));
            report.spawned.push(pos);
        }
    }

    report
}
