//! Resolution engine - turns one detection pass into clears, specials and score
//!
//! A pass runs in three stages against a single board snapshot:
//!
//! 1. **Creation**: decide which match groups become special tokens
//!    (5-run → color bomb, intersection → area clear, 4-run → directional clear).
//! 2. **Chain expansion**: breadth-first flood from the ordinary clear set; every
//!    special token reached adds its footprint to the queue.
//! 3. **Apply**: creation sites take their special token, every other cell in the
//!    expanded set becomes EMPTY. Gravity is a separate step.
//!
//! # Footprints
//!
//! | Kind | Cells cleared when destroyed indirectly |
//! |------|------------------------------------------|
//! | `RowClear` | its whole row |
//! | `ColumnClear` | its whole column |
//! | `AreaClear` | 3x3 block centered on it |
//! | `ColorBomb` | 5x5 block centered on it |

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use tracing::debug;

use crate::board::Board;
use crate::matcher::MatchGroup;
use crate::types::{
    Axis, Position, Token, TokenKind, SCORE_CELL_CLEARED, SCORE_SPECIAL_CREATED,
    SCORE_SPECIAL_DESTROYED,
};

/// A special token placed where a match group collapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Creation {
    pub pos: Position,
    pub token: Token,
}

/// Cells slated for removal in one step, in breadth-first visit order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearSet {
    cells: Vec<Position>,
    mask: Vec<bool>,
    size: usize,
}

impl ClearSet {
    fn new(size: usize) -> Self {
        Self {
            cells: Vec::new(),
            mask: vec![false; size * size],
            size,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size && self.mask[pos.row * self.size + pos.col]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }
}

/// Outcome of one resolution pass
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Board after creations and clears, before gravity
    pub board: Board,
    pub created: Vec<Creation>,
    /// Every cell emptied this pass (including chain reactions)
    pub cleared: ClearSet,
    /// How many of the cleared cells held a special token
    pub specials_destroyed: u32,
    pub score: u32,
}

impl Resolution {
    /// Anything changed on the board
    pub fn cleared_any(&self) -> bool {
        !self.cleared.is_empty() || !self.created.is_empty()
    }
}

/// Cells a special token takes with it when destroyed indirectly
pub fn footprint(size: usize, pos: Position, kind: TokenKind) -> Vec<Position> {
    match kind {
        TokenKind::Normal => Vec::new(),
        TokenKind::RowClear => (0..size).map(|col| Position::new(pos.row, col)).collect(),
        TokenKind::ColumnClear => (0..size).map(|row| Position::new(row, pos.col)).collect(),
        TokenKind::AreaClear => square(size, pos, 1),
        TokenKind::ColorBomb => square(size, pos, 2),
    }
}

/// In-bounds cells of the `(2r+1)x(2r+1)` block centered on `pos`
pub fn square(size: usize, pos: Position, radius: usize) -> Vec<Position> {
    let r0 = pos.row.saturating_sub(radius);
    let c0 = pos.col.saturating_sub(radius);
    let r1 = (pos.row + radius).min(size.saturating_sub(1));
    let c1 = (pos.col + radius).min(size.saturating_sub(1));
    (r0..=r1)
        .flat_map(|row| (c0..=c1).map(move |col| Position::new(row, col)))
        .collect()
}

/// Breadth-first chain expansion.
///
/// Starts from `seeds`, skips anything in `exempt`, and follows the footprint of
/// every special token it visits. Out-of-bounds seeds are dropped. Terminates
/// because each cell is visited at most once.
pub fn expand_chain(
    board: &Board,
    seeds: impl IntoIterator<Item = Position>,
    exempt: &[Position],
) -> ClearSet {
    let size = board.size();
    let mut set = ClearSet::new(size);
    let mut blocked = vec![false; size * size];
    for pos in exempt.iter().filter(|p| board.contains(**p)) {
        blocked[pos.row * size + pos.col] = true;
    }

    let mut queue: VecDeque<Position> = seeds.into_iter().collect();
    while let Some(pos) = queue.pop_front() {
        if !board.contains(pos) {
            continue;
        }
        let idx = pos.row * size + pos.col;
        if set.mask[idx] || blocked[idx] {
            continue;
        }
        set.mask[idx] = true;
        set.cells.push(pos);

        let Some(token) = board.get(pos) else {
            continue;
        };
        if token.is_empty() || !token.is_special() {
            continue;
        }
        queue.extend(
            footprint(size, pos, token.kind())
                .into_iter()
                .filter(|p| !set.contains(*p)),
        );
    }
    set
}

/// Empty every cell in the set
pub fn apply_clear(board: &mut Board, set: &ClearSet) {
    for pos in set.iter() {
        board.set(pos, Token::EMPTY);
    }
}

/// Decide which groups become special tokens.
///
/// Rules run in priority order and each group is consumed by at most one rule:
/// 5+ runs first, then intersections, then remaining 4-runs.
pub fn plan_creations(board: &Board, groups: &[MatchGroup]) -> Vec<Creation> {
    let size = board.size();
    let mut creations: Vec<Creation> = Vec::new();
    let mut consumed = vec![false; groups.len()];
    let is_site = |creations: &[Creation], pos: Position| creations.iter().any(|c| c.pos == pos);

    // 1. Color bombs
    for (gi, group) in groups.iter().enumerate() {
        if group.len() >= 5 {
            consumed[gi] = true;
            let pos = group.middle();
            if !is_site(&creations, pos) {
                creations.push(Creation {
                    pos,
                    token: Token::color_bomb(),
                });
            }
        }
    }

    // 2. Area clears at intersections. A cell sits in at most one horizontal
    //    and one vertical maximal run.
    let mut membership: Vec<ArrayVec<usize, 2>> = vec![ArrayVec::new(); size * size];
    for (gi, group) in groups.iter().enumerate() {
        for pos in &group.cells {
            let _ = membership[pos.row * size + pos.col].try_push(gi);
        }
    }
    for pos in board.positions() {
        let owners = &membership[pos.row * size + pos.col];
        if owners.len() < 2 || is_site(&creations, pos) {
            continue;
        }
        let Some(token) = board.get(pos) else {
            continue;
        };
        creations.push(Creation {
            pos,
            token: Token::special(token.color(), TokenKind::AreaClear),
        });
        for &gi in owners {
            consumed[gi] = true;
        }
    }

    // 3. Directional clears on the second cell of a 4-run, perpendicular to it
    for (gi, group) in groups.iter().enumerate() {
        if consumed[gi] || group.len() != 4 {
            continue;
        }
        let pos = group.cells[1];
        if is_site(&creations, pos) {
            continue;
        }
        let kind = match group.axis {
            Axis::Horizontal => TokenKind::ColumnClear,
            Axis::Vertical => TokenKind::RowClear,
        };
        creations.push(Creation {
            pos,
            token: Token::special(board.color_at(pos), kind),
        });
        consumed[gi] = true;
    }

    creations
}

/// Run one full resolution pass over the groups from a single detection.
pub fn resolve_matches(board: &Board, groups: &[MatchGroup]) -> Resolution {
    let creations = plan_creations(board, groups);
    let sites: Vec<Position> = creations.iter().map(|c| c.pos).collect();

    // Ordinary clear set: every matched cell that is not a creation site.
    let seeds = groups
        .iter()
        .flat_map(|g| g.cells.iter().copied())
        .filter(|pos| !sites.contains(pos));
    let cleared = expand_chain(board, seeds, &sites);

    let mut score = creations.len() as u32 * SCORE_SPECIAL_CREATED;
    let mut specials_destroyed = 0u32;
    for pos in cleared.iter() {
        let Some(token) = board.get(pos) else {
            continue;
        };
        if token.is_empty() {
            continue;
        }
        score += SCORE_CELL_CLEARED;
        if token.is_special() {
            score += SCORE_SPECIAL_DESTROYED;
            specials_destroyed += 1;
        }
    }

    let mut next = board.clone();
    apply_clear(&mut next, &cleared);
    for creation in &creations {
        next.set(creation.pos, creation.token);
    }

    debug!(
        groups = groups.len(),
        created = creations.len(),
        cleared = cleared.len(),
        specials_destroyed,
        score,
        "resolved match pass"
    );

    Resolution {
        board: next,
        created: creations,
        cleared,
        specials_destroyed,
        score,
    }
}
