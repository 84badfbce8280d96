//! Token identity for presentation continuity
//!
//! Ids ride alongside the board in a parallel flat array and are updated from
//! the same events the board goes through. Nothing in the core reads them.

use match_three_core::{Board, ClearSet, GravityReport};
use match_three_core::types::Position;

#[derive(Debug, Clone)]
pub struct TokenIds {
    size: usize,
    ids: Vec<Option<u64>>,
    next: u64,
}

impl TokenIds {
    /// Fresh ids for every non-empty cell of `board`
    pub fn new(board: &Board) -> Self {
        let mut ids = Self {
            size: board.size(),
            ids: Vec::new(),
            next: 1,
        };
        ids.reset(board);
        ids
    }

    /// Forget everything and number `board` from scratch. The counter keeps
    /// going so ids are never reused.
    pub fn reset(&mut self, board: &Board) {
        self.size = board.size();
        self.ids = vec![None; self.size * self.size];
        for (idx, token) in board.cells().iter().enumerate() {
            if !token.is_empty() {
                self.ids[idx] = Some(self.mint());
            }
        }
    }

    fn mint(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        (pos.row < self.size && pos.col < self.size).then(|| pos.row * self.size + pos.col)
    }

    pub fn get(&self, pos: Position) -> Option<u64> {
        self.index(pos).and_then(|idx| self.ids[idx])
    }

    /// Id by flat row-major index
    pub fn id_at(&self, idx: usize) -> Option<u64> {
        self.ids.get(idx).copied().flatten()
    }

    pub fn swap(&mut self, a: Position, b: Position) {
        if let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) {
            self.ids.swap(ia, ib);
        }
    }

    pub fn remove(&mut self, pos: Position) {
        if let Some(idx) = self.index(pos) {
            self.ids[idx] = None;
        }
    }

    pub fn clear(&mut self, set: &ClearSet) {
        for pos in set.iter() {
            self.remove(pos);
        }
    }

    /// A special token replaced whatever sat at `pos`
    pub fn replace(&mut self, pos: Position) {
        if let Some(idx) = self.index(pos) {
            self.ids[idx] = Some(self.mint());
        }
    }

    /// Replay a gravity pass: falls keep their id, spawns get a new one
    pub fn apply_gravity(&mut self, report: &GravityReport) {
        for fall in &report.falls {
            let from = self.index(Position::new(fall.from_row, fall.col));
            let to = self.index(Position::new(fall.to_row, fall.col));
            if let (Some(from), Some(to)) = (from, to) {
                self.ids[to] = self.ids[from].take();
            }
        }
        for &pos in &report.spawned {
            self.replace(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_three_core::rng::ScriptedRng;
    use match_three_core::types::Color;
    use match_three_core::apply_gravity;

    #[test]
    fn ids_follow_falling_tokens() {
        let mut board = Board::from_text(
            "RGB
             ...
             YPO",
        )
        .unwrap();
        let mut ids = TokenIds::new(&board);
        let red = ids.get(Position::new(0, 0)).unwrap();
        assert_eq!(ids.get(Position::new(1, 0)), None);

        let report = apply_gravity(&mut board, &Color::PALETTE, &mut ScriptedRng::new(vec![0]));
        ids.apply_gravity(&report);

        assert_eq!(ids.get(Position::new(1, 0)), Some(red));
        let fresh = ids.get(Position::new(0, 0)).unwrap();
        assert!(fresh > red);
        assert!(board.positions().all(|p| ids.get(p).is_some()));
    }

    #[test]
    fn swap_and_replace() {
        let board = Board::from_text(
            "RG
             BY",
        )
        .unwrap();
        let mut ids = TokenIds::new(&board);
        let a = ids.get(Position::new(0, 0));
        let b = ids.get(Position::new(0, 1));
        ids.swap(Position::new(0, 0), Position::new(0, 1));
        assert_eq!(ids.get(Position::new(0, 0)), b);
        assert_eq!(ids.get(Position::new(0, 1)), a);

        ids.replace(Position::new(1, 1));
        assert_eq!(ids.get(Position::new(1, 1)), Some(5));
        ids.remove(Position::new(1, 1));
        assert_eq!(ids.get(Position::new(1, 1)), None);
        assert_eq!(ids.id_at(0), b);
    }
}
