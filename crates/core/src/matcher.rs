//! Match detection - maximal runs of three or more same-colored tokens
//!
//! Rows are scanned left to right, then columns top to bottom. Perpendicular runs
//! sharing a cell come back as two separate groups; deciding what an intersection
//! means is the resolver's job.

use crate::board::Board;
use crate::types::{Axis, Color, Position, MIN_MATCH_LEN};

/// One maximal run, cells listed in scan order (left to right / top to bottom)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    pub axis: Axis,
    pub color: Color,
    pub cells: Vec<Position>,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at index `len / 2`
    pub fn middle(&self) -> Position {
        self.cells[self.cells.len() / 2]
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }
}

/// All horizontal then all vertical groups on the board
pub fn find_match_groups(board: &Board) -> Vec<MatchGroup> {
    let size = board.size();
    let mut groups = Vec::new();

    for row in 0..size {
        scan_line(board, Axis::Horizontal, |i| Position::new(row, i), &mut groups);
    }
    for col in 0..size {
        scan_line(board, Axis::Vertical, |i| Position::new(i, col), &mut groups);
    }
    groups
}

/// True if at least one group exists. Stops at the first run found.
pub fn has_match(board: &Board) -> bool {
    let size = board.size();
    (0..size).any(|line| {
        line_has_run(board, |i| Position::new(line, i))
            || line_has_run(board, |i| Position::new(i, line))
    })
}

#[inline]
fn matchable(color: Color) -> bool {
    color.is_basic()
}

fn scan_line(
    board: &Board,
    axis: Axis,
    at: impl Fn(usize) -> Position,
    out: &mut Vec<MatchGroup>,
) {
    let size = board.size();
    let mut start = 0usize;
    while start < size {
        let color = board.color_at(at(start));
        let mut end = start + 1;
        if matchable(color) {
            while end < size && board.color_at(at(end)) == color {
                end += 1;
            }
            if end - start >= MIN_MATCH_LEN {
                out.push(MatchGroup {
                    axis,
                    color,
                    cells: (start..end).map(&at).collect(),
                });
            }
        }
        start = end;
    }
}

fn line_has_run(board: &Board, at: impl Fn(usize) -> Position) -> bool {
    let size = board.size();
    let mut run = 1usize;
    for i in 1..size {
        let prev = board.color_at(at(i - 1));
        if matchable(prev) && board.color_at(at(i)) == prev {
            run += 1;
            if run >= MIN_MATCH_LEN {
                return true;
            }
        } else {
            run = 1;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from_str(text: &str) -> Board {
        Board::from_text(text).unwrap()
    }

    #[test]
    fn finds_horizontal_run_in_order() {
        let board = board_from_str(
            "RRRB
             BGYG
             GBGY
             YGBR",
        );
        let groups = find_match_groups(&board);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].axis, Axis::Horizontal);
        assert_eq!(groups[0].color, Color::Red);
        assert_eq!(
            groups[0].cells,
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
    }

    #[test]
    fn finds_vertical_run_at_edge() {
        let board = board_from_str(
            "RBGY
             BGYY
             GBRY
             YGBR",
        );
        let groups = find_match_groups(&board);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].axis, Axis::Vertical);
        assert_eq!(
            groups[0].cells,
            vec![Position::new(0, 3), Position::new(1, 3), Position::new(2, 3)]
        );
    }

    #[test]
    fn crossing_runs_are_separate_groups() {
        let board = board_from_str(
            "RBGY
             RRRB
             RBGY
             YGBO",
        );
        let groups = find_match_groups(&board);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.contains(Position::new(1, 0))));
    }

    #[test]
    fn empty_and_multi_never_match() {
        let board = board_from_str(
            "...B
             ***G
             RBGY
             YGBO",
        );
        assert!(find_match_groups(&board).is_empty());
        assert!(!has_match(&board));
    }

    #[test]
    fn long_run_is_one_group() {
        let board = board_from_str(
            "GGGGG
             BRBRB
             RBRBR
             BRBRB
             RBRBR",
        );
        let groups = find_match_groups(&board);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 5);
        assert_eq!(groups[0].middle(), Position::new(0, 2));
    }

    #[test]
    fn has_match_agrees_with_full_scan() {
        let board = board_from_str(
            "RBGY
             BGYB
             GBRB
             YGBB",
        );
        assert!(has_match(&board));
        assert!(!find_match_groups(&board).is_empty());
    }
}
