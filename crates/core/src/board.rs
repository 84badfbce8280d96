//! Board module - the token grid
//!
//! The board is a square grid where each cell holds a token (possibly EMPTY).
//! Uses a flat row-major vector for cache locality; the edge length is fixed at
//! construction.
//! Coordinates: `(row, col)` where row 0 is the top edge and col 0 the left edge.

use crate::matcher::find_match_groups;
use crate::types::{Color, Position, Token};

/// The game board - `size` x `size` tokens in flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Token>,
}

impl Board {
    /// Create a board with every cell EMPTY
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Token::EMPTY; size * size],
        }
    }

    /// Build from explicit rows (top row first).
    ///
    /// Returns `None` unless the rows form a non-empty square.
    pub fn from_rows(rows: Vec<Vec<Token>>) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Parse a text grid: one line per row, one character per cell.
    ///
    /// Color glyphs (`R B G Y P O`, case-insensitive) are normal tokens, `.` is
    /// EMPTY and `*` is a color bomb. Surrounding whitespace on each line is
    /// ignored, so indented raw strings work.
    pub fn from_text(text: &str) -> Option<Self> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|ch| match ch {
                        '*' => Some(Token::color_bomb()),
                        '.' => Some(Token::EMPTY),
                        _ => Color::from_str(&ch.to_string())
                            .filter(Color::is_basic)
                            .map(Token::normal),
                    })
                    .collect::<Option<Vec<_>>>()
            })
            .collect::<Option<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        Some(pos.row * self.size + pos.col)
    }

    /// Edge length (rows == columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Token at `pos`, `None` if out of bounds
    pub fn get(&self, pos: Position) -> Option<Token> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set token at `pos`.
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Position, token: Token) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = token;
                true
            }
            None => false,
        }
    }

    /// Swap two cells. Returns false (and leaves the board untouched) if either
    /// is out of bounds.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Color at `pos`, EMPTY when out of bounds
    #[inline]
    pub fn color_at(&self, pos: Position) -> Color {
        self.get(pos).map_or(Color::Empty, |t| t.color())
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    pub fn cells(&self) -> &[Token] {
        &self.cells
    }

    /// One row as a slice
    pub fn row(&self, row: usize) -> Option<&[Token]> {
        if row >= self.size {
            return None;
        }
        let start = row * self.size;
        Some(&self.cells[start..start + self.size])
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|t| t.is_empty()).count()
    }

    pub fn count_color(&self, color: Color) -> usize {
        self.cells.iter().filter(|t| t.color() == color).count()
    }

    /// Fully populated with no outstanding match
    pub fn is_settled(&self) -> bool {
        self.count_empty() == 0 && find_match_groups(self).is_empty()
    }

    /// Convert to rows for display/testing
    pub fn to_rows(&self) -> Vec<Vec<Token>> {
        self.cells.chunks(self.size).map(|row| row.to_vec()).collect()
    }
}
