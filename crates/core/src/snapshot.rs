use std::fmt;

use serde::Serialize;

use crate::board::Board;
use crate::types::{Color, TokenKind};

/// One cell as seen by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TokenView {
    pub color: Color,
    pub kind: TokenKind,
    /// Presentation identity, absent for EMPTY cells or untracked boards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

/// Read-only copy of a board handed across the engine boundary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BoardSnapshot {
    pub size: usize,
    pub rows: Vec<Vec<TokenView>>,
}

impl BoardSnapshot {
    /// Snapshot without identities
    pub fn from_board(board: &Board) -> Self {
        Self::with_ids(board, |_| None)
    }

    /// Snapshot with an id per cell, looked up by flat row-major index
    pub fn with_ids(board: &Board, id_at: impl Fn(usize) -> Option<u64>) -> Self {
        let size = board.size();
        let rows = board
            .cells()
            .chunks(size.max(1))
            .enumerate()
            .map(|(row, tokens)| {
                tokens
                    .iter()
                    .enumerate()
                    .map(|(col, token)| TokenView {
                        color: token.color(),
                        kind: token.kind(),
                        id: if token.is_empty() {
                            None
                        } else {
                            id_at(row * size + col)
                        },
                    })
                    .collect()
            })
            .collect();
        Self { size, rows }
    }
}

/// Text grid: color glyph per cell, specials marked after the glyph
///
/// `-` row clear, `|` column clear, `#` area clear. Normal tokens get a space.
impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row
                .iter()
                .flat_map(|cell| {
                    let mark = match cell.kind {
                        TokenKind::RowClear => '-',
                        TokenKind::ColumnClear => '|',
                        TokenKind::AreaClear => '#',
                        TokenKind::Normal | TokenKind::ColorBomb => ' ',
                    };
                    [cell.color.glyph(), mark]
                })
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
