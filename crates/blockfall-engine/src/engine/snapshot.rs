use serde::Serialize;

use crate::core::{COLUMNS, Piece, ROWS, ShapeKind};

/// Owned copy of everything needed to draw a board.
///
/// Taken with [`Board::snapshot`](super::Board::snapshot) so a renderer can work
/// without holding a borrow or lock on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub grid: [[u8; COLUMNS]; ROWS],
    pub falling: Piece,
    pub predicted: Piece,
    pub active: bool,
}

impl BoardSnapshot {
    /// Shape locked at `(row, column)`, or `None` for an empty or out-of-range cell.
    #[must_use]
    pub fn locked_shape(&self, row: usize, column: usize) -> Option<ShapeKind> {
        let value = *self.grid.get(row)?.get(column)?;
        ShapeKind::from_color_id(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, ScriptedShapes};

    use super::*;

    #[test]
    fn test_snapshot_reflects_board() {
        let mut board = Board::with_source(ScriptedShapes::new([ShapeKind::O, ShapeKind::T]));
        board.set_active(true);
        board.tick();
        assert!(board.hard_drop());

        let snapshot = board.snapshot();
        assert!(snapshot.active);
        assert_eq!(snapshot.locked_shape(15, 4), Some(ShapeKind::O));
        assert_eq!(snapshot.locked_shape(15, 3), None);
        assert_eq!(snapshot.locked_shape(16, 0), None);
        assert_eq!(snapshot.falling.kind(), ShapeKind::T);
        assert_eq!(snapshot.predicted.row(), 12);
    }

    #[test]
    fn test_snapshot_serializes_pieces_compactly() {
        let board = Board::with_source(ScriptedShapes::new([ShapeKind::I]));
        let value = serde_json::to_value(board.snapshot()).unwrap();
        assert_eq!(value["falling"], "I#0@0,4");
        assert_eq!(value["predicted"], "I#0@15,4");
        assert_eq!(value["active"], false);
        assert_eq!(value["grid"][15][0], 0);
    }
}
