use arrayvec::ArrayVec;
use serde::Serialize;

use super::{
    SPAWN_COLUMN, SPAWN_ROW,
    matrix::CellMatrix,
    shape::{Offset, ShapeColor, ShapeKind},
    shape_source::ShapeSource,
};

/// A live instance of a shape: rotation state, occupancy matrix and anchor position.
///
/// The anchor is the matrix's top-left corner *before* the shape's offset
/// correction. A filled matrix cell `(h, w)` occupies the board cell
/// `(row + offset.row + h, column + offset.column + w)`.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, ShapeKind};
///
/// let mut piece = Piece::new(ShapeKind::T);
/// let next = piece.peek_next_matrix();
/// piece.rotate();
///
/// assert_eq!(piece.matrix(), next);
/// assert_eq!(piece.rotation().index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    rotation: Rotation,
    matrix: CellMatrix,
    position: PiecePosition,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation@row,column" (e.g., "T#1@3,4")
        let s = format!(
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.position.row,
            self.position.column
        );
        serializer.serialize_str(&s)
    }
}

impl Piece {
    /// Creates a piece of `kind` at rotation 0, anchored at the spawn position.
    #[must_use]
    pub const fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            rotation: Rotation::ZERO,
            matrix: kind.matrix(),
            position: PiecePosition::SPAWN,
        }
    }

    /// Replaces the shape with one drawn from `source` and resets the rotation.
    ///
    /// The position is left untouched.
    pub fn randomize<S>(&mut self, source: &mut S)
    where
        S: ShapeSource + ?Sized,
    {
        let kind = source.next_shape();
        self.kind = kind;
        self.matrix = kind.matrix();
        self.rotation = Rotation::ZERO;
    }

    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn future_rotation(&self) -> Rotation {
        self.rotation.next()
    }

    #[must_use]
    pub const fn matrix(&self) -> CellMatrix {
        self.matrix
    }

    #[must_use]
    pub const fn color(&self) -> ShapeColor {
        self.kind.color()
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    pub const fn set_position(&mut self, position: PiecePosition) {
        self.position = position;
    }

    #[must_use]
    pub const fn row(&self) -> i32 {
        self.position.row
    }

    pub const fn set_row(&mut self, row: i32) {
        self.position.row = row;
    }

    #[must_use]
    pub const fn column(&self) -> i32 {
        self.position.column
    }

    pub const fn set_column(&mut self, column: i32) {
        self.position.column = column;
    }

    /// Offset correction for the current rotation.
    #[must_use]
    pub const fn offset(&self) -> Offset {
        self.kind.offset(self.rotation)
    }

    /// Offset correction the piece would have after [`Self::rotate`].
    #[must_use]
    pub const fn future_offset(&self) -> Offset {
        self.kind.offset(self.future_rotation())
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.matrix.width()
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.matrix.height()
    }

    /// Width after the next rotation; a quarter turn swaps the dimensions.
    #[must_use]
    pub const fn future_width(&self) -> usize {
        self.height()
    }

    /// Height after the next rotation.
    #[must_use]
    pub const fn future_height(&self) -> usize {
        self.width()
    }

    /// The matrix after the next rotation, without changing the piece.
    #[must_use]
    pub fn peek_next_matrix(&self) -> CellMatrix {
        self.matrix.quarter_turned()
    }

    /// Advances to the next rotation state.
    pub fn rotate(&mut self) {
        self.matrix = self.peek_next_matrix();
        self.rotation = self.rotation.next();
    }

    pub const fn move_down(&mut self) {
        self.position.row += 1;
    }

    /// Copy of this piece with the position reset to the origin.
    ///
    /// The copy shares nothing with `self`; callers place it explicitly.
    #[must_use]
    pub const fn detached(&self) -> Self {
        Self {
            position: PiecePosition::ORIGIN,
            ..*self
        }
    }

    /// Board coordinates `(row, column)` of every filled cell, offset-corrected.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(i32, i32), 16> {
        self.cells_of(&self.matrix, self.offset())
    }

    /// Like [`Self::occupied_cells`], for the next rotation state.
    #[must_use]
    pub fn future_occupied_cells(&self) -> ArrayVec<(i32, i32), 16> {
        self.cells_of(&self.peek_next_matrix(), self.future_offset())
    }

    fn cells_of(&self, matrix: &CellMatrix, offset: Offset) -> ArrayVec<(i32, i32), 16> {
        let row0 = self.position.row + offset.row;
        let column0 = self.position.column + offset.column;
        matrix
            .filled_cells()
            .map(|(h, w, _)| (displace(row0, h), displace(column0, w)))
            .collect()
    }
}

/// Adds a matrix index to a board coordinate.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const fn displace(base: i32, index: usize) -> i32 {
    base + index as i32
}

/// Anchor of a piece on the board.
///
/// Coordinates are signed: offset corrections may move the anchor above or left
/// of the board even when every filled cell is inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PiecePosition {
    pub row: i32,
    pub column: i32,
}

impl PiecePosition {
    pub const ORIGIN: Self = Self::new(0, 0);
    pub const SPAWN: Self = Self::new(SPAWN_ROW, SPAWN_COLUMN);

    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }
}

/// Rotation state of a piece, `0..4`, wrapping on every turn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation(u8);

impl Rotation {
    pub const ZERO: Self = Self(0);

    /// Creates a rotation state; `index` is taken modulo 4.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index % 4)
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
