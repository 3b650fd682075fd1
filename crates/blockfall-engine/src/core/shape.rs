use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::Serialize;

use crate::{CatalogError, InvalidShapeId};

use super::{matrix::CellMatrix, piece::Rotation};

/// One of the seven block layouts.
///
/// The discriminant is the shape id; the value written into the grid when a piece
/// of this shape locks is [`Self::color_id`] (`id + 1`), so `0` stays free for
/// empty cells.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display,
)]
#[repr(u8)]
pub enum ShapeKind {
    S = 0,
    Z = 1,
    T = 2,
    /// The 2×2 square. Rotating it never shifts its position.
    O = 3,
    L = 4,
    J = 5,
    /// The 4-wide bar, with its own offset table.
    I = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl TryFrom<u8> for ShapeKind {
    type Error = InvalidShapeId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id)
    }
}

impl ShapeKind {
    /// Number of shapes (7).
    pub const LEN: usize = 7;

    /// All shapes, ordered by id.
    pub const ALL: [Self; Self::LEN] = [
        Self::S,
        Self::Z,
        Self::T,
        Self::O,
        Self::L,
        Self::J,
        Self::I,
    ];

    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn from_id(id: u8) -> Result<Self, InvalidShapeId> {
        if (id as usize) < Self::LEN {
            Ok(Self::ALL[id as usize])
        } else {
            Err(InvalidShapeId(id))
        }
    }

    /// Value stored in a grid cell occupied by this shape.
    #[must_use]
    pub const fn color_id(self) -> u8 {
        self.id() + 1
    }

    /// Inverse of [`Self::color_id`]; `None` for empty cells.
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_color_id(4), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_color_id(0), None);
    /// ```
    #[must_use]
    pub const fn from_color_id(color_id: u8) -> Option<Self> {
        match color_id.checked_sub(1) {
            Some(id) => match Self::from_id(id) {
                Ok(kind) => Some(kind),
                Err(_) => None,
            },
            None => None,
        }
    }

    /// Canonical occupancy pattern at rotation 0.
    #[must_use]
    pub const fn matrix(self) -> CellMatrix {
        SHAPE_MATRICES[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> ShapeColor {
        SHAPE_COLORS[self as usize]
    }

    /// Position correction applied to the matrix anchor at `rotation`.
    ///
    /// Rotating a matrix pivots it around its top-left corner; these hand-tuned
    /// offsets keep the piece visually in place.
    #[must_use]
    pub const fn offset(self, rotation: Rotation) -> Offset {
        match self {
            Self::O => Offset::ZERO,
            Self::I => BAR_OFFSETS[rotation.index()],
            _ => COMMON_OFFSETS[rotation.index()],
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::S => 'S',
            Self::Z => 'Z',
            Self::T => 'T',
            Self::O => 'O',
            Self::L => 'L',
            Self::J => 'J',
            Self::I => 'I',
        }
    }
}

/// Row/column correction added to a piece's anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub row: i32,
    pub column: i32,
}

impl Offset {
    pub const ZERO: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }
}

/// Display color of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ShapeColor {
    /// Color of an empty grid cell.
    pub const EMPTY: Self = Self::rgb(230, 230, 230);
    /// Color of the predicted landing position.
    pub const GHOST: Self = Self::rgb(220, 220, 220);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

const SHAPE_MATRICES: [CellMatrix; ShapeKind::LEN] = [
    // S
    CellMatrix::from_rows([[0, 1, 1], [1, 1, 0]]),
    // Z
    CellMatrix::from_rows([[2, 2, 0], [0, 2, 2]]),
    // T
    CellMatrix::from_rows([[0, 3, 0], [3, 3, 3]]),
    // O
    CellMatrix::from_rows([[4, 4], [4, 4]]),
    // L
    CellMatrix::from_rows([[0, 0, 5], [5, 5, 5]]),
    // J
    CellMatrix::from_rows([[6, 0, 0], [6, 6, 6]]),
    // I
    CellMatrix::from_rows([[7, 7, 7, 7]]),
];

const SHAPE_COLORS: [ShapeColor; ShapeKind::LEN] = [
    ShapeColor::rgb(0x84, 0x5e, 0xc2),
    ShapeColor::rgb(0xff, 0x6f, 0x91),
    ShapeColor::rgb(0xff, 0xc7, 0x5f),
    ShapeColor::rgb(0x00, 0x81, 0xcf),
    ShapeColor::rgb(0xff, 0x80, 0x66),
    ShapeColor::rgb(0x00, 0xc2, 0xa8),
    ShapeColor::rgb(0xbf, 0x34, 0xb4),
];

const COMMON_OFFSETS: [Offset; 4] = [
    Offset::new(0, 0),
    Offset::new(0, 0),
    Offset::new(1, 0),
    Offset::new(0, 1),
];

const BAR_OFFSETS: [Offset; 4] = [
    Offset::new(0, 0),
    Offset::new(-1, 1),
    Offset::new(1, 0),
    Offset::new(-1, 2),
];

/// Checks the static shape tables for consistency.
///
/// Every matrix must be non-empty, tight (no empty border row or column), hold
/// exactly four filled cells, and fill them with its shape's color id. Front ends
/// call this once before starting a game and treat an error as fatal.
pub fn verify_catalog() -> Result<(), CatalogError> {
    for (index, shape) in ShapeKind::ALL.into_iter().enumerate() {
        if usize::from(shape.id()) != index {
            return Err(CatalogError::IdMismatch {
                index,
                id: shape.id(),
            });
        }

        let matrix = shape.matrix();
        if matrix.height() == 0 || matrix.width() == 0 {
            return Err(CatalogError::EmptyMatrix { shape });
        }

        for (row, column, value) in matrix.filled_cells() {
            if value != shape.color_id() {
                return Err(CatalogError::ColorMismatch {
                    shape,
                    row,
                    column,
                    value,
                });
            }
        }

        let count = matrix.filled_cells().count();
        if count != 4 {
            return Err(CatalogError::CellCount { shape, count });
        }

        let first_row = matrix.rows().next().unwrap_or_default();
        let last_row = matrix.rows().last().unwrap_or_default();
        let column_empty = |column: usize| matrix.rows().all(|row| row[column] == 0);
        if first_row.iter().all(|&v| v == 0)
            || last_row.iter().all(|&v| v == 0)
            || column_empty(0)
            || column_empty(matrix.width() - 1)
        {
            return Err(CatalogError::LooseBounds { shape });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_catalog_is_consistent() {
        assert_eq!(verify_catalog(), Ok(()));
    }

    #[test]
    fn test_id_conversion() {
        for (index, kind) in ShapeKind::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(kind.id()), index);
            assert_eq!(ShapeKind::try_from(kind.id()), Ok(kind));
            assert_eq!(ShapeKind::from_color_id(kind.color_id()), Some(kind));
        }
        assert_eq!(ShapeKind::from_id(7), Err(InvalidShapeId(7)));
        assert_eq!(ShapeKind::from_color_id(8), None);
    }

    #[test]
    fn test_invalid_id_message() {
        assert_eq!(
            InvalidShapeId(9).to_string(),
            "invalid shape id 9, expected 0..7"
        );
    }

    #[test]
    fn test_square_never_offsets() {
        for index in 0..4 {
            assert_eq!(ShapeKind::O.offset(Rotation::new(index)), Offset::ZERO);
        }
    }

    #[test]
    fn test_bar_uses_its_own_offsets() {
        let offsets: Vec<_> = (0..4)
            .map(|index| ShapeKind::I.offset(Rotation::new(index)))
            .collect();
        assert_eq!(
            offsets,
            vec![
                Offset::new(0, 0),
                Offset::new(-1, 1),
                Offset::new(1, 0),
                Offset::new(-1, 2),
            ]
        );
    }

    #[test]
    fn test_other_shapes_share_offsets() {
        for kind in [
            ShapeKind::S,
            ShapeKind::Z,
            ShapeKind::T,
            ShapeKind::L,
            ShapeKind::J,
        ] {
            for index in 0..4 {
                let rotation = Rotation::new(index);
                assert_eq!(kind.offset(rotation), ShapeKind::T.offset(rotation));
            }
        }
        assert_eq!(ShapeKind::S.offset(Rotation::new(2)), Offset::new(1, 0));
        assert_eq!(ShapeKind::S.offset(Rotation::new(3)), Offset::new(0, 1));
    }

    #[test]
    fn test_color_display_is_hex() {
        assert_eq!(ShapeKind::S.color().to_string(), "#845ec2");
        assert_eq!(ShapeKind::I.color().to_string(), "#bf34b4");
        assert_eq!(ShapeColor::EMPTY.to_string(), "#e6e6e6");
    }

    #[test]
    fn test_random_kind_covers_all_shapes() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; ShapeKind::LEN];
        for _ in 0..500 {
            let kind: ShapeKind = rng.random();
            seen[kind as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
