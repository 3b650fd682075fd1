pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A raw shape id outside the catalog's `0..7` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid shape id {_0}, expected 0..{}", ShapeKind::LEN)]
pub struct InvalidShapeId(#[error(not(source))] pub u8);

/// Inconsistency found in the static shape tables.
///
/// Returned by [`verify_catalog`]. The tables never change at runtime, so this
/// is only ever reported once at startup.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CatalogError {
    #[display("shape at index {index} reports id {id}")]
    IdMismatch { index: usize, id: u8 },
    #[display("shape {shape} has an empty matrix")]
    EmptyMatrix { shape: ShapeKind },
    #[display("shape {shape} has an empty border row or column")]
    LooseBounds { shape: ShapeKind },
    #[display("shape {shape} has {count} filled cells, expected 4")]
    CellCount { shape: ShapeKind, count: usize },
    #[display("shape {shape} has value {value} at ({row}, {column}), expected 0 or {}", shape.color_id())]
    ColorMismatch {
        shape: ShapeKind,
        row: usize,
        column: usize,
        value: u8,
    },
}
