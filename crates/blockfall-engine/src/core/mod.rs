pub use self::{matrix::*, piece::*, shape::*, shape_source::*};

pub(crate) mod matrix;
pub(crate) mod piece;
pub(crate) mod shape;
pub(crate) mod shape_source;

/// Number of rows on the board.
pub const ROWS: usize = 16;
/// Number of columns on the board.
pub const COLUMNS: usize = 10;

/// Row where new pieces appear.
pub const SPAWN_ROW: i32 = 0;
/// Column where new pieces appear.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const SPAWN_COLUMN: i32 = (COLUMNS / 2) as i32 - 1;
