use std::fmt;

/// Largest side length of any occupancy matrix.
const MAX_SIDE: usize = 4;

/// Occupancy pattern of a piece in one rotation state.
///
/// A cell holds `0` when empty, or the color id of its shape when filled.
/// The matrix is a small `Copy` value: rotating produces a new matrix instead of
/// mutating the old one, so a piece and any copy of it never share cells.
///
/// # Example
///
/// ```
/// use blockfall_engine::CellMatrix;
///
/// let bar = CellMatrix::from_rows([[7, 7, 7, 7]]);
/// let turned = bar.quarter_turned();
///
/// assert_eq!((turned.height(), turned.width()), (4, 1));
/// assert_eq!(turned.quarter_turned().quarter_turned().quarter_turned().quarter_turned(), turned);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CellMatrix {
    height: u8,
    width: u8,
    cells: [[u8; MAX_SIDE]; MAX_SIDE],
}

impl CellMatrix {
    /// Builds a matrix from literal rows.
    ///
    /// # Panics
    ///
    /// Panics if either dimension exceeds 4.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows<const H: usize, const W: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(H <= MAX_SIDE && W <= MAX_SIDE);
        let mut cells = [[0; MAX_SIDE]; MAX_SIDE];
        let mut h = 0;
        while h < H {
            let mut w = 0;
            while w < W {
                cells[h][w] = rows[h][w];
                w += 1;
            }
            h += 1;
        }
        Self {
            height: H as u8,
            width: W as u8,
            cells,
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    /// Iterates the rows of the matrix, each trimmed to [`Self::width`].
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(|row| &row[..self.width()])
    }

    /// Iterates `(row, column, value)` for every non-empty cell.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.rows().enumerate().flat_map(|(h, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &value)| value != 0)
                .map(move |(w, &value)| (h, w, value))
        })
    }

    /// Returns the next rotation state.
    ///
    /// The matrix is transposed, then its row order is reversed. Four turns
    /// give back the original matrix.
    #[must_use]
    pub fn quarter_turned(&self) -> Self {
        let (height, width) = (self.height(), self.width());

        let mut transposed = [[0; MAX_SIDE]; MAX_SIDE];
        for (w, row) in transposed.iter_mut().enumerate().take(width) {
            for (h, cell) in row.iter_mut().enumerate().take(height) {
                *cell = self.cells[h][w];
            }
        }

        let mut cells = [[0; MAX_SIDE]; MAX_SIDE];
        for (h, row) in cells.iter_mut().enumerate().take(width) {
            *row = transposed[width - h - 1];
        }

        Self {
            height: self.width,
            width: self.height,
            cells,
        }
    }
}

impl fmt::Debug for CellMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(matrix: &CellMatrix) -> Vec<Vec<u8>> {
        matrix.rows().map(<[u8]>::to_vec).collect()
    }

    #[test]
    fn test_from_rows_keeps_dimensions() {
        let matrix = CellMatrix::from_rows([[0, 3, 0], [3, 3, 3]]);
        assert_eq!(matrix.height(), 2);
        assert_eq!(matrix.width(), 3);
        assert_eq!(collect(&matrix), vec![vec![0, 3, 0], vec![3, 3, 3]]);
    }

    #[test]
    fn test_quarter_turn_is_transpose_then_row_reverse() {
        let matrix = CellMatrix::from_rows([[0, 1, 1], [1, 1, 0]]);
        let turned = matrix.quarter_turned();

        // transpose: [0,1] [1,1] [1,0], then rows reversed
        assert_eq!(collect(&turned), vec![vec![1, 0], vec![1, 1], vec![0, 1]]);
    }

    #[test]
    fn test_quarter_turn_of_bar() {
        let matrix = CellMatrix::from_rows([[7, 7, 7, 7]]);
        let turned = matrix.quarter_turned();
        assert_eq!((turned.height(), turned.width()), (4, 1));
        assert!(turned.rows().all(|row| row == [7]));
    }

    #[test]
    fn test_four_quarter_turns_restore_matrix() {
        let matrices = [
            CellMatrix::from_rows([[0, 0, 5], [5, 5, 5]]),
            CellMatrix::from_rows([[6, 0, 0], [6, 6, 6]]),
            CellMatrix::from_rows([[7, 7, 7, 7]]),
            CellMatrix::from_rows([[4, 4], [4, 4]]),
        ];
        for matrix in matrices {
            let mut turned = matrix;
            for _ in 0..4 {
                turned = turned.quarter_turned();
            }
            assert_eq!(turned, matrix);
        }
    }

    #[test]
    fn test_filled_cells_skip_empty() {
        let matrix = CellMatrix::from_rows([[0, 3, 0], [3, 3, 3]]);
        let cells: Vec<_> = matrix.filled_cells().collect();
        assert_eq!(cells, vec![(0, 1, 3), (1, 0, 3), (1, 1, 3), (1, 2, 3)]);
    }
}
