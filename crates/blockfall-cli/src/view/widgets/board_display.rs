use std::iter;

use blockfall_engine::{COLUMNS, Piece, ROWS};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use super::{CellDisplay, CellKind};

type Grid = [[u8; COLUMNS]; ROWS];

/// Draws the locked grid with the ghost and the falling piece on top.
#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    grid: &'a Grid,
    ghost: Option<Piece>,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub(crate) fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            ghost: None,
            falling_piece: None,
            block: None,
        }
    }

    pub(crate) fn ghost(self, piece: Piece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub(crate) fn falling_piece(self, piece: Piece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn width(&self) -> u16 {
        COLUMNS as u16 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn height(&self) -> u16 {
        ROWS as u16 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    /// The grid with the overlays applied.
    ///
    /// The ghost only covers empty cells; the falling piece covers everything.
    fn cells(&self) -> [[CellKind; COLUMNS]; ROWS] {
        let mut cells = self.grid.map(|row| row.map(CellKind::from_grid_value));
        if let Some(ghost) = self.ghost {
            for (row, column) in board_cells(&ghost) {
                let cell = &mut cells[row][column];
                if *cell == CellKind::Empty {
                    *cell = CellKind::Ghost;
                }
            }
        }
        if let Some(piece) = self.falling_piece {
            for (row, column) in board_cells(&piece) {
                cells[row][column] = CellKind::Shape(piece.kind());
            }
        }
        cells
    }
}

/// Grid indices of the piece's cells that lie inside the board.
fn board_cells(piece: &Piece) -> impl Iterator<Item = (usize, usize)> {
    piece.occupied_cells().into_iter().filter_map(|(row, column)| {
        let row = usize::try_from(row).ok().filter(|&row| row < ROWS)?;
        let column = usize::try_from(column).ok().filter(|&column| column < COLUMNS)?;
        Some((row, column))
    })
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..COLUMNS).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..ROWS).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<ROWS>(&vertical)
            .into_iter()
            .map(|row| row.layout::<COLUMNS>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.cells()) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                CellDisplay::from_cell(cell).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{PiecePosition, ShapeKind};
    use ratatui::style::Color;

    use super::*;

    fn empty_grid() -> Grid {
        [[0; COLUMNS]; ROWS]
    }

    #[test]
    fn test_overlays() {
        let mut grid = empty_grid();
        grid[15][4] = ShapeKind::T.color_id();

        let falling = Piece::new(ShapeKind::O);
        let mut ghost = falling;
        ghost.set_position(PiecePosition::new(14, 3));

        let cells = BoardDisplay::new(&grid)
            .ghost(ghost)
            .falling_piece(falling)
            .cells();

        assert_eq!(cells[0][4], CellKind::Shape(ShapeKind::O));
        assert_eq!(cells[1][5], CellKind::Shape(ShapeKind::O));
        assert_eq!(cells[0][3], CellKind::Empty);
        assert_eq!(cells[14][3], CellKind::Ghost);
        assert_eq!(cells[15][3], CellKind::Ghost);
        // locked cells stay visible under the ghost
        assert_eq!(cells[15][4], CellKind::Shape(ShapeKind::T));
    }

    #[test]
    fn test_render_colors_cells() {
        let grid = empty_grid();
        let display = BoardDisplay::new(&grid)
            .falling_piece(Piece::new(ShapeKind::I))
            .block(BlockWidget::bordered());
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        (&display).render(area, &mut buf);

        assert_eq!(display.width(), 22);
        assert_eq!(display.height(), 18);

        // inside the border, cell (row 0, column 4) starts at x = 1 + 4 * 2
        let i_color = ShapeKind::I.color();
        assert_eq!(buf[(9, 1)].bg, Color::Rgb(i_color.r, i_color.g, i_color.b));
        let empty = blockfall_engine::ShapeColor::EMPTY;
        assert_eq!(buf[(1, 1)].bg, Color::Rgb(empty.r, empty.g, empty.b));
    }
}
