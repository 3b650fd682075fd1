use blockfall_engine::ShapeKind;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// What occupies one board cell on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellKind {
    Empty,
    Ghost,
    Shape(ShapeKind),
}

impl CellKind {
    /// Interprets a grid value (`0` or a color id).
    pub(crate) fn from_grid_value(value: u8) -> Self {
        ShapeKind::from_color_id(value).map_or(Self::Empty, Self::Shape)
    }
}

/// A single board cell, two terminal columns wide.
#[derive(Debug)]
pub(crate) struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub(crate) const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub(crate) const fn width() -> u16 {
        2
    }

    pub(crate) const fn height() -> u16 {
        1
    }

    pub(crate) const fn from_cell(cell: CellKind) -> Self {
        match cell {
            CellKind::Empty => Self::new(style::EMPTY, ""),
            CellKind::Ghost => Self::new(style::GHOST, "[]"),
            CellKind::Shape(kind) => Self::new(style::shape(kind), ""),
        }
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // a Paragraph fills the whole area, not only the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_values_map_to_cells() {
        assert_eq!(CellKind::from_grid_value(0), CellKind::Empty);
        assert_eq!(CellKind::from_grid_value(1), CellKind::Shape(ShapeKind::S));
        assert_eq!(CellKind::from_grid_value(7), CellKind::Shape(ShapeKind::I));
        assert_eq!(CellKind::from_grid_value(200), CellKind::Empty);
    }
}
