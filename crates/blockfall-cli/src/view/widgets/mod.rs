use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub(crate) use self::{board_display::*, cell_display::*, key_binding_display::*};

mod board_display;
mod cell_display;
mod key_binding_display;

mod color {
    use blockfall_engine::ShapeColor;
    use ratatui::style::Color;

    pub const fn from_shape_color(color: ShapeColor) -> Color {
        Color::Rgb(color.r, color.g, color.b)
    }

    pub const EMPTY: Color = from_shape_color(ShapeColor::EMPTY);
    pub const GHOST: Color = from_shape_color(ShapeColor::GHOST);
    pub const GHOST_MARK: Color = Color::Rgb(150, 150, 150);
}

pub(crate) mod style {
    use blockfall_engine::ShapeKind;
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const EMPTY: Style = bg_only(color::EMPTY);
    pub const GHOST: Style = fg_bg(color::GHOST_MARK, color::GHOST);

    pub const fn shape(kind: ShapeKind) -> Style {
        bg_only(color::from_shape_color(kind.color()))
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
