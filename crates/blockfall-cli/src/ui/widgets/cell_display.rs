use blockfall_engine::{PieceColor, RenderCell};
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};

use super::{color, style};

/// One board cell, drawn two columns wide.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub fn from_cell(cell: RenderCell, show_dots: bool) -> Self {
        match cell {
            RenderCell::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            RenderCell::Empty => Self::new(style::EMPTY, ""),
            RenderCell::Locked(c) | RenderCell::Falling(c) => {
                Self::new(style::bg_only(terminal_color(c)), "")
            }
            RenderCell::Ghost(c) => Self::new(style::fg_bg(terminal_color(c), color::BLACK), "[]"),
        }
    }
}

/// Maps a piece color token to a terminal color.
pub fn terminal_color(color: PieceColor) -> Color {
    color.as_str().parse().unwrap_or(color::GRAY)
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Paragraph fills the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
