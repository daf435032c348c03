use blockfall_engine::{RenderCell, Tetromino};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::CellDisplay;

/// Preview of a single piece, trimmed to its occupied cells.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    piece: Option<Tetromino>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn piece(self, piece: Tetromino) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Bounding box of the occupied cells: `(min_x, min_y, width, height)`.
fn occupied_bounds(piece: &Tetromino) -> (usize, usize, usize, usize) {
    let cells = piece
        .shape()
        .occupied_cells()
        .filter_map(|(x, y)| Some((usize::try_from(x).ok()?, usize::try_from(y).ok()?)));
    let (min_x, min_y, max_x, max_y) = cells.fold(
        (usize::MAX, usize::MAX, 0, 0),
        |(min_x, min_y, max_x, max_y), (x, y)| {
            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
        },
    );
    if min_x > max_x {
        return (0, 0, 0, 0);
    }
    (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let (min_x, min_y, width, height) = occupied_bounds(&piece);
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return;
        };
        let piece_area = area.centered(
            Constraint::Length(w * CellDisplay::width()),
            Constraint::Length(h * CellDisplay::height()),
        );

        let col_constraints = (0..w).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..h).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied = CellDisplay::from_cell(RenderCell::Falling(piece.color()), false);
        let empty = CellDisplay::from_cell(RenderCell::Empty, false);
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if piece.shape().is_occupied(min_x + x, min_y + y) {
                    Widget::render(&occupied, grid_cell, buf);
                } else {
                    Widget::render(&empty, grid_cell, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PieceKind;

    use super::*;

    #[test]
    fn test_occupied_bounds() {
        let bounds = |kind| occupied_bounds(&Tetromino::new(kind));
        assert_eq!(bounds(PieceKind::I), (0, 1, 4, 1));
        assert_eq!(bounds(PieceKind::O), (0, 0, 2, 2));
        assert_eq!(bounds(PieceKind::T), (0, 0, 3, 2));
        assert_eq!(bounds(PieceKind::J), (0, 0, 3, 2));
    }

    #[test]
    fn test_preview_fits_every_piece() {
        let display = PieceDisplay::new();
        for kind in PieceKind::ALL {
            let (_, _, width, height) = occupied_bounds(&Tetromino::new(kind));
            assert!(width * usize::from(CellDisplay::width()) <= usize::from(display.width()));
            assert!(height * usize::from(CellDisplay::height()) <= usize::from(display.height()));
        }
    }
}
