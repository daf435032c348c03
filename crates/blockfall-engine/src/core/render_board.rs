use super::{
    board::{BOARD_HEIGHT, BOARD_WIDTH, Block, Board},
    piece::{PieceColor, Position, Tetromino},
};

/// A single cell as presented to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderCell {
    #[default]
    Empty,
    /// Locked block.
    Locked(PieceColor),
    /// Landing preview of the falling piece.
    Ghost(PieceColor),
    /// Cell of the falling piece.
    Falling(PieceColor),
}

impl RenderCell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == RenderCell::Empty
    }
}

impl From<Block> for RenderCell {
    fn from(block: Block) -> Self {
        match block {
            Block::Empty => RenderCell::Empty,
            Block::Filled(color) => RenderCell::Locked(color),
        }
    }
}

/// Board composed for display: locked blocks, ghost overlay and falling piece.
///
/// Layers are applied in that order. The ghost only fills empty cells, so it never
/// hides a locked block; the falling piece is painted last and always wins.
#[derive(Debug, Clone)]
pub struct RenderBoard {
    rows: [[RenderCell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl From<&Board> for RenderBoard {
    fn from(board: &Board) -> Self {
        let rows = *board.rows();
        Self {
            rows: rows.map(|row| row.map(RenderCell::from)),
        }
    }
}

impl RenderBoard {
    pub fn rows(&self) -> impl Iterator<Item = &[RenderCell; BOARD_WIDTH]> {
        self.rows.iter()
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<RenderCell> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Paints the ghost preview of `piece` at `position` onto empty cells.
    pub fn fill_ghost(&mut self, piece: &Tetromino, position: Position) {
        let ghost = RenderCell::Ghost(piece.color());
        for (x, y) in piece.cells_at(position) {
            if let Some(cell) = self.cell_mut(x, y)
                && cell.is_empty()
            {
                *cell = ghost;
            }
        }
    }

    /// Paints the falling `piece` at `position`, overwriting whatever is underneath.
    pub fn fill_piece(&mut self, piece: &Tetromino, position: Position) {
        let falling = RenderCell::Falling(piece.color());
        for (x, y) in piece.cells_at(position) {
            if let Some(cell) = self.cell_mut(x, y) {
                *cell = falling;
            }
        }
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut RenderCell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get_mut(y)?.get_mut(x)
    }
}
