use arrayvec::ArrayVec;
use serde::Serialize;

use super::piece::{PieceColor, Position, Tetromino};

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Locked block left behind by a piece of the given color.
    Filled(PieceColor),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    #[must_use]
    pub fn color(self) -> Option<PieceColor> {
        match self {
            Block::Empty => None,
            Block::Filled(color) => Some(color),
        }
    }
}

// Empty cells serialize as `null`, filled cells as their color token.
impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.color().serialize(serializer)
    }
}

/// One row of the board.
pub type BoardRow = [Block; BOARD_WIDTH];

const EMPTY_ROW: BoardRow = [Block::Empty; BOARD_WIDTH];

/// The fixed-size playing field: `BOARD_HEIGHT` rows of `BOARD_WIDTH` cells.
///
/// Row 0 is the top of the board. Board operations never mutate `self`; merging a
/// piece or clearing lines returns a new board.
///
/// # Example
///
/// ```
/// use blockfall_engine::{BOARD_HEIGHT, Board, PieceKind, Position, Tetromino};
///
/// let board = Board::EMPTY;
/// let piece = Tetromino::new(PieceKind::O);
///
/// let landing = board.drop_position(&piece, Position::SPAWN);
/// assert_eq!(landing.y, 18);
///
/// let board = board.merged(&piece, landing);
/// let (board, cleared) = board.cleared_lines();
/// assert_eq!(cleared, 0);
/// assert!(!board.rows()[BOARD_HEIGHT - 1][4].is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    #[must_use]
    pub const fn rows(&self) -> &[BoardRow; BOARD_HEIGHT] {
        &self.rows
    }

    /// Returns the cell at `(x, y)`, or `None` when the coordinates are off the board.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Block> {
        let (x, y) = cell_index(x, y)?;
        Some(self.rows[y][x])
    }

    /// Fills a single cell with the specified block.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is off the board.
    pub fn fill_block_at(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y][x] = block;
    }

    /// Returns whether `piece` placed at `position` collides.
    ///
    /// A placement collides if any occupied shape cell lands outside the board
    /// (including rows above the top) or on a non-empty cell. Empty shape cells never
    /// constrain placement.
    #[must_use]
    pub fn is_colliding(&self, piece: &Tetromino, position: Position) -> bool {
        piece
            .cells_at(position)
            .any(|(x, y)| self.get(x, y).is_none_or(|block| !block.is_empty()))
    }

    /// Returns a new board with `piece` locked at `position`.
    ///
    /// Cells that fall outside the board are dropped silently; this happens when a
    /// piece locks partially above the top.
    #[must_use]
    pub fn merged(&self, piece: &Tetromino, position: Position) -> Self {
        let mut board = *self;
        for (x, y) in piece.cells_at(position) {
            if let Some((x, y)) = cell_index(x, y) {
                board.rows[y][x] = Block::Filled(piece.color());
            }
        }
        board
    }

    /// Returns the indices of all complete rows, top to bottom.
    #[must_use]
    pub fn complete_rows(&self) -> ArrayVec<usize, BOARD_HEIGHT> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| is_complete(row))
            .map(|(y, _)| y)
            .collect()
    }

    /// Removes every complete row and returns the new board with the number removed.
    ///
    /// Remaining rows keep their order and settle at the bottom; empty rows are added
    /// at the top so the height never changes.
    #[must_use]
    pub fn cleared_lines(&self) -> (Self, usize) {
        let complete = self.complete_rows();
        let mut board = Self::EMPTY;
        let mut dst = BOARD_HEIGHT;
        for (_, row) in self
            .rows
            .iter()
            .enumerate()
            .rev()
            .filter(|(y, _)| !complete.contains(y))
        {
            dst -= 1;
            board.rows[dst] = *row;
        }
        (board, complete.len())
    }

    /// Returns the lowest position `piece` can reach by moving straight down.
    ///
    /// Steps one row further at a time and stops before the first colliding position.
    /// The loop is bounded because every position below the board collides.
    #[must_use]
    pub fn drop_position(&self, piece: &Tetromino, position: Position) -> Position {
        let mut dropped = position;
        while !self.is_colliding(piece, dropped.down()) {
            dropped = dropped.down();
        }
        dropped
    }
}

fn is_complete(row: &BoardRow) -> bool {
    row.iter().all(|block| !block.is_empty())
}

fn cell_index(x: i32, y: i32) -> Option<(usize, usize)> {
    let x = usize::try_from(x).ok().filter(|x| *x < BOARD_WIDTH)?;
    let y = usize::try_from(y).ok().filter(|y| *y < BOARD_HEIGHT)?;
    Some((x, y))
}
