use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize, ser::SerializeStruct as _};

use super::board::BOARD_WIDTH;

/// A falling tetromino: its kind, current shape matrix and color.
///
/// Tetrominoes are immutable values. [`Tetromino::rotated`] returns a new value and
/// leaves the original untouched. A tetromino carries no position; placement on the
/// board is described separately by a [`Position`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceKind, Tetromino};
///
/// let piece = Tetromino::new(PieceKind::T);
/// let rotated = piece.rotated();
///
/// assert_ne!(piece.shape(), rotated.shape());
/// assert_eq!(rotated.rotated().rotated().rotated(), piece);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    kind: PieceKind,
    shape: PieceShape,
}

impl Serialize for Tetromino {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("Tetromino", 3)?;
        s.serialize_field("kind", &self.kind)?;
        s.serialize_field("shape", &self.shape)?;
        s.serialize_field("color", &self.color())?;
        s.end()
    }
}

impl Tetromino {
    /// Creates a tetromino of the given kind in its canonical orientation.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: kind.spawn_shape(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &PieceShape {
        &self.shape
    }

    /// Color token of this tetromino, determined solely by its kind.
    #[must_use]
    pub const fn color(&self) -> PieceColor {
        self.kind.color()
    }

    /// Returns this tetromino rotated 90° clockwise.
    ///
    /// The O-piece is a fixed point: all four rotations of a 2×2 square are identical.
    #[must_use]
    pub fn rotated(&self) -> Self {
        if self.kind == PieceKind::O {
            return *self;
        }
        Self {
            kind: self.kind,
            shape: self.shape.rotated(),
        }
    }

    /// Returns the board coordinates covered by this tetromino placed at `position`.
    ///
    /// Coordinates are `(x, y)` and may lie outside the board.
    pub fn cells_at(&self, position: Position) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (position.x + dx, position.y + dy))
    }
}

/// Offset of a shape matrix's top-left corner in board coordinates.
///
/// `y` grows downward and `x` grows rightward. A position carries no bounds
/// invariant of its own; validity depends on the board and shape it is paired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Where every new piece appears: column `BOARD_WIDTH / 2 - 1`, row 0.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const SPAWN: Self = Self::new(BOARD_WIDTH as i32 / 2 - 1, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        self.offset(0, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

/// Uniform draw over the seven kinds, independent of previous draws.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    #[must_use]
    pub const fn color(self) -> PieceColor {
        PIECE_COLORS[self as usize]
    }

    /// Returns the canonical orientation-0 shape of this kind.
    #[must_use]
    pub const fn spawn_shape(self) -> PieceShape {
        PIECE_SHAPES[self as usize]
    }
}

/// Opaque color token stored in locked board cells.
///
/// The token is a `#rrggbb` string. Gameplay never inspects it; it only tells a
/// renderer which piece left the block behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{_0}")]
pub struct PieceColor(&'static str);

impl PieceColor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Serialize for PieceColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for PieceColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PIECE_COLORS
            .iter()
            .copied()
            .find(|color| color.0.eq_ignore_ascii_case(&s))
            .ok_or_else(|| serde::de::Error::custom(format!("unknown piece color: {s}")))
    }
}

const PIECE_COLORS: [PieceColor; PieceKind::LEN] = [
    PieceColor("#00f0f0"),
    PieceColor("#f0f000"),
    PieceColor("#a000f0"),
    PieceColor("#00f000"),
    PieceColor("#f00000"),
    PieceColor("#0000f0"),
    PieceColor("#f0a000"),
];

/// Square occupancy matrix of a piece.
///
/// The matrix is `size × size` (2 for O, 4 for I, 3 for the rest), stored in a 4×4
/// array whose cells outside `size` are always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    size: usize,
    cells: [[bool; 4]; 4],
}

impl Serialize for PieceShape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.rows())
    }
}

impl PieceShape {
    const fn new(size: usize, cells: [[bool; 4]; 4]) -> Self {
        Self { size, cells }
    }

    /// Side length of the matrix.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns whether the cell at column `x`, row `y` is occupied.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.cells[y][x]
    }

    /// Returns the rows of the matrix, each `size` cells wide.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.size].iter().map(|row| &row[..self.size])
    }

    /// Returns `(dx, dy)` offsets of the occupied cells.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows().zip(0..).flat_map(|(row, dy)| {
            row.iter()
                .zip(0..)
                .filter_map(move |(&cell, dx)| cell.then_some((dx, dy)))
        })
    }

    /// Returns the matrix rotated 90° clockwise: `rotated[col][N-1-row] = shape[row][col]`.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let n = self.size;
        let mut cells = [[false; 4]; 4];
        for (row, line) in self.cells[..n].iter().enumerate() {
            for (col, &cell) in line[..n].iter().enumerate() {
                cells[col][n - 1 - row] = cell;
            }
        }
        Self::new(n, cells)
    }
}

const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];

    [
        // I-piece
        PieceShape::new(4, [EEEE, [C, C, C, C], EEEE, EEEE]),
        // O-piece
        PieceShape::new(2, [[C, C, E, E], [C, C, E, E], EEEE, EEEE]),
        // T-piece
        PieceShape::new(3, [[C, C, C, E], [E, C, E, E], EEEE, EEEE]),
        // S-piece
        PieceShape::new(3, [[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // Z-piece
        PieceShape::new(3, [[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
        // J-piece
        PieceShape::new(3, [[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        // L-piece
        PieceShape::new(3, [[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
    ]
};
