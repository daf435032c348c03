pub use self::{board::*, piece::*, render_board::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod render_board;
