//! Falling-block puzzle engine.
//!
//! The crate is split in two layers:
//!
//! - [`core`] holds the pure data: pieces, rotation, the board and collision checks.
//! - [`engine`] builds the game on top: piece generation, scoring, the immutable
//!   [`GameState`] with its transitions, and the [`GameSession`] controller that owns
//!   the clock and the auto-drop timer.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding at target placement")]
pub struct PieceCollisionError;

/// Reason a piece action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ActionError {
    #[display("no piece is in play")]
    NotPlaying,
    #[display("piece action blocked")]
    Collision(PieceCollisionError),
}

impl From<PieceCollisionError> for ActionError {
    fn from(err: PieceCollisionError) -> Self {
        Self::Collision(err)
    }
}
