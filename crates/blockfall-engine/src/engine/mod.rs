//! Game rules and state management.
//!
//! - [`PieceGenerator`] - Uniform random piece source, optionally seeded
//! - [`scoring`] - Line score, time score, level and drop speed
//! - [`GameState`] - Immutable game snapshot with pure transitions
//! - [`DropTimer`] - Deadline-based auto-drop timer
//! - [`GameSession`] - Controller gating player input and driving the timer
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; the board and first pieces are ready but nothing falls
//! 2. [`GameSession::start`] starts the clock and arms the drop timer
//! 3. The host forwards input (move, rotate, drops) and calls [`GameSession::update`]
//!    whenever [`GameSession::next_drop_deadline`] has passed
//! 4. Each lock clears lines, updates score and level, and re-arms the timer at the
//!    current speed
//! 5. The game ends when a promoted piece collides at spawn
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameSession, ManualClock, SessionConfig};
//!
//! let mut session = GameSession::with_clock(SessionConfig::default(), ManualClock::new());
//! session.start();
//!
//! session.move_piece(-1, 0);
//! session.rotate();
//! let report = session.hard_drop().unwrap();
//!
//! if report.game_over {
//!     println!("Game over!");
//! }
//! ```

pub use self::{clock::*, drop_timer::*, piece_generator::*, session::*, state::*};

mod clock;
mod drop_timer;
mod piece_generator;
pub mod scoring;
mod session;
mod state;
