use std::time::{Duration, Instant};

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{ActionError, core::render_board::RenderBoard};

use super::{
    clock::{Clock, SystemClock},
    drop_timer::DropTimer,
    piece_generator::{PieceGenerator, PieceSeed},
    state::{DropOutcome, GameState, LockReport},
};

/// Settings for a [`GameSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Piece sequence seed; a fresh random seed is drawn per game when unset.
    pub seed: Option<PieceSeed>,
    /// Initial ghost preference, restored on every restart.
    pub show_ghost: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            show_ghost: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

/// Controller owning the current [`GameState`] and the auto-drop timer.
///
/// All mutation of the game goes through this type. Each action replaces the held
/// state with the value returned by the corresponding pure transition.
///
/// The session never sleeps or spawns anything. The host loop should wait until
/// [`next_drop_deadline`](Self::next_drop_deadline) (or the next input event),
/// then call [`update`](Self::update).
#[derive(Debug)]
pub struct GameSession<C = SystemClock> {
    clock: C,
    config: SessionConfig,
    seed: PieceSeed,
    generator: PieceGenerator,
    state: GameState,
    started: bool,
    timer: DropTimer,
}

impl GameSession {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C> GameSession<C>
where
    C: Clock,
{
    /// Creates a session reading time from `clock`. The game is initialized but not
    /// started.
    #[must_use]
    pub fn with_clock(config: SessionConfig, clock: C) -> Self {
        let (seed, mut generator) = Self::seeded_generator(&config);
        let state = GameState::new(&mut generator).with_show_ghost(config.show_ghost);
        Self {
            clock,
            config,
            seed,
            generator,
            state,
            started: false,
            timer: DropTimer::new(),
        }
    }

    fn seeded_generator(config: &SessionConfig) -> (PieceSeed, PieceGenerator) {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        (seed, PieceGenerator::with_seed(seed))
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        if !self.started {
            SessionState::NotStarted
        } else if self.state.is_game_over() {
            SessionState::GameOver
        } else if self.state.is_paused() {
            SessionState::Paused
        } else {
            SessionState::Playing
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Seed of the current game's piece sequence.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Elapsed play time; zero until started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.state.elapsed(self.clock.now())
    }

    /// Live score for the score panel.
    #[must_use]
    pub fn display_score(&self) -> u64 {
        self.state.display_score(self.clock.now())
    }

    #[must_use]
    pub fn render_board(&self) -> RenderBoard {
        self.state.render_board()
    }

    /// When the next automatic drop is due, if the timer is running.
    #[must_use]
    pub fn next_drop_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Starts the clock and the auto-drop timer. No effect once started.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        let now = self.clock.now();
        self.state = self.state.started_at(now);
        self.started = true;
        self.arm_timer(now);
        tracing::info!(seed = %self.seed, "game started");
    }

    /// Throws the current game away and starts a fresh one, from any state.
    pub fn restart(&mut self) {
        let now = self.clock.now();
        let (seed, mut generator) = Self::seeded_generator(&self.config);
        self.state = GameState::new(&mut generator)
            .with_show_ghost(self.config.show_ghost)
            .started_at(now);
        self.seed = seed;
        self.generator = generator;
        self.started = true;
        self.arm_timer(now);
        tracing::info!(seed = %self.seed, "game restarted");
    }

    /// Pauses or resumes play. No effect before start or after game over.
    ///
    /// Pausing stops the auto-drop timer; resuming re-arms it at the current speed.
    pub fn toggle_pause(&mut self) {
        if !self.started || self.state.is_game_over() {
            return;
        }
        self.state = self.state.toggled_pause();
        if self.state.is_paused() {
            self.timer.cancel();
            tracing::info!("game paused");
        } else {
            self.arm_timer(self.clock.now());
            tracing::info!("game resumed");
        }
    }

    /// Shows or hides the ghost piece. Allowed in every state.
    pub fn toggle_ghost(&mut self) {
        self.state = self.state.toggled_ghost();
    }

    pub fn try_move(&mut self, dx: i32, dy: i32) -> Result<(), ActionError> {
        self.ensure_started()?;
        self.state = self.state.moved(dx, dy)?;
        Ok(())
    }

    /// Moves the falling piece by `(dx, dy)`; returns whether it moved.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        self.try_move(dx, dy).is_ok()
    }

    pub fn try_rotate(&mut self) -> Result<(), ActionError> {
        self.ensure_started()?;
        self.state = self.state.rotated()?;
        Ok(())
    }

    /// Rotates the falling piece clockwise; returns whether it rotated.
    pub fn rotate(&mut self) -> bool {
        self.try_rotate().is_ok()
    }

    /// Moves the falling piece down one row, or locks it if it cannot move.
    pub fn soft_drop(&mut self) -> Result<DropOutcome, ActionError> {
        self.ensure_started()?;
        let now = self.clock.now();
        let (state, outcome) = self.state.soft_dropped(now, &mut self.generator)?;
        self.state = state;
        if let DropOutcome::Locked(report) = outcome {
            self.after_lock(&report, now);
        }
        Ok(outcome)
    }

    /// Drops the falling piece to its landing position and locks it.
    pub fn hard_drop(&mut self) -> Result<LockReport, ActionError> {
        self.ensure_started()?;
        let now = self.clock.now();
        let (state, report) = self.state.hard_dropped(now, &mut self.generator)?;
        self.state = state;
        self.after_lock(&report, now);
        Ok(report)
    }

    /// Runs the automatic drop if it is due. Returns whether it fired.
    pub fn update(&mut self) -> bool {
        let now = self.clock.now();
        if !self.timer.poll(now) {
            return false;
        }
        tracing::trace!("auto drop");
        self.soft_drop().is_ok()
    }

    fn ensure_started(&self) -> Result<(), ActionError> {
        if self.started {
            Ok(())
        } else {
            Err(ActionError::NotPlaying)
        }
    }

    fn arm_timer(&mut self, now: Instant) {
        self.timer.arm(now, self.state.drop_interval(now));
    }

    fn after_lock(&mut self, report: &LockReport, now: Instant) {
        tracing::debug!(
            position = %report.position,
            lines_cleared = report.lines_cleared,
            combo = report.combo,
            score = self.state.score(),
            "piece locked"
        );
        if report.game_over {
            self.timer.cancel();
            tracing::info!(
                score = self.state.score(),
                lines = self.state.lines(),
                elapsed = ?self.state.elapsed(now),
                "game over"
            );
        } else {
            self.arm_timer(now);
        }
    }
}
