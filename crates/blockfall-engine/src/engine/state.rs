use std::time::{Duration, Instant};

use serde::Serialize;

use crate::{
    ActionError, PieceCollisionError,
    core::{
        board::Board,
        piece::{Position, Tetromino},
        render_board::RenderBoard,
    },
};

use super::{piece_generator::PieceGenerator, scoring};

/// Horizontal offsets tried, in order, when a rotation collides in place.
///
/// The same list applies to every piece and every rotation; there are no vertical
/// kicks.
pub const WALL_KICKS: [i32; 4] = [-1, 1, -2, 2];

/// Snapshot of a game: board, falling piece, lookahead and counters.
///
/// `GameState` is a value. Every transition (`moved`, `rotated`, `soft_dropped`,
/// `hard_dropped`, ...) leaves `self` untouched and returns a new state, so observers
/// never see a partial update. Guarded transitions fail with
/// [`ActionError::NotPlaying`] when there is no falling piece, the game is paused or
/// the game is over.
///
/// Time-dependent values (time score, level, drop speed) are derived from
/// `start_time` and a caller-supplied `now`.
///
/// # Example
///
/// ```
/// use std::time::Instant;
///
/// use blockfall_engine::{GameState, PieceGenerator, Position};
///
/// let mut generator = PieceGenerator::new();
/// let now = Instant::now();
/// let state = GameState::new(&mut generator).started_at(now);
///
/// let (state, report) = state.hard_dropped(now, &mut generator).unwrap();
/// assert_eq!(report.lines_cleared, 0);
/// assert_eq!(state.current_position(), Position::SPAWN);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    current_piece: Option<Tetromino>,
    current_position: Position,
    next_piece: Tetromino,
    score: u64,
    line_score: u64,
    lines: usize,
    level: u32,
    game_over: bool,
    is_paused: bool,
    combo: u32,
    #[serde(skip)]
    start_time: Option<Instant>,
    #[serde(skip)]
    end_time: Option<Instant>,
    show_ghost: bool,
}

/// Result of one lock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    /// Where the piece was locked.
    pub position: Position,
    pub lines_cleared: usize,
    /// Line score of this lock, including the combo bonus.
    pub line_score: u64,
    /// Combo counter after this lock.
    pub combo: u32,
    /// Whether the promoted piece collided at spawn.
    pub game_over: bool,
}

/// Outcome of a soft drop: the piece either moved one row or locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    Moved,
    Locked(LockReport),
}

impl GameState {
    /// Creates a fresh game: empty board, two freshly drawn pieces, counters at zero,
    /// ghost shown, clock not started.
    #[must_use]
    pub fn new(generator: &mut PieceGenerator) -> Self {
        let current_piece = generator.next_piece();
        let next_piece = generator.next_piece();
        Self {
            board: Board::EMPTY,
            current_piece: Some(current_piece),
            current_position: Position::SPAWN,
            next_piece,
            score: 0,
            line_score: 0,
            lines: 0,
            level: 0,
            game_over: false,
            is_paused: false,
            combo: 0,
            start_time: None,
            end_time: None,
            show_ghost: true,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece; `None` only once the game is over.
    #[must_use]
    pub fn current_piece(&self) -> Option<&Tetromino> {
        self.current_piece.as_ref()
    }

    #[must_use]
    pub fn current_position(&self) -> Position {
        self.current_position
    }

    #[must_use]
    pub fn next_piece(&self) -> &Tetromino {
        &self.next_piece
    }

    /// Score committed at the last lock.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// 0-based level recorded at the last lock.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    #[must_use]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    #[must_use]
    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    #[must_use]
    pub fn show_ghost(&self) -> bool {
        self.show_ghost
    }

    /// Returns whether piece actions (move, rotate, drop) are allowed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current_piece.is_some() && !self.game_over && !self.is_paused
    }

    /// Play time at `now`; zero until the clock is started.
    ///
    /// The clock stops at game over, so the time score and level freeze there too.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        let now = self.end_time.map_or(now, |end| end.min(now));
        self.start_time
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default()
    }

    /// Live score for display: the last lock's line score plus the time score at
    /// `now`. The time component is never counted twice.
    #[must_use]
    pub fn display_score(&self, now: Instant) -> u64 {
        self.line_score + scoring::time_score(self.elapsed(now))
    }

    /// Auto-drop interval at `now`.
    #[must_use]
    pub fn drop_interval(&self, now: Instant) -> Duration {
        scoring::drop_interval(self.elapsed(now))
    }

    /// Where the falling piece would land on an immediate hard drop.
    ///
    /// `None` when there is no falling piece or the ghost is hidden.
    #[must_use]
    pub fn ghost_position(&self) -> Option<Position> {
        let piece = self.current_piece.as_ref().filter(|_| self.show_ghost)?;
        Some(self.board.drop_position(piece, self.current_position))
    }

    /// Composes the board, ghost and falling piece for a renderer.
    #[must_use]
    pub fn render_board(&self) -> RenderBoard {
        let mut render = RenderBoard::from(&self.board);
        if let Some(piece) = &self.current_piece {
            if let Some(ghost) = self.ghost_position() {
                render.fill_ghost(piece, ghost);
            }
            render.fill_piece(piece, self.current_position);
        }
        render
    }

    /// Returns this state with the clock started at `now`.
    #[must_use]
    pub fn started_at(&self, now: Instant) -> Self {
        Self {
            start_time: Some(now),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_board(&self, board: Board) -> Self {
        Self {
            board,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_pieces(&self, current: Tetromino, next: Tetromino) -> Self {
        Self {
            current_piece: Some(current),
            next_piece: next,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_show_ghost(&self, show_ghost: bool) -> Self {
        Self {
            show_ghost,
            ..self.clone()
        }
    }

    /// Flips the pause flag. No effect once the game is over.
    #[must_use]
    pub fn toggled_pause(&self) -> Self {
        if self.game_over {
            return self.clone();
        }
        Self {
            is_paused: !self.is_paused,
            ..self.clone()
        }
    }

    /// Flips the ghost display preference. Never gated.
    #[must_use]
    pub fn toggled_ghost(&self) -> Self {
        self.with_show_ghost(!self.show_ghost)
    }

    /// Moves the falling piece by `(dx, dy)` if the target placement is free.
    pub fn moved(&self, dx: i32, dy: i32) -> Result<Self, ActionError> {
        let piece = self.active_piece()?;
        let position = self.current_position.offset(dx, dy);
        if self.board.is_colliding(piece, position) {
            return Err(PieceCollisionError.into());
        }
        Ok(Self {
            current_position: position,
            ..self.clone()
        })
    }

    /// Rotates the falling piece clockwise, applying the first free wall kick.
    ///
    /// The rotated shape is tried in place first, then shifted by each offset of
    /// [`WALL_KICKS`] on the same row. If every candidate collides, the rotation is
    /// rejected and nothing changes.
    pub fn rotated(&self) -> Result<Self, ActionError> {
        let rotated = self.active_piece()?.rotated();
        let position = [0]
            .into_iter()
            .chain(WALL_KICKS)
            .map(|dx| self.current_position.offset(dx, 0))
            .find(|position| !self.board.is_colliding(&rotated, *position))
            .ok_or(PieceCollisionError)?;
        Ok(Self {
            current_piece: Some(rotated),
            current_position: position,
            ..self.clone()
        })
    }

    /// Moves the falling piece down one row, or locks it where it is if blocked.
    pub fn soft_dropped(
        &self,
        now: Instant,
        generator: &mut PieceGenerator,
    ) -> Result<(Self, DropOutcome), ActionError> {
        match self.moved(0, 1) {
            Ok(state) => Ok((state, DropOutcome::Moved)),
            Err(ActionError::Collision(_)) => {
                let (state, report) = self.locked_at(self.current_position, now, generator)?;
                Ok((state, DropOutcome::Locked(report)))
            }
            Err(e) => Err(e),
        }
    }

    /// Drops the falling piece to its landing position and locks it there.
    pub fn hard_dropped(
        &self,
        now: Instant,
        generator: &mut PieceGenerator,
    ) -> Result<(Self, LockReport), ActionError> {
        let piece = self.active_piece()?;
        let landing = self.board.drop_position(piece, self.current_position);
        self.locked_at(landing, now, generator)
    }

    /// Locks the falling piece at `position`.
    ///
    /// Merges the piece, clears complete rows, replaces the score with this lock's line
    /// score plus the time score at `now`, promotes the next piece to spawn and draws a
    /// new one. If the promoted piece collides at spawn the game is over, no piece
    /// remains in play and the clock stops at `now`.
    pub fn locked_at(
        &self,
        position: Position,
        now: Instant,
        generator: &mut PieceGenerator,
    ) -> Result<(Self, LockReport), ActionError> {
        let piece = self.active_piece()?;
        let (board, lines_cleared) = self.board.merged(piece, position).cleared_lines();

        let line_score = scoring::line_score(lines_cleared, self.combo);
        let combo = if lines_cleared > 0 { self.combo + 1 } else { 0 };
        let elapsed = self.elapsed(now);

        let promoted = self.next_piece;
        let game_over = board.is_colliding(&promoted, Position::SPAWN);

        let state = Self {
            board,
            current_piece: (!game_over).then_some(promoted),
            current_position: Position::SPAWN,
            next_piece: generator.next_piece(),
            score: line_score + scoring::time_score(elapsed),
            line_score,
            lines: self.lines + lines_cleared,
            level: scoring::level(elapsed),
            game_over,
            is_paused: self.is_paused,
            combo,
            start_time: self.start_time,
            end_time: game_over.then_some(now),
            show_ghost: self.show_ghost,
        };
        let report = LockReport {
            position,
            lines_cleared,
            line_score,
            combo,
            game_over,
        };
        Ok((state, report))
    }

    fn active_piece(&self) -> Result<&Tetromino, ActionError> {
        self.current_piece
            .as_ref()
            .filter(|_| !self.game_over && !self.is_paused)
            .ok_or(ActionError::NotPlaying)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BOARD_HEIGHT, BOARD_WIDTH, Block, PieceKind, PieceSeed, RenderCell};

    const FILL: Block = Block::Filled(PieceKind::Z.color());

    fn generator() -> PieceGenerator {
        let seed: PieceSeed = "5eed5eed5eed5eed5eed5eed5eed5eed".parse().unwrap();
        PieceGenerator::with_seed(seed)
    }

    fn state_with(current: PieceKind, next: PieceKind) -> (GameState, PieceGenerator) {
        let mut generator = generator();
        let state = GameState::new(&mut generator)
            .with_pieces(Tetromino::new(current), Tetromino::new(next));
        (state, generator)
    }

    fn board_with_rows(rows: &[(usize, &[usize])]) -> Board {
        let mut board = Board::EMPTY;
        for &(y, holes) in rows {
            for x in (0..BOARD_WIDTH).filter(|x| !holes.contains(x)) {
                board.fill_block_at(x, y, FILL);
            }
        }
        board
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new(&mut generator());
        assert_eq!(state.board(), &Board::EMPTY);
        assert!(state.current_piece().is_some());
        assert_eq!(state.current_position(), Position::new(4, 0));
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.level(), 0);
        assert_eq!(state.combo(), 0);
        assert!(!state.is_game_over());
        assert!(!state.is_paused());
        assert!(state.show_ghost());
        assert_eq!(state.start_time(), None);
    }

    #[test]
    fn test_move_within_bounds() {
        let (state, _) = state_with(PieceKind::O, PieceKind::O);
        let moved = state.moved(-1, 0).unwrap();
        assert_eq!(moved.current_position(), Position::new(3, 0));
        assert_eq!(state.current_position(), Position::new(4, 0));

        let moved = moved.moved(0, 1).unwrap();
        assert_eq!(moved.current_position(), Position::new(3, 1));
    }

    #[test]
    fn test_move_into_wall_is_rejected() {
        let (mut state, _) = state_with(PieceKind::O, PieceKind::O);
        for _ in 0..4 {
            state = state.moved(-1, 0).unwrap();
        }
        assert_eq!(state.current_position().x, 0);
        assert!(matches!(state.moved(-1, 0), Err(ActionError::Collision(_))));
    }

    #[test]
    fn test_actions_are_inert_while_paused() {
        let (state, mut generator) = state_with(PieceKind::T, PieceKind::O);
        let paused = state.toggled_pause();
        let now = Instant::now();

        assert!(matches!(paused.moved(1, 0), Err(ActionError::NotPlaying)));
        assert!(matches!(paused.rotated(), Err(ActionError::NotPlaying)));
        assert!(matches!(
            paused.hard_dropped(now, &mut generator),
            Err(ActionError::NotPlaying)
        ));
        assert!(matches!(
            paused.soft_dropped(now, &mut generator),
            Err(ActionError::NotPlaying)
        ));
        assert_eq!(paused.toggled_pause(), state);
    }

    #[test]
    fn test_rotate_in_place() {
        let (state, _) = state_with(PieceKind::T, PieceKind::O);
        let rotated = state.rotated().unwrap();
        assert_eq!(
            rotated.current_piece(),
            Some(&Tetromino::new(PieceKind::T).rotated())
        );
        assert_eq!(rotated.current_position(), state.current_position());
    }

    #[test]
    fn test_rotate_kicks_off_right_wall() {
        // Vertical I hugging the right wall: its cells sit in matrix column 2.
        let (state, _) = state_with(PieceKind::I, PieceKind::O);
        let mut state = state.rotated().unwrap();
        while let Ok(next) = state.moved(1, 0) {
            state = next;
        }
        assert_eq!(state.current_position().x, 7);

        // Back to horizontal spans columns x..x+4: in place overflows, one step left fits.
        let kicked = state.rotated().unwrap();
        assert_eq!(kicked.current_position(), Position::new(6, 0));
    }

    #[test]
    fn test_rotate_prefers_left_kick() {
        let (state, _) = state_with(PieceKind::T, PieceKind::O);
        let state = state.moved(0, 5).unwrap();
        // Rotated T is `..# / .## / ..#`; block the bottom of its stem.
        let mut board = Board::EMPTY;
        board.fill_block_at(6, 7, FILL);
        let state = state.with_board(board);

        let kicked = state.rotated().unwrap();
        assert_eq!(kicked.current_position(), Position::new(3, 5));
    }

    fn vertical_i_against_left_wall(steps: usize) -> GameState {
        let (state, _) = state_with(PieceKind::I, PieceKind::O);
        let mut state = state.rotated().unwrap();
        for _ in 0..steps {
            state = state.moved(-1, 0).unwrap();
        }
        state
    }

    #[test]
    fn test_rotate_kicks_one_right_off_left_wall() {
        // Column 1: in place and one left overflow the wall.
        let state = vertical_i_against_left_wall(5);
        assert_eq!(state.current_position().x, -1);

        let kicked = state.rotated().unwrap();
        assert_eq!(kicked.current_position(), Position::new(0, 0));
    }

    #[test]
    fn test_rotate_kicks_two_right_off_left_wall() {
        // Column 0: only the last kick clears the wall.
        let state = vertical_i_against_left_wall(6);
        assert_eq!(state.current_position().x, -2);
        assert!(state.moved(-1, 0).is_err());

        let kicked = state.rotated().unwrap();
        assert_eq!(kicked.current_position(), Position::new(0, 0));
    }

    #[test]
    fn test_rotate_kicks_two_left() {
        let (state, _) = state_with(PieceKind::T, PieceKind::O);
        let state = state.moved(0, 5).unwrap();
        // Stem bottoms for in place, one left and one right are all blocked.
        let mut board = Board::EMPTY;
        for x in 5..=7 {
            board.fill_block_at(x, 7, FILL);
        }
        let state = state.with_board(board);

        let kicked = state.rotated().unwrap();
        assert_eq!(kicked.current_position(), Position::new(2, 5));
    }

    #[test]
    fn test_rotation_rejected_when_all_kicks_fail() {
        let (state, _) = state_with(PieceKind::I, PieceKind::O);
        let state = state.rotated().unwrap().moved(0, 10).unwrap();
        // Horizontal I lands on matrix row 2 (board row 12); leave a single gap there.
        let state = state.with_board(board_with_rows(&[(12, &[6])]));

        assert!(matches!(state.rotated(), Err(ActionError::Collision(_))));
    }

    #[test]
    fn test_o_rotation_is_noop() {
        let (state, _) = state_with(PieceKind::O, PieceKind::O);
        assert_eq!(state.rotated().unwrap(), state);
    }

    #[test]
    fn test_soft_drop_moves_then_locks() {
        let (state, mut generator) = state_with(PieceKind::O, PieceKind::T);
        let now = Instant::now();
        let mut state = state.started_at(now);
        for _ in 0..18 {
            let (next, outcome) = state.soft_dropped(now, &mut generator).unwrap();
            assert!(outcome.is_moved());
            state = next;
        }
        let (state, outcome) = state.soft_dropped(now, &mut generator).unwrap();
        let DropOutcome::Locked(report) = outcome else {
            panic!("expected lock, got {outcome:?}");
        };
        assert_eq!(report.position, Position::new(4, 18));
        assert_eq!(state.current_piece(), Some(&Tetromino::new(PieceKind::T)));
        assert!(!state.board().get(4, 19).unwrap().is_empty());
    }

    #[test]
    fn test_hard_drop_on_empty_board() {
        let (state, mut generator) = state_with(PieceKind::O, PieceKind::L);
        let now = Instant::now();
        let state = state.started_at(now);

        let (after, report) = state.hard_dropped(now, &mut generator).unwrap();
        assert_eq!(report.position, Position::new(4, 18));
        assert_eq!(report.lines_cleared, 0);
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(
                after.board().get(x, y),
                Some(Block::Filled(PieceKind::O.color()))
            );
        }
        assert_eq!(after.lines(), 0);
        assert_eq!(after.combo(), 0);
        assert_eq!(after.current_piece(), Some(&Tetromino::new(PieceKind::L)));
        assert_eq!(after.current_position(), Position::new(4, 0));
        assert!(!after.is_game_over());
    }

    #[test]
    fn test_completing_a_row_clears_it() {
        let (state, mut generator) = state_with(PieceKind::I, PieceKind::O);
        let start = Instant::now();
        let board = board_with_rows(&[(19, &[0, 1, 2, 3]), (18, &[0, 1, 2, 3, 5])]);
        let state = state.with_board(board).started_at(start);

        let state = (0..4).fold(state, |s, _| s.moved(-1, 0).unwrap());
        let now = start + Duration::from_millis(12_400);
        let (after, report) = state.hard_dropped(now, &mut generator).unwrap();

        assert_eq!(report.lines_cleared, 1);
        assert_eq!(after.lines(), 1);
        assert_eq!(after.combo(), 1);
        assert_eq!(after.score(), 100 + 120);
        // Old row 18 shifted down, empty row prepended.
        assert_eq!(after.board().rows()[19], board.rows()[18]);
        assert!(after.board().rows()[0].iter().all(|b| b.is_empty()));
        assert!(after.board().rows()[18].iter().all(|b| b.is_empty()));
    }

    #[test]
    fn test_combo_accumulates_and_resets() {
        let (state, mut generator) = state_with(PieceKind::I, PieceKind::I);
        let now = Instant::now();
        let state = state.started_at(now);

        let board = board_with_rows(&[(19, &[0, 1, 2, 3]), (18, &[0, 1, 2, 3])]);
        let state = state.with_board(board);
        let state = (0..4).fold(state, |s, _| s.moved(-1, 0).unwrap());
        let (state, first) = state.hard_dropped(now, &mut generator).unwrap();
        assert_eq!(first.line_score, 100);
        assert_eq!(state.combo(), 1);

        let state = state.with_pieces(Tetromino::new(PieceKind::I), Tetromino::new(PieceKind::O));
        let state = (0..4).fold(state, |s, _| s.moved(-1, 0).unwrap());
        let (state, second) = state.hard_dropped(now, &mut generator).unwrap();
        assert_eq!(second.lines_cleared, 1);
        assert_eq!(second.line_score, 150);
        assert_eq!(state.combo(), 2);
        assert_eq!(state.score(), 150);

        let (state, third) = state.hard_dropped(now, &mut generator).unwrap();
        assert_eq!(third.lines_cleared, 0);
        assert_eq!(third.line_score, 0);
        assert_eq!(state.combo(), 0);
    }

    #[test]
    fn test_score_is_replaced_each_lock() {
        let (state, mut generator) = state_with(PieceKind::I, PieceKind::O);
        let start = Instant::now();
        let board = board_with_rows(&[(19, &[0, 1, 2, 3])]);
        let state = state.with_board(board).started_at(start);
        let state = (0..4).fold(state, |s, _| s.moved(-1, 0).unwrap());

        let (state, _) = state.hard_dropped(start, &mut generator).unwrap();
        assert_eq!(state.score(), 100);

        let later = start + Duration::from_secs(7);
        let (state, _) = state.hard_dropped(later, &mut generator).unwrap();
        assert_eq!(state.score(), 70);
        assert_eq!(state.display_score(later + Duration::from_secs(1)), 80);
    }

    #[test]
    fn test_level_recomputed_at_lock() {
        let (state, mut generator) = state_with(PieceKind::O, PieceKind::O);
        let start = Instant::now();
        let state = state.started_at(start);
        let (state, _) = state
            .hard_dropped(start + Duration::from_secs(65), &mut generator)
            .unwrap();
        assert_eq!(state.level(), 2);
    }

    #[test]
    fn test_game_over_when_spawn_is_blocked() {
        let (state, mut generator) = state_with(PieceKind::O, PieceKind::O);
        let now = Instant::now();
        let mut board = Board::EMPTY;
        board.fill_block_at(4, 1, FILL);
        // Park the current piece away from the spawn cells first.
        let state = (0..4).fold(state, |s, _| s.moved(-1, 0).unwrap());
        let state = state.with_board(board).started_at(now);

        let (after, report) = state.hard_dropped(now, &mut generator).unwrap();
        assert!(report.game_over);
        assert!(after.is_game_over());
        assert_eq!(after.current_piece(), None);
        assert!(!after.is_active());
        assert!(matches!(after.moved(0, 1), Err(ActionError::NotPlaying)));
        assert_eq!(after.toggled_pause(), after);
    }

    #[test]
    fn test_time_values_before_start() {
        let state = GameState::new(&mut generator());
        let now = Instant::now();
        assert_eq!(state.elapsed(now), Duration::ZERO);
        assert_eq!(state.display_score(now), 0);
        assert_eq!(state.drop_interval(now), scoring::INITIAL_DROP_INTERVAL);
    }

    #[test]
    fn test_ghost_position() {
        let (state, _) = state_with(PieceKind::O, PieceKind::O);
        assert_eq!(state.ghost_position(), Some(Position::new(4, 18)));
        assert_eq!(state.toggled_ghost().ghost_position(), None);
    }

    #[test]
    fn test_render_board_layers() {
        let (state, _) = state_with(PieceKind::O, PieceKind::O);
        let render = state.render_board();
        let color = PieceKind::O.color();
        assert_eq!(render.cell(4, 0), Some(RenderCell::Falling(color)));
        assert_eq!(
            render.cell(5, BOARD_HEIGHT - 1),
            Some(RenderCell::Ghost(color))
        );

        let render = state.toggled_ghost().render_board();
        assert_eq!(render.cell(5, BOARD_HEIGHT - 1), Some(RenderCell::Empty));
    }

    #[test]
    fn test_state_serialization() {
        let (state, _) = state_with(PieceKind::O, PieceKind::I);
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["current_piece"]["kind"], "O");
        assert_eq!(value["next_piece"]["kind"], "I");
        assert_eq!(value["current_position"]["x"], 4);
        assert_eq!(value["board"].as_array().unwrap().len(), BOARD_HEIGHT);
        assert!(value.get("start_time").is_none());
        assert!(value.get("end_time").is_none());
    }
}
