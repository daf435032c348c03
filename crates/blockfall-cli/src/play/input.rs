use blockfall_engine::{Clock, GameSession, SessionState};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Player intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start a fresh session, or play again after game over.
    Start,
    Restart,
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    ToggleGhost,
    Quit,
}

impl Action {
    pub fn from_event(event: &Event) -> Option<Self> {
        event.as_key_event().and_then(Self::from_key)
    }

    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Self::Quit,
            KeyCode::Enter => Self::Start,
            KeyCode::Left => Self::MoveLeft,
            KeyCode::Right => Self::MoveRight,
            KeyCode::Down => Self::SoftDrop,
            KeyCode::Up => Self::Rotate,
            KeyCode::Char('a' | 'A') => Self::HardDrop,
            KeyCode::Char('s' | 'S') => Self::TogglePause,
            KeyCode::Char('d' | 'D') => Self::ToggleGhost,
            KeyCode::Char('r' | 'R') => Self::Restart,
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        Some(action)
    }

    /// Forwards the action to the session. Rejected piece actions are ignored.
    pub fn apply<C>(self, session: &mut GameSession<C>)
    where
        C: Clock,
    {
        match self {
            Self::Start => match session.session_state() {
                SessionState::NotStarted => session.start(),
                SessionState::GameOver => session.restart(),
                SessionState::Playing | SessionState::Paused => {}
            },
            Self::Restart => session.restart(),
            Self::MoveLeft => _ = session.move_piece(-1, 0),
            Self::MoveRight => _ = session.move_piece(1, 0),
            Self::SoftDrop => _ = session.soft_drop(),
            Self::Rotate => _ = session.rotate(),
            Self::HardDrop => _ = session.hard_drop(),
            Self::TogglePause => session.toggle_pause(),
            Self::ToggleGhost => session.toggle_ghost(),
            Self::Quit => {}
        }
    }
}
