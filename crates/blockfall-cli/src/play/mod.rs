use blockfall_engine::{GameSession, SessionConfig};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    tui::{App, Runtime},
    ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

use self::input::Action;

mod input;

const KEY_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↑"], "Rotate"),
    (&["↓"], "Soft Drop"),
    (&["A"], "Hard Drop"),
    (&["S"], "Pause"),
    (&["D"], "Ghost"),
    (&["Enter"], "Start"),
    (&["R"], "Restart"),
    (&["Q"], "Quit"),
];

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    render_rate: f64,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(config: SessionConfig, render_rate: f64) -> Self {
        Self {
            session: GameSession::new(config),
            render_rate,
            is_exiting: false,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_render_rate(self.render_rate);
        runtime.set_tick_deadline(self.session.next_drop_deadline());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        let Some(action) = Action::from_event(&event) else {
            return;
        };
        tracing::trace!(?action, "key action");
        if action == Action::Quit {
            self.is_exiting = true;
            return;
        }
        action.apply(&mut self.session);
        runtime.set_tick_deadline(self.session.next_drop_deadline());
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas(frame.area());
        frame.render_widget(SessionDisplay::new(&self.session), main_area);
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }

    fn update(&mut self, runtime: &mut Runtime) {
        self.session.update();
        runtime.set_tick_deadline(self.session.next_drop_deadline());
    }
}
