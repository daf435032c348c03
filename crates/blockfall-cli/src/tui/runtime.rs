use std::{
    io,
    time::{Duration, Instant},
};

use super::{App, event::TuiEvent, event_loop::EventLoop};

/// TUI application runtime.
///
/// Owns the terminal for the duration of [`run`](Self::run) and dispatches events to
/// an [`App`].
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the render rate (frames per second).
    pub fn set_render_rate(&mut self, rate: f64) {
        self.events
            .set_render_interval(Duration::from_secs_f64(1.0 / rate));
    }

    /// Sets when the next tick fires. `None` disables ticks.
    pub fn set_tick_deadline(&mut self, deadline: Option<Instant>) {
        self.events.set_tick_deadline(deadline);
    }

    /// Runs the application.
    ///
    /// 1. Calls `app.init()` for initialization
    /// 2. Runs the event loop until `app.should_exit()` returns true
    ///    - `Tick`: calls `app.update()`
    ///    - `Render`: calls `app.draw()`
    ///    - `Crossterm`: calls `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => {
                        app.update(&mut self);
                    }
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => {
                        app.handle_event(&mut self, event);
                    }
                }
            }
            Ok(())
        })
    }
}
