use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

const DEFAULT_RENDER_INTERVAL: Duration = Duration::from_millis(1000 / 60);

/// Event loop state management.
///
/// Renders at a fixed interval and emits a tick once the tick deadline passes. The
/// deadline is one-shot: after a tick fires it stays unset until the app sets a new
/// one.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_deadline: Option<Instant>,
    render_interval: Duration,
    last_render: Instant,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        // Render immediately on startup
        let past_time = now.checked_sub(DEFAULT_RENDER_INTERVAL).unwrap_or(now);
        Self {
            tick_deadline: None,
            render_interval: DEFAULT_RENDER_INTERVAL,
            last_render: past_time,
        }
    }

    pub(super) fn set_tick_deadline(&mut self, deadline: Option<Instant>) {
        self.tick_deadline = deadline;
    }

    pub(super) fn set_render_interval(&mut self, interval: Duration) {
        self.render_interval = interval;
    }

    /// Returns the next event.
    ///
    /// Blocks until the tick deadline or the next render time is reached, or a
    /// crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(deadline) = self.tick_deadline
                && now >= deadline
            {
                self.tick_deadline = None;
                return Ok(TuiEvent::Tick);
            }

            if now.duration_since(self.last_render) >= self.render_interval {
                self.last_render = now;
                return Ok(TuiEvent::Render);
            }

            if !event::poll(self.compute_timeout(now))? {
                continue;
            }
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Duration {
        let next_render_at = self.last_render + self.render_interval;
        let next_timeout_at = self
            .tick_deadline
            .map_or(next_render_at, |deadline| deadline.min(next_render_at));
        next_timeout_at.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_waits_for_next_render() {
        let mut events = EventLoop::new();
        let now = Instant::now();
        events.last_render = now;
        events.set_render_interval(Duration::from_millis(100));

        assert_eq!(events.compute_timeout(now), Duration::from_millis(100));
    }

    #[test]
    fn test_timeout_prefers_earlier_tick() {
        let mut events = EventLoop::new();
        let now = Instant::now();
        events.last_render = now;
        events.set_render_interval(Duration::from_millis(100));
        events.set_tick_deadline(Some(now + Duration::from_millis(30)));

        assert_eq!(events.compute_timeout(now), Duration::from_millis(30));
    }

    #[test]
    fn test_timeout_is_zero_when_overdue() {
        let mut events = EventLoop::new();
        let now = Instant::now();
        events.last_render = now;
        events.set_tick_deadline(Some(now));

        assert_eq!(
            events.compute_timeout(now + Duration::from_millis(5)),
            Duration::ZERO
        );
    }
}
