use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// Trait for TUI applications.
///
/// Applications executed by `Runtime::run()` must implement this trait.
pub trait App {
    /// Called once at the start of `Runtime::run()`. Use this to configure the render
    /// rate and the first tick deadline.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Draws the screen (called on each render frame).
    fn draw(&self, frame: &mut Frame);

    /// Called when the tick deadline set through the runtime has passed.
    fn update(&mut self, runtime: &mut Runtime);
}
