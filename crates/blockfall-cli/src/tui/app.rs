use crossterm::event::Event;
use ratatui::Frame;

use super::Runtime;

/// An application driven by [`Runtime::run`].
pub(crate) trait App {
    /// Called once before the first event; configure the tick interval here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key input, resize, ...).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Called each time the tick interval elapses.
    fn update(&mut self, runtime: &mut Runtime);
}
