use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Application driven by [`Tui::run`].
pub trait App {
    /// Called once before the loop starts. Configure tick and frame rates here.
    fn init(&mut self, tui: &mut Tui) -> anyhow::Result<()>;

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, event: &Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by one logical tick.
    fn update(&mut self);
}
