use std::time::Duration;

use anyhow::Context as _;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

fn interval_from_rate(rate: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(1.0 / rate)
        .with_context(|| format!("Invalid rate: {rate} Hz"))
}

/// Terminal runtime: owns the event loop and drives an [`App`].
#[derive(Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Default for Tui {
    fn default() -> Self {
        Self::new()
    }
}

impl Tui {
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(),
        }
    }

    /// Sets the logical tick rate (Hz).
    pub fn set_tick_rate(&mut self, rate: f64) -> anyhow::Result<()> {
        self.events
            .set_tick_interval(Some(interval_from_rate(rate)?));
        Ok(())
    }

    /// Sets the maximum frame rate (Hz).
    pub fn set_frame_rate(&mut self, rate: f64) -> anyhow::Result<()> {
        self.events.set_frame_interval(interval_from_rate(rate)?);
        Ok(())
    }

    /// Runs `app` until [`App::should_exit`] returns true.
    ///
    /// The terminal is restored on return, including on error.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self)?;

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(),
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&event),
                }
            }
            Ok(())
        })
    }
}
