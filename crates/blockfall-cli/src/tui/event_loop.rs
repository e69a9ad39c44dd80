use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Ticks further behind than this are dropped instead of replayed.
const MAX_CATCH_UP_TICKS: u32 = 5;

const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Shortest tick or frame interval. A zero interval would starve renders and
/// terminal input.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Produces tick, render and terminal events.
///
/// Tick deadlines advance by whole intervals, so a slow frame is followed by
/// catch-up ticks and the logical rate stays steady. Renders only happen
/// after a state change, at most once per frame interval.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    frame_interval: Duration,
    next_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            next_tick: now,
            last_render: past_time,
            dirty: true,
        }
    }

    /// Pass `None` to disable tick events.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval.map(|interval| interval.max(MIN_INTERVAL));
        self.next_tick = Instant::now();
    }

    pub(super) fn set_frame_interval(&mut self, interval: Duration) {
        self.frame_interval = interval.max(MIN_INTERVAL);
    }

    /// Blocks until the next tick, render or terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.take_tick(now) {
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty && now.duration_since(self.last_render) >= self.frame_interval {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(deadline) = self.next_deadline()
                && !event::poll(deadline.saturating_duration_since(now))?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Consumes one due tick, if any.
    fn take_tick(&mut self, now: Instant) -> bool {
        let Some(interval) = self.tick_interval else {
            return false;
        };
        if now < self.next_tick {
            return false;
        }
        self.next_tick += interval;
        if now.saturating_duration_since(self.next_tick) > interval * MAX_CATCH_UP_TICKS {
            self.next_tick = now + interval;
        }
        true
    }

    fn next_deadline(&self) -> Option<Instant> {
        let next_tick_at = self.tick_interval.map(|_| self.next_tick);
        let next_render_at = self.dirty.then(|| self.last_render + self.frame_interval);
        [next_tick_at, next_render_at].into_iter().flatten().min()
    }
}
