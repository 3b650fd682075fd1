use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// Tick timer and redraw bookkeeping.
///
/// Every tick and terminal event marks the screen dirty; a [`TuiEvent::Render`]
/// is produced once the pending events have been handled.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true, // first frame
        }
    }

    pub(super) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    /// Sets the tick interval; `None` stops ticking.
    ///
    /// Switching from one interval to another restarts the timer, setting the
    /// same interval again leaves it running.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval != interval {
            self.tick_interval = interval;
            self.last_tick = Instant::now();
        }
    }

    /// Starts a full tick interval from now.
    pub(super) fn restart_tick(&mut self) {
        self.last_tick = Instant::now();
    }

    /// Blocks until the next tick, redraw or terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Tick or render event due at `now`, ticks first.
    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(interval) = self.tick_interval
            && now.duration_since(self.last_tick) >= interval
        {
            self.last_tick = now;
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }
        if self.dirty {
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// How long to wait for terminal input before the next tick is due.
    ///
    /// `None` means wait indefinitely.
    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval)?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}
