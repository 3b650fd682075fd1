use std::{io, time::Duration};

use super::{App, event::TuiEvent, event_loop::EventLoop};

/// Runs an [`App`] on the terminal.
#[derive(Debug, Default)]
pub(crate) struct Runtime {
    events: EventLoop,
}

impl Runtime {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn tick_interval(&self) -> Option<Duration> {
        self.events.tick_interval()
    }

    /// Sets the gravity interval; `None` pauses ticking.
    pub(crate) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    /// Delays the next tick by a full interval.
    pub(crate) fn restart_tick(&mut self) {
        self.events.restart_tick();
    }

    /// Takes over the terminal and dispatches events to `app` until it asks to exit.
    ///
    /// The terminal is restored on return, including on error.
    pub(crate) fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
