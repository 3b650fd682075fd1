//! Minimal terminal application runtime.
//!
//! [`Runtime::run`] owns the terminal and drives an [`App`] with timer ticks and
//! terminal events, redrawing after each one. Ticks are only generated while a
//! tick interval is set.

pub(crate) use self::{app::App, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
