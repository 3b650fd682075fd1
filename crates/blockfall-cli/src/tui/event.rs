use crossterm::event::Event as CrosstermEvent;

/// What the event loop hands to the runtime next.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// The screen may be stale and should be drawn.
    Render,
    Crossterm(CrosstermEvent),
}
