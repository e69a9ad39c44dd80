use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// One logical tick is due.
    Tick,
    /// A frame should be drawn.
    Render,
    Crossterm(CrosstermEvent),
}
