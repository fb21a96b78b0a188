use std::time::Duration;

use ferrous_core::PointerEvent;

/// One discrete input to the application.
#[derive(Debug, Clone)]
pub enum AppEvent<M> {
    /// Pointer press inside the viewport.
    Pointer(PointerEvent),
    /// The viewport changed size (physical pixels).
    Resized { width: u32, height: u32 },
    /// An application-defined message (UI action, command, ...).
    Message(M),
    /// Let background work progress for a while before the next event.
    Wait(Duration),
    /// Stop processing events.
    Quit,
}
