//! Event handling infrastructure
//!
//! Merges terminal events (keyboard, mouse, resize, tick) with request
//! events from the service layer into a single action stream.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use libpostboard::service::Event;

use super::actions::UiAction;

/// TUI events that can be dispatched
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Keyboard input
    Key(KeyEvent),

    /// Mouse input (when enabled)
    Mouse(MouseEvent),

    /// Terminal resize
    Resize(u16, u16),

    /// Periodic tick
    Tick,

    /// Request event from the service layer
    Service(Event),
}

impl From<TuiEvent> for UiAction {
    fn from(event: TuiEvent) -> Self {
        match event {
            TuiEvent::Key(key) => UiAction::Key(key),
            TuiEvent::Mouse(mouse) => UiAction::Mouse(mouse),
            TuiEvent::Resize(w, h) => UiAction::Resize(w, h),
            TuiEvent::Tick => UiAction::Tick,
            TuiEvent::Service(event) => UiAction::Service(event),
        }
    }
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event, blocking up to tick_rate duration
    ///
    /// Returns `Tick` if no event occurred within tick_rate.
    pub fn next(&self) -> std::io::Result<TuiEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(TuiEvent::Key(key)),
                CrosstermEvent::Mouse(mouse) => Ok(TuiEvent::Mouse(mouse)),
                CrosstermEvent::Resize(w, h) => Ok(TuiEvent::Resize(w, h)),
                _ => Ok(TuiEvent::Tick),
            }
        } else {
            Ok(TuiEvent::Tick)
        }
    }
}
