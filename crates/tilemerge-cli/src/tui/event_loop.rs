use std::io;

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Renders only after something may have changed: once on startup and once
/// after each terminal event. There is no timer; `next()` blocks on input.
#[derive(Debug)]
pub(super) struct EventLoop {
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
            dirty: true, // Initial render is required on startup
        }
    }

    /// Returns the next event.
    ///
    /// Returns `Render` when the screen is dirty, otherwise blocks until a
    /// crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        if self.dirty {
            self.dirty = false;
            return Ok(TuiEvent::Render);
        }

        let event = event::read()?;
        self.dirty = true;
        Ok(event.into())
    }
}
