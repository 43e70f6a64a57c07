//! Scroll-position restoration timing.
//!
//! Restoration itself is delegated to a [`ScrollRestorer`]; this module only
//! decides when to call it: once after the first load, and again after a
//! short settle delay whenever the view returns from the background.

use std::time::{Duration, Instant};

/// External collaborator that restores a persisted scroll position.
pub trait ScrollRestorer: Send {
    /// Restore the scroll position of the consuming view.
    fn restore_scroll_position(&mut self);
}

impl<F: FnMut() + Send> ScrollRestorer for F {
    fn restore_scroll_position(&mut self) {
        self();
    }
}

/// A restorer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRestore;

impl ScrollRestorer for NoRestore {
    fn restore_scroll_position(&mut self) {}
}

/// Restoration state: the one-shot "loaded" latch and the resume timer.
#[derive(Debug, Clone)]
pub struct ScrollRestore {
    loaded: bool,
    deadline: Option<Instant>,
    delay: Duration,
}

impl ScrollRestore {
    /// Create the state with the given settle delay.
    pub const fn new(delay: Duration) -> Self {
        Self {
            loaded: false,
            deadline: None,
            delay,
        }
    }

    /// Whether the first restoration for the current activation has happened.
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Pending timer deadline.
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The view went to the background: cancel the timer and re-arm the latch.
    pub const fn suspend(&mut self) {
        self.deadline = None;
        self.loaded = false;
    }

    /// The view came back. With the context ready, restore after the settle
    /// delay; otherwise wait for the next load.
    pub fn resume(&mut self, now: Instant, ready: bool) {
        self.deadline = None;
        if ready {
            self.loaded = true;
            self.deadline = Some(now + self.delay);
        } else {
            self.loaded = false;
        }
    }

    /// A load completed. Returns `true` if this is the first one since
    /// activation and the position should be restored now.
    pub const fn after_load(&mut self) -> bool {
        if self.loaded {
            return false;
        }
        self.loaded = true;
        true
    }

    /// Returns `true` once when the resume timer has expired.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
