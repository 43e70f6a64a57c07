//! Visibility trigger: near-viewport AND in-foreground.

use super::restore::ScrollRestore;
use super::sentinel::{Sentinel, SentinelBounds};
use std::time::{Duration, Instant};

/// Tracks sentinel proximity and suspension, and owns the restoration timer.
#[derive(Debug, Clone)]
pub struct VisibilityTrigger {
    sentinel: Sentinel,
    proximity: f32,
    bounds: Option<SentinelBounds>,
    suspended: bool,
    armed: bool,
    restore: ScrollRestore,
}

impl VisibilityTrigger {
    /// Create a trigger for the given sentinel.
    pub const fn new(sentinel: Sentinel, proximity: f32, restore_delay: Duration) -> Self {
        Self {
            sentinel,
            proximity,
            bounds: None,
            suspended: false,
            armed: false,
            restore: ScrollRestore::new(restore_delay),
        }
    }

    /// The sentinel handle, for the rendering layer.
    pub const fn sentinel(&self) -> &Sentinel {
        &self.sentinel
    }

    /// Last measured geometry.
    pub const fn bounds(&self) -> Option<SentinelBounds> {
        self.bounds
    }

    /// Whether the sentinel was near the viewport at the last measurement.
    pub fn is_near(&self) -> bool {
        self.bounds.is_some_and(|bounds| bounds.is_near(self.proximity))
    }

    /// Whether the view is currently in the background.
    pub const fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Near the viewport and not suspended.
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Restoration state.
    pub const fn restore(&self) -> &ScrollRestore {
        &self.restore
    }

    /// Mutable restoration state.
    pub const fn restore_mut(&mut self) -> &mut ScrollRestore {
        &mut self.restore
    }

    /// Re-measure the sentinel. Returns `true` if the trigger became armed.
    pub fn recompute(&mut self) -> bool {
        self.bounds = self.sentinel.bounds();
        self.rearm()
    }

    /// The view moved to the background.
    pub fn suspend(&mut self) {
        self.suspended = true;
        self.restore.suspend();
        self.rearm();
    }

    /// The view came back. Returns `true` if the trigger became armed.
    pub fn resume(&mut self, now: Instant, ready: bool) -> bool {
        self.suspended = false;
        self.restore.resume(now, ready);
        self.rearm()
    }

    fn rearm(&mut self) -> bool {
        let armed = self.is_near() && !self.suspended;
        let newly = armed && !self.armed;
        self.armed = armed;
        newly
    }
}
