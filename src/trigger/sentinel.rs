//! Sentinel: the marker whose position drives fetching.

use std::sync::{Arc, PoisonError, RwLock};

/// Screen geometry of the sentinel relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SentinelBounds {
    /// Distance from the top of the viewport to the sentinel.
    pub top: f32,
    /// Height of the viewport.
    pub viewport_height: f32,
}

impl SentinelBounds {
    /// Create bounds from a measured position.
    pub const fn new(top: f32, viewport_height: f32) -> Self {
        Self {
            top,
            viewport_height,
        }
    }

    /// Whether the sentinel lies within `proximity` viewport heights.
    pub fn is_near(&self, proximity: f32) -> bool {
        self.top < self.viewport_height * proximity
    }
}

/// Shared handle to the sentinel.
///
/// The rendering layer writes the measured geometry; the trigger reads it
/// when it recomputes. A detached sentinel is never near.
#[derive(Debug, Clone, Default)]
pub struct Sentinel {
    bounds: Arc<RwLock<Option<SentinelBounds>>>,
}

impl Sentinel {
    /// Create a detached sentinel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest measured geometry.
    pub fn place(&self, bounds: SentinelBounds) {
        *self.bounds.write().unwrap_or_else(PoisonError::into_inner) = Some(bounds);
    }

    /// The sentinel is no longer mounted.
    pub fn detach(&self) {
        *self.bounds.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Latest measured geometry, if mounted.
    pub fn bounds(&self) -> Option<SentinelBounds> {
        *self.bounds.read().unwrap_or_else(PoisonError::into_inner)
    }
}
