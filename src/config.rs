//! Configuration for a paginated feed.

use crate::live::FeedKind;
use std::time::Duration;

/// Configuration for a [`Paginator`](crate::Paginator) and its [`Feed`](crate::Feed) loop.
#[derive(Debug, Clone)]
pub struct PaginatorConfig {
    /// Number of fetched items held back in the lookahead buffer.
    pub buffer: usize,
    /// How many viewport heights below the visible area still count as "near".
    pub proximity: f32,
    /// Interval between periodic sentinel recomputes.
    pub geometry_interval: Duration,
    /// Delay before restoring the scroll position after resumption.
    pub restore_delay: Duration,
    /// Which live event stream feeds new items into this paginator.
    pub feed_kind: FeedKind,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            buffer: 10,
            proximity: 2.0,
            geometry_interval: Duration::from_secs(1),
            restore_delay: Duration::from_millis(600),
            feed_kind: FeedKind::Update,
        }
    }
}

impl PaginatorConfig {
    /// Set the lookahead buffer size.
    #[must_use]
    pub const fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    /// Set the proximity threshold, in viewport heights.
    #[must_use]
    pub const fn with_proximity(mut self, proximity: f32) -> Self {
        self.proximity = proximity;
        self
    }

    /// Set the periodic geometry recompute interval.
    #[must_use]
    pub const fn with_geometry_interval(mut self, interval: Duration) -> Self {
        self.geometry_interval = interval;
        self
    }

    /// Set the scroll restoration delay used after resumption.
    #[must_use]
    pub const fn with_restore_delay(mut self, delay: Duration) -> Self {
        self.restore_delay = delay;
        self
    }

    /// Set the live event stream that delivers new items.
    #[must_use]
    pub const fn with_feed_kind(mut self, kind: FeedKind) -> Self {
        self.feed_kind = kind;
        self
    }
}
