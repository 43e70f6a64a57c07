//! Live Event Merger: push-based updates spliced into a paginated feed.
//!
//! The transport hands over a channel of [`LiveEvent`]s, possibly long after
//! the feed was created. Until it does, or if it never does, the feed runs in
//! pure pagination mode.

mod channel;
mod events;
mod merger;

pub use channel::{LiveChannel, LiveConnector, LiveState};
pub use events::{FeedKind, LiveEvent};
pub use merger::{LiveMerger, Merged};
