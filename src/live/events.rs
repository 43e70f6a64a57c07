//! Events arriving on the live channel.

use crate::error::MalformedEvent;
use crate::item::Item;

/// The named stream a new item was pushed on.
///
/// A feed only accepts new items from the stream it was configured for;
/// a home timeline listens to updates, a notification list to notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FeedKind {
    /// New posts in a timeline.
    #[default]
    Update,
    /// New notifications.
    Notification,
}

/// A push event from the streaming transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEvent<T: Item> {
    /// A new item was published.
    New {
        /// Stream the item arrived on.
        kind: FeedKind,
        /// The raw item.
        item: T,
    },

    /// An existing item was edited.
    Updated(T),

    /// An item was deleted.
    Deleted(T::Id),

    /// The transport received something it could not key to an item.
    Malformed(MalformedEvent),
}

impl<T: Item> LiveEvent<T> {
    /// A new item on the update stream.
    pub const fn update(item: T) -> Self {
        Self::New {
            kind: FeedKind::Update,
            item,
        }
    }

    /// A new item on the notification stream.
    pub const fn notification(item: T) -> Self {
        Self::New {
            kind: FeedKind::Notification,
            item,
        }
    }

    /// A rejected event, for transport adapters.
    pub fn malformed(event: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed(MalformedEvent {
            event: event.into(),
            reason: reason.into(),
        })
    }
}
