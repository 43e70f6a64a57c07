//! Applies live events to a feed's buffers and to the shared cache.

use super::events::{FeedKind, LiveEvent};
use crate::cache::{ItemCache, UpsertOptions};
use crate::engine::{index_of, Buffers};
use crate::item::{Item, Preprocess};

/// What a live event did to the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merged {
    /// A new item was placed at the head of the pending buffer.
    Queued {
        /// An older pending copy of the same id was dropped.
        replaced: bool,
    },
    /// An edit was applied.
    Updated {
        /// The item was materialized and replaced in place.
        in_view: bool,
    },
    /// A deletion was applied.
    Deleted {
        /// The item was materialized and removed.
        in_view: bool,
    },
    /// The event was for another stream or malformed.
    Ignored,
}

/// Splices push events into the buffers of one paginator.
#[derive(Debug, Clone)]
pub struct LiveMerger<T: Item> {
    kind: FeedKind,
    cache: ItemCache<T>,
}

impl<T: Item> LiveMerger<T> {
    /// Create a merger accepting new items from the given stream.
    pub const fn new(kind: FeedKind, cache: ItemCache<T>) -> Self {
        Self { kind, cache }
    }

    /// The stream new items are accepted from.
    pub const fn kind(&self) -> FeedKind {
        self.kind
    }

    /// Apply one event.
    ///
    /// New items stay raw in the pending buffer until promotion; edits and
    /// deletions splice the materialized sequence directly by id.
    pub fn apply<P>(
        &self,
        event: LiveEvent<T>,
        buffers: &mut Buffers<T, P::Output>,
        preprocess: &P,
    ) -> Merged
    where
        P: Preprocess<T>,
    {
        match event {
            LiveEvent::New { kind, item } => {
                if kind != self.kind {
                    log::trace!("ignoring {kind:?} item on a {:?} feed", self.kind);
                    return Merged::Ignored;
                }
                if item.cacheable() {
                    self.cache.upsert(item.clone(), UpsertOptions::default());
                }
                let replaced = match index_of(&buffers.pending, item.id()) {
                    Some(index) => {
                        buffers.pending.remove(index);
                        true
                    }
                    None => false,
                };
                buffers.pending.insert(0, item);
                Merged::Queued { replaced }
            }

            LiveEvent::Updated(item) => {
                if item.cacheable() {
                    self.cache.upsert(item.clone(), UpsertOptions::default());
                }
                let id = item.id().clone();

                if let Some(index) = index_of(&buffers.pending, &id) {
                    buffers.pending[index] = item.clone();
                }
                if let Some(index) = index_of(&buffers.lookahead, &id) {
                    buffers.lookahead[index] = preprocess.lift(item.clone());
                }
                let in_view = match index_of(&buffers.items, &id) {
                    Some(index) => {
                        buffers.items[index] = preprocess.lift(item);
                        true
                    }
                    None => false,
                };
                Merged::Updated { in_view }
            }

            LiveEvent::Deleted(id) => {
                self.cache.remove(&id);
                buffers.pending.retain(|item| item.id() != &id);
                buffers.lookahead.retain(|item| item.id() != &id);
                let in_view = match index_of(&buffers.items, &id) {
                    Some(index) => {
                        buffers.items.remove(index);
                        true
                    }
                    None => false,
                };
                Merged::Deleted { in_view }
            }

            LiveEvent::Malformed(err) => {
                log::warn!("dropping live event: {err}");
                Merged::Ignored
            }
        }
    }
}
