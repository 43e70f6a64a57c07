//! The three logical buffers owned by a paginator.

use crate::item::Item;
use rustc_hash::FxHashSet;

/// Position of the entry with the given id.
pub(crate) fn index_of<I: Item>(items: &[I], id: &I::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Materialized, lookahead and pending-prepend content of one feed.
///
/// `T` is the raw item type, `U` the processed type the consumer renders.
#[derive(Debug, Clone)]
pub struct Buffers<T, U> {
    /// Items exposed to the consumer, newest first.
    pub(crate) items: Vec<U>,
    /// Fetched items held back until the next page arrives.
    pub(crate) lookahead: Vec<U>,
    /// Raw live items awaiting promotion, most recent first.
    pub(crate) pending: Vec<T>,
}

impl<T, U> Default for Buffers<T, U> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            lookahead: Vec::new(),
            pending: Vec::new(),
        }
    }
}

impl<T, U> Buffers<T, U> {
    /// Items exposed to the consumer.
    pub fn items(&self) -> &[U] {
        &self.items
    }

    /// Fetched items held back from the consumer.
    pub fn lookahead(&self) -> &[U] {
        &self.lookahead
    }

    /// Live items awaiting promotion.
    pub fn pending(&self) -> &[T] {
        &self.pending
    }
}

impl<T: Item, U: Item<Id = T::Id>> Buffers<T, U> {
    /// Drop entries of `batch` whose id is already materialized or appears
    /// earlier in the batch.
    pub(crate) fn retain_unseen(&self, batch: Vec<U>) -> Vec<U> {
        let mut seen: FxHashSet<T::Id> =
            self.items.iter().map(|item| item.id().clone()).collect();
        let before = batch.len();
        let fresh: Vec<U> = batch
            .into_iter()
            .filter(|item| seen.insert(item.id().clone()))
            .collect();
        if fresh.len() < before {
            log::trace!("dropped {} duplicate items", before - fresh.len());
        }
        fresh
    }

    /// Append processed content at the tail, keeping the unique-id invariant.
    pub(crate) fn append(&mut self, batch: Vec<U>) -> usize {
        let fresh = self.retain_unseen(batch);
        let count = fresh.len();
        self.items.extend(fresh);
        count
    }

    /// Prepend promoted content at the head; older copies of the same ids are
    /// removed from the materialized and lookahead sequences.
    pub(crate) fn prepend(&mut self, batch: Vec<U>) -> usize {
        let mut ids: FxHashSet<T::Id> = FxHashSet::default();
        let promoted: Vec<U> = batch
            .into_iter()
            .filter(|item| ids.insert(item.id().clone()))
            .collect();
        self.items.retain(|item| !ids.contains(item.id()));
        self.lookahead.retain(|item| !ids.contains(item.id()));
        let count = promoted.len();
        self.items.splice(0..0, promoted);
        count
    }
}
