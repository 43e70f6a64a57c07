//! Item cache: process-wide keyed store shared across feeds.
//!
//! Cloning an [`ItemCache`] yields another handle to the same store. Every
//! operation takes the lock exactly once, so each call is atomic for its key
//! and concurrent writers resolve last-write-wins.

use crate::item::Item;
use rustc_hash::FxHashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Options for [`ItemCache::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOptions {
    /// Replace an existing entry. When `false`, the first sighting is kept.
    pub overwrite: bool,
}

impl Default for UpsertOptions {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

impl UpsertOptions {
    /// Keep an existing entry, insert only if absent.
    pub const KEEP_EXISTING: Self = Self { overwrite: false };
}

/// Shared store of items keyed by identifier.
///
/// Entries are never evicted; they live until removed or the process exits.
pub struct ItemCache<T: Item> {
    entries: Arc<RwLock<FxHashMap<T::Id, T>>>,
}

impl<T: Item> Clone for ItemCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T: Item> Default for ItemCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Item> std::fmt::Debug for ItemCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemCache").field("len", &self.len()).finish()
    }
}

impl<T: Item> ItemCache<T> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(FxHashMap::default())),
        }
    }

    /// Insert or replace an item.
    ///
    /// Returns `true` if the cache now holds this item.
    pub fn upsert(&self, item: T, opts: UpsertOptions) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if !opts.overwrite && entries.contains_key(item.id()) {
            return false;
        }
        entries.insert(item.id().clone(), item);
        true
    }

    /// Remove an item, returning it if present.
    pub fn remove(&self, id: &T::Id) -> Option<T> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    /// Get a copy of the cached item.
    pub fn get(&self, id: &T::Id) -> Option<T> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Check whether an item is cached.
    pub fn contains(&self, id: &T::Id) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Number of cached items.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
