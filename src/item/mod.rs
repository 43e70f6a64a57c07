//! Item model: identity and preprocessing.
//!
//! Items are opaque records keyed by a stable identifier. Fetched and live
//! content is raw (`T`); what the consumer renders is the output of a
//! [`Preprocess`] implementation, which may regroup or filter raw items.

use std::fmt::Debug;
use std::hash::Hash;

/// A domain record with a stable unique identifier.
pub trait Item: Clone + Send + 'static {
    /// Identifier type. Identity is the only key used for dedup and splicing.
    type Id: Clone + Eq + Hash + Debug + Send + 'static;

    /// The stable identifier of this item.
    fn id(&self) -> &Self::Id;

    /// Whether this item may be written into the [`ItemCache`](crate::ItemCache)
    /// from the live path.
    ///
    /// Items without a canonical address (e.g. partial payloads) return `false`.
    fn cacheable(&self) -> bool {
        true
    }
}

/// Input element for [`Preprocess::preprocess`]: either fresh raw content or
/// content that has already been processed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Folded<T, U> {
    /// A raw item straight from the page source or the live channel.
    Raw(T),
    /// An item previously produced by the preprocessor.
    Processed(U),
}

/// Transform from raw-or-processed items to processed items.
///
/// `preprocess` is re-run over the concatenation of held-back processed
/// items and newly arrived raw items, so it must leave already processed
/// items unchanged.
pub trait Preprocess<T: Item>: Send {
    /// The processed item type exposed to the consumer.
    type Output: Item<Id = T::Id>;

    /// Fold a mixed sequence into processed items, preserving order.
    fn preprocess(&self, items: Vec<Folded<T, Self::Output>>) -> Vec<Self::Output>;

    /// Convert a single raw item for in-place replacement of a live edit.
    fn lift(&self, item: T) -> Self::Output;
}

/// The preprocessor that passes items through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T: Item> Preprocess<T> for Identity {
    type Output = T;

    fn preprocess(&self, items: Vec<Folded<T, T>>) -> Vec<T> {
        items
            .into_iter()
            .map(|folded| match folded {
                Folded::Raw(item) | Folded::Processed(item) => item,
            })
            .collect()
    }

    fn lift(&self, item: T) -> T {
        item
    }
}
