//! The paged source contract.

use crate::error::FetchError;

/// One batch of items returned by a single pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in feed order (newest first for a timeline).
    pub items: Vec<T>,
    /// The source has nothing left after this page.
    pub done: bool,
}

impl<T> Page<T> {
    /// A page with more to come.
    pub const fn more(items: Vec<T>) -> Self {
        Self { items, done: false }
    }

    /// The final page of the source.
    pub const fn last(items: Vec<T>) -> Self {
        Self { items, done: true }
    }

    /// The source is exhausted and returned nothing.
    pub const fn end() -> Self {
        Self {
            items: Vec::new(),
            done: true,
        }
    }

    /// Whether this page exhausts the source.
    ///
    /// An empty page counts as exhaustion even without the `done` flag.
    pub fn is_terminal(&self) -> bool {
        self.done || self.items.is_empty()
    }
}

/// A cursor-based remote pagination source.
///
/// Called from the fetcher thread, one page at a time. The cursor is owned by
/// the implementation and never inspected by the engine.
pub trait PageSource<T>: Send {
    /// Pull the next page.
    fn next_page(&mut self) -> Result<Page<T>, FetchError>;
}

impl<T, F> PageSource<T> for F
where
    F: FnMut() -> Result<Page<T>, FetchError> + Send,
{
    fn next_page(&mut self) -> Result<Page<T>, FetchError> {
        self()
    }
}
