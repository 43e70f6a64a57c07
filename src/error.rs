//! Error types for the feed engine.
//!
//! Fetch failures never cross the public boundary as `Err`: they are stored
//! on the [`Paginator`](crate::Paginator) and surfaced through its read model.

use thiserror::Error;

/// A failure reported by a [`PageSource`](crate::PageSource) or the fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The transport failed to deliver the page.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The page arrived but could not be decoded.
    #[error("failed to decode page: {0}")]
    Decode(String),

    /// The fetcher thread is gone and can no longer serve requests.
    #[error("page fetcher disconnected")]
    Disconnected,
}

/// A live event that could not be keyed to an item.
///
/// The merger logs and drops these; they never stop the event queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed `{event}` event: {reason}")]
pub struct MalformedEvent {
    /// Name of the event as sent by the transport.
    pub event: String,
    /// Why the event was rejected.
    pub reason: String,
}
