//! # Feedwheel
//!
//! An incremental pagination and live-merge engine for infinite feeds.
//!
//! Feedwheel lazily pulls pages from a cursor-paginated source while
//! splicing in real-time push events, and exposes the result as one ordered,
//! deduplicated sequence for a display layer to render.
//!
//! ## Core Concepts
//!
//! - **Lookahead buffer**: the tail of every page is held back so the consumer
//!   never sees a ragged, about-to-change end of the list
//! - **Pending prepend**: live items queue up until the consumer promotes them
//!   with [`Paginator::update`], so the list never jumps under the reader
//! - **Single queue**: [`Feed`] applies fetch completions and live events in
//!   arrival order on one thread, with fetches running on an actor thread
//! - **Visibility trigger**: the next page is fetched when the [`Sentinel`]
//!   nears the viewport and the view is in the foreground
//!
//! ## Example
//!
//! ```rust,ignore
//! use feedwheel::{Feed, ItemCache, LiveChannel, Paginator};
//!
//! let cache = ItemCache::new();
//! let paginator = Paginator::new(timeline_source, cache.clone());
//! let (live, connector) = LiveChannel::pending();
//! let mut feed = Feed::new(paginator, live);
//!
//! // Later, once the streaming connection is up
//! connector.connect(stream_rx);
//!
//! loop {
//!     feed.step(Duration::from_millis(16));
//!     render(feed.paginator().items(), feed.paginator().pending().len());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod item;
pub mod live;
pub mod trigger;

// Re-exports for convenience
pub use cache::{ItemCache, UpsertOptions};
pub use config::PaginatorConfig;
pub use engine::{Applied, Feed, FetchState, LoadRequest, Paginator, PaginatorBuilder, Step};
pub use error::{FetchError, MalformedEvent};
pub use fetcher::{FetchOutcome, Page, PageSource, Ticket};
pub use item::{Folded, Identity, Item, Preprocess};
pub use live::{FeedKind, LiveChannel, LiveConnector, LiveEvent, LiveState, Merged};
pub use trigger::{
    Lifecycle, NoRestore, ReadinessGate, ScrollRestorer, Sentinel, SentinelBounds,
};
