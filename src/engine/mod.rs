//! Pagination Engine: buffers, fetch state machine, and the feed loop.
//!
//! # Architecture
//!
//! ```text
//!  Sentinel / Ticker ──▶ ┌───────────────────────┐ ──Ticket──▶ Fetcher Thread
//!  Lifecycle        ──▶ │   Feed (select! loop)  │ ◀─Outcome── (PageSource)
//!  ReadinessGate    ──▶ │   └─ Paginator         │
//!  LiveChannel      ──▶ │      items / lookahead │
//!                        │      pending / state   │
//!                        └───────────────────────┘
//! ```
//!
//! Every mutation happens on the thread that drives the [`Feed`], so fetch
//! completions and live events are strictly ordered relative to each other.

mod buffers;
mod feed;
mod paginator;
mod state;

pub use buffers::Buffers;
pub(crate) use buffers::index_of;
pub use feed::{Feed, Step};
pub use paginator::{Paginator, PaginatorBuilder};
pub use state::{Applied, FetchState, LoadRequest};
