//! Page Fetcher: pull-based access to a cursor-paginated remote feed.
//!
//! A [`PageSource`] is the transport-facing side: it knows how to pull the
//! next page and keeps its cursor to itself. The [`FetcherActor`] runs the
//! source on a dedicated thread so a slow page never blocks the feed queue.
//!
//! ```text
//! ┌──────────────┐   Ticket (bounded 1)  ┌───────────────┐
//! │  Paginator   │ ────────────────────▶ │ Fetcher Thread│
//! │ (feed queue) │ ◀──────────────────── │  PageSource   │
//! └──────────────┘     FetchOutcome      └───────────────┘
//! ```

mod actor;
mod source;

pub use actor::{FetchOutcome, FetcherActor, Ticket};
pub use source::{Page, PageSource};
