//! Fetch state machine and operation results.

use crate::fetcher::Ticket;

/// Where the paginator is in its fetch cycle.
///
/// ```text
/// Loading ─(ready)─▶ Idle ─load_next─▶ Loading ─page─▶ Idle ─ … ─▶ Done
///                                         └─failure─▶ Error ─retry─▶ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchState {
    /// A fetch is in flight, or the context is not ready yet.
    Loading,
    /// Ready to fetch the next page.
    Idle,
    /// The source is exhausted.
    Done,
    /// The last fetch failed.
    Error,
}

/// Result of [`Paginator::load_next`](crate::Paginator::load_next).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadRequest {
    /// A fetch was sent to the fetcher.
    Dispatched(Ticket),
    /// Not idle; nothing was sent.
    Skipped(FetchState),
    /// The paginator is disposed.
    Disposed,
}

/// Result of applying a fetch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A page was folded in.
    Page {
        /// Items appended to the materialized sequence.
        shown: usize,
        /// Items now held in the lookahead buffer.
        held: usize,
    },
    /// The source is exhausted; the lookahead buffer was drained.
    Exhausted {
        /// Items appended to the materialized sequence.
        shown: usize,
    },
    /// The fetch failed; buffers are unchanged.
    Failed,
    /// The outcome arrived after disposal or for a superseded request.
    Stale,
}
