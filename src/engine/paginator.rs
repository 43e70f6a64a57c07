//! Paginator: the buffers and fetch state machine of one feed.
//!
//! # Buffering
//!
//! Fetched pages are not exposed whole. The last `buffer` processed items of
//! every page are held back in the lookahead buffer and re-folded with the
//! next page, so the consumer never sees a ragged tail that a regrouping
//! preprocessor would later rewrite. When the source is exhausted the
//! lookahead buffer is drained in order.
//!
//! # Example
//!
//! ```rust,ignore
//! use feedwheel::{ItemCache, Page, Paginator};
//!
//! let mut paginator = Paginator::new(my_source, ItemCache::new());
//! paginator.load_next();
//! paginator.wait_outcome(Duration::from_secs(5));
//! render(paginator.items());
//! ```

use super::buffers::Buffers;
use super::state::{Applied, FetchState, LoadRequest};
use crate::cache::{ItemCache, UpsertOptions};
use crate::config::PaginatorConfig;
use crate::error::FetchError;
use crate::fetcher::{FetchOutcome, FetcherActor, Page, PageSource, Ticket};
use crate::item::{Folded, Identity, Item, Preprocess};
use crate::live::{LiveEvent, LiveMerger, Merged};
use crate::trigger::{NoRestore, ReadinessGate, ScrollRestorer, Sentinel, VisibilityTrigger};
use crossbeam_channel::{bounded, never, Receiver};
use std::mem;
use std::time::{Duration, Instant};

/// Builder for a [`Paginator`].
pub struct PaginatorBuilder<T: Item, P = Identity> {
    source: Box<dyn PageSource<T>>,
    cache: ItemCache<T>,
    preprocess: P,
    config: PaginatorConfig,
    gate: ReadinessGate,
    sentinel: Sentinel,
    restorer: Box<dyn ScrollRestorer>,
}

impl<T: Item, P: Preprocess<T>> PaginatorBuilder<T, P> {
    /// Use a custom preprocessor.
    pub fn preprocess<Q: Preprocess<T>>(self, preprocess: Q) -> PaginatorBuilder<T, Q> {
        PaginatorBuilder {
            source: self.source,
            cache: self.cache,
            preprocess,
            config: self.config,
            gate: self.gate,
            sentinel: self.sentinel,
            restorer: self.restorer,
        }
    }

    /// Use a custom configuration.
    #[must_use]
    pub fn config(mut self, config: PaginatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Hold back the first fetch until `gate` is ready.
    #[must_use]
    pub fn gate(mut self, gate: ReadinessGate) -> Self {
        self.gate = gate;
        self
    }

    /// Use a sentinel shared with the rendering layer.
    #[must_use]
    pub fn sentinel(mut self, sentinel: Sentinel) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// Restore the scroll position through `restorer`.
    #[must_use]
    pub fn restorer(mut self, restorer: impl ScrollRestorer + 'static) -> Self {
        self.restorer = Box::new(restorer);
        self
    }

    /// Spawn the fetcher and build the paginator.
    pub fn build(self) -> Paginator<T, P> {
        let (outcome_tx, outcome_rx) = bounded(1);
        let fetcher = FetcherActor::spawn(self.source, outcome_tx);

        let ready = self.gate.is_ready();
        let ready_rx = if ready {
            never()
        } else {
            let (tx, rx) = bounded(1);
            self.gate.on_ready(move || {
                let _ = tx.try_send(());
            });
            rx
        };

        let trigger = VisibilityTrigger::new(
            self.sentinel,
            self.config.proximity,
            self.config.restore_delay,
        );

        Paginator {
            merger: LiveMerger::new(self.config.feed_kind, self.cache.clone()),
            cache: self.cache,
            preprocess: self.preprocess,
            config: self.config,
            buffers: Buffers::default(),
            state: if ready { FetchState::Idle } else { FetchState::Loading },
            error: None,
            fetcher,
            outcome_rx,
            next_ticket: 0,
            in_flight: None,
            ready,
            ready_rx,
            trigger,
            restorer: self.restorer,
            disposed: false,
        }
    }
}

/// The pagination engine of one feed.
///
/// Owns the materialized sequence, the lookahead buffer, the pending-prepend
/// buffer and the [`FetchState`]. All methods are meant to be called from a
/// single thread; [`Feed`](crate::Feed) provides that loop.
pub struct Paginator<T: Item, P: Preprocess<T> = Identity> {
    config: PaginatorConfig,
    preprocess: P,
    cache: ItemCache<T>,
    merger: LiveMerger<T>,
    buffers: Buffers<T, P::Output>,
    state: FetchState,
    error: Option<FetchError>,
    fetcher: FetcherActor,
    outcome_rx: Receiver<FetchOutcome<T>>,
    next_ticket: u64,
    in_flight: Option<Ticket>,
    ready: bool,
    ready_rx: Receiver<()>,
    trigger: VisibilityTrigger,
    restorer: Box<dyn ScrollRestorer>,
    disposed: bool,
}

impl<T: Item> Paginator<T> {
    /// Create a paginator with default configuration and no preprocessing.
    pub fn new(source: impl PageSource<T> + 'static, cache: ItemCache<T>) -> Self {
        Self::builder(source, cache).build()
    }

    /// Start building a paginator.
    pub fn builder(
        source: impl PageSource<T> + 'static,
        cache: ItemCache<T>,
    ) -> PaginatorBuilder<T> {
        PaginatorBuilder {
            source: Box::new(source),
            cache,
            preprocess: Identity,
            config: PaginatorConfig::default(),
            gate: ReadinessGate::ready(),
            sentinel: Sentinel::new(),
            restorer: Box::new(NoRestore),
        }
    }
}

impl<T: Item, P: Preprocess<T>> Paginator<T, P> {
    // ----- read model -----

    /// The materialized sequence, newest first.
    pub fn items(&self) -> &[P::Output] {
        &self.buffers.items
    }

    /// Raw live items waiting for [`update`](Self::update), most recent first.
    pub fn pending(&self) -> &[T] {
        &self.buffers.pending
    }

    /// Fetched items held back from the consumer.
    pub fn lookahead(&self) -> &[P::Output] {
        &self.buffers.lookahead
    }

    /// Current fetch state.
    pub const fn state(&self) -> FetchState {
        self.state
    }

    /// The error of the last failed fetch.
    pub const fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// The sentinel handle, for the rendering layer.
    pub const fn sentinel(&self) -> &Sentinel {
        self.trigger.sentinel()
    }

    /// The visibility trigger.
    pub const fn trigger(&self) -> &VisibilityTrigger {
        &self.trigger
    }

    /// The shared item cache.
    pub const fn cache(&self) -> &ItemCache<T> {
        &self.cache
    }

    /// The configuration.
    pub const fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// The fetch currently in flight.
    pub const fn in_flight(&self) -> Option<Ticket> {
        self.in_flight
    }

    /// Whether the surrounding context is initialised.
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether [`dispose`](Self::dispose) was called.
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Receiver of fetch outcomes, for custom event loops.
    pub const fn outcomes(&self) -> &Receiver<FetchOutcome<T>> {
        &self.outcome_rx
    }

    pub(crate) const fn readiness_signal(&self) -> &Receiver<()> {
        &self.ready_rx
    }

    // ----- fetching -----

    /// Start fetching the next page.
    ///
    /// Does nothing unless the state is [`FetchState::Idle`], so at most one
    /// fetch is ever in flight. If the fetcher is gone the failure is applied
    /// immediately.
    pub fn load_next(&mut self) -> LoadRequest {
        if self.disposed {
            return LoadRequest::Disposed;
        }
        if self.state != FetchState::Idle {
            return LoadRequest::Skipped(self.state);
        }

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.state = FetchState::Loading;
        self.in_flight = Some(ticket);
        log::debug!("dispatching fetch {ticket:?}");

        if let Err(err) = self.fetcher.request(ticket) {
            self.apply_outcome(FetchOutcome {
                ticket,
                result: Err(err),
            });
        }
        LoadRequest::Dispatched(ticket)
    }

    /// Leave the error state and fetch again.
    pub fn retry(&mut self) -> LoadRequest {
        if self.state == FetchState::Error {
            self.state = FetchState::Idle;
        }
        self.load_next()
    }

    /// Wait for the in-flight fetch and apply it.
    pub fn wait_outcome(&mut self, timeout: Duration) -> Option<Applied> {
        let outcome = self.outcome_rx.recv_timeout(timeout).ok()?;
        Some(self.apply_outcome(outcome))
    }

    /// Fold a fetch outcome into the buffers.
    ///
    /// Outcomes for a disposed paginator, or for a ticket that is not in
    /// flight, are discarded without touching any state.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome<T>) -> Applied {
        if self.disposed || self.in_flight != Some(outcome.ticket) {
            log::debug!("discarding stale outcome for {:?}", outcome.ticket);
            return Applied::Stale;
        }
        self.in_flight = None;

        let applied = match outcome.result {
            Ok(page) => self.fold_page(page),
            Err(err) => {
                log::warn!("fetch {:?} failed: {err}", outcome.ticket);
                self.error = Some(err);
                self.state = FetchState::Error;
                Applied::Failed
            }
        };

        if applied != Applied::Failed && self.trigger.restore_mut().after_load() {
            self.restorer.restore_scroll_position();
        }
        self.refresh();
        applied
    }

    /// The fetcher thread is gone: fail the in-flight fetch, if any.
    pub(crate) fn fetcher_lost(&mut self) -> Applied {
        self.outcome_rx = never();
        match self.in_flight {
            Some(ticket) => self.apply_outcome(FetchOutcome {
                ticket,
                result: Err(FetchError::Disconnected),
            }),
            None => Applied::Stale,
        }
    }

    fn fold_page(&mut self, page: Page<T>) -> Applied {
        let terminal = page.is_terminal();
        let buffer = self.config.buffer;
        let mut shown = 0;

        if !page.items.is_empty() {
            for item in page.items.iter().filter(|item| item.cacheable()) {
                self.cache.upsert(item.clone(), UpsertOptions::KEEP_EXISTING);
            }

            let folded: Vec<_> = mem::take(&mut self.buffers.lookahead)
                .into_iter()
                .map(Folded::Processed)
                .chain(page.items.into_iter().map(Folded::Raw))
                .collect();
            let mut processed = self
                .buffers
                .retain_unseen(self.preprocess.preprocess(folded));

            let show = if processed.len() < buffer {
                processed.len()
            } else {
                processed.len() - buffer
            };
            self.buffers.lookahead = processed.split_off(show);
            shown = processed.len();
            self.buffers.items.extend(processed);
        }

        if terminal {
            let drained = mem::take(&mut self.buffers.lookahead);
            shown += self.buffers.append(drained);
            self.state = FetchState::Done;
            log::debug!("source exhausted with {} items", self.buffers.items.len());
            return Applied::Exhausted { shown };
        }

        self.state = FetchState::Idle;
        let held = self.buffers.lookahead.len();
        log::debug!("page applied: {shown} shown, {held} held back");
        Applied::Page { shown, held }
    }

    // ----- live content -----

    /// Apply a live event.
    pub fn apply_live(&mut self, event: LiveEvent<T>) -> Merged {
        if self.disposed {
            return Merged::Ignored;
        }
        self.merger
            .apply(event, &mut self.buffers, &self.preprocess)
    }

    /// Promote pending live items onto the head of the materialized sequence.
    ///
    /// Returns the number of items promoted.
    pub fn update(&mut self) -> usize {
        if self.disposed || self.buffers.pending.is_empty() {
            return 0;
        }
        let raw = mem::take(&mut self.buffers.pending);
        let processed = self
            .preprocess
            .preprocess(raw.into_iter().map(Folded::Raw).collect());
        let promoted = self.buffers.prepend(processed);
        log::debug!("promoted {promoted} live items");
        promoted
    }

    // ----- triggers and lifecycle -----

    /// Start a fetch if the sentinel is near, the view is active, the context
    /// is ready and the state is idle.
    pub fn evaluate(&mut self) -> Option<Ticket> {
        if !(self.ready && self.state == FetchState::Idle && self.trigger.is_armed()) {
            return None;
        }
        match self.load_next() {
            LoadRequest::Dispatched(ticket) => Some(ticket),
            _ => None,
        }
    }

    /// Re-measure the sentinel and re-evaluate.
    pub fn refresh(&mut self) -> Option<Ticket> {
        self.trigger.recompute();
        self.evaluate()
    }

    /// The context became ready: leave the startup `Loading` state and fetch.
    pub fn mark_ready(&mut self) -> LoadRequest {
        self.ready_rx = never();
        if self.ready {
            return LoadRequest::Skipped(self.state);
        }
        self.ready = true;
        log::debug!("context ready, starting first fetch");
        if self.state == FetchState::Loading && self.in_flight.is_none() {
            self.state = FetchState::Idle;
        }
        self.load_next()
    }

    /// The readiness gate went away without opening.
    pub(crate) fn readiness_lost(&mut self) {
        log::debug!("readiness gate dropped before opening");
        self.ready_rx = never();
    }

    /// The consuming view moved to the background.
    pub fn suspend(&mut self) {
        self.trigger.suspend();
    }

    /// The consuming view came back.
    pub fn resume(&mut self, now: Instant) -> Option<Ticket> {
        self.trigger.resume(now, self.ready);
        self.evaluate()
    }

    /// Fire the resume restoration timer if due.
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        if self.trigger.restore_mut().poll(now) {
            self.restorer.restore_scroll_position();
            return true;
        }
        false
    }

    /// Next timer deadline, if any.
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.trigger.restore().deadline()
    }

    /// Tear down: later outcomes and events are ignored and no new fetch starts.
    ///
    /// Buffers stay readable as they were.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        log::debug!("disposing paginator with {} items", self.buffers.items.len());
        self.disposed = true;
        self.in_flight = None;
        self.fetcher.shutdown();
    }
}
