//! Feed: the single event queue that drives a paginator.
//!
//! The feed multiplexes fetch completions, live events, lifecycle signals,
//! the readiness notification and ticker ticks with `select!`, applying each
//! to the paginator in arrival order.

use super::paginator::Paginator;
use super::state::Applied;
use crate::item::{Identity, Item, Preprocess};
use crate::live::{LiveChannel, LiveState, Merged};
use crate::trigger::{Lifecycle, TickerActor};
use crossbeam_channel::{select, unbounded, Receiver, Sender};
use std::time::{Duration, Instant};

/// What one [`Feed::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A fetch outcome was applied.
    Fetched(Applied),
    /// A live event was merged.
    Live(Merged),
    /// The live channel was bound by the transport.
    LiveConnected,
    /// The live channel closed; the feed continues in pure pagination mode.
    LiveClosed,
    /// A lifecycle signal was handled.
    Lifecycle(Lifecycle),
    /// The context became ready.
    Ready,
    /// The sentinel was re-measured on the periodic tick.
    Tick,
    /// The resume restoration timer fired.
    Restored,
    /// Nothing arrived before the timeout.
    Idle,
}

/// Event loop owning a [`Paginator`] and its inputs.
pub struct Feed<T: Item, P: Preprocess<T> = Identity> {
    paginator: Paginator<T, P>,
    live: LiveChannel<T>,
    lifecycle_tx: Sender<Lifecycle>,
    lifecycle_rx: Receiver<Lifecycle>,
    ticker: TickerActor,
}

impl<T: Item, P: Preprocess<T>> Feed<T, P> {
    /// Create a feed around a paginator and its live channel.
    pub fn new(paginator: Paginator<T, P>, live: LiveChannel<T>) -> Self {
        let (lifecycle_tx, lifecycle_rx) = unbounded();
        let ticker = TickerActor::spawn(paginator.config().geometry_interval);
        Self {
            paginator,
            live,
            lifecycle_tx,
            lifecycle_rx,
            ticker,
        }
    }

    /// The paginator.
    pub const fn paginator(&self) -> &Paginator<T, P> {
        &self.paginator
    }

    /// Mutable access to the paginator, e.g. for [`Paginator::update`].
    pub const fn paginator_mut(&mut self) -> &mut Paginator<T, P> {
        &mut self.paginator
    }

    /// Connection state of the live channel.
    pub const fn live_state(&self) -> LiveState {
        self.live.state()
    }

    /// Sender for lifecycle signals from the view layer.
    pub fn lifecycle(&self) -> Sender<Lifecycle> {
        self.lifecycle_tx.clone()
    }

    /// Whether the feed was destroyed.
    pub const fn is_destroyed(&self) -> bool {
        self.paginator.is_disposed()
    }

    /// Process at most one message, waiting up to `timeout`.
    ///
    /// Returns [`Step::Idle`] immediately once the feed is destroyed.
    pub fn step(&mut self, timeout: Duration) -> Step {
        if self.is_destroyed() {
            return Step::Idle;
        }
        let now = Instant::now();
        if self.paginator.poll_timers(now) {
            return Step::Restored;
        }
        let wait = self
            .paginator
            .next_deadline()
            .map_or(timeout, |deadline| {
                deadline.saturating_duration_since(now).min(timeout)
            });

        // Cloned so the arms may borrow the paginator mutably
        let outcomes = self.paginator.outcomes().clone();
        let readiness = self.paginator.readiness_signal().clone();
        let binding = self.live.binding().clone();
        let events = self.live.events().clone();
        let lifecycle = self.lifecycle_rx.clone();
        let ticks = self.ticker.receiver().clone();

        let step = select! {
            recv(outcomes) -> msg => match msg {
                Ok(outcome) => Step::Fetched(self.paginator.apply_outcome(outcome)),
                Err(_) => Step::Fetched(self.paginator.fetcher_lost()),
            },
            recv(lifecycle) -> msg => match msg {
                Ok(signal) => {
                    self.handle_lifecycle(signal);
                    Step::Lifecycle(signal)
                }
                Err(_) => Step::Idle,
            },
            recv(readiness) -> msg => {
                if msg.is_ok() {
                    self.paginator.mark_ready();
                    Step::Ready
                } else {
                    self.paginator.readiness_lost();
                    Step::Idle
                }
            },
            recv(binding) -> msg => match msg {
                Ok(rx) => {
                    self.live.bind(rx);
                    Step::LiveConnected
                }
                Err(_) => {
                    self.live.close();
                    Step::LiveClosed
                }
            },
            recv(events) -> msg => match msg {
                Ok(event) => Step::Live(self.paginator.apply_live(event)),
                Err(_) => {
                    self.live.close();
                    Step::LiveClosed
                }
            },
            recv(ticks) -> _ => {
                self.paginator.refresh();
                Step::Tick
            },
            default(wait) => Step::Idle,
        };

        if step == Step::Idle && self.paginator.poll_timers(Instant::now()) {
            return Step::Restored;
        }
        step
    }

    /// Process messages until `deadline` or until the feed is destroyed.
    ///
    /// Returns the number of steps that did something.
    pub fn run_until(&mut self, deadline: Instant) -> usize {
        let mut handled = 0;
        while !self.is_destroyed() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if self.step(deadline - now) != Step::Idle {
                handled += 1;
            }
        }
        handled
    }

    fn handle_lifecycle(&mut self, signal: Lifecycle) {
        log::debug!("view lifecycle: {signal:?}");
        match signal {
            Lifecycle::Suspended => self.paginator.suspend(),
            Lifecycle::Resumed => {
                self.paginator.resume(Instant::now());
            }
            Lifecycle::Destroyed => {
                self.paginator.dispose();
                self.live.close();
                self.ticker.shutdown();
            }
        }
    }
}
