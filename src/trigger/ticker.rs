//! Ticker Actor: dedicated thread that paces sentinel re-measurement.
//!
//! Layout can shift without any event the feed observes (images loading,
//! fonts swapping). A slow tick makes the feed re-measure its sentinel
//! regardless.

use crossbeam_channel::{bounded, select, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A tick event sent at regular intervals.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Tick number (monotonically increasing).
    pub seq: u64,
    /// Time elapsed since the ticker was started.
    pub elapsed: Duration,
}

/// Ticker actor that generates regular re-measure requests.
pub struct TickerActor {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Dropping or signalling this stops the thread without waiting out
    /// the interval.
    stop_tx: Option<Sender<()>>,
    /// Receiver for tick events.
    tick_rx: Receiver<Tick>,
}

impl TickerActor {
    /// Spawn a new ticker actor with the given interval.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the ticker thread.
    pub fn spawn(interval: Duration) -> Self {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        // Small buffer: a busy feed loop should skip ticks, not queue them
        let (tick_tx, tick_rx) = bounded(1);

        let handle = thread::Builder::new()
            .name("feedwheel-ticker".to_string())
            .spawn(move || {
                Self::run_loop(&tick_tx, &stop_rx, interval);
            })
            .expect("Failed to spawn ticker thread");

        Self {
            handle: Some(handle),
            stop_tx: Some(stop_tx),
            tick_rx,
        }
    }

    /// Get a reference to the tick receiver, for use with `select!`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Signal the ticker to shutdown.
    pub fn shutdown(&mut self) {
        self.stop_tx = None;
    }

    /// Wait for the ticker thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main ticker loop.
    fn run_loop(tick_tx: &Sender<Tick>, stop_rx: &Receiver<()>, interval: Duration) {
        let start = Instant::now();
        let mut seq = 0u64;

        loop {
            select! {
                // Disconnected (sender dropped) or explicit stop
                recv(stop_rx) -> _ => break,
                default(interval) => {
                    let tick = Tick {
                        seq,
                        elapsed: start.elapsed(),
                    };
                    // Non-blocking send: skip the tick if the last one is unread
                    let _ = tick_tx.try_send(tick);
                    seq += 1;
                }
            }
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_basic() {
        let ticker = TickerActor::spawn(Duration::from_millis(10));

        let tick = ticker.receiver().recv_timeout(Duration::from_millis(200));
        assert_eq!(tick.unwrap().seq, 0);

        let tick2 = ticker.receiver().recv_timeout(Duration::from_millis(200));
        assert!(tick2.is_ok());

        ticker.join();
    }

    #[test]
    fn test_ticker_shutdown_is_prompt() {
        let ticker = TickerActor::spawn(Duration::from_secs(60));
        let start = Instant::now();
        ticker.join();
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
