//! Fetcher Actor: dedicated thread that pulls pages from a [`PageSource`].
//!
//! The actor serves one request at a time. Requests carry a [`Ticket`] that
//! is echoed back in the [`FetchOutcome`], which lets the paginator recognise
//! completions it no longer cares about.

use super::source::{Page, PageSource};
use crate::error::FetchError;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Identifies one dispatched fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

/// The completion of a fetch, delivered back onto the feed queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome<T> {
    /// The request this outcome answers.
    pub ticket: Ticket,
    /// The page, or why it could not be pulled.
    pub result: Result<Page<T>, FetchError>,
}

/// Fetcher actor that owns a page source.
pub struct FetcherActor {
    /// Handle to the fetcher thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Request sender. Dropping it lets the thread exit.
    request_tx: Option<Sender<Ticket>>,
}

impl FetcherActor {
    /// Spawn the fetcher thread.
    ///
    /// # Arguments
    ///
    /// * `source` - The page source, moved onto the fetcher thread.
    /// * `outcome_tx` - Channel on which completed fetches are delivered.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the fetcher thread.
    pub fn spawn<T: Send + 'static>(
        source: Box<dyn PageSource<T>>,
        outcome_tx: Sender<FetchOutcome<T>>,
    ) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        // One slot: the paginator never has more than one fetch in flight
        let (request_tx, request_rx) = bounded::<Ticket>(1);

        let handle = thread::Builder::new()
            .name("feedwheel-fetcher".to_string())
            .spawn(move || {
                Self::run_loop(source, &request_rx, &outcome_tx, &shutdown_clone);
            })
            .expect("Failed to spawn fetcher thread");

        Self {
            handle: Some(handle),
            shutdown,
            request_tx: Some(request_tx),
        }
    }

    /// Ask the fetcher to pull the next page.
    ///
    /// Fails with [`FetchError::Disconnected`] if the thread has stopped.
    pub fn request(&self, ticket: Ticket) -> Result<(), FetchError> {
        let Some(tx) = &self.request_tx else {
            return Err(FetchError::Disconnected);
        };
        match tx.try_send(ticket) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                Err(FetchError::Transport("a page request is already queued".to_string()))
            }
            Err(TrySendError::Disconnected(_)) => Err(FetchError::Disconnected),
        }
    }

    /// Signal the fetcher thread to shutdown.
    ///
    /// A fetch already in progress still completes, but its outcome is
    /// not delivered.
    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        self.request_tx = None;
    }

    /// Wait for the fetcher thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main fetch loop.
    fn run_loop<T>(
        mut source: Box<dyn PageSource<T>>,
        request_rx: &Receiver<Ticket>,
        outcome_tx: &Sender<FetchOutcome<T>>,
        shutdown: &Arc<AtomicBool>,
    ) {
        // Ends when the request sender is dropped
        for ticket in request_rx {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            log::trace!("fetching page for {ticket:?}");
            let result = source.next_page();

            if shutdown.load(Ordering::Relaxed) {
                log::debug!("discarding page for {ticket:?} after shutdown");
                break;
            }
            if outcome_tx.send(FetchOutcome { ticket, result }).is_err() {
                // Receiver dropped, exit
                break;
            }
        }
    }
}

impl Drop for FetcherActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
