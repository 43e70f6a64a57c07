//! Late-binding live channel.
//!
//! The feed is created before the streaming connection is up. A
//! [`LiveChannel`] starts out waiting for its [`LiveConnector`] to hand over
//! the event receiver; once bound, the feed queue selects on the events
//! directly. Both halves degrade to [`crossbeam_channel::never`] so the
//! select loop never spins on a closed channel.

use super::events::LiveEvent;
use crate::item::Item;
use crossbeam_channel::{bounded, never, Receiver, Sender};

/// Connection state of a [`LiveChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveState {
    /// Waiting for the transport to connect.
    Pending,
    /// Events are flowing.
    Connected,
    /// No live events will ever arrive.
    Closed,
}

/// One-shot handle used by the transport to bind the event receiver.
pub struct LiveConnector<T: Item> {
    tx: Sender<Receiver<LiveEvent<T>>>,
}

impl<T: Item> LiveConnector<T> {
    /// Bind the event receiver.
    ///
    /// Returns `false` if the feed is already gone.
    pub fn connect(self, events: Receiver<LiveEvent<T>>) -> bool {
        self.tx.send(events).is_ok()
    }
}

/// The feed-side end of the live channel.
pub struct LiveChannel<T: Item> {
    binding: Receiver<Receiver<LiveEvent<T>>>,
    events: Receiver<LiveEvent<T>>,
    state: LiveState,
}

impl<T: Item> LiveChannel<T> {
    /// A channel that will be connected later.
    pub fn pending() -> (Self, LiveConnector<T>) {
        let (tx, binding) = bounded(1);
        let channel = Self {
            binding,
            events: never(),
            state: LiveState::Pending,
        };
        (channel, LiveConnector { tx })
    }

    /// A channel that is already connected.
    pub fn ready(events: Receiver<LiveEvent<T>>) -> Self {
        Self {
            binding: never(),
            events,
            state: LiveState::Connected,
        }
    }

    /// Pure pagination: no live events.
    pub fn never() -> Self {
        Self {
            binding: never(),
            events: never(),
            state: LiveState::Closed,
        }
    }

    /// Current connection state.
    pub const fn state(&self) -> LiveState {
        self.state
    }

    pub(crate) const fn binding(&self) -> &Receiver<Receiver<LiveEvent<T>>> {
        &self.binding
    }

    pub(crate) const fn events(&self) -> &Receiver<LiveEvent<T>> {
        &self.events
    }

    pub(crate) fn bind(&mut self, events: Receiver<LiveEvent<T>>) {
        log::debug!("live channel connected");
        self.binding = never();
        self.events = events;
        self.state = LiveState::Connected;
    }

    /// The connector was dropped without binding, or the transport hung up.
    pub(crate) fn close(&mut self) {
        if self.state != LiveState::Closed {
            log::debug!("live channel closed while {:?}", self.state);
        }
        self.binding = never();
        self.events = never();
        self.state = LiveState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::tests::Post;
    use std::time::Duration;

    #[test]
    fn test_pending_then_connect() {
        let (mut channel, connector) = LiveChannel::<Post>::pending();
        assert_eq!(channel.state(), LiveState::Pending);

        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        assert!(connector.connect(event_rx));

        let rx = channel.binding().recv_timeout(Duration::from_secs(1)).unwrap();
        channel.bind(rx);
        assert_eq!(channel.state(), LiveState::Connected);

        event_tx.send(LiveEvent::update(Post::new(1))).unwrap();
        assert_eq!(
            channel.events().try_recv().unwrap(),
            LiveEvent::update(Post::new(1))
        );
    }

    #[test]
    fn test_dropped_connector_disconnects_binding() {
        let (mut channel, connector) = LiveChannel::<Post>::pending();
        drop(connector);
        assert!(channel.binding().recv().is_err());

        channel.close();
        assert_eq!(channel.state(), LiveState::Closed);
        assert!(channel
            .events()
            .recv_timeout(Duration::from_millis(5))
            .is_err());
    }

    #[test]
    fn test_never_is_closed() {
        let channel = LiveChannel::<Post>::never();
        assert_eq!(channel.state(), LiveState::Closed);
        assert!(channel.events().try_recv().is_err());
    }
}
