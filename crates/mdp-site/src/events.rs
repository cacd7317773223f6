//! Navigation event stream.
//!
//! Hosts report fragment changes and menu interactions through a
//! [`NavigationEventSender`]; the [`Navigator`](crate::Navigator) consumes
//! them in order from [`NavigationEvents`].

use std::sync::mpsc;

use crate::navigation::NavEvent;

/// Create a connected sender/receiver pair.
#[must_use]
pub fn navigation_channel() -> (NavigationEventSender, NavigationEvents) {
    let (tx, rx) = mpsc::channel();
    (NavigationEventSender { tx }, NavigationEvents { rx })
}

/// Sending half of the navigation event stream.
#[derive(Clone, Debug)]
pub struct NavigationEventSender {
    tx: mpsc::Sender<NavEvent>,
}

impl NavigationEventSender {
    /// Queue an event.
    ///
    /// Returns `false` if the receiver has been dropped.
    pub fn send(&self, event: NavEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Receiver for navigation events.
///
/// Wraps a [`std::sync::mpsc::Receiver`] for synchronous event delivery.
/// Can be iterated with [`iter()`](Self::iter) or polled with [`recv()`](Self::recv).
#[derive(Debug)]
pub struct NavigationEvents {
    rx: mpsc::Receiver<NavEvent>,
}

impl NavigationEvents {
    /// Wait for the next event (blocking).
    ///
    /// Returns `None` when every sender is dropped.
    #[must_use]
    pub fn recv(&self) -> Option<NavEvent> {
        self.rx.recv().ok()
    }

    /// Returns an iterator over events.
    ///
    /// Blocks until an event is available. Stops when every sender is dropped.
    pub fn iter(&self) -> impl Iterator<Item = NavEvent> + '_ {
        self.rx.iter()
    }
}
