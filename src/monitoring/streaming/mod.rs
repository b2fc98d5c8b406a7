/*!
 * Event Streaming
 * Fan-out of tracker events to every subscriber over unbounded channels
 *
 * Each subscriber receives every event published after it subscribed.
 * Dropped subscribers are pruned on the next publish.
 */

use crate::monitoring::events::Event;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Stream statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub events_published: u64,
    pub active_subscribers: usize,
}

/// Broadcast event stream
pub struct EventStream {
    senders: Arc<Mutex<Vec<flume::Sender<Event>>>>,
    published: Arc<AtomicU64>,
}

impl EventStream {
    pub fn new() -> Self {
        Self {
            senders: Arc::new(Mutex::new(Vec::new())),
            published: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Deliver an event to every live subscriber
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, event: Event) -> usize {
        let mut senders = self.senders.lock();
        senders.retain(|tx| tx.send(event.clone()).is_ok());
        self.published.fetch_add(1, Ordering::Relaxed);
        senders.len()
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> Subscriber {
        let (tx, rx) = flume::unbounded();
        self.senders.lock().push(tx);
        Subscriber { rx }
    }

    pub fn stats(&self) -> StreamStats {
        let mut senders = self.senders.lock();
        senders.retain(|tx| !tx.is_disconnected());
        StreamStats {
            events_published: self.published.load(Ordering::Relaxed),
            active_subscribers: senders.len(),
        }
    }
}

impl Default for EventStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventStream {
    fn clone(&self) -> Self {
        Self {
            senders: Arc::clone(&self.senders),
            published: Arc::clone(&self.published),
        }
    }
}

/// Consumer handle for an event stream
pub struct Subscriber {
    rx: flume::Receiver<Event>,
}

impl Subscriber {
    /// Next pending event, if any
    #[inline]
    pub fn try_next(&self) -> Option<Event> {
        self.rx.try_recv().ok()
    }

    /// Take every pending event
    pub fn drain(&self) -> Vec<Event> {
        self.rx.drain().collect()
    }

    /// Wait for the next event; `None` once every publisher is gone
    pub async fn next_async(&self) -> Option<Event> {
        self.rx.recv_async().await.ok()
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}
