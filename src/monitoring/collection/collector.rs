/*!
 * Unified Collector
 * Traces every tracker event and publishes it to the event stream
 */

use crate::monitoring::events::{Event, Severity};
use crate::monitoring::streaming::{EventStream, StreamStats, Subscriber};
use tracing::{debug, info, warn};

/// Event collector shared by the tracker and the demo scheduler
#[derive(Clone, Default)]
pub struct Collector {
    stream: EventStream,
}

impl Collector {
    pub fn new() -> Self {
        Self {
            stream: EventStream::new(),
        }
    }

    /// Emit an event (primary API)
    #[inline]
    pub fn emit(&self, event: Event) {
        match event.severity {
            Severity::Debug => debug!(target: "memtrack::events", pid = ?event.pid, "{}", event),
            Severity::Info => info!(target: "memtrack::events", pid = ?event.pid, "{}", event),
            Severity::Warn => warn!(target: "memtrack::events", pid = ?event.pid, "{}", event),
        }
        self.stream.publish(event);
    }

    /// Emit a free-form narration line
    pub fn narrate(&self, message: impl Into<crate::core::InlineString>) {
        self.emit(Event::narrative(message));
    }

    /// Subscribe to event stream
    pub fn subscribe(&self) -> Subscriber {
        self.stream.subscribe()
    }

    /// Get stream statistics
    pub fn stream_stats(&self) -> StreamStats {
        self.stream.stats()
    }
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("stats", &self.stream_stats())
            .finish()
    }
}
