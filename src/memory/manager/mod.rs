/*!
 * Memory Tracking
 *
 * Simulated kernel-side tracking of user-space allocations, one table per
 * process.
 *
 * ## Lifecycle
 *
 * ```text
 * [created] --start_tracking--> [tracking]
 * [tracking] --track_allocation / track_deallocation--> [tracking]
 * [created|tracking] --kill_process--> [exited]  (leak report, record removed)
 * ```
 *
 * Allocation and deallocation before tracking starts are rejected with
 * `PermissionDenied`. On exit every allocation still present is counted as
 * leaked and added to the tracker-wide leaked-memory total.
 *
 * ## Concurrency
 *
 * All state sits behind a single mutex per tracker. Each operation locks
 * once, validates, mutates and emits its events before releasing, so an
 * operation either commits completely or leaves no trace.
 */

mod allocator;
mod process;
mod queries;
mod storage;

use super::buckets::BucketTable;
use super::traits::{AllocationTracking, ProcessLifecycle, TrackerInfo};
use super::types::*;
use crate::core::config::TrackerConfig;
use crate::core::errors::TrackerResult;
use crate::core::types::{Pid, RawPid, RawSize};
use crate::monitoring::{Collector, Event};
use parking_lot::Mutex;
use std::sync::Arc;
use storage::TrackerState;
use tracing::info;

/// Process memory tracker
///
/// Cheap to clone; clones share the same process table and collector.
pub struct MemoryTracker {
    state: Arc<Mutex<TrackerState>>,
    config: Arc<TrackerConfig>,
    // Observability collector for event streaming
    collector: Option<Collector>,
}

impl MemoryTracker {
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        info!(
            retain_exited = config.retain_exited,
            "Memory tracker initialized"
        );
        Self {
            state: Arc::new(Mutex::new(TrackerState::default())),
            config: Arc::new(config),
            collector: None,
        }
    }

    /// Add observability collector
    pub fn with_collector(mut self, collector: Collector) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Set collector after construction
    pub fn set_collector(&mut self, collector: Collector) {
        self.collector = Some(collector);
    }

    /// Get collector reference
    pub fn collector(&self) -> Option<&Collector> {
        self.collector.as_ref()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[inline]
    fn emit(&self, event: Event) {
        if let Some(collector) = &self.collector {
            collector.emit(event);
        }
    }
}

// Implement trait interfaces
impl ProcessLifecycle for MemoryTracker {
    fn create_process(&self, pid: RawPid) -> TrackerResult<ProcessRecord> {
        MemoryTracker::create_process(self, pid)
    }

    fn start_tracking(&self, pid: RawPid) -> TrackerResult<TrackingStart> {
        MemoryTracker::start_tracking(self, pid)
    }

    fn kill_process(&self, pid: RawPid) -> TrackerResult<LeakReport> {
        MemoryTracker::kill_process(self, pid)
    }
}

impl AllocationTracking for MemoryTracker {
    fn track_allocation(&self, pid: RawPid, address: &str, size: RawSize) -> TrackerResult<()> {
        MemoryTracker::track_allocation(self, pid, address, size)
    }

    fn track_deallocation(&self, pid: RawPid, address: &str) -> TrackerResult<AllocationRecord> {
        MemoryTracker::track_deallocation(self, pid, address)
    }
}

impl TrackerInfo for MemoryTracker {
    fn stats(&self) -> TrackerStats {
        MemoryTracker::stats(self)
    }

    fn process(&self, pid: RawPid) -> TrackerResult<ProcessRecord> {
        MemoryTracker::process(self, pid)
    }

    fn processes(&self) -> Vec<ProcessSummary> {
        MemoryTracker::processes(self)
    }

    fn buckets(&self) -> BucketTable {
        MemoryTracker::buckets(self)
    }

    fn contains(&self, pid: Pid) -> bool {
        MemoryTracker::contains(self, pid)
    }
}

impl Clone for MemoryTracker {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            config: Arc::clone(&self.config),
            collector: self.collector.clone(),
        }
    }
}

impl Default for MemoryTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTracker")
            .field("stats", &self.stats())
            .field("config", &self.config)
            .finish()
    }
}
