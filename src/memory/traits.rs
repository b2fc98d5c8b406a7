/*!
 * Memory Traits
 * Tracking abstractions consumed by the syscall surface and the console
 */

use super::buckets::BucketTable;
use super::types::*;
use crate::core::errors::TrackerResult;
use crate::core::types::{Pid, RawPid, RawSize};

/// Process table lifecycle
pub trait ProcessLifecycle: Send + Sync {
    /// Insert a new, untracked process
    fn create_process(&self, pid: RawPid) -> TrackerResult<ProcessRecord>;

    /// Open the tracking gate; idempotent
    fn start_tracking(&self, pid: RawPid) -> TrackerResult<TrackingStart>;

    /// Exit a process, accounting for whatever it still holds
    fn kill_process(&self, pid: RawPid) -> TrackerResult<LeakReport>;
}

/// Allocation recording for tracked processes
pub trait AllocationTracking: Send + Sync {
    /// Record (or overwrite) an allocation
    fn track_allocation(&self, pid: RawPid, address: &str, size: RawSize) -> TrackerResult<()>;

    /// Forget an allocation, returning what was recorded for it
    fn track_deallocation(&self, pid: RawPid, address: &str) -> TrackerResult<AllocationRecord>;
}

/// Read-only tracker views
pub trait TrackerInfo: Send + Sync {
    fn stats(&self) -> TrackerStats;

    fn process(&self, pid: RawPid) -> TrackerResult<ProcessRecord>;

    fn processes(&self) -> Vec<ProcessSummary>;

    fn buckets(&self) -> BucketTable;

    fn contains(&self, pid: Pid) -> bool;
}

/// Full tracker interface combining all of the above
pub trait ProcessMemoryTracker:
    ProcessLifecycle + AllocationTracking + TrackerInfo + Clone + Send + Sync
{
}

impl<T> ProcessMemoryTracker for T where
    T: ProcessLifecycle + AllocationTracking + TrackerInfo + Clone + Send + Sync
{
}
