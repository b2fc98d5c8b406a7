/*!
 * Tracker Queries
 * Snapshots of the process table, statistics and reset
 */

use super::super::buckets::BucketTable;
use super::super::types::{AllocationRecord, ProcessRecord, ProcessSummary, TrackerStats};
use super::super::validation::validate_pid;
use super::storage::TrackerState;
use super::MemoryTracker;
use crate::core::errors::{TrackerError, TrackerResult};
use crate::core::types::{Pid, RawPid};
use crate::monitoring::Event;
use tracing::info;

impl MemoryTracker {
    pub fn stats(&self) -> TrackerStats {
        self.state.lock().stats()
    }

    /// Snapshot of a live process
    pub fn process(&self, pid: RawPid) -> TrackerResult<ProcessRecord> {
        let pid = validate_pid(pid)?;
        self.state
            .lock()
            .processes
            .get(&pid)
            .cloned()
            .ok_or(TrackerError::NotFound(RawPid::from(pid)))
    }

    /// Live processes ordered by PID
    pub fn processes(&self) -> Vec<ProcessSummary> {
        let mut summaries: Vec<_> = self
            .state
            .lock()
            .processes
            .values()
            .map(ProcessRecord::summary)
            .collect();
        summaries.sort_by_key(|s| s.pid);
        summaries
    }

    /// Live allocations of a process, oldest first
    pub fn allocations(&self, pid: RawPid) -> TrackerResult<Vec<AllocationRecord>> {
        let pid = validate_pid(pid)?;
        self.state
            .lock()
            .processes
            .get(&pid)
            .map(ProcessRecord::allocations_by_age)
            .ok_or(TrackerError::NotFound(RawPid::from(pid)))
    }

    /// Archived record of an exited process (only with `retain_exited`)
    pub fn exited_process(&self, pid: Pid) -> Option<ProcessRecord> {
        self.state.lock().exited.get(&pid).cloned()
    }

    /// PIDs in the exit archive, ascending
    pub fn exited_pids(&self) -> Vec<Pid> {
        let mut pids: Vec<_> = self.state.lock().exited.keys().copied().collect();
        pids.sort_unstable();
        pids
    }

    /// Hash-bucket view of the live process set
    pub fn buckets(&self) -> BucketTable {
        BucketTable::from_pids(self.state.lock().processes.keys().copied())
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.state.lock().processes.contains_key(&pid)
    }

    pub fn process_count(&self) -> usize {
        self.state.lock().processes.len()
    }

    /// Clear every process, the archive and all counters
    pub fn reset(&self) {
        let mut state = self.state.lock();
        *state = TrackerState::default();
        info!("Simulation reset");
        self.emit(Event::simulation_reset());
    }
}
