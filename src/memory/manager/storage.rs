/*!
 * Tracker Storage
 * The process table and cumulative counters guarded by the tracker mutex
 */

use super::super::types::{ProcessRecord, TrackerStats};
use crate::core::types::{Pid, Sequence};
use ahash::RandomState;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(super) struct TrackerState {
    pub processes: HashMap<Pid, ProcessRecord, RandomState>,
    // Exited processes, only populated when retention is configured
    pub exited: HashMap<Pid, ProcessRecord, RandomState>,
    pub next_sequence: Sequence,
    pub total_allocations: u64,
    pub total_deallocations: u64,
    pub exited_processes: u64,
    pub leaked_memory: u64,
}

impl TrackerState {
    pub fn stats(&self) -> TrackerStats {
        TrackerStats {
            active_processes: self.processes.len(),
            total_allocations: self.total_allocations,
            total_deallocations: self.total_deallocations,
            exited_processes: self.exited_processes,
            leaked_memory: self.leaked_memory,
        }
    }
}
