/*!
 * Memory Types
 * Records and reports for tracked user-memory allocations
 */

use crate::core::types::{Address, Pid, Sequence, Size};
use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;

/// Per-process allocation table keyed by address
pub type AllocationTable = HashMap<Address, AllocationRecord, RandomState>;

/// Process status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    Running,
    Exited,
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProcessStatus::Running => write!(f, "running"),
            ProcessStatus::Exited => write!(f, "exited"),
        }
    }
}

/// One live allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub address: Address,
    pub size: Size,
    #[serde(with = "time::serde::timestamp")]
    pub timestamp: OffsetDateTime,
    /// Tracker-wide order of the track call that created this record
    pub sequence: Sequence,
}

/// A simulated process and its tracked allocations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub allocations: AllocationTable,
    pub is_tracking: bool,
    pub status: ProcessStatus,
}

impl ProcessRecord {
    pub fn new(pid: Pid) -> Self {
        Self {
            pid,
            allocations: AllocationTable::default(),
            is_tracking: false,
            status: ProcessStatus::Running,
        }
    }

    /// Bytes currently held by live allocations, saturating at `Size::MAX`
    pub fn allocated_bytes(&self) -> Size {
        total_bytes(self.allocations.values())
    }

    /// Live allocations, oldest first
    pub fn allocations_by_age(&self) -> Vec<AllocationRecord> {
        let mut allocations: Vec<_> = self.allocations.values().cloned().collect();
        allocations.sort_by_key(|a| a.sequence);
        allocations
    }

    pub fn summary(&self) -> ProcessSummary {
        ProcessSummary {
            pid: self.pid,
            is_tracking: self.is_tracking,
            allocation_count: self.allocations.len(),
            allocated_bytes: self.allocated_bytes(),
            status: self.status,
        }
    }
}

/// Lightweight view of a process for list rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSummary {
    pub pid: Pid,
    pub is_tracking: bool,
    pub allocation_count: usize,
    pub allocated_bytes: Size,
    pub status: ProcessStatus,
}

/// Outcome of a start-tracking request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStart {
    Started,
    AlreadyStarted,
}

/// Leak accounting produced when a process exits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakReport {
    pub pid: Pid,
    pub leaked_count: usize,
    pub leaked_bytes: Size,
    /// Leaked allocations, oldest first
    pub leaks: Vec<AllocationRecord>,
}

impl LeakReport {
    pub fn from_allocations(pid: Pid, leaks: Vec<AllocationRecord>) -> Self {
        Self {
            pid,
            leaked_count: leaks.len(),
            leaked_bytes: total_bytes(&leaks),
            leaks,
        }
    }

    #[inline]
    pub fn has_leaks(&self) -> bool {
        self.leaked_count > 0
    }
}

fn total_bytes<'a>(allocations: impl IntoIterator<Item = &'a AllocationRecord>) -> Size {
    allocations
        .into_iter()
        .fold(0, |total: Size, a| total.saturating_add(a.size))
}

/// Aggregate tracker statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerStats {
    pub active_processes: usize,
    /// Every successful allocation track call, including re-tracked addresses
    pub total_allocations: u64,
    pub total_deallocations: u64,
    pub exited_processes: u64,
    /// Bytes leaked by exited processes; never decremented
    pub leaked_memory: u64,
}
