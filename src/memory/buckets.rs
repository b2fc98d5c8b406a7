/*!
 * Process Hash Buckets
 *
 * Display-only grouping of live processes by `pid mod 256`, mirroring an
 * 8-bit kernel hashtable. Rebuilt from the process table on demand and
 * never consulted by the tracking operations themselves.
 */

use crate::core::limits::{BUCKET_DISPLAY_RANGE, HASH_BUCKETS};
use crate::core::types::{BucketIndex, Pid};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bucket index for a PID
#[inline]
pub const fn bucket_of(pid: Pid) -> BucketIndex {
    (pid % HASH_BUCKETS as Pid) as BucketIndex
}

/// Snapshot of bucket membership for the live process set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTable {
    buckets: Vec<Vec<Pid>>,
}

/// Aggregated occupancy of a contiguous range of buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRange {
    pub start: usize,
    pub end: usize,
    pub process_count: usize,
}

impl BucketRange {
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.process_count > 0
    }
}

impl fmt::Display for BucketRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}: {}", self.start, self.end, self.process_count)
    }
}

impl BucketTable {
    pub fn new() -> Self {
        Self {
            buckets: vec![Vec::new(); HASH_BUCKETS],
        }
    }

    /// Build the table from live PIDs; each bucket is kept sorted
    pub fn from_pids(pids: impl IntoIterator<Item = Pid>) -> Self {
        let mut table = Self::new();
        for pid in pids {
            table.buckets[bucket_of(pid) as usize].push(pid);
        }
        for bucket in &mut table.buckets {
            bucket.sort_unstable();
        }
        table
    }

    /// PIDs hashed into `index`
    pub fn bucket(&self, index: BucketIndex) -> &[Pid] {
        &self.buckets[index as usize]
    }

    /// Indices of non-empty buckets
    pub fn occupied_buckets(&self) -> Vec<BucketIndex> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_empty())
            .map(|(i, _)| i as BucketIndex)
            .collect()
    }

    /// Total processes across all buckets
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Occupancy grouped into display ranges of 32 buckets
    pub fn ranges(&self) -> Vec<BucketRange> {
        self.buckets
            .chunks(BUCKET_DISPLAY_RANGE)
            .enumerate()
            .map(|(i, chunk)| BucketRange {
                start: i * BUCKET_DISPLAY_RANGE,
                end: i * BUCKET_DISPLAY_RANGE + chunk.len() - 1,
                process_count: chunk.iter().map(Vec::len).sum(),
            })
            .collect()
    }
}

impl Default for BucketTable {
    fn default() -> Self {
        Self::new()
    }
}
