/*!
 * Allocation Tracking
 * Recording and forgetting allocations of tracked processes
 */

use super::super::types::AllocationRecord;
use super::super::validation::{validate_address, validate_pid, validate_size};
use super::MemoryTracker;
use crate::core::errors::{TrackerError, TrackerResult};
use crate::core::types::{RawPid, RawSize};
use crate::monitoring::Event;
use time::OffsetDateTime;
use tracing::{debug, info};

impl MemoryTracker {
    /// Record an allocation for a tracked process
    ///
    /// Checks run in order: PID, process presence, address and size,
    /// tracking gate. Tracking an address that is already live overwrites
    /// it; every successful call counts toward `total_allocations`.
    pub fn track_allocation(&self, pid: RawPid, address: &str, size: RawSize) -> TrackerResult<()> {
        let pid = validate_pid(pid)?;
        let address = validate_address(address);
        let size = validate_size(size);

        let mut guard = self.state.lock();
        let state = &mut *guard;

        let process = state
            .processes
            .get_mut(&pid)
            .ok_or(TrackerError::NotFound(RawPid::from(pid)))?;
        let address = address?;
        let size = size?;
        if !process.is_tracking {
            return Err(TrackerError::PermissionDenied(pid));
        }

        state.next_sequence += 1;
        let record = AllocationRecord {
            address: address.clone(),
            size,
            timestamp: OffsetDateTime::now_utc(),
            sequence: state.next_sequence,
        };
        if let Some(previous) = process.allocations.insert(address.clone(), record) {
            debug!(
                pid,
                address = %address,
                previous_size = previous.size,
                "Address re-tracked, previous record replaced"
            );
        }
        state.total_allocations += 1;

        info!(pid, address = %address, size, "Allocation tracked");
        self.emit(Event::allocation_tracked(pid, address, size));
        Ok(())
    }

    /// Forget an allocation for a tracked process
    ///
    /// Fails with `AllocationNotFound` when the address was never tracked
    /// or has already been freed.
    pub fn track_deallocation(&self, pid: RawPid, address: &str) -> TrackerResult<AllocationRecord> {
        let pid = validate_pid(pid)?;
        let address = validate_address(address);

        let mut guard = self.state.lock();
        let state = &mut *guard;

        let process = state
            .processes
            .get_mut(&pid)
            .ok_or(TrackerError::NotFound(RawPid::from(pid)))?;
        let address = address?;
        if !process.is_tracking {
            return Err(TrackerError::PermissionDenied(pid));
        }

        let record = process
            .allocations
            .remove(address.as_str())
            .ok_or_else(|| TrackerError::AllocationNotFound {
                pid,
                address: address.clone(),
            })?;
        state.total_deallocations += 1;

        info!(pid, address = %address, size = record.size, "Deallocation tracked");
        self.emit(Event::deallocation_tracked(pid, address, record.size));
        Ok(record)
    }
}
