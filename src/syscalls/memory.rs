/*!
 * Memory Syscalls
 * Per-operation handlers for `track_user_memory`
 */

use super::executor::SyscallExecutor;
use super::types::SyscallResult;
use crate::core::types::{RawPid, RawSize};
use crate::memory::TrackingStart;

impl SyscallExecutor {
    pub(super) fn start_tracking(&self, pid: RawPid) -> SyscallResult {
        match self.tracker.start_tracking(pid) {
            Ok(TrackingStart::Started) => SyscallResult::success("Tracking started successfully"),
            Ok(TrackingStart::AlreadyStarted) => SyscallResult::success("Tracking already started"),
            Err(e) => e.into(),
        }
    }

    pub(super) fn track_allocation(&self, pid: RawPid, address: &str, size: RawSize) -> SyscallResult {
        match self.tracker.track_allocation(pid, address, size) {
            Ok(()) => SyscallResult::success("Allocation tracked successfully"),
            Err(e) => e.into(),
        }
    }

    pub(super) fn track_deallocation(&self, pid: RawPid, address: &str) -> SyscallResult {
        match self.tracker.track_deallocation(pid, address) {
            Ok(_) => SyscallResult::success("Deallocation tracked successfully"),
            Err(e) => e.into(),
        }
    }
}
