/*!
 * Syscall Executor
 * Decodes and dispatches `track_user_memory` requests
 */

use super::types::{Operation, SyscallRequest, SyscallResult};
use crate::core::errors::TrackerError;
use crate::core::types::{Pid, RawPid, RawSize};
use crate::memory::validation::validate_pid;
use crate::memory::MemoryTracker;
use crate::monitoring::span_syscall;
use tracing::debug;

/// Syscall executor bound to one tracker
#[derive(Clone, Debug)]
pub struct SyscallExecutor {
    pub(super) tracker: MemoryTracker,
}

impl SyscallExecutor {
    pub fn new(tracker: MemoryTracker) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &MemoryTracker {
        &self.tracker
    }

    /// `track_user_memory(pid, operation, address, size)`
    ///
    /// The PID is checked first, then process presence, then the operation
    /// code. Arguments the operation does not use are ignored.
    pub fn track_user_memory(
        &self,
        pid: RawPid,
        operation: i64,
        address: Option<&str>,
        size: Option<RawSize>,
    ) -> SyscallResult {
        let span = span_syscall(operation_label(operation), pid);
        let _entered = span.enter();

        let result = match validate_pid(pid).and_then(|pid| self.decode(pid, operation)) {
            Ok(Operation::StartTracking) => self.start_tracking(pid),
            Ok(Operation::TrackAllocation) => {
                self.track_allocation(pid, address.unwrap_or(""), size.unwrap_or(0))
            }
            Ok(Operation::TrackDeallocation) => {
                self.track_deallocation(pid, address.unwrap_or(""))
            }
            Err(e) => SyscallResult::from(e),
        };

        span.record_result(result.return_code());
        if let Some(error) = result.error() {
            span.record_error(&error.to_string());
        }
        debug!(code = result.return_code(), "{}", result.message());
        result
    }

    /// Execute a serialized request
    pub fn execute(&self, request: &SyscallRequest) -> SyscallResult {
        self.track_user_memory(
            request.pid,
            request.operation,
            request.address.as_deref(),
            request.size,
        )
    }

    // An unknown process is reported as such even when the code is bad too
    fn decode(&self, pid: Pid, operation: i64) -> Result<Operation, TrackerError> {
        Operation::try_from(operation).map_err(|e| {
            if self.tracker.contains(pid) {
                e
            } else {
                TrackerError::NotFound(RawPid::from(pid))
            }
        })
    }
}

fn operation_label(operation: i64) -> &'static str {
    Operation::try_from(operation)
        .map(Operation::name)
        .unwrap_or("invalid")
}
