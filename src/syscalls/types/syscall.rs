/*!
 * Syscall Request
 * Operation selector and the raw request tuple
 */

use crate::core::errors::TrackerError;
use crate::core::types::{RawPid, RawSize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `track_user_memory` operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Operation {
    StartTracking = 0,
    TrackAllocation = 1,
    TrackDeallocation = 2,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::StartTracking,
        Operation::TrackAllocation,
        Operation::TrackDeallocation,
    ];

    #[inline]
    pub const fn code(self) -> i64 {
        self as i64
    }

    pub const fn name(self) -> &'static str {
        match self {
            Operation::StartTracking => "start_tracking",
            Operation::TrackAllocation => "track_allocation",
            Operation::TrackDeallocation => "track_deallocation",
        }
    }

    /// Whether the operation reads the address argument
    pub const fn uses_address(self) -> bool {
        !matches!(self, Operation::StartTracking)
    }

    /// Whether the operation reads the size argument
    pub const fn uses_size(self) -> bool {
        matches!(self, Operation::TrackAllocation)
    }
}

impl TryFrom<i64> for Operation {
    type Error = TrackerError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Operation::StartTracking),
            1 => Ok(Operation::TrackAllocation),
            2 => Ok(Operation::TrackDeallocation),
            other => Err(TrackerError::invalid_argument(format!(
                "invalid operation {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw, unvalidated syscall arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyscallRequest {
    pub pid: RawPid,
    pub operation: i64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub size: Option<RawSize>,
}

impl SyscallRequest {
    pub fn new(pid: RawPid, operation: i64) -> Self {
        Self {
            pid,
            operation,
            address: None,
            size: None,
        }
    }

    pub fn start_tracking(pid: RawPid) -> Self {
        Self::new(pid, Operation::StartTracking.code())
    }

    pub fn allocate(pid: RawPid, address: impl Into<String>, size: RawSize) -> Self {
        Self::new(pid, Operation::TrackAllocation.code())
            .with_address(address)
            .with_size(size)
    }

    pub fn deallocate(pid: RawPid, address: impl Into<String>) -> Self {
        Self::new(pid, Operation::TrackDeallocation.code()).with_address(address)
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_size(mut self, size: RawSize) -> Self {
        self.size = Some(size);
        self
    }
}
