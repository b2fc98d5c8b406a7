/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::data_structures::InlineString;
use crate::core::types::{Address, Pid, RawPid};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tracker operation result
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Linux errno values reported by the simulated syscall
pub const EPERM: i32 = 1;
pub const ESRCH: i32 = 3;
pub const EEXIST: i32 = 17;
pub const EINVAL: i32 = 22;

/// Tracker errors with serialization support
///
/// Every failure is a rejected operation with no side effect; the caller
/// decides whether to surface it or retry with corrected input.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum TrackerError {
    #[error("Invalid argument: {0}")]
    #[diagnostic(
        code(tracker::invalid_argument),
        help("PIDs and sizes must be positive, addresses non-empty, operation codes 0-2.")
    )]
    InvalidArgument(InlineString),

    #[error("Process {0} not found")]
    #[diagnostic(
        code(tracker::not_found),
        help("The process may have exited or never been created. Check PID validity.")
    )]
    NotFound(RawPid),

    #[error("No process selected")]
    #[diagnostic(
        code(tracker::no_process_selected),
        help("Select a process before killing it, or pass a PID explicitly.")
    )]
    NoProcessSelected,

    #[error("Process {0} already exists")]
    #[diagnostic(
        code(tracker::already_exists),
        help("Choose a PID that is not currently in the process table.")
    )]
    AlreadyExists(Pid),

    #[error("Tracking not started for process {0}")]
    #[diagnostic(
        code(tracker::permission_denied),
        help("Start tracking (operation 0) before recording allocations or frees.")
    )]
    PermissionDenied(Pid),

    #[error("Allocation {address} not found for process {pid}")]
    #[diagnostic(
        code(tracker::allocation_not_found),
        help("The address was never tracked for this process or has already been freed.")
    )]
    AllocationNotFound { pid: Pid, address: Address },
}

/// Error classification shared by the library API and the syscall surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    AllocationNotFound,
}

impl TrackerError {
    #[inline]
    pub fn invalid_argument(msg: impl Into<InlineString>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) | Self::NoProcessSelected => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::AllocationNotFound { .. } => ErrorKind::AllocationNotFound,
        }
    }

    /// Positive errno for this error
    #[inline]
    pub const fn errno(&self) -> i32 {
        self.kind().errno()
    }
}

impl ErrorKind {
    pub const fn errno(self) -> i32 {
        match self {
            ErrorKind::InvalidArgument => EINVAL,
            ErrorKind::NotFound | ErrorKind::AllocationNotFound => ESRCH,
            ErrorKind::AlreadyExists => EEXIST,
            ErrorKind::PermissionDenied => EPERM,
        }
    }

    /// Symbolic errno name, as printed next to syscall results
    pub const fn errno_name(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "EINVAL",
            ErrorKind::NotFound | ErrorKind::AllocationNotFound => "ESRCH",
            ErrorKind::AlreadyExists => "EEXIST",
            ErrorKind::PermissionDenied => "EPERM",
        }
    }
}
