/*!
 * Syscall Result Types
 * Kernel-style outcome of a simulated syscall
 */

use crate::core::errors::TrackerError;
use serde::{Deserialize, Serialize};

/// Outcome of a `track_user_memory` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum SyscallResult {
    /// Operation committed
    Success {
        /// Human-readable status line
        message: String,
    },
    /// Operation rejected with no side effect
    Error {
        /// The typed failure
        error: TrackerError,
    },
}

impl SyscallResult {
    #[inline]
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// 0 on success, `-errno` on failure
    #[must_use]
    pub const fn return_code(&self) -> i64 {
        match self {
            Self::Success { .. } => 0,
            Self::Error { error } => -(error.errno() as i64),
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&TrackerError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error } => Some(error),
        }
    }

    /// Status line, errors prefixed with their errno name (`EPERM: ...`)
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success { message } => message.clone(),
            Self::Error { error } => format!("{}: {}", error.kind().errno_name(), error),
        }
    }
}

impl From<TrackerError> for SyscallResult {
    fn from(error: TrackerError) -> Self {
        Self::Error { error }
    }
}

impl std::fmt::Display for SyscallResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Return: {} ({})", self.return_code(), self.message())
    }
}
