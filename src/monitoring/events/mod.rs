/*!
 * Event System
 * Strongly-typed tracker events with narrative rendering
 */

use crate::core::data_structures::InlineString;
use crate::core::types::{Address, Pid, Size};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Event severity for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
}

/// Log entry classification used for styling the narrative log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Info,
    Tracking,
    Allocation,
    Deallocation,
    Leak,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            EntryKind::Info => "info",
            EntryKind::Tracking => "tracking",
            EntryKind::Allocation => "allocation",
            EntryKind::Deallocation => "deallocation",
            EntryKind::Leak => "leak",
        };
        f.write_str(label)
    }
}

/// Tracker event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(with = "time::serde::timestamp")]
    pub timestamp: OffsetDateTime,
    pub severity: Severity,
    /// Process ID if applicable
    pub pid: Option<Pid>,
    pub payload: Payload,
}

/// Event payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Payload {
    ProcessCreated,
    TrackingStarted,
    TrackingAlreadyStarted,
    AllocationTracked { address: Address, size: Size },
    DeallocationTracked { address: Address, size: Size },
    LeakDetected { address: Address, size: Size },
    ProcessExited { leaked_bytes: Size, leaked_count: usize },
    SimulationReset,
    /// Free-form narration from the demo scheduler
    Narrative { message: InlineString },
}

impl Event {
    /// Create a new event with current timestamp
    #[inline]
    pub fn new(severity: Severity, payload: Payload) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
            severity,
            pid: None,
            payload,
        }
    }

    /// Create event with process context
    #[inline]
    pub fn with_pid(mut self, pid: Pid) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn process_created(pid: Pid) -> Self {
        Self::new(Severity::Info, Payload::ProcessCreated).with_pid(pid)
    }

    pub fn tracking_started(pid: Pid) -> Self {
        Self::new(Severity::Info, Payload::TrackingStarted).with_pid(pid)
    }

    pub fn tracking_already_started(pid: Pid) -> Self {
        Self::new(Severity::Debug, Payload::TrackingAlreadyStarted).with_pid(pid)
    }

    pub fn allocation_tracked(pid: Pid, address: Address, size: Size) -> Self {
        Self::new(Severity::Info, Payload::AllocationTracked { address, size }).with_pid(pid)
    }

    pub fn deallocation_tracked(pid: Pid, address: Address, size: Size) -> Self {
        Self::new(Severity::Info, Payload::DeallocationTracked { address, size }).with_pid(pid)
    }

    pub fn leak_detected(pid: Pid, address: Address, size: Size) -> Self {
        Self::new(Severity::Warn, Payload::LeakDetected { address, size }).with_pid(pid)
    }

    pub fn process_exited(pid: Pid, leaked_bytes: Size, leaked_count: usize) -> Self {
        let severity = if leaked_count > 0 {
            Severity::Warn
        } else {
            Severity::Info
        };
        Self::new(
            severity,
            Payload::ProcessExited {
                leaked_bytes,
                leaked_count,
            },
        )
        .with_pid(pid)
    }

    pub fn simulation_reset() -> Self {
        Self::new(Severity::Info, Payload::SimulationReset)
    }

    pub fn narrative(message: impl Into<InlineString>) -> Self {
        Self::new(
            Severity::Info,
            Payload::Narrative {
                message: message.into(),
            },
        )
    }

    /// Log classification of this event
    pub fn kind(&self) -> EntryKind {
        match &self.payload {
            Payload::AllocationTracked { .. } => EntryKind::Allocation,
            Payload::DeallocationTracked { .. } => EntryKind::Deallocation,
            Payload::LeakDetected { .. } => EntryKind::Leak,
            Payload::ProcessExited { leaked_count, .. } if *leaked_count > 0 => EntryKind::Leak,
            Payload::Narrative { .. } => EntryKind::Info,
            _ => EntryKind::Tracking,
        }
    }

    /// Narrative line for the event log
    pub fn message(&self) -> String {
        let pid = self
            .pid
            .map(|p| p.to_string())
            .unwrap_or_else(|| "?".to_string());

        match &self.payload {
            Payload::ProcessCreated => format!("Process {} created", pid),
            Payload::TrackingStarted => {
                format!("Started tracking user memory allocations for PID {}", pid)
            }
            Payload::TrackingAlreadyStarted => format!("Tracking already started for PID {}", pid),
            Payload::AllocationTracked { address, size } => format!(
                "PID {} allocated memory: Address={}, Size={} bytes",
                pid, address, size
            ),
            Payload::DeallocationTracked { address, size } => format!(
                "PID {} freed memory: Address={}, Size={} bytes",
                pid, address, size
            ),
            Payload::LeakDetected { address, size } => {
                format!("Leaked memory: Address={}, Size={} bytes", address, size)
            }
            Payload::ProcessExited {
                leaked_bytes,
                leaked_count,
            } => {
                if *leaked_count > 0 {
                    format!(
                        "Process {} exited with {} bytes of leaked memory ({} allocations)",
                        pid, leaked_bytes, leaked_count
                    )
                } else {
                    format!("Process {} exited with no memory leaks", pid)
                }
            }
            Payload::SimulationReset => "Simulation reset".to_string(),
            Payload::Narrative { message } => message.to_string(),
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
