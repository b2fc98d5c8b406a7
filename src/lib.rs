/*!
 * Process Memory Tracker
 * Simulated kernel-side tracking of user-space allocations, exposed as a library
 */

pub mod core;
pub mod demo;
pub mod memory;
pub mod monitoring;
pub mod shell;
pub mod syscalls;

// Re-exports
pub use crate::core::errors::*;
pub use crate::core::{DemoConfig, TrackerConfig};
pub use demo::{AutoDemo, DemoReport, DemoRunner, Scenario};
pub use memory::{bucket_of, LeakReport, MemoryTracker, ProcessMemoryTracker, TrackerStats};
pub use monitoring::{init_tracing, Collector, EventLog};
pub use shell::{run_repl, Console};
pub use syscalls::{Operation, SyscallExecutor, SyscallRequest, SyscallResult};
