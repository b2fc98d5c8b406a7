/*!
 * Syscalls Module
 * The simulated `track_user_memory` system call
 *
 * Untrusted `(pid, operation, address, size)` tuples are decoded here,
 * dispatched to the tracker, and answered with a kernel-style return code.
 */

mod executor;
mod memory;
mod types;

// Re-export public API
pub use executor::SyscallExecutor;
pub use types::{Operation, SyscallRequest, SyscallResult};
