/*!
 * Syscall Types Module
 * Operation selector, request and result types
 */

mod results;
mod syscall;

// Re-export all public types
pub use results::SyscallResult;
pub use syscall::{Operation, SyscallRequest};
