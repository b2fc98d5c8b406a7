/*!
 * Monitoring
 * Tracker events, their distribution, the narrative log and tracing setup
 */

pub mod collection;
pub mod events;
pub mod log;
pub mod streaming;
mod tracer;

pub use collection::Collector;
pub use events::{EntryKind, Event, Payload, Severity};
pub use log::{EventLog, LogEntry};
pub use streaming::{EventStream, StreamStats, Subscriber};
pub use tracer::{generate_trace_id, init_tracing, span_syscall, SyscallSpan};
