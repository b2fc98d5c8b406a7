/*!
 * Console State
 * Tracker handle, event log and process selection for the shell
 */

use super::command::{Command, ShellResult, HELP};
use super::render::{render_buckets, render_memory, render_processes, render_stats};
use crate::core::errors::TrackerError;
use crate::core::types::{Pid, RawPid};
use crate::memory::validation::validate_pid;
use crate::memory::MemoryTracker;
use crate::monitoring::{EventLog, Subscriber};
use crate::syscalls::{Operation, SyscallExecutor};
use std::path::{Path, PathBuf};

pub struct Console {
    tracker: MemoryTracker,
    executor: SyscallExecutor,
    events: Subscriber,
    log: EventLog,
    selected: Option<Pid>,
    log_path: PathBuf,
}

impl Console {
    /// Attach to a tracker, installing a collector if it has none
    pub fn new(tracker: MemoryTracker) -> Self {
        let collector = tracker.collector().cloned().unwrap_or_default();
        let tracker = tracker.with_collector(collector.clone());
        let log_path = tracker.config().event_log_path.clone();
        Self {
            executor: SyscallExecutor::new(tracker.clone()),
            events: collector.subscribe(),
            tracker,
            log: EventLog::new(),
            selected: None,
            log_path,
        }
    }

    pub fn tracker(&self) -> &MemoryTracker {
        &self.tracker
    }

    pub fn selected(&self) -> Option<Pid> {
        self.selected
    }

    /// The event log, including events produced outside the console
    pub fn log(&mut self) -> &EventLog {
        self.sync_log();
        &self.log
    }

    /// Path the log is saved to when no other is given
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Write the event log to `path` and return how many entries it holds
    pub fn save_log(&mut self, path: &Path) -> std::io::Result<usize> {
        self.sync_log();
        self.log.write_to(path)?;
        Ok(self.log.len())
    }

    /// Parse and run one line
    pub fn execute_line(&mut self, line: &str) -> ShellResult<String> {
        let command = Command::parse(line)?;
        self.execute(command)
    }

    /// Run a command and return its rendered output
    pub fn execute(&mut self, command: Command) -> ShellResult<String> {
        let result = self.dispatch(command);
        self.sync_log();
        result
    }

    fn dispatch(&mut self, command: Command) -> ShellResult<String> {
        let output = match command {
            Command::Create(pid) => {
                let record = self.tracker.create_process(pid)?;
                format!("Process {} created", record.pid)
            }
            Command::Select(pid) => {
                let record = self.tracker.process(pid)?;
                self.selected = Some(record.pid);
                format!("Selected PID {}", record.pid)
            }
            Command::Start(pid) => self
                .executor
                .track_user_memory(pid, Operation::StartTracking.code(), None, None)
                .to_string(),
            Command::Alloc { pid, address, size } => self
                .executor
                .track_user_memory(pid, Operation::TrackAllocation.code(), Some(&address), Some(size))
                .to_string(),
            Command::Free { pid, address } => self
                .executor
                .track_user_memory(pid, Operation::TrackDeallocation.code(), Some(&address), None)
                .to_string(),
            Command::Syscall {
                pid,
                operation,
                address,
                size,
            } => self
                .executor
                .track_user_memory(pid, operation, address.as_deref(), size)
                .to_string(),
            Command::Kill(pid) => {
                let pid = match pid {
                    Some(pid) => validate_pid(pid)?,
                    None => self.selected.ok_or(TrackerError::NoProcessSelected)?,
                };
                let report = self.tracker.kill_process(RawPid::from(pid))?;
                if self.selected == Some(pid) {
                    self.selected = None;
                }
                if report.has_leaks() {
                    format!(
                        "Process {} exited with {} bytes of leaked memory ({} allocations)",
                        pid, report.leaked_bytes, report.leaked_count
                    )
                } else {
                    format!("Process {} exited with no memory leaks", pid)
                }
            }
            Command::Ps => render_processes(&self.tracker.processes(), self.selected),
            Command::Mem(pid) => {
                let pid = match pid {
                    Some(pid) => Some(validate_pid(pid)?),
                    None => self.selected,
                };
                let allocations = match pid {
                    Some(pid) => self.tracker.allocations(RawPid::from(pid))?,
                    None => Vec::new(),
                };
                render_memory(pid, &allocations)
            }
            Command::Buckets => render_buckets(&self.tracker.buckets()),
            Command::Stats => render_stats(&self.tracker.stats()),
            Command::Log => {
                self.sync_log();
                if self.log.is_empty() {
                    "Log is empty".to_string()
                } else {
                    self.log.export()
                }
            }
            Command::ClearLog => {
                self.sync_log();
                self.log.clear();
                "Log cleared".to_string()
            }
            Command::Save(path) => {
                let path = path.unwrap_or_else(|| self.log_path.clone());
                let entries = self.save_log(&path)?;
                format!("Saved {} entries to {}", entries, path.display())
            }
            Command::Reset => {
                self.selected = None;
                self.sync_log();
                self.log.clear();
                self.tracker.reset();
                "Simulation reset".to_string()
            }
            Command::Help => HELP.to_string(),
            Command::Exit => String::new(),
        };
        Ok(output)
    }

    fn sync_log(&mut self) {
        for event in self.events.drain() {
            self.log.record(&event);
        }
    }
}
