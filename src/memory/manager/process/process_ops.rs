/*!
 * Process Memory Operations
 * Process creation, tracking start and exit-time leak accounting
 */

use super::super::super::buckets::bucket_of;
use super::super::super::types::{LeakReport, ProcessRecord, ProcessStatus, TrackingStart};
use super::super::super::validation::validate_pid;
use super::super::MemoryTracker;
use crate::core::errors::{TrackerError, TrackerResult};
use crate::core::types::{RawPid, Size};
use crate::monitoring::Event;
use tracing::{debug, info, warn};

impl MemoryTracker {
    /// Create a new process record with tracking off
    ///
    /// Fails with `InvalidArgument` for `pid <= 0` and `AlreadyExists` when
    /// the PID is live. Re-creating an archived PID drops its archive entry.
    pub fn create_process(&self, pid: RawPid) -> TrackerResult<ProcessRecord> {
        let pid = validate_pid(pid)?;
        let mut state = self.state.lock();

        if state.processes.contains_key(&pid) {
            return Err(TrackerError::AlreadyExists(pid));
        }

        state.exited.remove(&pid);
        let record = ProcessRecord::new(pid);
        state.processes.insert(pid, record.clone());

        info!(pid, bucket = bucket_of(pid), "Process created");
        self.emit(Event::process_created(pid));
        Ok(record)
    }

    /// Start tracking allocations for a process
    ///
    /// Starting twice is not an error: the second call reports
    /// `AlreadyStarted` and changes nothing.
    pub fn start_tracking(&self, pid: RawPid) -> TrackerResult<TrackingStart> {
        let pid = validate_pid(pid)?;
        let mut state = self.state.lock();

        let process = state
            .processes
            .get_mut(&pid)
            .ok_or(TrackerError::NotFound(RawPid::from(pid)))?;

        if process.is_tracking {
            debug!(pid, "Tracking already started");
            self.emit(Event::tracking_already_started(pid));
            return Ok(TrackingStart::AlreadyStarted);
        }

        process.is_tracking = true;
        info!(pid, "Started tracking user memory allocations");
        self.emit(Event::tracking_started(pid));
        Ok(TrackingStart::Started)
    }

    /// Exit a process (the simulated `do_exit` hook)
    ///
    /// Every allocation still present is reported as leaked and its size
    /// added to the cumulative leaked-memory counter. The record is then
    /// removed, or archived when `retain_exited` is configured.
    pub fn kill_process(&self, pid: RawPid) -> TrackerResult<LeakReport> {
        let pid = validate_pid(pid)?;
        let mut state = self.state.lock();

        let report = state
            .processes
            .get(&pid)
            .map(|record| LeakReport::from_allocations(pid, record.allocations_by_age()))
            .ok_or(TrackerError::NotFound(RawPid::from(pid)))?;
        for leak in &report.leaks {
            warn!(pid, address = %leak.address, size = leak.size, "Leaked memory");
            self.emit(Event::leak_detected(pid, leak.address.clone(), leak.size));
        }

        state.leaked_memory = state.leaked_memory.saturating_add(report.leaked_bytes as u64);
        state.exited_processes += 1;

        if let Some(mut record) = state.processes.remove(&pid) {
            if self.config.retain_exited {
                record.status = ProcessStatus::Exited;
                state.exited.insert(pid, record);
            }
        }

        if report.has_leaks() {
            warn!(
                pid,
                leaked_bytes = report.leaked_bytes,
                leaked_count = report.leaked_count,
                "Process exited with leaked memory"
            );
        } else {
            info!(pid, "Process exited with no memory leaks");
        }
        self.emit(Event::process_exited(pid, report.leaked_bytes, report.leaked_count));

        Ok(report)
    }

    /// Bytes currently held by a live process
    pub fn process_memory(&self, pid: RawPid) -> TrackerResult<Size> {
        let pid = validate_pid(pid)?;
        self.state
            .lock()
            .processes
            .get(&pid)
            .map(ProcessRecord::allocated_bytes)
            .ok_or(TrackerError::NotFound(RawPid::from(pid)))
    }
}
