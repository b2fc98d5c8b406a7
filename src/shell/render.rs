/*!
 * Console Rendering
 * Plain-text views of the process table, memory, buckets and stats
 */

use crate::memory::{AllocationRecord, BucketTable, ProcessSummary, TrackerStats};
use crate::core::types::Pid;
use std::fmt::Write;

/// One line per process: `PID: n  k allocations  [TRACKING]`
pub fn render_processes(processes: &[ProcessSummary], selected: Option<Pid>) -> String {
    if processes.is_empty() {
        return "No processes".to_string();
    }

    let mut out = String::new();
    for p in processes {
        let marker = if selected == Some(p.pid) { "*" } else { " " };
        let _ = write!(out, "{} PID: {}  {} allocations", marker, p.pid, p.allocation_count);
        if p.is_tracking {
            out.push_str("  [TRACKING]");
        }
        out.push('\n');
    }
    out.pop();
    out
}

/// Allocation list for one process, oldest first
pub fn render_memory(pid: Option<Pid>, allocations: &[AllocationRecord]) -> String {
    let Some(pid) = pid else {
        return "Select a process to view memory allocations".to_string();
    };
    if allocations.is_empty() {
        return format!("No memory allocations tracked for PID {}", pid);
    }

    let mut out = format!("Memory Allocations for PID {}", pid);
    for a in allocations {
        let _ = write!(out, "\n  {:<16} {} bytes", a.address.as_str(), a.size);
    }
    out
}

/// Occupancy per range of 32 buckets
pub fn render_buckets(table: &BucketTable) -> String {
    table
        .ranges()
        .iter()
        .map(|r| {
            let mark = if r.is_occupied() { " #" } else { "" };
            format!("{:>7}  {}{}", format!("{}-{}", r.start, r.end), r.process_count, mark)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_stats(stats: &TrackerStats) -> String {
    format!(
        "Active processes: {}  Total allocations: {}  Leaked memory: {} bytes",
        stats.active_processes, stats.total_allocations, stats.leaked_memory
    )
}
