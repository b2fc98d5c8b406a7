/*!
 * Event Log Export Tests
 */

use memtrack_kernel::memory::MemoryTracker;
use memtrack_kernel::monitoring::{Collector, EntryKind, EventLog};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn leak_log() -> EventLog {
    let collector = Collector::new();
    let sub = collector.subscribe();
    let tracker = MemoryTracker::new().with_collector(collector);

    tracker.create_process(9).unwrap();
    tracker.start_tracking(9).unwrap();
    tracker.track_allocation(9, "0xA", 64).unwrap();
    tracker.kill_process(9).unwrap();

    let mut log = EventLog::new();
    for event in sub.drain() {
        log.record(&event);
    }
    log
}

#[test]
fn test_export_line_format() {
    let log = leak_log();
    let exported = log.export();

    for line in exported.lines() {
        let (stamp, _) = line
            .strip_prefix('[')
            .and_then(|rest| rest.split_once("] "))
            .expect("line starts with a bracketed timestamp");
        assert!(stamp.contains('T'), "{}", stamp);
    }
    assert_eq!(exported.lines().count(), 5);
    assert_eq!(log.of_kind(EntryKind::Leak).count(), 2);
}

#[test]
fn test_write_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("user_memory_leaks.log");

    let log = leak_log();
    log.write_to(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, log.export());
    assert!(written
        .lines()
        .last()
        .unwrap()
        .ends_with("Process 9 exited with 64 bytes of leaked memory (1 allocations)"));
}
