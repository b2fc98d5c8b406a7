/*!
 * Scenario Run Tests
 * Scripted scenarios under paused tokio time
 */

use memtrack_kernel::core::errors::ErrorKind;
use memtrack_kernel::demo::{DemoRunner, Scenario};
use memtrack_kernel::memory::MemoryTracker;
use memtrack_kernel::monitoring::{Collector, EntryKind, EventLog};
use memtrack_kernel::DemoConfig;
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_standard_scenario_timing_and_outcome() {
    let collector = Collector::new();
    let sub = collector.subscribe();
    let tracker = MemoryTracker::new().with_collector(collector);
    let mut runner = DemoRunner::new(tracker.clone(), DemoConfig::default().with_seed(3));

    let started = Instant::now();
    let report = runner.run(&Scenario::standard(2001)).await;
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(6500) && elapsed < Duration::from_millis(6510));

    assert!(report.succeeded());
    assert_eq!(report.steps_run, 12);
    let leaks = report.leak_report.expect("kill step ran");
    assert_eq!(leaks.leaked_count, 2);
    assert_eq!(tracker.stats().leaked_memory, leaks.leaked_bytes as u64);

    let mut log = EventLog::new();
    for event in sub.drain() {
        log.record(&event);
    }
    assert_eq!(log.entries()[0].message, "Starting demo scenario...");
    assert_eq!(log.entries()[1].message, "Process 2001 created");
    assert_eq!(log.of_kind(EntryKind::Allocation).count(), 5);
    assert_eq!(log.of_kind(EntryKind::Deallocation).count(), 3);
    assert_eq!(log.of_kind(EntryKind::Leak).count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_leak_scenario_frees_nothing() {
    let tracker = MemoryTracker::new();
    let mut runner = DemoRunner::new(tracker.clone(), DemoConfig::default().with_seed(5));

    let report = runner.run(&Scenario::memory_leak(3001)).await;
    let leaks = report.leak_report.unwrap();
    assert_eq!(leaks.leaked_count, 8);
    assert_eq!(tracker.stats().total_deallocations, 0);
    assert!(!tracker.contains(3001));
}

#[tokio::test(start_paused = true)]
async fn test_speed_scales_delays() {
    let mut runner = DemoRunner::new(MemoryTracker::new(), DemoConfig::default().with_speed(2.0));
    let started = Instant::now();
    runner.run(&Scenario::memory_leak(3001)).await;
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(3250) && elapsed < Duration::from_millis(3260));
}

#[tokio::test(start_paused = true)]
async fn test_process_killed_midway_keeps_going() {
    let tracker = MemoryTracker::new();
    let mut runner = DemoRunner::new(tracker.clone(), DemoConfig::default().with_seed(9));

    let killer = tracker.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(2200)).await;
        killer.kill_process(2001).unwrap();
    });

    let report = runner.run(&Scenario::standard(2001)).await;
    assert!(!report.failures.is_empty());
    assert!(report.leak_report.is_none());
    assert!(report
        .failures
        .iter()
        .all(|f| f.error.kind() == ErrorKind::NotFound));
}
