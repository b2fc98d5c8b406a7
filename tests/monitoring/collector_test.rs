/*!
 * Collector Tests
 * Event order and wording as seen by a subscriber
 */

use memtrack_kernel::memory::MemoryTracker;
use memtrack_kernel::monitoring::{Collector, EntryKind, Payload};
use pretty_assertions::assert_eq;

#[test]
fn test_leak_scenario_event_sequence() {
    let collector = Collector::new();
    let sub = collector.subscribe();
    let tracker = MemoryTracker::new().with_collector(collector);

    tracker.create_process(7).unwrap();
    tracker.start_tracking(7).unwrap();
    tracker.track_allocation(7, "0xA", 64).unwrap();
    tracker.track_allocation(7, "0xB", 256).unwrap();
    tracker.track_deallocation(7, "0xA").unwrap();
    tracker.kill_process(7).unwrap();

    let messages: Vec<_> = sub.drain().iter().map(|e| e.message()).collect();
    assert_eq!(
        messages,
        vec![
            "Process 7 created",
            "Started tracking user memory allocations for PID 7",
            "PID 7 allocated memory: Address=0xA, Size=64 bytes",
            "PID 7 allocated memory: Address=0xB, Size=256 bytes",
            "PID 7 freed memory: Address=0xA, Size=64 bytes",
            "Leaked memory: Address=0xB, Size=256 bytes",
            "Process 7 exited with 256 bytes of leaked memory (1 allocations)",
        ]
    );
}

#[test]
fn test_failed_operations_emit_nothing() {
    let collector = Collector::new();
    let sub = collector.subscribe();
    let tracker = MemoryTracker::new().with_collector(collector);

    tracker.create_process(3).unwrap();
    sub.drain();

    assert!(tracker.create_process(3).is_err());
    assert!(tracker.track_allocation(3, "0xA", 8).is_err());
    assert!(tracker.kill_process(4).is_err());
    assert_eq!(sub.pending(), 0);
}

#[test]
fn test_clean_exit_and_reset() {
    let collector = Collector::new();
    let sub = collector.subscribe();
    let tracker = MemoryTracker::new().with_collector(collector.clone());

    tracker.create_process(5).unwrap();
    tracker.kill_process(5).unwrap();
    tracker.reset();
    collector.narrate("Starting demo scenario...");

    let events = sub.drain();
    let last_three: Vec<_> = events[1..].iter().map(|e| (e.kind(), e.message())).collect();
    assert_eq!(
        last_three,
        vec![
            (EntryKind::Tracking, "Process 5 exited with no memory leaks".to_string()),
            (EntryKind::Tracking, "Simulation reset".to_string()),
            (EntryKind::Info, "Starting demo scenario...".to_string()),
        ]
    );
    assert!(matches!(events[2].payload, Payload::SimulationReset));
}

#[test]
fn test_dropped_subscriber_is_pruned() {
    let collector = Collector::new();
    let keep = collector.subscribe();
    drop(collector.subscribe());

    collector.narrate("hello");
    assert_eq!(collector.stream_stats().active_subscribers, 1);
    assert_eq!(keep.drain().len(), 1);
}
