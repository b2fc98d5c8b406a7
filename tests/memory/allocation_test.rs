/*!
 * Allocation Tracking Tests
 */

use memtrack_kernel::core::errors::{ErrorKind, TrackerError};
use memtrack_kernel::memory::MemoryTracker;
use pretty_assertions::assert_eq;

fn tracked(pid: i64) -> MemoryTracker {
    let tracker = MemoryTracker::new();
    tracker.create_process(pid).unwrap();
    tracker.start_tracking(pid).unwrap();
    tracker
}

#[test]
fn test_allocation_requires_tracking() {
    let tracker = MemoryTracker::new();
    tracker.create_process(4).unwrap();
    for (address, size) in [("0xA", 1), ("0xdead", 64), ("ptr", 8192)] {
        let err = tracker.track_allocation(4, address, size).unwrap_err();
        assert_eq!(err, TrackerError::PermissionDenied(4));
    }
    assert_eq!(
        tracker.track_deallocation(4, "0xA").unwrap_err().kind(),
        ErrorKind::PermissionDenied
    );
    assert_eq!(tracker.stats().total_allocations, 0);
}

#[test]
fn test_allocate_free_round_trip() {
    let tracker = tracked(5);
    tracker.track_allocation(5, "0xA", 128).unwrap();
    assert_eq!(tracker.process_memory(5).unwrap(), 128);

    let freed = tracker.track_deallocation(5, "0xA").unwrap();
    assert_eq!(freed.size, 128);
    assert!(tracker.process(5).unwrap().allocations.is_empty());
    assert_eq!(tracker.stats().leaked_memory, 0);
    assert_eq!(tracker.stats().total_deallocations, 1);
}

#[test]
fn test_free_unknown_or_twice() {
    let tracker = tracked(6);
    assert_eq!(
        tracker.track_deallocation(6, "0xB").unwrap_err().kind(),
        ErrorKind::AllocationNotFound
    );

    tracker.track_allocation(6, "0xB", 32).unwrap();
    tracker.track_deallocation(6, "0xB").unwrap();
    assert_eq!(
        tracker.track_deallocation(6, "0xB").unwrap_err().kind(),
        ErrorKind::AllocationNotFound
    );
}

#[test]
fn test_invalid_arguments_after_presence_check() {
    let tracker = tracked(7);
    assert_eq!(
        tracker.track_allocation(7, "", 64).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        tracker.track_allocation(7, "0xA", 0).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        tracker.track_allocation(7, "0xA", -1).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    // Missing process wins over bad arguments
    assert_eq!(
        tracker.track_allocation(99, "", 0).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_allocations_oldest_first() {
    let tracker = tracked(8);
    for address in ["0x3", "0x1", "0x2"] {
        tracker.track_allocation(8, address, 16).unwrap();
    }
    let order: Vec<_> = tracker
        .allocations(8)
        .unwrap()
        .into_iter()
        .map(|a| a.address.to_string())
        .collect();
    assert_eq!(order, vec!["0x3", "0x1", "0x2"]);
}

#[test]
fn test_addresses_are_opaque() {
    let tracker = tracked(9);
    tracker.track_allocation(9, "0xA", 16).unwrap();
    tracker.track_allocation(9, "0xA ", 32).unwrap();
    assert_eq!(tracker.allocations(9).unwrap().len(), 2);

    tracker.track_deallocation(9, "0xA ").unwrap();
    let left: Vec<_> = tracker
        .allocations(9)
        .unwrap()
        .into_iter()
        .map(|a| (a.address.to_string(), a.size))
        .collect();
    assert_eq!(left, vec![("0xA".to_string(), 16)]);
}
