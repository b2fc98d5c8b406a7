/*!
 * Bucket Tests
 * Hash placement and bucket membership as processes come and go
 */

use memtrack_kernel::memory::{bucket_of, MemoryTracker};
use proptest::prelude::*;

#[test]
fn test_bucket_of_range() {
    for pid in 1..=10_000u32 {
        assert_eq!(u32::from(bucket_of(pid)), pid % 256);
    }
}

#[test]
fn test_kill_removes_from_bucket() {
    let tracker = MemoryTracker::new();
    tracker.create_process(1).unwrap();
    tracker.create_process(257).unwrap();
    assert_eq!(tracker.buckets().bucket(1), &[1, 257]);

    tracker.kill_process(1).unwrap();
    assert_eq!(tracker.buckets().bucket(1), &[257]);
    assert_eq!(tracker.buckets().ranges()[0].process_count, 1);
}

proptest! {
    #[test]
    fn prop_buckets_follow_live_set(pids in proptest::collection::btree_set(1u32..10_000, 1..40)) {
        let tracker = MemoryTracker::new();
        for pid in &pids {
            tracker.create_process(i64::from(*pid)).unwrap();
        }

        let table = tracker.buckets();
        prop_assert_eq!(table.len(), pids.len());
        for pid in &pids {
            prop_assert!(table.bucket(bucket_of(*pid)).contains(pid));
        }

        let victim = *pids.iter().next().unwrap();
        tracker.kill_process(i64::from(victim)).unwrap();
        let table = tracker.buckets();
        prop_assert!(!table.bucket(bucket_of(victim)).contains(&victim));
        prop_assert_eq!(table.len(), pids.len() - 1);
    }
}
