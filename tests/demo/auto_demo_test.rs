/*!
 * Auto Demo Tests
 */

use memtrack_kernel::demo::{AutoDemo, DemoRunner};
use memtrack_kernel::memory::MemoryTracker;
use memtrack_kernel::DemoConfig;
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio::sync::watch;

#[tokio::test(start_paused = true)]
async fn test_rounds_skip_busy_pids() {
    let tracker = MemoryTracker::new();
    tracker.create_process(2001).unwrap();

    let (_tx, rx) = watch::channel(false);
    let runner = DemoRunner::new(tracker.clone(), DemoConfig::default().with_seed(1));
    let reports = AutoDemo::new(runner, rx).run(Some(2)).await;

    let pids: Vec<_> = reports.iter().map(|r| r.pid).collect();
    assert_eq!(pids, vec![2002, 2002]);
    assert_eq!(tracker.process_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_full_table_skips_tick() {
    let tracker = MemoryTracker::new();
    for pid in 1..=3 {
        tracker.create_process(pid).unwrap();
    }

    let (_tx, rx) = watch::channel(false);
    let runner = DemoRunner::new(tracker.clone(), DemoConfig::default());
    let reports = AutoDemo::new(runner, rx).run(Some(3)).await;
    assert!(reports.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_signal_stops_loop() {
    let (tx, rx) = watch::channel(false);
    let runner = DemoRunner::new(MemoryTracker::new(), DemoConfig::default());
    let handle = tokio::spawn(AutoDemo::new(runner, rx).run(None));

    tokio::time::sleep(Duration::from_secs(1)).await;
    tx.send(true).unwrap();

    let reports = handle.await.unwrap();
    assert!(reports.is_empty());
}
