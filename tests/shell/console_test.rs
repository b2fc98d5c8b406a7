/*!
 * Console Tests
 * Selection semantics, rendering and log handling through the console
 */

use memtrack_kernel::core::errors::{ErrorKind, TrackerError};
use memtrack_kernel::memory::MemoryTracker;
use memtrack_kernel::shell::{Command, Console, ShellError};
use memtrack_kernel::TrackerConfig;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn console() -> Console {
    Console::new(MemoryTracker::new())
}

fn run(console: &mut Console, lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .map(|line| console.execute_line(line).expect(line))
        .collect()
}

#[test]
fn test_kill_requires_selection() {
    let mut console = console();
    console.execute_line("create 1").unwrap();

    match console.execute(Command::Kill(None)) {
        Err(ShellError::Tracker(TrackerError::NoProcessSelected)) => {}
        other => panic!("expected NoProcessSelected, got {:?}", other),
    }
    assert!(console.tracker().contains(1));
}

#[test]
fn test_select_unknown_process() {
    let mut console = console();
    match console.execute_line("select 99") {
        Err(ShellError::Tracker(e)) => assert_eq!(e.kind(), ErrorKind::NotFound),
        other => panic!("unexpected: {:?}", other),
    }
    assert_eq!(console.selected(), None);
}

#[test]
fn test_killing_other_pid_keeps_selection() {
    let mut console = console();
    run(&mut console, &["create 1", "create 2", "select 1", "kill 2"]);
    assert_eq!(console.selected(), Some(1));
}

#[test]
fn test_session_views() {
    let mut console = console();
    let out = run(
        &mut console,
        &[
            "create 257",
            "create 1",
            "select 257",
            "start 257",
            "alloc 257 0xA 64",
            "alloc 257 0xB 256",
            "ps",
            "mem",
            "stats",
        ],
    );

    assert_eq!(
        out[6],
        "  PID: 1  0 allocations\n* PID: 257  2 allocations  [TRACKING]"
    );
    assert_eq!(
        out[7],
        "Memory Allocations for PID 257\n  0xA              64 bytes\n  0xB              256 bytes"
    );
    assert_eq!(
        out[8],
        "Active processes: 2  Total allocations: 2  Leaked memory: 0 bytes"
    );

    let buckets = console.execute_line("buckets").unwrap();
    assert!(buckets.starts_with("   0-31  2 #"));

    let out = console.execute_line("kill").unwrap();
    assert_eq!(
        out,
        "Process 257 exited with 320 bytes of leaked memory (2 allocations)"
    );
    assert_eq!(
        console.execute_line("mem").unwrap(),
        "Select a process to view memory allocations"
    );
}

#[test]
fn test_raw_syscall_command() {
    let mut console = console();
    console.execute_line("create 4").unwrap();
    assert_eq!(
        console.execute_line("syscall 4 5").unwrap(),
        "Return: -22 (EINVAL: Invalid argument: invalid operation 5)"
    );
    assert_eq!(
        console.execute_line("syscall 8 0").unwrap(),
        "Return: -3 (ESRCH: Process 8 not found)"
    );
}

#[test]
fn test_log_clear_and_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.log");
    let config = TrackerConfig::default().with_event_log_path(&path);
    let mut console = Console::new(MemoryTracker::with_config(config));

    run(&mut console, &["create 6", "start 6", "start 6"]);
    let log = console.execute_line("log").unwrap();
    assert_eq!(log.lines().count(), 3);
    assert!(log.ends_with("Tracking already started for PID 6"));

    console.execute_line("save").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), log);

    assert_eq!(console.execute_line("clear-log").unwrap(), "Log cleared");
    assert_eq!(console.execute_line("log").unwrap(), "Log is empty");
}

#[test]
fn test_save_log_on_session_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exit.log");
    let config = TrackerConfig::default().with_event_log_path(&path);
    let mut console = Console::new(MemoryTracker::with_config(config));

    run(&mut console, &["create 3", "start 3"]);
    console.tracker().track_allocation(3, "0xA", 64).unwrap();
    assert_eq!(console.log_path(), path.as_path());

    let entries = console.save_log(&path).unwrap();
    assert_eq!(entries, 3);
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 3);
    assert!(written.ends_with("PID 3 allocated memory: Address=0xA, Size=64 bytes"));
}

#[test]
fn test_reset_clears_state_and_log() {
    let mut console = console();
    run(&mut console, &["create 1", "select 1", "start 1", "alloc 1 0xA 8"]);
    console.execute_line("reset").unwrap();

    assert_eq!(console.selected(), None);
    assert_eq!(console.tracker().process_count(), 0);
    assert_eq!(console.log().export().lines().count(), 1);
    assert!(console.log().export().ends_with("] Simulation reset"));
}
