/*!
 * track_user_memory Tests
 * Return codes, operation decoding and request dispatch
 */

use memtrack_kernel::core::errors::{EEXIST, EINVAL, EPERM, ESRCH};
use memtrack_kernel::memory::MemoryTracker;
use memtrack_kernel::syscalls::{Operation, SyscallExecutor, SyscallRequest, SyscallResult};
use pretty_assertions::assert_eq;

fn executor_with(pid: i64) -> SyscallExecutor {
    let tracker = MemoryTracker::new();
    tracker.create_process(pid).unwrap();
    SyscallExecutor::new(tracker)
}

#[test]
fn test_full_cycle_return_codes() {
    let exec = executor_with(10);

    let start = exec.track_user_memory(10, 0, None, None);
    assert_eq!(start, SyscallResult::success("Tracking started successfully"));

    let again = exec.track_user_memory(10, 0, None, None);
    assert_eq!(again.return_code(), 0);
    assert_eq!(again.message(), "Tracking already started");

    let alloc = exec.track_user_memory(10, 1, Some("0xA"), Some(64));
    assert_eq!(alloc.message(), "Allocation tracked successfully");

    let free = exec.track_user_memory(10, 2, Some("0xA"), None);
    assert_eq!(free.message(), "Deallocation tracked successfully");

    let double_free = exec.track_user_memory(10, 2, Some("0xA"), None);
    assert_eq!(double_free.return_code(), -i64::from(ESRCH));
}

#[test]
fn test_error_codes() {
    let exec = executor_with(20);

    assert_eq!(
        exec.track_user_memory(20, 1, Some("0xA"), Some(64)).return_code(),
        -i64::from(EPERM)
    );
    assert_eq!(
        exec.track_user_memory(0, 0, None, None).return_code(),
        -i64::from(EINVAL)
    );
    assert_eq!(
        exec.track_user_memory(21, 0, None, None).return_code(),
        -i64::from(ESRCH)
    );
    assert_eq!(
        exec.track_user_memory(20, 7, None, None).return_code(),
        -i64::from(EINVAL)
    );

    exec.track_user_memory(20, 0, None, None);
    assert_eq!(
        exec.track_user_memory(20, 1, None, Some(64)).return_code(),
        -i64::from(EINVAL)
    );
    assert_eq!(
        exec.track_user_memory(20, 1, Some("0xA"), None).return_code(),
        -i64::from(EINVAL)
    );

    let created = exec.tracker().create_process(20).unwrap_err();
    assert_eq!(created.errno(), EEXIST);
}

#[test]
fn test_missing_process_beats_bad_operation() {
    let exec = SyscallExecutor::new(MemoryTracker::new());
    let result = exec.track_user_memory(5, 9, None, None);
    assert_eq!(result.return_code(), -i64::from(ESRCH));
}

#[test]
fn test_size_ignored_for_start_and_free() {
    let exec = executor_with(30);
    assert!(exec.track_user_memory(30, 0, None, Some(-1)).is_success());
    assert!(exec.track_user_memory(30, 1, Some("0xA"), Some(8)).is_success());
    assert!(exec.track_user_memory(30, 2, Some("0xA"), Some(0)).is_success());
}

#[test]
fn test_operation_codes() {
    for op in Operation::ALL {
        assert_eq!(Operation::try_from(op.code()).unwrap(), op);
    }
    assert!(Operation::try_from(3).is_err());
    assert!(Operation::try_from(-1).is_err());
}

#[test]
fn test_execute_serialized_request() {
    let exec = executor_with(40);
    let requests: Vec<SyscallRequest> = serde_json::from_str(
        r#"[
            {"pid": 40, "operation": 0},
            {"pid": 40, "operation": 1, "address": "0xbeef", "size": 256},
            {"pid": 40, "operation": 2, "address": "0xbeef"}
        ]"#,
    )
    .unwrap();

    let codes: Vec<_> = requests.iter().map(|r| exec.execute(r).return_code()).collect();
    assert_eq!(codes, vec![0, 0, 0]);
    assert_eq!(exec.tracker().stats().total_deallocations, 1);
}
