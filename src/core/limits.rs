/*!
 * System Limits and Constants
 *
 * Centralized location for the tracker's fixed sizes, demo timings and
 * default file names. Grouped by domain.
 */

use std::time::Duration;

// =============================================================================
// PROCESS TABLE
// =============================================================================

/// Number of hash buckets in the process table view (`pid mod 256`)
/// Matches an 8-bit kernel hashtable
pub const HASH_BUCKETS: usize = 256;

/// Buckets grouped per display range (8 ranges of 32)
pub const BUCKET_DISPLAY_RANGE: usize = 32;

// =============================================================================
// EVENT LOG
// =============================================================================

/// Default file name for the exported event log
pub const DEFAULT_LOG_FILE: &str = "user_memory_leaks.log";

// =============================================================================
// DEMO CHOREOGRAPHY
// =============================================================================

/// PID used by the standard demo scenario
pub const DEMO_SCENARIO_PID: u32 = 2001;

/// PID used by the memory-leak demo scenario
pub const LEAK_SCENARIO_PID: u32 = 3001;

/// Allocation sizes the demo picks from
pub const DEMO_ALLOCATION_SIZES: [usize; 8] = [64, 128, 256, 512, 1024, 2048, 4096, 8192];

/// Hex digits in a generated address (after the `0x` prefix)
pub const DEMO_ADDRESS_DIGITS: usize = 12;

/// Allocations made by the standard scenario
pub const DEMO_ALLOCATIONS: usize = 5;

/// Frees made by the standard scenario (the rest leak)
pub const DEMO_DEALLOCATIONS: usize = 3;

/// Allocations made by the leak scenario (none are freed)
pub const LEAK_ALLOCATIONS: usize = 8;

/// Delay between a process being created and tracking starting
pub const DEMO_START_DELAY: Duration = Duration::from_millis(500);

/// Delay between tracking starting and the first allocation
pub const DEMO_FIRST_ALLOC_DELAY: Duration = Duration::from_millis(1000);

/// Spacing between consecutive allocation or free steps
pub const DEMO_STEP_INTERVAL: Duration = Duration::from_millis(500);

/// Standard scenario: delay from the allocation burst to the frees
pub const DEMO_FREE_DELAY: Duration = Duration::from_millis(3000);

/// Standard scenario: delay from the frees to the kill
pub const DEMO_KILL_DELAY: Duration = Duration::from_millis(2000);

/// Leak scenario: delay from the allocation burst to the kill
pub const LEAK_KILL_DELAY: Duration = Duration::from_millis(5000);

/// Slowest accepted demo time scale
pub const MIN_DEMO_SPEED: f64 = 0.01;

/// Auto demo tick interval
pub const AUTO_DEMO_INTERVAL: Duration = Duration::from_secs(15);

/// Auto demo only starts a new scenario below this many live processes
pub const AUTO_DEMO_MAX_PROCESSES: usize = 3;
