/*!
 * Core Types
 * Common types used across the tracker
 */

use super::data_structures::InlineString;

/// Validated process ID
pub type Pid = u32;

/// Process ID as supplied by an untrusted caller (may be zero or negative)
pub type RawPid = i64;

/// Validated allocation size in bytes
pub type Size = usize;

/// Allocation size as supplied by an untrusted caller
pub type RawSize = i64;

/// Opaque allocation address identifier (e.g. `0x7f3a00c0ffee`)
pub type Address = InlineString;

/// Tracker-wide allocation sequence number
pub type Sequence = u64;

/// Hash bucket index (`pid mod 256`)
pub type BucketIndex = u8;
