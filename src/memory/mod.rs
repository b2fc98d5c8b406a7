/*!
 * Memory Module
 * Per-process user-memory allocation tracking
 */

pub mod buckets;
pub mod manager;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export for convenience
pub use buckets::{bucket_of, BucketRange, BucketTable};
pub use manager::MemoryTracker;
pub use traits::*;
pub use types::*;
