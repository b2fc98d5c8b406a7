/*!
 * Core Module
 * Fundamental tracker types, configuration and error handling
 */

pub mod config;
pub mod data_structures;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use config::{DemoConfig, TrackerConfig};
pub use data_structures::InlineString;
pub use errors::*;
pub use types::*;
