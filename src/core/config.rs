/*!
 * Tracker Configuration
 *
 * Runtime configuration for the tracker and the demo scheduler.
 *
 * Environment variables:
 * - MEMTRACK_RETAIN_EXITED: keep exited processes in an archive (default: false)
 * - MEMTRACK_LOG_PATH: where the event log is saved (default: user_memory_leaks.log)
 * - MEMTRACK_DEMO_SPEED: demo time scale, 2.0 runs twice as fast (default: 1.0)
 */

use super::limits::{
    AUTO_DEMO_INTERVAL, AUTO_DEMO_MAX_PROCESSES, DEFAULT_LOG_FILE, DEMO_SCENARIO_PID,
    MIN_DEMO_SPEED,
};
use super::types::Pid;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Archive exited processes instead of dropping them
    pub retain_exited: bool,
    /// Destination for the exported event log
    pub event_log_path: PathBuf,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            retain_exited: false,
            event_log_path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl TrackerConfig {
    /// Default configuration overlaid with `MEMTRACK_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(retain) = env_flag("MEMTRACK_RETAIN_EXITED") {
            config.retain_exited = retain;
        }
        if let Ok(path) = std::env::var("MEMTRACK_LOG_PATH") {
            if !path.trim().is_empty() {
                config.event_log_path = PathBuf::from(path);
            }
        }
        config
    }

    pub fn with_retain_exited(mut self, retain: bool) -> Self {
        self.retain_exited = retain;
        self
    }

    pub fn with_event_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.event_log_path = path.into();
        self
    }
}

/// Demo scheduler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// First PID the auto demo tries
    pub base_pid: Pid,
    /// Time scale applied to every step delay
    pub speed: f64,
    /// Auto demo tick interval (before scaling)
    pub auto_interval: Duration,
    /// Auto demo only launches a scenario below this many live processes
    pub auto_max_processes: usize,
    /// Seed for address/size generation; random when absent
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            base_pid: DEMO_SCENARIO_PID,
            speed: 1.0,
            auto_interval: AUTO_DEMO_INTERVAL,
            auto_max_processes: AUTO_DEMO_MAX_PROCESSES,
            seed: None,
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(speed) = std::env::var("MEMTRACK_DEMO_SPEED")
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
        {
            config = config.with_speed(speed);
        }
        config
    }

    /// Set the time scale; non-finite or non-positive values are ignored and
    /// tiny ones are raised to `MIN_DEMO_SPEED`
    pub fn with_speed(mut self, speed: f64) -> Self {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed.max(MIN_DEMO_SPEED);
        }
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_base_pid(mut self, pid: Pid) -> Self {
        self.base_pid = pid;
        self
    }

    /// Scale a nominal delay by the configured speed
    ///
    /// Saturates at `Duration::MAX` when the speed field was set to zero or
    /// something too small to divide by.
    pub fn scale(&self, delay: Duration) -> Duration {
        Duration::try_from_secs_f64(delay.as_secs_f64() / self.speed).unwrap_or(Duration::MAX)
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.trim(), "1" | "true" | "yes" | "on"))
}
