/*!
 * Demo Scenarios
 * Timed step sequences, each step placed at an offset from scenario start
 */

use crate::core::limits::{
    DEMO_ALLOCATIONS, DEMO_DEALLOCATIONS, DEMO_FIRST_ALLOC_DELAY, DEMO_FREE_DELAY,
    DEMO_KILL_DELAY, DEMO_SCENARIO_PID, DEMO_START_DELAY, DEMO_STEP_INTERVAL,
    LEAK_ALLOCATIONS, LEAK_KILL_DELAY, LEAK_SCENARIO_PID,
};
use crate::core::types::Pid;
use std::fmt;
use std::time::Duration;

/// What a step does to the scenario's process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoAction {
    /// Append a line to the event log
    Narrate(String),
    CreateProcess,
    StartTracking,
    /// Allocate a random address with a random demo size
    Allocate,
    /// Free the oldest live allocation, if any
    FreeOldest,
    Kill,
}

impl fmt::Display for DemoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoAction::Narrate(_) => f.write_str("narrate"),
            DemoAction::CreateProcess => f.write_str("create_process"),
            DemoAction::StartTracking => f.write_str("start_tracking"),
            DemoAction::Allocate => f.write_str("allocate"),
            DemoAction::FreeOldest => f.write_str("free_oldest"),
            DemoAction::Kill => f.write_str("kill"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Offset from scenario start (before speed scaling)
    pub at: Duration,
    pub action: DemoAction,
}

/// A named, timed sequence of steps against one PID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub pid: Pid,
    steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, pid: Pid) -> Self {
        Self {
            name: name.into(),
            pid,
            steps: Vec::new(),
        }
    }

    /// Add a step at an absolute offset
    pub fn at(mut self, at: Duration, action: DemoAction) -> Self {
        self.steps.push(Step { at, action });
        self
    }

    /// Add `count` copies of `action`, one every `interval`, starting at `start`
    pub fn burst(mut self, start: Duration, interval: Duration, count: usize, action: DemoAction) -> Self {
        for i in 0..count {
            self.steps.push(Step {
                at: start + interval * i as u32,
                action: action.clone(),
            });
        }
        self
    }

    /// Steps ordered by offset; ties keep insertion order
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = self.steps.clone();
        steps.sort_by_key(|s| s.at);
        steps
    }

    /// Offset of the last step
    pub fn duration(&self) -> Duration {
        self.steps.iter().map(|s| s.at).max().unwrap_or_default()
    }

    /// Create, track, allocate five blocks, free three, then kill (two leak)
    pub fn standard(pid: Pid) -> Self {
        let allocs_at = DEMO_START_DELAY + DEMO_FIRST_ALLOC_DELAY;
        let frees_at = allocs_at + DEMO_FREE_DELAY;
        Self::new("standard", pid)
            .at(Duration::ZERO, DemoAction::Narrate("Starting demo scenario...".into()))
            .at(Duration::ZERO, DemoAction::CreateProcess)
            .at(DEMO_START_DELAY, DemoAction::StartTracking)
            .burst(allocs_at, DEMO_STEP_INTERVAL, DEMO_ALLOCATIONS, DemoAction::Allocate)
            .burst(frees_at, DEMO_STEP_INTERVAL, DEMO_DEALLOCATIONS, DemoAction::FreeOldest)
            .at(frees_at + DEMO_KILL_DELAY, DemoAction::Kill)
    }

    /// Create, track, allocate eight blocks and kill without freeing any
    pub fn memory_leak(pid: Pid) -> Self {
        let allocs_at = DEMO_START_DELAY + DEMO_FIRST_ALLOC_DELAY;
        Self::new("memory_leak", pid)
            .at(
                Duration::ZERO,
                DemoAction::Narrate("Simulating memory leak scenario...".into()),
            )
            .at(Duration::ZERO, DemoAction::CreateProcess)
            .at(DEMO_START_DELAY, DemoAction::StartTracking)
            .burst(allocs_at, DEMO_STEP_INTERVAL, LEAK_ALLOCATIONS, DemoAction::Allocate)
            .at(allocs_at + LEAK_KILL_DELAY, DemoAction::Kill)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::standard(DEMO_SCENARIO_PID)
    }
}

/// The leak scenario on its default PID
pub fn default_leak_scenario() -> Scenario {
    Scenario::memory_leak(LEAK_SCENARIO_PID)
}
