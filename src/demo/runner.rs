/*!
 * Demo Runner
 * Plays scenarios against a tracker on the tokio clock
 */

use super::generator::AddressGenerator;
use super::scenario::{DemoAction, Scenario};
use crate::core::config::DemoConfig;
use crate::core::errors::{TrackerError, TrackerResult};
use crate::core::types::{Pid, RawPid, RawSize};
use crate::memory::{LeakReport, MemoryTracker};
use crate::syscalls::{Operation, SyscallExecutor, SyscallResult};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Stand-in deadline for offsets too large to add to an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

fn deadline(start: Instant, offset: Duration) -> Instant {
    start
        .checked_add(offset)
        .unwrap_or_else(|| start + FAR_FUTURE)
}

/// A step whose tracker call was rejected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepFailure {
    pub action: String,
    pub error: TrackerError,
}

/// Outcome of one scenario run
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub scenario: String,
    pub pid: Pid,
    pub run_id: Uuid,
    pub steps_run: usize,
    pub failures: Vec<StepFailure>,
    /// Leak report from the kill step, absent if the kill failed
    pub leak_report: Option<LeakReport>,
}

impl DemoReport {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives scenarios through the syscall surface
pub struct DemoRunner {
    executor: SyscallExecutor,
    config: DemoConfig,
    generator: AddressGenerator,
}

impl DemoRunner {
    pub fn new(tracker: MemoryTracker, config: DemoConfig) -> Self {
        let generator = match config.seed {
            Some(seed) => AddressGenerator::seeded(seed),
            None => AddressGenerator::new(),
        };
        Self {
            executor: SyscallExecutor::new(tracker),
            config,
            generator,
        }
    }

    pub fn tracker(&self) -> &MemoryTracker {
        self.executor.tracker()
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Run every step at its scaled offset; rejected steps are recorded and
    /// the run carries on
    pub async fn run(&mut self, scenario: &Scenario) -> DemoReport {
        let run_id = Uuid::new_v4();
        let start = Instant::now();
        info!(%run_id, scenario = %scenario.name, pid = scenario.pid, "Demo scenario started");

        let mut report = DemoReport {
            scenario: scenario.name.clone(),
            pid: scenario.pid,
            run_id,
            steps_run: 0,
            failures: Vec::new(),
            leak_report: None,
        };

        for step in scenario.steps() {
            sleep_until(deadline(start, self.config.scale(step.at))).await;

            match self.apply(scenario.pid, &step.action, &mut report) {
                Ok(()) => report.steps_run += 1,
                Err(error) => {
                    warn!(%run_id, action = %step.action, %error, "Demo step failed");
                    report.failures.push(StepFailure {
                        action: step.action.to_string(),
                        error,
                    });
                }
            }
        }

        info!(
            %run_id,
            steps = report.steps_run,
            failures = report.failures.len(),
            "Demo scenario finished"
        );
        report
    }

    fn apply(&mut self, pid: Pid, action: &DemoAction, report: &mut DemoReport) -> TrackerResult<()> {
        let raw = RawPid::from(pid);
        match action {
            DemoAction::Narrate(message) => {
                if let Some(collector) = self.tracker().collector() {
                    collector.narrate(message.as_str());
                }
                Ok(())
            }
            DemoAction::CreateProcess => self.tracker().create_process(raw).map(|_| ()),
            DemoAction::StartTracking => {
                syscall(self.executor.track_user_memory(raw, Operation::StartTracking.code(), None, None))
            }
            DemoAction::Allocate => {
                let address = self.generator.address();
                let size = self.generator.size() as RawSize;
                syscall(self.executor.track_user_memory(
                    raw,
                    Operation::TrackAllocation.code(),
                    Some(&address),
                    Some(size),
                ))
            }
            DemoAction::FreeOldest => {
                let oldest = self.tracker().allocations(raw)?.into_iter().next();
                match oldest {
                    Some(record) => syscall(self.executor.track_user_memory(
                        raw,
                        Operation::TrackDeallocation.code(),
                        Some(record.address.as_str()),
                        None,
                    )),
                    None => {
                        debug!(pid, "No allocation left to free");
                        Ok(())
                    }
                }
            }
            DemoAction::Kill => {
                report.leak_report = Some(self.tracker().kill_process(raw)?);
                Ok(())
            }
        }
    }
}

fn syscall(result: SyscallResult) -> TrackerResult<()> {
    match result {
        SyscallResult::Success { .. } => Ok(()),
        SyscallResult::Error { error } => Err(error),
    }
}

/// Periodic scheduler that keeps a few demo processes alive
///
/// On every tick, when fewer than `auto_max_processes` processes are live,
/// the standard scenario runs on the next free PID at or above `base_pid`.
pub struct AutoDemo {
    runner: DemoRunner,
    shutdown: watch::Receiver<bool>,
}

impl AutoDemo {
    pub fn new(runner: DemoRunner, shutdown: watch::Receiver<bool>) -> Self {
        Self { runner, shutdown }
    }

    /// Tick until shutdown is signalled or `max_rounds` ticks have elapsed
    pub async fn run(mut self, max_rounds: Option<usize>) -> Vec<DemoReport> {
        let period = self.runner.config.scale(self.runner.config.auto_interval);
        let mut ticker = interval_at(deadline(Instant::now(), period), period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut reports = Vec::new();
        let mut rounds = 0usize;
        info!(?period, "Auto demo started");

        loop {
            if max_rounds.is_some_and(|max| rounds >= max) || *self.shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {}
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                    continue;
                }
            }
            rounds += 1;

            let live = self.runner.tracker().process_count();
            if live >= self.runner.config.auto_max_processes {
                debug!(live, "Auto demo skipped tick");
                continue;
            }

            let Some(pid) = self.next_free_pid() else {
                warn!("Auto demo found no free PID");
                continue;
            };
            let scenario = Scenario::standard(pid);
            reports.push(self.runner.run(&scenario).await);
        }

        info!(runs = reports.len(), "Auto demo stopped");
        reports
    }

    fn next_free_pid(&self) -> Option<Pid> {
        let tracker = self.runner.tracker();
        (self.runner.config.base_pid.max(1)..=Pid::MAX).find(|pid| !tracker.contains(*pid))
    }
}
