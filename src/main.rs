/*!
 * memtrack - Main Entry Point
 *
 * Front end for the process memory tracker:
 * - Interactive console
 * - Scripted demo and leak scenarios
 * - Auto demo that keeps a few processes busy until Ctrl+C
 */

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::BufReader;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use memtrack_kernel::core::limits::{DEMO_SCENARIO_PID, LEAK_SCENARIO_PID};
use memtrack_kernel::monitoring::Subscriber;
use memtrack_kernel::{
    init_tracing, run_repl, AutoDemo, Collector, Console, DemoConfig, DemoReport, DemoRunner,
    EventLog, MemoryTracker, Scenario, TrackerConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "memtrack",
    about = "Simulated kernel tracker for user-space memory allocations and leaks",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Where the event log is written
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Keep exited processes in an archive
    #[arg(long, global = true)]
    retain_exited: bool,

    /// Demo time scale (2.0 runs twice as fast)
    #[arg(long, global = true)]
    speed: Option<f64>,

    /// Seed for demo addresses and sizes
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print demo reports as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive console (default)
    Shell,

    /// Run the standard scenario: five allocations, three frees, two leaks
    Demo {
        #[arg(long, default_value_t = DEMO_SCENARIO_PID)]
        pid: u32,
    },

    /// Run the leak scenario: eight allocations, none freed
    Leak {
        #[arg(long, default_value_t = LEAK_SCENARIO_PID)]
        pid: u32,
    },

    /// Launch the standard scenario periodically until Ctrl+C
    Auto {
        /// Stop after this many ticks
        #[arg(long)]
        rounds: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut tracker_config = TrackerConfig::from_env();
    if cli.retain_exited {
        tracker_config = tracker_config.with_retain_exited(true);
    }
    if let Some(path) = &cli.log_file {
        tracker_config = tracker_config.with_event_log_path(path);
    }

    let mut demo_config = DemoConfig::from_env();
    if let Some(speed) = cli.speed {
        demo_config = demo_config.with_speed(speed);
    }
    if let Some(seed) = cli.seed {
        demo_config = demo_config.with_seed(seed);
    }

    let log_path = tracker_config.event_log_path.clone();
    let collector = Collector::new();
    let tracker = MemoryTracker::with_config(tracker_config).with_collector(collector.clone());

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let mut console = Console::new(tracker);
            drop(collector);
            let stdin = BufReader::new(tokio::io::stdin());
            run_repl(&mut console, stdin, tokio::io::stdout()).await?;
            if console.log().is_empty() {
                warn!("No events recorded; log not written");
            } else {
                console
                    .save_log(&log_path)
                    .with_context(|| format!("failed to write event log to {}", log_path.display()))?;
                println!("Event log written to {}", log_path.display());
            }
        }
        Commands::Demo { pid } => {
            let printer = spawn_printer(collector.subscribe());
            drop(collector);
            let mut runner = DemoRunner::new(tracker, demo_config);
            let report = runner.run(&Scenario::standard(pid)).await;
            drop(runner);
            print_report(&report, cli.json)?;
            save_log(printer, &log_path).await?;
        }
        Commands::Leak { pid } => {
            let printer = spawn_printer(collector.subscribe());
            drop(collector);
            let mut runner = DemoRunner::new(tracker, demo_config);
            let report = runner.run(&Scenario::memory_leak(pid)).await;
            drop(runner);
            print_report(&report, cli.json)?;
            save_log(printer, &log_path).await?;
        }
        Commands::Auto { rounds } => {
            let printer = spawn_printer(collector.subscribe());
            drop(collector);
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Shutdown requested");
                    let _ = shutdown_tx.send(true);
                }
            });

            let auto = AutoDemo::new(DemoRunner::new(tracker, demo_config), shutdown_rx);
            let reports = auto.run(rounds).await;
            for report in &reports {
                print_report(report, cli.json)?;
            }
            save_log(printer, &log_path).await?;
        }
    }

    Ok(())
}

/// Print events as they arrive and collect them into a log; finishes once
/// every collector handle is gone
fn spawn_printer(events: Subscriber) -> JoinHandle<EventLog> {
    tokio::spawn(async move {
        let mut log = EventLog::new();
        while let Some(event) = events.next_async().await {
            println!("{}", log.record(&event).render());
        }
        log
    })
}

async fn save_log(printer: JoinHandle<EventLog>, path: &Path) -> Result<()> {
    let log = printer.await.context("event printer task failed")?;
    if log.is_empty() {
        warn!("No events recorded; log not written");
        return Ok(());
    }
    log.write_to(path)
        .with_context(|| format!("failed to write event log to {}", path.display()))?;
    println!("Event log written to {}", path.display());
    Ok(())
}

fn print_report(report: &DemoReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "Scenario '{}' on PID {}: {} steps, {} failed",
        report.scenario,
        report.pid,
        report.steps_run,
        report.failures.len()
    );
    for failure in &report.failures {
        println!("  {} failed: {}", failure.action, failure.error);
    }
    if let Some(leaks) = &report.leak_report {
        println!(
            "  leaked {} bytes in {} allocations",
            leaks.leaked_bytes, leaks.leaked_count
        );
    }
    Ok(())
}
