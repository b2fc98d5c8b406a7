/*!
 * Demo Choreography
 *
 * Scripted, timed scenarios that drive the tracker the way a user clicking
 * through the simulator would. Timing lives entirely here; every step is a
 * single synchronous tracker call.
 */

mod generator;
mod runner;
mod scenario;

pub use generator::AddressGenerator;
pub use runner::{AutoDemo, DemoReport, DemoRunner, StepFailure};
pub use scenario::{default_leak_scenario, DemoAction, Scenario, Step};
