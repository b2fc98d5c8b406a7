/*!
 * Collection
 * Central entry point through which tracker events are published
 */

mod collector;

pub use collector::Collector;
