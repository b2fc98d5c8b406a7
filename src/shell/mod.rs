/*!
 * Interactive Console
 *
 * Line-oriented front end over the tracker: parse a command, run it
 * against the tracker or the syscall surface, render the result. Tracker
 * events reach the console's event log through a collector subscription.
 */

mod command;
mod console;
mod render;
mod repl;

pub use command::{Command, ShellError, ShellResult};
pub use console::Console;
pub use render::{render_buckets, render_memory, render_processes, render_stats};
pub use repl::run_repl;
