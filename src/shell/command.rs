/*!
 * Console Commands
 * Text line to `Command` parsing
 */

use crate::core::errors::TrackerError;
use crate::core::types::{RawPid, RawSize};
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Error, Debug, Diagnostic)]
pub enum ShellError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    #[diagnostic(code(shell::unknown_command), help("Type 'help' to see available commands."))]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    #[diagnostic(code(shell::usage))]
    Usage(&'static str),

    #[error("Invalid {field}: {value}")]
    #[diagnostic(code(shell::invalid_number), help("Expected a whole number."))]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Tracker(#[from] TrackerError),

    #[error("I/O error: {0}")]
    #[diagnostic(code(shell::io))]
    Io(#[from] std::io::Error),
}

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(RawPid),
    Select(RawPid),
    Start(RawPid),
    Alloc {
        pid: RawPid,
        address: String,
        size: RawSize,
    },
    Free {
        pid: RawPid,
        address: String,
    },
    /// Raw `track_user_memory` call
    Syscall {
        pid: RawPid,
        operation: i64,
        address: Option<String>,
        size: Option<RawSize>,
    },
    /// Kill the given PID, or the selected process
    Kill(Option<RawPid>),
    Ps,
    Mem(Option<RawPid>),
    Buckets,
    Stats,
    Log,
    ClearLog,
    Save(Option<PathBuf>),
    Reset,
    Help,
    Exit,
}

impl Command {
    pub fn parse(line: &str) -> ShellResult<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = parts.first() else {
            return Err(ShellError::Empty);
        };
        let args = &parts[1..];

        let command = match first.to_lowercase().as_str() {
            "create" => Command::Create(pid_arg(args, "create <pid>")?),
            "select" => Command::Select(pid_arg(args, "select <pid>")?),
            "start" => Command::Start(pid_arg(args, "start <pid>")?),
            "alloc" => match args {
                [pid, address, size] => Command::Alloc {
                    pid: number("pid", pid)?,
                    address: (*address).to_string(),
                    size: number("size", size)?,
                },
                _ => return Err(ShellError::Usage("alloc <pid> <address> <size>")),
            },
            "free" => match args {
                [pid, address] => Command::Free {
                    pid: number("pid", pid)?,
                    address: (*address).to_string(),
                },
                _ => return Err(ShellError::Usage("free <pid> <address>")),
            },
            "syscall" => {
                const USAGE: &str = "syscall <pid> <op> [address] [size]";
                if args.len() < 2 || args.len() > 4 {
                    return Err(ShellError::Usage(USAGE));
                }
                Command::Syscall {
                    pid: number("pid", args[0])?,
                    operation: number("operation", args[1])?,
                    address: args.get(2).map(|a| (*a).to_string()),
                    size: args.get(3).map(|s| number("size", s)).transpose()?,
                }
            }
            "kill" => match args {
                [] => Command::Kill(None),
                [pid] => Command::Kill(Some(number("pid", pid)?)),
                _ => return Err(ShellError::Usage("kill [pid]")),
            },
            "ps" => Command::Ps,
            "mem" => match args {
                [] => Command::Mem(None),
                [pid] => Command::Mem(Some(number("pid", pid)?)),
                _ => return Err(ShellError::Usage("mem [pid]")),
            },
            "buckets" => Command::Buckets,
            "stats" => Command::Stats,
            "log" => Command::Log,
            "clear-log" => Command::ClearLog,
            "save" => match args {
                [] => Command::Save(None),
                [path] => Command::Save(Some(PathBuf::from(path))),
                _ => return Err(ShellError::Usage("save [path]")),
            },
            "reset" => Command::Reset,
            "help" | "h" | "?" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

fn pid_arg(args: &[&str], usage: &'static str) -> ShellResult<RawPid> {
    match args {
        [pid] => number("pid", pid),
        _ => Err(ShellError::Usage(usage)),
    }
}

fn number(field: &'static str, value: &str) -> ShellResult<i64> {
    value.parse().map_err(|_| ShellError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

pub(super) const HELP: &str = "\
Commands:
  create <pid>                        create a process
  select <pid>                        select a process for kill/mem
  start <pid>                         start tracking (syscall op 0)
  alloc <pid> <address> <size>        track an allocation (op 1)
  free <pid> <address>                track a deallocation (op 2)
  syscall <pid> <op> [address] [size] raw track_user_memory call
  kill [pid]                          exit a process and report leaks
  ps                                  list processes
  mem [pid]                           show tracked allocations
  buckets                             show hash bucket occupancy
  stats                               show tracker statistics
  log                                 show the event log
  clear-log                           clear the event log
  save [path]                         write the event log to a file
  reset                               clear all state
  help                                show this help
  exit                                leave the console";
