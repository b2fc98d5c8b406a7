/*!
 * Event Log
 * Append-only narrative of tracker events with plain-text export
 */

use super::events::{EntryKind, Event};
use serde::{Deserialize, Serialize};
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

/// One rendered log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(with = "time::serde::timestamp")]
    pub timestamp: OffsetDateTime,
    pub kind: EntryKind,
    pub message: String,
}

impl LogEntry {
    /// `[<RFC 3339 timestamp>] <message>`
    pub fn render(&self) -> String {
        let stamp = self
            .timestamp
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.timestamp.unix_timestamp().to_string());
        format!("[{}] {}", stamp, self.message)
    }
}

/// Append-only event log
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the narrative line for a tracker event
    pub fn record(&mut self, event: &Event) -> &LogEntry {
        self.append(event.timestamp, event.kind(), event.message())
    }

    /// Append a free-form line stamped now
    pub fn push(&mut self, kind: EntryKind, message: impl Into<String>) -> &LogEntry {
        self.append(OffsetDateTime::now_utc(), kind, message.into())
    }

    fn append(&mut self, timestamp: OffsetDateTime, kind: EntryKind, message: String) -> &LogEntry {
        self.entries.push(LogEntry {
            timestamp,
            kind,
            message,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries of one kind, in log order
    pub fn of_kind(&self, kind: EntryKind) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Rendered lines joined by newlines, without a trailing newline
    pub fn export(&self) -> String {
        self.entries
            .iter()
            .map(LogEntry::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the exported log as a plain-text file
    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.export())?;
        info!(path = %path.display(), entries = self.entries.len(), "Event log saved");
        Ok(())
    }
}
