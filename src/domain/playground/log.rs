//! Append-only session log.

use std::fmt;

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One entry in the session log. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub index: usize,
    pub level: LogLevel,
    pub at: DateTime<Local>,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>4}] {} {:<5} {}",
            self.index,
            self.at.format("%Y-%m-%d %H:%M:%S"),
            self.level,
            self.message
        )
    }
}

/// Ordered log of everything that happened in a playground session.
///
/// Lines are only ever appended; indices are assigned monotonically from 0.
/// The log is kept for the whole session and is not bounded.
#[derive(Debug, Clone, Default)]
pub struct LogBook {
    lines: Vec<LogLine>,
}

impl LogBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line stamped with the current local time.
    pub fn append(&mut self, level: LogLevel, message: impl Into<String>) -> &LogLine {
        self.append_at(level, message, Local::now())
    }

    pub fn append_at(
        &mut self,
        level: LogLevel,
        message: impl Into<String>,
        at: DateTime<Local>,
    ) -> &LogLine {
        let index = self.lines.len();
        self.lines.push(LogLine { index, level, at, message: message.into() });
        &self.lines[index]
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// Lines appended at or after `index`.
    pub fn since(&self, index: usize) -> &[LogLine] {
        self.lines.get(index..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
