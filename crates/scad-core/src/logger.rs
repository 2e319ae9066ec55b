//! In-memory log sink for user-visible output
//!
//! `echo` output, unknown-identifier warnings and failures all land here. The
//! handle is cheap to clone and every clone appends to the same buffer. Each
//! entry is mirrored to `tracing` so embedders see it in their own logs.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warning",
            LogLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            LogLevel::Error => write!(f, "ERROR: {}", self.message),
            LogLevel::Warn => write!(f, "WARNING: {}", self.message),
            LogLevel::Info => write!(f, "{}", self.message),
        }
    }
}

/// Append-only log shared by every clone of the handle
#[derive(Debug, Clone, Default)]
pub struct Logger {
    entries: Rc<RefCell<Vec<LogEntry>>>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(target: "scad", "{message}");
        self.push(LogLevel::Error, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(target: "scad", "{message}");
        self.push(LogLevel::Warn, message);
    }

    /// Informational output, such as `echo` lines
    pub fn log(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "scad", "{message}");
        self.push(LogLevel::Info, message);
    }

    fn push(&self, level: LogLevel, message: String) {
        self.entries.borrow_mut().push(LogEntry { level, message });
    }

    fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(LogLevel::Error)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(LogLevel::Warn)
    }

    pub fn logs(&self) -> Vec<String> {
        self.messages(LogLevel::Info)
    }

    /// Every entry in the order it was appended
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Rendered lines, warnings and errors prefixed with their level
    pub fn lines(&self) -> Vec<String> {
        self.entries.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_errors() {
        let logger = Logger::new();
        logger.error("String 1");
        logger.error("String 2");

        assert_eq!(logger.errors(), vec!["String 1", "String 2"]);
        assert!(logger.logs().is_empty());
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_two_infos() {
        let logger = Logger::new();
        logger.log("String 1");
        logger.log("String 2");

        assert!(logger.errors().is_empty());
        assert_eq!(logger.logs(), vec!["String 1", "String 2"]);
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_two_warnings() {
        let logger = Logger::new();
        logger.warn("String 1");
        logger.warn("String 2");

        assert!(logger.errors().is_empty());
        assert!(logger.logs().is_empty());
        assert_eq!(logger.warnings(), vec!["String 1", "String 2"]);
    }

    #[test]
    fn test_clones_share_buffer_and_keep_order() {
        let logger = Logger::new();
        let other = logger.clone();
        logger.log("ECHO: 1");
        other.warn("Ignoring unknown variable 'x'.");
        logger.error("boom");

        assert_eq!(
            logger.lines(),
            vec![
                "ECHO: 1",
                "WARNING: Ignoring unknown variable 'x'.",
                "ERROR: boom"
            ]
        );
        assert_eq!(other.entries().len(), 3);
        assert_eq!(other.entries()[1].level, LogLevel::Warn);
    }
}
