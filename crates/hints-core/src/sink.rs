//! User-facing output
//!
//! Hints and notices are emitted through an [`OutputSink`] passed into each
//! operation. There is no process-wide logger inside the core.
//!
//! User output is kept apart from diagnostic `tracing` events: a log filter
//! must never hide a hint whose progress has already been recorded.

use std::cell::RefCell;
use std::io::{self, Write};

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Hint text and informational notices
    Info,
    /// Recoverable user mistakes, e.g. an unknown task
    Warn,
}

/// Destination for messages shown to the user
pub trait OutputSink {
    /// Emit one message
    fn emit(&self, level: Level, message: &str);

    /// Emit at [`Level::Info`]
    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    /// Emit at [`Level::Warn`]
    fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }
}

/// Writes each message as one line to a writer
///
/// Warnings are prefixed with `warning: `.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: RefCell<W>,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterSink<io::Stdout> {
    /// Sink on the process's standard output
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn emit(&self, level: Level, message: &str) {
        let mut writer = self.writer.borrow_mut();
        let written = match level {
            Level::Info => writeln!(writer, "{message}"),
            Level::Warn => writeln!(writer, "warning: {message}"),
        };
        if let Err(err) = written.and_then(|()| writer.flush()) {
            tracing::error!(%err, "Failed to write output");
        }
    }
}
