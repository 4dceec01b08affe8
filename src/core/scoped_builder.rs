//! Scoped log builder
//!
//! Holds a [`LogEvent`] while the call site appends to it and submits the
//! event to its logger when the builder goes out of scope.

use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::logger::Logger;
use std::fmt;

/// Builds one log message and dispatches it on drop.
///
/// The threshold check happens before the builder exists (see
/// [`Logger::scoped`]); a builder created for a suppressed level is inert and
/// ignores everything appended to it.
///
/// # Example
///
/// ```
/// use pattern_logger::prelude::*;
///
/// let logger = Logger::new("app");
/// logger
///     .scoped(LogLevel::Info, file!(), line!())
///     .append("user ")
///     .append(42)
///     .append(" signed in");
/// ```
pub struct ScopedLogBuilder<'a> {
    event: Option<LogEvent<'a>>,
}

impl<'a> ScopedLogBuilder<'a> {
    /// Wrap an event; it is submitted to `event.logger()` on drop
    pub fn new(event: LogEvent<'a>) -> Self {
        Self { event: Some(event) }
    }

    /// A builder that discards appends and submits nothing
    pub fn disabled() -> Self {
        Self { event: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.event.is_some()
    }

    pub fn event(&self) -> Option<&LogEvent<'a>> {
        self.event.as_ref()
    }

    pub fn event_mut(&mut self) -> Option<&mut LogEvent<'a>> {
        self.event.as_mut()
    }

    /// Append a displayable value to the message
    pub fn append<T: fmt::Display>(&mut self, value: T) -> &mut Self {
        if let Some(event) = self.event.as_mut() {
            event.append(value);
        }
        self
    }

    /// Append `format_args!` output to the message
    pub fn format(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        if let Some(event) = self.event.as_mut() {
            event.format(args);
        }
        self
    }
}

impl fmt::Write for ScopedLogBuilder<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Some(event) = self.event.as_mut() {
            fmt::Write::write_str(event, s)?;
        }
        Ok(())
    }
}

impl Drop for ScopedLogBuilder<'_> {
    fn drop(&mut self) {
        if let Some(event) = self.event.take() {
            event.logger().log(event.level(), &event);
        }
    }
}

impl Logger {
    /// Open a builder for one event at `level`.
    ///
    /// Returns an inert builder without capturing anything when `level` is
    /// below this logger's threshold.
    pub fn scoped(&self, level: LogLevel, file: &'static str, line: u32) -> ScopedLogBuilder<'_> {
        if !self.enabled(level) {
            return ScopedLogBuilder::disabled();
        }
        ScopedLogBuilder::new(LogEvent::capture(self, level, file, line))
    }
}
