//! Appender trait for log output destinations

use super::{
    error::Result, formatter::Formatter, log_event::LogEvent, log_level::LogLevel, logger::Logger,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

/// Used by appenders logging before any logger assigned them a formatter
static FALLBACK_FORMATTER: Lazy<Arc<Formatter>> = Lazy::new(|| Arc::new(Formatter::default()));

/// Threshold and formatter slot every appender carries
#[derive(Debug, Default)]
pub struct AppenderCore {
    level: RwLock<LogLevel>,
    formatter: RwLock<Option<Arc<Formatter>>>,
}

impl AppenderCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn formatter(&self) -> Option<Arc<Formatter>> {
        self.formatter.read().clone()
    }

    pub fn set_formatter(&self, formatter: Arc<Formatter>) {
        *self.formatter.write() = Some(formatter);
    }

    /// Install `formatter` only if none is set yet; returns whether it was installed
    pub fn set_formatter_if_absent(&self, formatter: &Arc<Formatter>) -> bool {
        let mut slot = self.formatter.write();
        if slot.is_some() {
            return false;
        }
        *slot = Some(Arc::clone(formatter));
        true
    }
}

/// A destination for formatted lines.
///
/// Implementors provide the write side; thresholds and formatting come from
/// the [`AppenderCore`] they expose. Appenders are shared between loggers
/// through `Arc`, so every method takes `&self`.
pub trait Appender: Send + Sync {
    fn core(&self) -> &AppenderCore;

    /// Write one fully rendered line
    fn write_line(&self, level: LogLevel, line: &str) -> Result<()>;

    fn flush(&self) -> Result<()>;

    fn name(&self) -> &str;

    fn level(&self) -> LogLevel {
        self.core().level()
    }

    fn set_level(&self, level: LogLevel) {
        self.core().set_level(level);
    }

    fn formatter(&self) -> Option<Arc<Formatter>> {
        self.core().formatter()
    }

    fn set_formatter(&self, formatter: Arc<Formatter>) {
        self.core().set_formatter(formatter);
    }

    /// Render `event` and write it if `level` passes this appender's threshold
    fn log(&self, logger: &Logger, level: LogLevel, event: &LogEvent<'_>) -> Result<()> {
        if level < self.level() {
            return Ok(());
        }

        let formatter = self
            .formatter()
            .unwrap_or_else(|| Arc::clone(&FALLBACK_FORMATTER));
        let line = formatter.format(logger, level, event);
        self.write_line(level, &line)
    }
}
