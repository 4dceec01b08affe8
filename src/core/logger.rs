//! Main logger implementation

use super::{
    appender::Appender,
    error::Result,
    formatter::Formatter,
    log_event::LogEvent,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

type AppenderList = Arc<Vec<Arc<dyn Appender>>>;

/// A named severity gate in front of an ordered list of appenders.
///
/// Loggers are shared as `Arc<Logger>`; configuration methods take `&self`.
/// Dispatch iterates a snapshot of the appender list, so `log` only holds the
/// list lock long enough to clone an `Arc`.
pub struct Logger {
    name: String,
    min_level: RwLock<LogLevel>,
    appenders: RwLock<AppenderList>,
    /// Assigned to appenders that arrive without a formatter of their own
    formatter: RwLock<Arc<Formatter>>,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: RwLock::new(LogLevel::Debug),
            appenders: RwLock::new(Arc::new(Vec::new())),
            formatter: RwLock::new(Arc::new(Formatter::default())),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Process a log event with per-appender panic isolation
    ///
    /// Appender errors are counted and otherwise ignored so one broken sink
    /// cannot starve the others; panics are also reported on stderr.
    fn dispatch(&self, appenders: &[Arc<dyn Appender>], level: LogLevel, event: &LogEvent<'_>) {
        for (idx, appender) in appenders.iter().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.log(self, level, event)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(_)) => {
                    self.metrics.record_dropped();
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} ({}) of logger '{}' panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        appender.name(),
                        self.name,
                        panic_msg
                    );
                    self.metrics.record_dropped();
                }
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    /// Whether an event at `level` would pass this logger's threshold
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level()
    }

    pub fn formatter(&self) -> Arc<Formatter> {
        Arc::clone(&self.formatter.read())
    }

    /// Replace the default formatter.
    ///
    /// Only appenders attached afterwards pick it up; appenders already
    /// attached keep the formatter they were given.
    pub fn set_formatter(&self, formatter: Arc<Formatter>) {
        *self.formatter.write() = formatter;
    }

    pub fn set_pattern(&self, pattern: &str) {
        self.set_formatter(Arc::new(Formatter::new(pattern)));
    }

    /// Attach an appender at the end of the dispatch order.
    ///
    /// An appender without a formatter receives this logger's default.
    pub fn add_appender(&self, appender: Arc<dyn Appender>) {
        appender.core().set_formatter_if_absent(&self.formatter());

        let mut appenders = self.appenders.write();
        let mut updated = Vec::with_capacity(appenders.len() + 1);
        updated.extend(appenders.iter().cloned());
        updated.push(appender);
        *appenders = Arc::new(updated);
    }

    /// Detach the first appender that is the same instance as `appender`
    ///
    /// Returns `false` if it was not attached.
    pub fn remove_appender<A: Appender + ?Sized>(&self, appender: &Arc<A>) -> bool {
        let target = Arc::as_ptr(appender).cast::<()>();
        let mut appenders = self.appenders.write();
        let Some(pos) = appenders
            .iter()
            .position(|attached| Arc::as_ptr(attached).cast::<()>() == target)
        else {
            return false;
        };

        let mut updated: Vec<_> = appenders.iter().cloned().collect();
        updated.remove(pos);
        *appenders = Arc::new(updated);
        true
    }

    pub fn clear_appenders(&self) {
        *self.appenders.write() = Arc::new(Vec::new());
    }

    /// Snapshot of the attached appenders in dispatch order
    pub fn appenders(&self) -> AppenderList {
        Arc::clone(&self.appenders.read())
    }

    /// Forward `event` to every appender if `level` passes the threshold
    pub fn log(&self, level: LogLevel, event: &LogEvent<'_>) {
        if !self.enabled(level) {
            self.metrics.record_suppressed();
            return;
        }

        let appenders = self.appenders();
        self.dispatch(&appenders, level, event);
        self.metrics.record_logged();
    }

    #[inline]
    pub fn debug(&self, event: &LogEvent<'_>) {
        self.log(LogLevel::Debug, event);
    }

    #[inline]
    pub fn info(&self, event: &LogEvent<'_>) {
        self.log(LogLevel::Info, event);
    }

    #[inline]
    pub fn warn(&self, event: &LogEvent<'_>) {
        self.log(LogLevel::Warn, event);
    }

    #[inline]
    pub fn error(&self, event: &LogEvent<'_>) {
        self.log(LogLevel::Error, event);
    }

    #[inline]
    pub fn fatal(&self, event: &LogEvent<'_>) {
        self.log(LogLevel::Fatal, event);
    }

    pub fn flush(&self) -> Result<()> {
        for appender in self.appenders().iter() {
            appender.flush()?;
        }
        Ok(())
    }

    /// Dispatch counters for this logger
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Number of appender writes that failed or panicked
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use pattern_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .name("app")
    ///     .min_level(LogLevel::Info)
    ///     .pattern("%d [%p] %c %m%n")
    ///     .build();
    /// assert_eq!(logger.name(), "app");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new("root")
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("min_level", &self.min_level())
            .field("appenders", &self.appenders.read().len())
            .field("pattern", &self.formatter.read().pattern())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush logger '{}' during shutdown: {}", self.name, e);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use pattern_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .name("net")
///     .min_level(LogLevel::Warn)
///     .appender(ConsoleAppender::new())
///     .build();
/// assert_eq!(logger.appenders().len(), 1);
/// ```
pub struct LoggerBuilder {
    name: String,
    min_level: LogLevel,
    formatter: Option<Arc<Formatter>>,
    appenders: Vec<Arc<dyn Appender>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: "root".to_string(),
            min_level: LogLevel::Debug,
            formatter: None,
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the default pattern handed to appenders without one
    #[must_use = "builder methods return a new value"]
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.formatter = Some(Arc::new(Formatter::new(pattern)));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Arc<Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Arc::new(appender));
        self
    }

    /// Add an appender that is also attached elsewhere
    #[must_use = "builder methods return a new value"]
    pub fn shared_appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let logger = Logger::new(self.name);
        logger.set_min_level(self.min_level);
        if let Some(formatter) = self.formatter {
            logger.set_formatter(formatter);
        }
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
