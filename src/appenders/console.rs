//! Console appender implementation

use crate::core::{Appender, AppenderCore, Formatter, LogLevel, Result};
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;

/// Writes rendered lines to standard output.
///
/// Write errors on stdout are ignored; the console never reports failure.
pub struct ConsoleAppender {
    core: AppenderCore,
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            core: AppenderCore::new(),
            use_colors: false,
        }
    }

    /// Colour each line by its level
    ///
    /// # Example
    ///
    /// ```
    /// use pattern_logger::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::with_colors(true);
    /// ```
    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            core: AppenderCore::new(),
            use_colors,
        }
    }

    /// Set this appender's own threshold
    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.core.set_level(level);
        self
    }

    /// Use `pattern` instead of the attaching logger's default
    ///
    /// # Example
    ///
    /// ```
    /// use pattern_logger::appenders::ConsoleAppender;
    /// use pattern_logger::Appender;
    ///
    /// let appender = ConsoleAppender::new().with_pattern("%d%T%p%T%m%n");
    /// assert_eq!(appender.formatter().unwrap().pattern(), "%d%T%p%T%m%n");
    /// ```
    #[must_use]
    pub fn with_pattern(self, pattern: &str) -> Self {
        self.with_formatter(Arc::new(Formatter::new(pattern)))
    }

    #[must_use]
    pub fn with_formatter(self, formatter: Arc<Formatter>) -> Self {
        self.core.set_formatter(formatter);
        self
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn core(&self) -> &AppenderCore {
        &self.core
    }

    fn write_line(&self, level: LogLevel, line: &str) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        let _ = if self.use_colors {
            // Keep the line terminator outside the colour escape
            let body = line.trim_end_matches('\n');
            let tail = &line[body.len()..];
            write!(handle, "{}{}", body.color(level.color_code()), tail)
        } else {
            handle.write_all(line.as_bytes())
        };
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let _ = std::io::stdout().flush();
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
