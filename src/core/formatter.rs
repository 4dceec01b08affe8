//! Compiled log patterns
//!
//! A [`Formatter`] owns the pattern it was built from and the sequence of
//! [`FormatItem`]s the pattern compiled to. Rendering runs every item in
//! order against one event and concatenates the output.

use super::log_event::LogEvent;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::pattern;
use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use std::fmt::Write;

/// Layout used by loggers that were not given a pattern
pub const DEFAULT_PATTERN: &str = "%d{%Y-%m-%d %H:%M:%S}\t%t\t%F\t[%p]\t[%c]\t%f:%l\t%m\n";

/// strftime layout for `%d` without an argument
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One unit of a compiled pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatItem {
    /// `%m` message body
    Message,
    /// `%p` level name
    Level,
    /// `%r` milliseconds since the logging epoch
    Elapsed,
    /// `%c` logger name
    LoggerName,
    /// `%t` thread id
    ThreadId,
    /// `%F` fiber id
    FiberId,
    /// `%d{fmt}` local wall-clock time of the event
    DateTime(String),
    /// `%f` source file
    Filename,
    /// `%l` source line
    Line,
    /// `%n`
    NewLine,
    /// `%T`
    Tab,
    /// Text copied from the pattern
    Literal(String),
    /// Marker text for a directive that could not be compiled
    ErrorPlaceholder(String),
}

impl FormatItem {
    /// Resolve a directive key and its (possibly empty) argument
    pub fn from_directive(key: &str, argument: &str) -> Self {
        match key {
            "m" => FormatItem::Message,
            "p" => FormatItem::Level,
            "r" => FormatItem::Elapsed,
            "c" => FormatItem::LoggerName,
            "t" => FormatItem::ThreadId,
            "F" => FormatItem::FiberId,
            "d" => FormatItem::date_time(argument),
            "f" => FormatItem::Filename,
            "l" => FormatItem::Line,
            "n" => FormatItem::NewLine,
            "T" => FormatItem::Tab,
            _ => FormatItem::ErrorPlaceholder(format!("<<error_format %{}>>", key)),
        }
    }

    /// Date-time item for a strftime layout; an empty layout means the default.
    ///
    /// Layouts chrono cannot parse, or parses but cannot render, compile to
    /// an error marker instead.
    pub fn date_time(layout: &str) -> Self {
        let layout = if layout.is_empty() {
            DEFAULT_DATETIME_FORMAT
        } else {
            layout
        };

        let unparsable = StrftimeItems::new(layout).any(|item| matches!(item, Item::Error));
        // Some specifiers parse but fail when rendered, e.g. `%#z`
        let unrenderable = || write!(String::new(), "{}", Local::now().format(layout)).is_err();
        if unparsable || unrenderable() {
            return FormatItem::ErrorPlaceholder(format!("<<error_format %d{{{}}}>>", layout));
        }
        FormatItem::DateTime(layout.to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FormatItem::ErrorPlaceholder(_))
    }

    /// Append this item's rendering of `event` to `out`
    pub fn render(&self, out: &mut String, logger: &Logger, level: LogLevel, event: &LogEvent<'_>) {
        // Writes into a String cannot fail; layouts were test-rendered when compiled
        match self {
            FormatItem::Message => out.push_str(event.message()),
            FormatItem::Level => out.push_str(level.to_str()),
            FormatItem::Elapsed => {
                let _ = write!(out, "{}", event.elapse());
            }
            FormatItem::LoggerName => out.push_str(logger.name()),
            FormatItem::ThreadId => {
                let _ = write!(out, "{}", event.thread_id());
            }
            FormatItem::FiberId => {
                let _ = write!(out, "{}", event.fiber_id());
            }
            FormatItem::DateTime(layout) => {
                let local = event.timestamp().with_timezone(&Local);
                let _ = write!(out, "{}", local.format(layout));
            }
            FormatItem::Filename => out.push_str(event.file()),
            FormatItem::Line => {
                let _ = write!(out, "{}", event.line());
            }
            FormatItem::NewLine => out.push('\n'),
            FormatItem::Tab => out.push('\t'),
            FormatItem::Literal(text) | FormatItem::ErrorPlaceholder(text) => out.push_str(text),
        }
    }
}

/// A compiled pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    pattern: String,
    items: Vec<FormatItem>,
}

impl Formatter {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let items = pattern::compile(&pattern);
        Self { pattern, items }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn items(&self) -> &[FormatItem] {
        &self.items
    }

    /// Whether the pattern compiled with any error markers
    pub fn is_error(&self) -> bool {
        self.items.iter().any(FormatItem::is_error)
    }

    /// Render one line for `event` as seen through `logger`
    pub fn format(&self, logger: &Logger, level: LogLevel, event: &LogEvent<'_>) -> String {
        let mut out = String::with_capacity(self.pattern.len() + event.message().len() + 32);
        self.format_to(&mut out, logger, level, event);
        out
    }

    pub fn format_to(&self, out: &mut String, logger: &Logger, level: LogLevel, event: &LogEvent<'_>) {
        for item in &self.items {
            item.render(out, logger, level, event);
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixed_event(logger: &Logger) -> LogEvent<'_> {
        let timestamp = Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        let mut event = LogEvent::new(logger, LogLevel::Warn, "src/main.rs", 42, 1500, 7, 3, timestamp);
        event.append("disk almost full");
        event
    }

    #[test]
    fn test_message_newline() {
        let logger = Logger::new("root");
        let timestamp = Utc::now();
        let mut event = LogEvent::new(&logger, LogLevel::Info, "a.rs", 1, 0, 1, 0, timestamp);
        event.append("hello");

        let formatter = Formatter::new("%m%n");
        assert_eq!(formatter.format(&logger, LogLevel::Info, &event), "hello\n");
    }

    #[test]
    fn test_all_fields() {
        let logger = Logger::new("storage");
        let event = fixed_event(&logger);

        let formatter = Formatter::new("%p|%c|%r|%t|%F|%f:%l|%m%T.");
        assert_eq!(
            formatter.format(&logger, LogLevel::Warn, &event),
            "WARN|storage|1500|7|3|src/main.rs:42|disk almost full\t."
        );
    }

    #[test]
    fn test_level_comes_from_argument() {
        let logger = Logger::new("root");
        let event = fixed_event(&logger);

        let formatter = Formatter::new("%p");
        assert_eq!(formatter.format(&logger, LogLevel::Fatal, &event), "FATAL");
    }

    #[test]
    fn test_datetime_uses_event_time() {
        let logger = Logger::new("root");
        let event = fixed_event(&logger);
        let expected = event
            .timestamp()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();

        let formatter = Formatter::new("%d");
        let first = formatter.format(&logger, LogLevel::Warn, &event);
        let second = formatter.format(&logger, LogLevel::Warn, &event);

        assert_eq!(first, expected);
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_pattern() {
        let logger = Logger::new("app");
        let event = fixed_event(&logger);
        let line = Formatter::default().format(&logger, LogLevel::Warn, &event);

        let fields: Vec<&str> = line.trim_end_matches('\n').split('\t').collect();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[1], "7");
        assert_eq!(fields[2], "3");
        assert_eq!(fields[3], "[WARN]");
        assert_eq!(fields[4], "[app]");
        assert_eq!(fields[5], "src/main.rs:42");
        assert_eq!(fields[6], "disk almost full");
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_error_markers_render_in_band() {
        let logger = Logger::new("root");
        let event = fixed_event(&logger);

        let unknown = Formatter::new("[%Z] %m");
        assert!(unknown.is_error());
        assert_eq!(
            unknown.format(&logger, LogLevel::Warn, &event),
            "[<<error_format %Z>>] disk almost full"
        );

        let unterminated = Formatter::new("%m %d{%Y");
        assert!(unterminated.is_error());
        assert!(unterminated
            .format(&logger, LogLevel::Warn, &event)
            .contains("<<pattern_error>>"));
    }

    #[test]
    fn test_invalid_datetime_layout() {
        let item = FormatItem::date_time("%Q");
        assert!(item.is_error());
    }

    #[test]
    fn test_unrenderable_datetime_layout() {
        let logger = Logger::new("root");
        let event = fixed_event(&logger);

        assert_eq!(
            FormatItem::date_time("%Y%#z"),
            FormatItem::ErrorPlaceholder("<<error_format %d{%Y%#z}>>".to_string())
        );

        let formatter = Formatter::new("[%d{%Y%#z}]%m");
        assert!(formatter.is_error());
        assert_eq!(
            formatter.format(&logger, LogLevel::Warn, &event),
            "[<<error_format %d{%Y%#z}>>]disk almost full"
        );
        assert!(FormatItem::date_time("%#z").is_error());
        assert!(!FormatItem::date_time("%Y-%m-%d").is_error());
    }

    #[test]
    fn test_same_pattern_same_items() {
        let a = Formatter::new(DEFAULT_PATTERN);
        let b = Formatter::new(DEFAULT_PATTERN);
        assert_eq!(a.items(), b.items());
        assert!(!a.is_error());
    }
}
