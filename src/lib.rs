//! # Pattern Logger
//!
//! A pattern-driven logging library with named loggers, per-appender
//! thresholds and a process-wide registry.
//!
//! ## Features
//!
//! - **Layout Patterns**: `%d{%H:%M:%S} [%p] %c %m%n` style patterns, compiled once
//! - **Multiple Appenders**: Console and file output, each with its own level and pattern
//! - **Named Loggers**: A global registry with a console-backed `root` fallback
//! - **Thread Safe**: Loggers and appenders are shared across threads
//!
//! ## Quick Start
//!
//! ```
//! use pattern_logger::prelude::*;
//! use pattern_logger::{info, warn};
//!
//! let logger = Logger::builder()
//!     .name("app")
//!     .min_level(LogLevel::Info)
//!     .pattern("%d{%H:%M:%S} [%p] %c %m%n")
//!     .appender(ConsoleAppender::new())
//!     .build();
//!
//! info!(logger, "listening on {}", 8080);
//! warn!(logger).append("disk at ").append(91).append('%');
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        Appender, AppenderConfig, AppenderCore, FormatItem, Formatter, LogEvent, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, LoggerRegistry, Result,
        ScopedLogBuilder,
    };
}

pub use appenders::{ConsoleAppender, FileAppender};
pub use core::{
    compile, current_fiber_id, current_thread_id, elapsed_millis, get_logger, registry, root,
    set_current_fiber_id, Appender, AppenderConfig, AppenderCore, FormatItem, Formatter, LogEvent,
    LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, LoggerRegistry,
    Result, ScopedLogBuilder, DEFAULT_DATETIME_FORMAT, DEFAULT_PATTERN, PATTERN_ERROR,
    ROOT_LOGGER_NAME,
};
