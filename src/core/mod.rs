//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod pattern;
pub mod registry;
pub mod scoped_builder;

pub use appender::{Appender, AppenderCore};
pub use config::{AppenderConfig, LoggerConfig};
pub use error::{LoggerError, Result};
pub use formatter::{FormatItem, Formatter, DEFAULT_DATETIME_FORMAT, DEFAULT_PATTERN};
pub use log_event::{
    current_fiber_id, current_thread_id, elapsed_millis, set_current_fiber_id, LogEvent,
};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use pattern::{compile, PATTERN_ERROR};
pub use registry::{get_logger, registry, root, LoggerRegistry, ROOT_LOGGER_NAME};
pub use scoped_builder::ScopedLogBuilder;
