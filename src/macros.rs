//! Logging macros.
//!
//! Every macro checks the logger's threshold before anything is captured.
//! Called with a format string, a macro appends the formatted message and
//! submits it at once. Called with only a logger, it returns a
//! [`ScopedLogBuilder`](crate::ScopedLogBuilder) that submits when it drops.
//!
//! # Examples
//!
//! ```
//! use pattern_logger::prelude::*;
//! use pattern_logger::{error, info};
//!
//! let logger = pattern_logger::root();
//!
//! // Formatted form
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Stream form
//! error!(logger).append("custom format ").append("dpmn");
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// use pattern_logger::log;
/// let logger = Logger::new("app");
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn).append("queue depth ").append(17);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr) => {
        $logger.scoped($level, file!(), line!())
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        // The match keeps temporaries in `$logger` alive until submission
        #[allow(clippy::match_single_binding)]
        match $logger.scoped($level, file!(), line!()) {
            mut builder => {
                builder.format(format_args!($($arg)+));
            }
        }
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// use pattern_logger::debug;
/// let logger = Logger::new("app");
/// debug!(logger, "Counter value: {}", 10);
/// debug!(logger).append("state=").append("ready");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr) => {
        $crate::log!($logger, $crate::LogLevel::Debug)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr) => {
        $crate::log!($logger, $crate::LogLevel::Info)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr) => {
        $crate::log!($logger, $crate::LogLevel::Warn)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// use pattern_logger::error;
/// let logger = Logger::new("app");
/// error!(logger, "Failed to connect to {}", "db-1");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr) => {
        $crate::log!($logger, $crate::LogLevel::Error)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr) => {
        $crate::log!($logger, $crate::LogLevel::Fatal)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
