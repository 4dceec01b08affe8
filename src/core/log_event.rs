//! Log event structure

use super::log_level::LogLevel;
use super::logger::Logger;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Reference point for the elapsed-time field
static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

// Thread-local caches so capturing an event does not hit shared state
thread_local! {
    static THREAD_ID_CACHE: Cell<u64> = const { Cell::new(0) };
    static CURRENT_FIBER_ID: Cell<u64> = const { Cell::new(0) };
}

/// Small process-unique id for the calling thread, assigned on first use
pub fn current_thread_id() -> u64 {
    THREAD_ID_CACHE.with(|cache| {
        let cached = cache.get();
        if cached != 0 {
            return cached;
        }
        let id = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
        cache.set(id);
        id
    })
}

/// Fiber id recorded by schedulers running on this thread (0 when none)
pub fn current_fiber_id() -> u64 {
    CURRENT_FIBER_ID.with(Cell::get)
}

/// Record the fiber now running on this thread.
///
/// Cooperative schedulers call this on every switch so that events captured
/// inside the fiber carry its id.
pub fn set_current_fiber_id(id: u64) {
    CURRENT_FIBER_ID.with(|slot| slot.set(id));
}

/// Milliseconds since the logging epoch (first use of the logging system)
pub fn elapsed_millis() -> u64 {
    u64::try_from(EPOCH.elapsed().as_millis()).unwrap_or(u64::MAX)
}

pub(crate) fn init_epoch() {
    Lazy::force(&EPOCH);
}

/// One log occurrence.
///
/// Everything except the message buffer is fixed at construction. The
/// event borrows its logger; loggers outlive the events built against them.
pub struct LogEvent<'a> {
    logger: &'a Logger,
    level: LogLevel,
    file: &'static str,
    line: u32,
    elapse: u64,
    thread_id: u64,
    fiber_id: u64,
    timestamp: DateTime<Utc>,
    message: String,
}

impl<'a> LogEvent<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        logger: &'a Logger,
        level: LogLevel,
        file: &'static str,
        line: u32,
        elapse: u64,
        thread_id: u64,
        fiber_id: u64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            logger,
            level,
            file,
            line,
            elapse,
            thread_id,
            fiber_id,
            timestamp,
            message: String::new(),
        }
    }

    /// Build an event stamped with the calling thread, fiber and current time
    pub fn capture(logger: &'a Logger, level: LogLevel, file: &'static str, line: u32) -> Self {
        Self::new(
            logger,
            level,
            file,
            line,
            elapsed_millis(),
            current_thread_id(),
            current_fiber_id(),
            Utc::now(),
        )
    }

    pub fn logger(&self) -> &'a Logger {
        self.logger
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn elapse(&self) -> u64 {
        self.elapse
    }

    pub fn thread_id(&self) -> u64 {
        self.thread_id
    }

    pub fn fiber_id(&self) -> u64 {
        self.fiber_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The message body accumulated so far
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Append any displayable value to the message body
    pub fn append<T: fmt::Display>(&mut self, value: T) -> &mut Self {
        // Writing into a String only fails if the value's Display impl does
        let _ = fmt::Write::write_fmt(self, format_args!("{}", value));
        self
    }

    /// Expand pre-formatted arguments into the message body
    pub fn format(&mut self, args: fmt::Arguments<'_>) {
        let _ = fmt::Write::write_fmt(self, args);
    }
}

impl fmt::Write for LogEvent<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.message.push_str(s);
        Ok(())
    }
}

impl fmt::Debug for LogEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEvent")
            .field("logger", &self.logger.name())
            .field("level", &self.level)
            .field("file", &self.file)
            .field("line", &self.line)
            .field("elapse", &self.elapse)
            .field("thread_id", &self.thread_id)
            .field("fiber_id", &self.fiber_id)
            .field("timestamp", &self.timestamp)
            .field("message", &self.message)
            .finish()
    }
}
