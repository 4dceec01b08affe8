//! File appender implementation

use crate::core::{Appender, AppenderCore, Formatter, LogLevel, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Appends rendered lines to a file.
///
/// The handle is shared by every thread logging through this appender;
/// writes are serialized so lines never interleave, and output is flushed
/// at every line terminator. Once the handle is closed or a reopen fails,
/// lines are dropped until a reopen succeeds.
pub struct FileAppender {
    core: AppenderCore,
    path: PathBuf,
    writer: Mutex<Option<LineWriter<File>>>,
}

impl FileAppender {
    /// Open `path` in append mode, creating it if needed
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let writer = Self::open(&path)
            .map_err(|e| LoggerError::file_appender(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            core: AppenderCore::new(),
            path,
            writer: Mutex::new(Some(writer)),
        })
    }

    fn open(path: &Path) -> std::io::Result<LineWriter<File>> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(LineWriter::new(file))
    }

    /// Set this appender's own threshold
    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.core.set_level(level);
        self
    }

    /// Use `pattern` instead of the attaching logger's default
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pattern_logger::appenders::FileAppender;
    /// use pattern_logger::LogLevel;
    ///
    /// let appender = FileAppender::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_level(LogLevel::Error)
    ///     .with_pattern("%d%T%p%T%m%n");
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

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.writer.lock().is_some()
    }

    /// Close any open handle and open the file again in append mode.
    ///
    /// Returns whether the new handle is usable.
    pub fn reopen(&self) -> bool {
        let mut writer = self.writer.lock();
        if let Some(mut old) = writer.take() {
            let _ = old.flush();
        }
        *writer = Self::open(&self.path).ok();
        writer.is_some()
    }

    /// Flush and release the handle; later lines are dropped until `reopen`
    pub fn close(&self) {
        if let Some(mut old) = self.writer.lock().take() {
            let _ = old.flush();
        }
    }
}

impl Appender for FileAppender {
    fn core(&self) -> &AppenderCore {
        &self.core
    }

    fn write_line(&self, _level: LogLevel, line: &str) -> Result<()> {
        let mut guard = self.writer.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File handle is closed"))?;

        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(ref mut writer) = *self.writer.lock() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Push out a trailing partial line
        let _ = self.flush();
    }
}
