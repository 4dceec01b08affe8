//! Declarative logger configuration
//!
//! Loggers can be described in JSON and applied to a
//! [`LoggerRegistry`](super::registry::LoggerRegistry):
//!
//! ```json
//! [
//!   {
//!     "name": "system",
//!     "level": "INFO",
//!     "pattern": "%d%T[%p]%T%c%T%m%n",
//!     "appenders": [
//!       { "type": "console" },
//!       { "type": "file", "path": "/var/log/system.log", "level": "ERROR" }
//!     ]
//!   }
//! ]
//! ```
//!
//! Unlike patterns built in code, configured patterns must compile cleanly;
//! a pattern with error markers is rejected when the config is applied.

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    formatter::Formatter,
    log_level::LogLevel,
    logger::Logger,
};
use crate::appenders::{ConsoleAppender, FileAppender};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One logger and its appenders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    pub name: String,
    #[serde(default)]
    pub level: LogLevel,
    /// Default pattern for appenders that do not set their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default)]
    pub appenders: Vec<AppenderConfig>,
}

/// One appender, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AppenderConfig {
    Console {
        #[serde(default)]
        level: LogLevel,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
        #[serde(default)]
        colors: bool,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        level: LogLevel,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
}

/// Compile `pattern`, refusing anything that produced error markers
fn checked_formatter(pattern: &str) -> Result<Arc<Formatter>> {
    let formatter = Formatter::new(pattern);
    if formatter.is_error() {
        return Err(LoggerError::invalid_pattern(pattern));
    }
    Ok(Arc::new(formatter))
}

impl AppenderConfig {
    pub fn build(&self) -> Result<Arc<dyn Appender>> {
        match self {
            AppenderConfig::Console {
                level,
                pattern,
                colors,
            } => {
                let mut appender = ConsoleAppender::with_colors(*colors).with_level(*level);
                if let Some(pattern) = pattern {
                    appender = appender.with_formatter(checked_formatter(pattern)?);
                }
                Ok(Arc::new(appender))
            }
            AppenderConfig::File {
                path,
                level,
                pattern,
            } => {
                // Check the pattern before touching the file system
                let formatter = pattern.as_deref().map(checked_formatter).transpose()?;
                let mut appender = FileAppender::new(path)?.with_level(*level);
                if let Some(formatter) = formatter {
                    appender = appender.with_formatter(formatter);
                }
                Ok(Arc::new(appender))
            }
        }
    }
}

impl LoggerConfig {
    /// Parse a JSON array of logger configs
    pub fn list_from_json(json: &str) -> Result<Vec<LoggerConfig>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn list_from_file(path: impl AsRef<Path>) -> Result<Vec<LoggerConfig>> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::config("LoggerConfig", format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::list_from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "logger name must not be empty"));
        }
        if let Some(pattern) = &self.pattern {
            checked_formatter(pattern)?;
        }
        Ok(())
    }

    /// Build a fresh logger from this config
    pub fn build(&self) -> Result<Logger> {
        let logger = Logger::new(self.name.clone());
        self.apply_to(&logger)?;
        Ok(logger)
    }

    /// Replace `logger`'s level, default pattern and appenders.
    ///
    /// Everything is built before `logger` is touched, so a failing config
    /// leaves it unchanged.
    pub fn apply_to(&self, logger: &Logger) -> Result<()> {
        self.validate()?;
        let formatter = self.pattern.as_deref().map(checked_formatter).transpose()?;
        let appenders = self
            .appenders
            .iter()
            .map(AppenderConfig::build)
            .collect::<Result<Vec<_>>>()?;

        logger.set_min_level(self.level);
        if let Some(formatter) = formatter {
            logger.set_formatter(formatter);
        }
        logger.clear_appenders();
        for appender in appenders {
            logger.add_appender(appender);
        }
        Ok(())
    }
}
