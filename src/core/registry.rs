//! Named logger registry
//!
//! A [`LoggerRegistry`] maps names to shared loggers and always holds a
//! `root` logger writing to the console. Looking up a name that was never
//! registered yields the root logger.
//!
//! The process-wide instance behind [`registry`], [`get_logger`] and [`root`]
//! is created on first access and lives until the process exits. Statics are
//! not dropped at exit, so call [`LoggerRegistry::flush`] before exiting if an
//! appender may hold a partial line.

use super::{
    config::LoggerConfig,
    error::{LoggerError, Result},
    log_event,
    logger::Logger,
};
use crate::appenders::ConsoleAppender;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

pub const ROOT_LOGGER_NAME: &str = "root";

static REGISTRY: Lazy<LoggerRegistry> = Lazy::new(LoggerRegistry::new);

/// The process-wide registry
pub fn registry() -> &'static LoggerRegistry {
    &REGISTRY
}

/// Look up `name` in the process-wide registry, falling back to root
pub fn get_logger(name: &str) -> Arc<Logger> {
    REGISTRY.get_logger(name)
}

/// The process-wide root logger
pub fn root() -> Arc<Logger> {
    REGISTRY.root()
}

pub struct LoggerRegistry {
    root: Arc<Logger>,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    /// A registry whose root logger has one console appender
    pub fn new() -> Self {
        log_event::init_epoch();

        let root = Arc::new(Logger::new(ROOT_LOGGER_NAME));
        root.add_appender(Arc::new(ConsoleAppender::new()));

        Self {
            root,
            loggers: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// The logger registered as `name`, or the root logger
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        self.loggers
            .lock()
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.root())
    }

    pub fn contains(&self, name: &str) -> bool {
        name == ROOT_LOGGER_NAME || self.loggers.lock().contains_key(name)
    }

    /// The logger registered as `name`, creating an empty one if needed.
    ///
    /// New loggers start with no appenders.
    pub fn create_logger(&self, name: &str) -> Arc<Logger> {
        if name == ROOT_LOGGER_NAME {
            return self.root();
        }
        let mut loggers = self.loggers.lock();
        Arc::clone(
            loggers
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(Logger::new(name))),
        )
    }

    /// Register `logger` under its own name, returning the logger it replaced
    pub fn register(&self, logger: Arc<Logger>) -> Result<Option<Arc<Logger>>> {
        if logger.name() == ROOT_LOGGER_NAME {
            return Err(LoggerError::config(
                "LoggerRegistry",
                "the root logger cannot be replaced; configure it in place",
            ));
        }
        Ok(self.loggers.lock().insert(logger.name().to_string(), logger))
    }

    /// Names of all registered loggers, root included, sorted
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.push(ROOT_LOGGER_NAME.to_string());
        names.sort();
        names
    }

    /// Build and register loggers from configs.
    ///
    /// A config named `root` reconfigures the root logger in place. Configs
    /// are applied in order; the first failure stops the run.
    pub fn configure(&self, configs: &[LoggerConfig]) -> Result<()> {
        for config in configs {
            if config.name == ROOT_LOGGER_NAME {
                config.apply_to(&self.root)?;
            } else {
                self.register(Arc::new(config.build()?))?;
            }
        }
        Ok(())
    }

    /// Flush every appender of every registered logger
    pub fn flush(&self) -> Result<()> {
        self.root.flush()?;
        let loggers: Vec<Arc<Logger>> = self.loggers.lock().values().cloned().collect();
        for logger in loggers {
            logger.flush()?;
        }
        Ok(())
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::AppenderConfig, LogLevel};
    use tempfile::TempDir;

    #[test]
    fn test_root_has_console_appender() {
        let registry = LoggerRegistry::new();
        let root = registry.root();

        assert_eq!(root.name(), ROOT_LOGGER_NAME);
        let appenders = root.appenders();
        assert_eq!(appenders.len(), 1);
        assert_eq!(appenders[0].name(), "console");
    }

    #[test]
    fn test_unknown_name_falls_back_to_root() {
        let registry = LoggerRegistry::new();
        let found = registry.get_logger("unregistered-name");

        assert!(Arc::ptr_eq(&found, &registry.root()));
        assert!(!registry.contains("unregistered-name"));
    }

    #[test]
    fn test_create_logger_is_idempotent() {
        let registry = LoggerRegistry::new();
        let first = registry.create_logger("db");
        let second = registry.create_logger("db");

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &registry.get_logger("db")));
        assert!(first.appenders().is_empty());
        assert!(Arc::ptr_eq(&registry.create_logger("root"), &registry.root()));
    }

    #[test]
    fn test_register_replaces() {
        let registry = LoggerRegistry::new();
        let old = registry.create_logger("net");

        let replaced = registry.register(Arc::new(Logger::new("net"))).unwrap();
        assert!(Arc::ptr_eq(&replaced.unwrap(), &old));
        assert!(!Arc::ptr_eq(&registry.get_logger("net"), &old));

        assert!(registry.register(Arc::new(Logger::new("root"))).is_err());
        assert_eq!(registry.logger_names(), vec!["net".to_string(), "root".to_string()]);
    }

    #[test]
    fn test_configure() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let registry = LoggerRegistry::new();
        let configs = vec![
            LoggerConfig {
                name: "root".to_string(),
                level: LogLevel::Warn,
                pattern: None,
                appenders: vec![AppenderConfig::Console {
                    level: LogLevel::Debug,
                    pattern: Some("%p %m%n".to_string()),
                    colors: false,
                }],
            },
            LoggerConfig {
                name: "audit".to_string(),
                level: LogLevel::Info,
                pattern: Some("%m%n".to_string()),
                appenders: vec![AppenderConfig::File {
                    path: temp_dir.path().join("audit.log"),
                    level: LogLevel::Debug,
                    pattern: None,
                }],
            },
        ];

        let root_before = registry.root();
        registry.configure(&configs).unwrap();

        assert!(Arc::ptr_eq(&root_before, &registry.root()));
        assert_eq!(registry.root().min_level(), LogLevel::Warn);
        let audit = registry.get_logger("audit");
        assert_eq!(audit.name(), "audit");
        assert_eq!(audit.appenders()[0].name(), "file");
        registry.flush().unwrap();
    }

    #[test]
    fn test_global_registry() {
        let logger = get_logger("never-created-anywhere");
        assert!(Arc::ptr_eq(&logger, &root()));
        assert!(std::ptr::eq(registry(), registry()));
    }
}
