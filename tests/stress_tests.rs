//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Lines from many threads never interleave in a shared file
//! - Appenders can be attached and detached while other threads log
//! - The registry hands out consistent loggers under contention

use pattern_logger::appenders::FileAppender;
use pattern_logger::core::{LogLevel, Logger, LoggerRegistry};
use pattern_logger::{info, Appender};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const MESSAGES_PER_THREAD: usize = 500;

#[test]
fn test_concurrent_lines_do_not_interleave() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent.log");

    let logger = Arc::new(
        Logger::builder()
            .name("stress")
            .pattern("%t|%p|%m%n")
            .appender(FileAppender::new(&log_file).expect("Failed to create appender"))
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    info!(logger, "thread-{} message-{} {}", t, i, "x".repeat(64));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.flush().unwrap();

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * MESSAGES_PER_THREAD);

    let payload = "x".repeat(64);
    let mut seen = HashSet::new();
    for line in &lines {
        let parts: Vec<&str> = line.splitn(3, '|').collect();
        assert_eq!(parts.len(), 3, "Malformed line: {}", line);
        assert_eq!(parts[1], "INFO");
        assert!(parts[2].ends_with(&payload), "Torn line: {}", line);
        assert!(seen.insert(parts[2].to_string()), "Duplicate line: {}", line);
    }

    let thread_ids: HashSet<&str> = lines.iter().map(|l| l.split('|').next().unwrap_or("")).collect();
    assert_eq!(thread_ids.len(), THREADS);
    assert_eq!(logger.metrics().total_logged(), (THREADS * MESSAGES_PER_THREAD) as u64);
    assert_eq!(logger.dropped_count(), 0);
}

#[test]
fn test_attach_detach_while_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let stable_file = temp_dir.path().join("stable.log");
    let churn_file = temp_dir.path().join("churn.log");

    let logger = Arc::new(Logger::new("churn"));
    logger.set_pattern("%m%n");
    logger.add_appender(Arc::new(FileAppender::new(&stable_file).unwrap()));

    let churn = Arc::new(FileAppender::new(&churn_file).unwrap());
    let running = Arc::new(AtomicBool::new(true));

    let toggler = {
        let logger = Arc::clone(&logger);
        let churn = Arc::clone(&churn);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                logger.add_appender(churn.clone());
                thread::yield_now();
                assert!(logger.remove_appender(&churn));
            }
        })
    };

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    info!(logger, "w{} {}", t, i);
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().expect("Writer panicked");
    }
    running.store(false, Ordering::Relaxed);
    toggler.join().expect("Toggler panicked");
    logger.flush().unwrap();

    // Every event reached the appender that stayed attached
    let stable = std::fs::read_to_string(&stable_file).unwrap();
    assert_eq!(stable.lines().count(), 4 * MESSAGES_PER_THREAD);
    assert_eq!(logger.appenders().len(), 1);

    // The churned appender only ever received whole lines
    churn.flush().unwrap();
    let churned = std::fs::read_to_string(&churn_file).unwrap();
    assert!(churned.lines().all(|l| l.starts_with('w')));
}

#[test]
fn test_threshold_changes_under_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("levels.log");

    let logger = Arc::new(
        Logger::builder()
            .name("levels")
            .pattern("%p%n")
            .appender(FileAppender::new(&log_file).unwrap())
            .build(),
    );

    let flipper = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..1000 {
                let level = if i % 2 == 0 { LogLevel::Error } else { LogLevel::Debug };
                logger.set_min_level(level);
            }
            logger.set_min_level(LogLevel::Debug);
        })
    };

    let writer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for _ in 0..MESSAGES_PER_THREAD {
                pattern_logger::debug!(logger, "noise");
                pattern_logger::fatal!(logger, "signal");
            }
        })
    };

    flipper.join().expect("Flipper panicked");
    writer.join().expect("Writer panicked");
    logger.flush().unwrap();

    let content = std::fs::read_to_string(&log_file).unwrap();
    let fatal = content.lines().filter(|l| *l == "FATAL").count();
    let debug = content.lines().filter(|l| *l == "DEBUG").count();

    assert_eq!(fatal, MESSAGES_PER_THREAD);
    assert!(debug <= MESSAGES_PER_THREAD);
    assert!(content.lines().all(|l| l == "FATAL" || l == "DEBUG"));
}

#[test]
fn test_registry_under_contention() {
    let registry = Arc::new(LoggerRegistry::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                (0..50)
                    .map(|i| registry.create_logger(&format!("svc-{}", i)))
                    .collect::<Vec<Arc<Logger>>>()
            })
        })
        .collect();

    let results: Vec<Vec<Arc<Logger>>> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked"))
        .collect();

    for i in 0..50 {
        let expected = registry.get_logger(&format!("svc-{}", i));
        for loggers in &results {
            assert!(Arc::ptr_eq(&loggers[i], &expected));
        }
    }
    assert_eq!(registry.logger_names().len(), 51);
}
