//! Stress tests for a logger shared across threads
//!
//! These tests verify:
//! - No entry is lost or interleaved under concurrent emission
//! - Close drains every buffered line and every pending incident report
//! - A saturated alert queue drops reports instead of blocking emitters

use parking_lot::Mutex;
use profile_logger::prelude::*;
use profile_logger::sinks::FileSink;
use std::collections::HashSet;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_concurrent_emission_keeps_every_line() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent.log");

    let logger = Arc::new(
        Logger::builder()
            .option(with_encode(LogEncode::Json))
            .option(with_caller_info(0))
            .option(with_output(FileSink::new(&log_file).expect("Failed to open log file")))
            .build()
            .unwrap(),
    );

    let num_threads = 8;
    let logs_per_thread = 500;

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..logs_per_thread {
                    logger.info(format!("thread {} entry {}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    logger.close().unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    let mut messages = HashSet::new();
    for line in content.lines() {
        let parsed: serde_json::Value =
            serde_json::from_str(line).expect("interleaved or partial line");
        messages.insert(parsed["msg"].as_str().unwrap().to_string());
    }

    assert_eq!(messages.len(), num_threads * logs_per_thread);
    assert_eq!(
        logger.metrics().total_logged(),
        (num_threads * logs_per_thread) as u64
    );
    assert_eq!(logger.dropped_count(), 0);
}

#[test]
fn test_concurrent_alerts_all_delivered_within_capacity() {
    let delivered = Arc::new(Mutex::new(Vec::new()));
    let store = Arc::clone(&delivered);
    let notifier = move |report: &IncidentReport| -> Result<()> {
        store.lock().push(report.message.clone());
        Ok(())
    };
    let channel = AlertChannel::new(AlertSettings::new("key", "production"), Arc::new(notifier));

    let logger = Arc::new(
        Logger::builder()
            .option(with_alert_hook(LogLevel::Error, Some(channel)))
            .option(with_output(profile_logger::sinks::MemorySink::new()))
            .build()
            .unwrap(),
    );

    // 200 reports never exceed the queue capacity
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..50 {
                    logger.error(format!("failure {}-{}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.close().unwrap();

    assert_eq!(delivered.lock().len(), 200);
    assert_eq!(logger.metrics().alerts_dispatched(), 200);
    assert_eq!(logger.metrics().alerts_dropped(), 0);
}

#[test]
fn test_saturated_alert_queue_drops_instead_of_blocking() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let notifier = move |_: &IncidentReport| -> Result<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(5));
        Ok(())
    };
    let channel = AlertChannel::new(AlertSettings::new("key", "production"), Arc::new(notifier));

    let sink = profile_logger::sinks::MemorySink::new();
    let logger = Logger::builder()
        .option(with_alert_hook(LogLevel::Error, Some(channel)))
        .option(with_output(sink.clone()))
        .build()
        .unwrap();

    let total = 2_000;
    for i in 0..total {
        logger.error(format!("burst {}", i));
    }

    // Every entry reaches the sink even though most reports are shed
    assert_eq!(sink.lines().len(), total);

    logger.close().unwrap();

    let metrics = logger.metrics();
    assert!(metrics.alerts_dropped() > 0);
    assert_eq!(
        metrics.alerts_dispatched() + metrics.alerts_dropped(),
        total as u64
    );
    assert_eq!(calls.load(Ordering::SeqCst) as u64, metrics.alerts_dispatched());
}

#[test]
fn test_close_during_emission_accounts_for_every_alert() {
    let notifier = |_: &IncidentReport| -> Result<()> { Ok(()) };
    let channel = AlertChannel::new(AlertSettings::new("key", "production"), Arc::new(notifier));

    let sink = profile_logger::sinks::MemorySink::new();
    let logger = Arc::new(
        Logger::builder()
            .option(with_alert_hook(LogLevel::Error, Some(channel)))
            .option(with_output(sink.clone()))
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..500 {
                    if logger.try_log(LogLevel::Error, format!("racing {}-{}", t, i)).is_err() {
                        break;
                    }
                }
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(2));
    logger.close().unwrap();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    // Every written entry was either delivered or counted as shed
    let metrics = logger.metrics();
    assert_eq!(
        metrics.alerts_dispatched() + metrics.alerts_dropped(),
        sink.lines().len() as u64
    );
    assert_eq!(metrics.alerts_failed(), 0);
}
