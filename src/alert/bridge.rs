//! Forwarding of log entries to the alerting service
//!
//! Entries at or above the threshold become incident reports queued to a
//! dedicated worker thread. The queue is bounded and `try_send` never blocks,
//! so an alerting outage costs the emitting thread nothing but a counter bump.

use super::diagnostics::AlertDiagnostics;
use super::report::{AlertChannel, AlertSettings, IncidentReport, IncidentSeverity, Notifier};
use crate::core::metrics::should_report;
use crate::core::{LogEntry, LogLevel, LoggerMetrics};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Pending incident reports held before new ones are dropped
pub const DEFAULT_ALERT_QUEUE_CAPACITY: usize = 256;

pub(crate) struct AlertBridge {
    threshold: LogLevel,
    source_type: String,
    settings: AlertSettings,
    sender: RwLock<Option<Sender<IncidentReport>>>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    metrics: Arc<LoggerMetrics>,
    diagnostics: Arc<AlertDiagnostics>,
}

impl AlertBridge {
    pub(crate) fn spawn(
        threshold: LogLevel,
        channel: &AlertChannel,
        source_type: impl Into<String>,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        let (sender, receiver) = bounded(DEFAULT_ALERT_QUEUE_CAPACITY);
        let notifier = channel.notifier();
        let diagnostics = channel.shared_diagnostics();
        let worker_metrics = Arc::clone(&metrics);
        let worker_diagnostics = Arc::clone(&diagnostics);

        let handle = thread::Builder::new()
            .name("alert-dispatch".to_string())
            .spawn(move || Self::run(receiver, notifier, worker_metrics, worker_diagnostics));

        let (sender, worker) = match handle {
            Ok(handle) => (Some(sender), Some(handle)),
            Err(e) => {
                diagnostics.warn(format!(
                    "failed to start alert dispatch thread, alerts are disabled: {}",
                    e
                ));
                (None, None)
            }
        };

        Self {
            threshold,
            source_type: source_type.into(),
            settings: channel.settings().clone(),
            sender: RwLock::new(sender),
            worker: Mutex::new(worker),
            metrics,
            diagnostics,
        }
    }

    pub(crate) fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn run(
        receiver: Receiver<IncidentReport>,
        notifier: Arc<dyn Notifier>,
        metrics: Arc<LoggerMetrics>,
        diagnostics: Arc<AlertDiagnostics>,
    ) {
        for report in receiver.iter() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                notifier.notify(&report)
            }));

            match result {
                Ok(Ok(())) => {
                    metrics.record_alert_dispatched();
                }
                Ok(Err(e)) => {
                    let previous = metrics.record_alert_failed();
                    if should_report(previous) {
                        diagnostics.warn(format!(
                            "alert dispatch failed ({} so far): {}",
                            previous + 1,
                            e
                        ));
                    }
                }
                Err(_) => {
                    let previous = metrics.record_alert_failed();
                    if should_report(previous) {
                        diagnostics.warn(format!(
                            "alert notifier panicked ({} failures so far)",
                            previous + 1
                        ));
                    }
                }
            }
        }
    }

    /// Queue an incident for `entry` if it meets the threshold
    pub(crate) fn fire(&self, entry: &LogEntry) {
        if entry.level < self.threshold {
            return;
        }

        let guard = self.sender.read();
        let Some(sender) = guard.as_ref() else {
            // Shut down or never started
            self.metrics.record_alert_dropped();
            return;
        };

        match sender.try_send(self.report_for(entry)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                let previous = self.metrics.record_alert_dropped();
                if should_report(previous) {
                    self.diagnostics.warn(format!(
                        "alert queue full, {} incident reports dropped",
                        previous + 1
                    ));
                }
            }
            Err(TrySendError::Disconnected(_)) => {
                self.metrics.record_alert_dropped();
            }
        }
    }

    fn report_for(&self, entry: &LogEntry) -> IncidentReport {
        let mut metadata = BTreeMap::new();
        metadata.insert("severity".to_string(), entry.level.to_str().to_string());
        metadata.insert("type".to_string(), self.source_type.clone());
        metadata.insert("app_type".to_string(), self.settings.app_type.clone());
        metadata.insert(
            "release_stage".to_string(),
            self.settings.release_stage.clone(),
        );
        metadata.insert("severity_reason".to_string(), "handledError".to_string());
        metadata.insert("unhandled".to_string(), "false".to_string());
        if let Some(ref hostname) = self.settings.hostname {
            metadata.insert("hostname".to_string(), hostname.clone());
        }
        if let Some(ref caller) = entry.caller {
            metadata.insert("caller".to_string(), caller.clone());
        }

        IncidentReport {
            message: entry.message.clone(),
            severity: IncidentSeverity::from(entry.level),
            metadata,
        }
    }

    /// Stop accepting reports and wait for queued ones to be delivered
    ///
    /// Returns `false` if the worker did not finish within `timeout`.
    pub(crate) fn shutdown(&self, timeout: Duration) -> bool {
        drop(self.sender.write().take());

        let Some(handle) = self.worker.lock().take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                let joined = handle.join().is_ok();
                if !joined {
                    self.diagnostics.warn("alert dispatch thread panicked");
                }
                self.diagnostics.flush();
                return joined;
            }

            if start.elapsed() >= timeout {
                self.diagnostics.warn(format!(
                    "alert dispatch thread did not finish within {:?}, \
                     pending incident reports may be lost",
                    timeout
                ));
                self.diagnostics.flush();
                return false;
            }

            thread::sleep(Duration::from_millis(5));
        }
    }
}
