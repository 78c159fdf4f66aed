//! Main logger implementation

use super::{
    builder::LoggerBuilder,
    caller,
    encoding::LogEncode,
    error::{LoggerError, Result},
    log_context::LogContext,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::{should_report, LoggerMetrics},
    output_format::{FieldKeys, OutputFormat},
    sink::Sink,
};
use crate::alert::bridge::AlertBridge;
use crate::sinks::NullSink;
use parking_lot::Mutex;
use std::backtrace::Backtrace;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Longest wait for queued incident reports when the logger closes
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Exit code used by [`FatalSignal::exit`]
pub const FATAL_EXIT_CODE: i32 = 1;

/// Whether alerting is available to this logger and wired into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    /// No alerting capability was configured (no API key)
    NotConfigured,
    /// A capability exists but no hook forwards entries to it
    Configured,
    /// Entries at or above the threshold are forwarded
    Attached,
}

/// Observable configuration of a built logger
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerSummary {
    pub level: LogLevel,
    pub encode: LogEncode,
    pub keys: FieldKeys,
    pub fields: LogContext,
    pub caller_skip: Option<usize>,
    pub stack_trace_level: Option<LogLevel>,
    pub alert_threshold: Option<LogLevel>,
    pub alert_status: AlertStatus,
}

/// Returned by [`Logger::fatal`]; the caller decides how the process ends
///
/// The logger never exits on its own.
#[must_use = "a fatal entry should end the process: call `exit` or handle it explicitly"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalSignal {
    message: String,
}

impl FatalSignal {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Close `logger` so nothing buffered is lost, then exit the process
    pub fn exit(self, logger: &Logger) -> ! {
        if let Err(e) = logger.close() {
            eprintln!("[LOGGER ERROR] Failed to close logger before exit: {}", e);
        }
        std::process::exit(FATAL_EXIT_CODE)
    }
}

pub(crate) struct LoggerParts {
    pub level: LogLevel,
    pub encode: LogEncode,
    pub format: OutputFormat,
    pub keys: FieldKeys,
    pub fields: LogContext,
    pub caller_skip: Option<usize>,
    pub stack_level: Option<LogLevel>,
    pub sink: Box<dyn Sink>,
    pub alert: Option<AlertBridge>,
    pub alert_status: AlertStatus,
    pub notes: Vec<String>,
    pub metrics: Arc<LoggerMetrics>,
}

/// Leveled logger writing to a single sink
///
/// Safe to share across threads (`Arc<Logger>`). After [`close`](Logger::close)
/// every emit is a no-op counted as dropped; [`try_log`](Logger::try_log)
/// reports it as [`LoggerError::AlreadyClosed`].
pub struct Logger {
    level: LogLevel,
    encode: LogEncode,
    format: OutputFormat,
    keys: FieldKeys,
    fields: LogContext,
    caller_skip: Option<usize>,
    stack_level: Option<LogLevel>,
    sink: Mutex<Box<dyn Sink>>,
    alert: Option<AlertBridge>,
    alert_status: AlertStatus,
    notes: Vec<String>,
    closed: AtomicBool,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Logger that writes nothing, for tests of code that needs one
    pub fn nop() -> Self {
        Self::from_parts(LoggerParts {
            level: LogLevel::Debug,
            encode: LogEncode::Console,
            format: OutputFormat::for_encode(LogEncode::Console),
            keys: FieldKeys::default(),
            fields: LogContext::new(),
            caller_skip: None,
            stack_level: None,
            sink: Box::new(NullSink),
            alert: None,
            alert_status: AlertStatus::NotConfigured,
            notes: Vec::new(),
            metrics: Arc::new(LoggerMetrics::new()),
        })
    }

    pub(crate) fn from_parts(parts: LoggerParts) -> Self {
        Self {
            level: parts.level,
            encode: parts.encode,
            format: parts.format,
            keys: parts.keys,
            fields: parts.fields,
            caller_skip: parts.caller_skip,
            stack_level: parts.stack_level,
            sink: Mutex::new(parts.sink),
            alert: parts.alert,
            alert_status: parts.alert_status,
            notes: parts.notes,
            closed: AtomicBool::new(false),
            metrics: parts.metrics,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn encode(&self) -> LogEncode {
        self.encode
    }

    pub fn color_enabled(&self) -> bool {
        self.encode.is_color()
    }

    pub fn field_keys(&self) -> &FieldKeys {
        &self.keys
    }

    pub fn fields(&self) -> &LogContext {
        &self.fields
    }

    pub fn caller_skip(&self) -> Option<usize> {
        self.caller_skip
    }

    pub fn stack_trace_level(&self) -> Option<LogLevel> {
        self.stack_level
    }

    pub fn alert_threshold(&self) -> Option<LogLevel> {
        self.alert.as_ref().map(AlertBridge::threshold)
    }

    pub fn alert_status(&self) -> AlertStatus {
        self.alert_status
    }

    /// Settings that were accepted during the build but had no effect
    pub fn build_notes(&self) -> &[String] {
        &self.notes
    }

    pub fn summary(&self) -> LoggerSummary {
        LoggerSummary {
            level: self.level,
            encode: self.encode,
            keys: self.keys.clone(),
            fields: self.fields.clone(),
            caller_skip: self.caller_skip,
            stack_trace_level: self.stack_level,
            alert_threshold: self.alert_threshold(),
            alert_status: self.alert_status,
        }
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let _ = self.emit(level, message.as_ref(), None, Location::caller());
    }

    /// Like [`log`](Logger::log), but reports sink failures and use after close
    #[track_caller]
    pub fn try_log(&self, level: LogLevel, message: impl AsRef<str>) -> Result<()> {
        self.emit(level, message.as_ref(), None, Location::caller())
    }

    /// Log with structured fields for this entry only
    #[track_caller]
    pub fn log_with_fields(&self, level: LogLevel, message: impl AsRef<str>, fields: LogContext) {
        let _ = self.emit(level, message.as_ref(), Some(fields), Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    /// Emit at Fatal and hand back a signal the caller must act on
    #[track_caller]
    pub fn fatal(&self, message: impl AsRef<str>) -> FatalSignal {
        let message = message.as_ref();
        self.log(LogLevel::Fatal, message);
        FatalSignal {
            message: message.to_string(),
        }
    }

    #[track_caller]
    pub fn info_with_fields(&self, message: impl AsRef<str>, fields: LogContext) {
        self.log_with_fields(LogLevel::Info, message, fields);
    }

    #[track_caller]
    pub fn error_with_fields(&self, message: impl AsRef<str>, fields: LogContext) {
        self.log_with_fields(LogLevel::Error, message, fields);
    }

    fn emit(
        &self,
        level: LogLevel,
        message: &str,
        fields: Option<LogContext>,
        location: &Location<'_>,
    ) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }

        let mut entry = LogEntry::new(level, message);
        if let Some(fields) = fields {
            entry = entry.with_fields(fields);
        }
        if let Some(skip) = self.caller_skip {
            entry = entry.with_caller(caller::resolve(location, skip));
        }
        if self.stack_level.is_some_and(|threshold| level >= threshold) {
            entry = entry.with_stack(Backtrace::force_capture().to_string());
        }

        let line = self.format.format(&entry, &self.fields, &self.keys);

        let result = {
            let mut sink = self.sink.lock();
            if self.closed.load(Ordering::Acquire) {
                self.metrics.record_dropped();
                return Err(LoggerError::AlreadyClosed);
            }
            let result = sink.write_line(&line);

            // Queued while the sink lock is held, so `close` cannot shut the
            // bridge down between the write and the alert
            if let Some(ref bridge) = self.alert {
                bridge.fire(&entry);
            }
            result
        };

        match result {
            Ok(()) => {
                self.metrics.record_logged();
            }
            Err(ref e) => {
                let previous = self.metrics.record_dropped();
                if should_report(previous) {
                    eprintln!(
                        "[LOGGER ERROR] Sink write failed ({} entries dropped): {}",
                        previous + 1,
                        e
                    );
                }
            }
        }

        result
    }

    pub fn flush(&self) -> Result<()> {
        let mut sink = self.sink.lock();
        if self.closed.load(Ordering::Acquire) {
            return Ok(());
        }
        sink.flush()
    }

    /// Flush the sink, drain pending incident reports and stop accepting entries
    ///
    /// Calling it again is a no-op that returns `Ok(())`.
    pub fn close(&self) -> Result<()> {
        let flushed = {
            let mut sink = self.sink.lock();
            if self.closed.swap(true, Ordering::AcqRel) {
                return Ok(());
            }
            sink.flush()
        };

        if let Some(ref bridge) = self.alert {
            bridge.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
        }

        flushed
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("summary", &self.summary())
            .field("sink", &self.sink.lock().name())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped entries (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::*;
    use crate::sinks::MemorySink;

    fn memory_logger(level: LogLevel) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .option(with_level(level))
            .option(with_encode(LogEncode::Json))
            .option(with_suppressed_timestamp())
            .option(with_output(sink.clone()))
            .build()
            .unwrap();
        (logger, sink)
    }

    #[test]
    fn test_threshold_filters() {
        let (logger, sink) = memory_logger(LogLevel::Warn);
        logger.debug("hidden");
        logger.info("hidden");
        logger.warn("shown");
        logger.error("shown");

        assert_eq!(sink.lines().len(), 2);
        assert_eq!(logger.metrics().total_logged(), 2);
    }

    #[test]
    fn test_fatal_returns_signal() {
        let (logger, sink) = memory_logger(LogLevel::Info);
        let signal = logger.fatal("cannot bind port");

        assert_eq!(signal.message(), "cannot bind port");
        assert_eq!(
            sink.lines(),
            vec![r#"{"level":"FATAL","msg":"cannot bind port"}"#.to_string()]
        );
    }

    #[test]
    fn test_emit_after_close() {
        let (logger, sink) = memory_logger(LogLevel::Debug);
        logger.info("before");
        logger.close().unwrap();

        logger.info("after");
        assert!(matches!(
            logger.try_log(LogLevel::Error, "after"),
            Err(LoggerError::AlreadyClosed)
        ));
        assert_eq!(sink.lines().len(), 1);
        assert_eq!(logger.dropped_count(), 2);
    }

    #[test]
    fn test_close_twice() {
        let (logger, sink) = memory_logger(LogLevel::Debug);
        assert!(logger.close().is_ok());
        assert!(logger.close().is_ok());
        assert!(logger.is_closed());
        assert_eq!(sink.flush_count(), 1);
    }

    #[test]
    fn test_below_threshold_try_log_is_ok_after_close() {
        let (logger, _sink) = memory_logger(LogLevel::Error);
        logger.close().unwrap();
        assert!(logger.try_log(LogLevel::Debug, "filtered").is_ok());
    }

    #[test]
    fn test_fields_per_entry() {
        let (logger, sink) = memory_logger(LogLevel::Info);
        logger.info_with_fields("request", LogContext::new().with_field("status", 200));

        assert_eq!(
            sink.lines(),
            vec![r#"{"level":"INFO","msg":"request","status":200}"#.to_string()]
        );
    }

    #[test]
    fn test_nop_logger() {
        let logger = Logger::nop();
        logger.debug("discarded");
        let _ = logger.fatal("discarded too");

        assert_eq!(logger.alert_status(), AlertStatus::NotConfigured);
        assert_eq!(logger.metrics().total_logged(), 2);
        assert!(logger.close().is_ok());
    }

    #[test]
    fn test_logger_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();
    }
}
