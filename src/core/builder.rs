//! Construction of a [`Logger`] from composed options

use super::config::{Attachment, BuildConfig};
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::logger::{AlertStatus, Logger, LoggerParts};
use super::metrics::LoggerMetrics;
use super::options::LoggerOption;
use super::output_format::OutputFormat;
use crate::alert::bridge::AlertBridge;
use std::sync::Arc;

/// Source tag used for incident reports when no `type` field is set
pub const DEFAULT_SOURCE_TYPE: &str = "app";

/// Build a logger from a fully composed configuration
///
/// Fails when an option recorded an error or no sink was set. The returned
/// logger owns the sink and every attached behavior.
pub fn build(mut cfg: BuildConfig) -> Result<Logger> {
    if let Some((source, error)) = cfg.take_error() {
        return Err(LoggerError::config(
            format!("option {}", source),
            error.to_string(),
        ));
    }

    let sink = cfg
        .sink
        .take()
        .ok_or_else(|| LoggerError::config("BuildConfig", "output sink is not set"))?;

    let mut notes = cfg.take_notes();
    let mut caller_skip = None;
    let mut stack_level = None;
    let mut alert_threshold = None;
    for attachment in cfg.attachments() {
        match *attachment {
            Attachment::CallerInfo { skip } => caller_skip = Some(skip),
            Attachment::StackTrace { level } => stack_level = Some(level),
            Attachment::AlertHook { threshold } => alert_threshold = Some(threshold),
        }
    }

    let metrics = Arc::new(LoggerMetrics::new());
    let source_type = cfg
        .fields
        .get("type")
        .map(|v| v.to_string())
        .unwrap_or_else(|| DEFAULT_SOURCE_TYPE.to_string());

    let (alert, alert_status) = match (cfg.alerting.as_ref(), alert_threshold) {
        (None, _) => (None, AlertStatus::NotConfigured),
        (Some(_), None) => (None, AlertStatus::Configured),
        (Some(channel), Some(_)) if !channel.settings().notifies() => {
            notes.push(format!(
                "alert hook not attached: release stage '{}' does not notify",
                channel.settings().release_stage
            ));
            (None, AlertStatus::Configured)
        }
        (Some(channel), Some(threshold)) => (
            Some(AlertBridge::spawn(
                threshold,
                channel,
                source_type,
                Arc::clone(&metrics),
            )),
            AlertStatus::Attached,
        ),
    };

    Ok(Logger::from_parts(LoggerParts {
        level: cfg.level,
        encode: cfg.encode,
        format: OutputFormat::for_encode(cfg.encode),
        keys: cfg.keys,
        fields: cfg.fields,
        caller_skip,
        stack_level,
        sink,
        alert,
        alert_status,
        notes,
        metrics,
    }))
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use profile_logger::prelude::*;
/// use profile_logger::sinks::MemorySink;
///
/// let logger = Logger::builder()
///     .option(with_level(LogLevel::Info))
///     .option(with_encode(LogEncode::Json))
///     .option(with_output(MemorySink::new()))
///     .build()
///     .unwrap();
/// assert_eq!(logger.level(), LogLevel::Info);
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    options: Vec<LoggerOption>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn option(mut self, option: LoggerOption) -> Self {
        self.options.push(option);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        self.options.extend(options);
        self
    }

    /// Shorthand for `option(with_level(level))`
    #[must_use = "builder methods return a new value"]
    pub fn min_level(self, level: LogLevel) -> Self {
        self.option(super::options::with_level(level))
    }

    /// Apply the options without building
    pub fn into_config(self) -> BuildConfig {
        super::options::compose(self.options)
    }

    pub fn build(self) -> Result<Logger> {
        build(self.into_config())
    }
}
