//! Diagnostic log of the alert client itself
//!
//! Dispatch failures, notifier panics and shed reports are written through a
//! dedicated Warn-level logger tagged `type = "bugsnag"`, encoded the way the
//! release stage's profile says. In `development` the diagnostic log is
//! silent.

use super::report::{IncidentReport, Notifier};
use crate::core::options::{
    with_caller_info, with_color, with_encode, with_field, with_level, with_output,
};
use crate::core::{EnvironmentProfile, LogContext, LogLevel, Logger, Result, Sink};
use crate::sinks::StdoutSink;
use std::sync::Arc;

/// Source tag of diagnostic entries
pub const DIAGNOSTIC_SOURCE_TYPE: &str = "bugsnag";

/// Release stage whose diagnostic log discards everything
pub const SILENT_RELEASE_STAGE: &str = "development";

/// Warn-level logger for the alert client, or nothing in development
#[derive(Debug)]
pub struct AlertDiagnostics {
    logger: Option<Logger>,
}

impl AlertDiagnostics {
    /// Diagnostic log for `release_stage`, written to `sink`
    pub fn for_release_stage(release_stage: &str, sink: impl Sink + 'static) -> Result<Self> {
        if release_stage == SILENT_RELEASE_STAGE {
            return Ok(Self::disabled());
        }

        let profile = EnvironmentProfile::resolve(release_stage);
        let logger = Logger::builder()
            .option(with_level(LogLevel::Warn))
            .option(with_encode(profile.encode))
            .option(with_color(profile.color))
            .option(with_caller_info(0))
            .option(with_field("type", DIAGNOSTIC_SOURCE_TYPE))
            .option(with_output(sink))
            .build()?;

        Ok(Self {
            logger: Some(logger),
        })
    }

    /// Diagnostic log for `release_stage` on stdout
    ///
    /// Falls back to a silent log, reported on stderr, if it cannot be built.
    pub fn stdout(release_stage: &str) -> Self {
        Self::for_release_stage(release_stage, StdoutSink::new()).unwrap_or_else(|e| {
            eprintln!("[LOGGER ERROR] Failed to build alert diagnostics: {}", e);
            Self::disabled()
        })
    }

    pub fn disabled() -> Self {
        Self { logger: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.logger.is_some()
    }

    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>) {
        if let Some(ref logger) = self.logger {
            logger.warn(message);
        }
    }

    #[track_caller]
    pub(crate) fn warn_with_fields(&self, message: impl AsRef<str>, fields: LogContext) {
        if let Some(ref logger) = self.logger {
            logger.log_with_fields(LogLevel::Warn, message, fields);
        }
    }

    pub fn flush(&self) {
        if let Some(ref logger) = self.logger {
            if let Err(e) = logger.flush() {
                eprintln!("[LOGGER ERROR] Failed to flush alert diagnostics: {}", e);
            }
        }
    }
}

/// Notifier that writes incidents to the diagnostic log
///
/// Used when alerting is configured but no delivery backend was supplied.
pub struct DiagnosticNotifier {
    diagnostics: Arc<AlertDiagnostics>,
}

impl DiagnosticNotifier {
    pub fn new(diagnostics: Arc<AlertDiagnostics>) -> Self {
        Self { diagnostics }
    }
}

impl Notifier for DiagnosticNotifier {
    fn notify(&self, report: &IncidentReport) -> Result<()> {
        let fields = report
            .metadata
            .iter()
            .filter(|(key, _)| key.as_str() != "type")
            .fold(LogContext::new(), |ctx, (key, value)| {
                ctx.with_field(format!("incident_{}", key), value.as_str())
            });
        self.diagnostics
            .warn_with_fields(format!("incident: {}", report.message), fields);
        Ok(())
    }
}
