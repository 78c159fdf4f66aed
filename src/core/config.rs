//! Mutable configuration accumulated while options are applied

use super::encoding::LogEncode;
use super::error::LoggerError;
use super::log_context::LogContext;
use super::log_level::LogLevel;
use super::output_format::FieldKeys;
use super::sink::Sink;
use crate::alert::AlertChannel;
use std::fmt;

/// Behavior wired into the logger at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Record the call site, skipping `skip` frames of wrapper functions
    CallerInfo { skip: usize },
    /// Capture a stack trace for entries at or above `level`
    StackTrace { level: LogLevel },
    /// Forward entries at or above `threshold` to the alert channel
    AlertHook { threshold: LogLevel },
}

impl Attachment {
    fn same_kind(&self, other: &Attachment) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Everything the builder needs to construct a [`Logger`](super::Logger)
///
/// Options mutate this in order. The first recorded error wins and makes
/// the build fail; options after it still run.
pub struct BuildConfig {
    pub level: LogLevel,
    pub encode: LogEncode,
    pub keys: FieldKeys,
    /// Fields written into every entry
    pub fields: LogContext,
    pub(crate) sink: Option<Box<dyn Sink>>,
    attachments: Vec<Attachment>,
    pub(crate) alerting: Option<AlertChannel>,
    error: Option<(String, LoggerError)>,
    notes: Vec<String>,
}

impl BuildConfig {
    pub fn new() -> Self {
        Self {
            level: LogLevel::Debug,
            encode: LogEncode::Console,
            keys: FieldKeys::default(),
            fields: LogContext::new(),
            sink: None,
            attachments: Vec::new(),
            alerting: None,
            error: None,
            notes: Vec::new(),
        }
    }

    pub fn color_enabled(&self) -> bool {
        self.encode.is_color()
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    pub fn set_sink(&mut self, sink: Box<dyn Sink>) {
        self.sink = Some(sink);
    }

    pub fn alerting(&self) -> Option<&AlertChannel> {
        self.alerting.as_ref()
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Add an attachment, replacing any earlier one of the same kind
    pub fn attach(&mut self, attachment: Attachment) {
        self.attachments.retain(|a| !a.same_kind(&attachment));
        self.attachments.push(attachment);
    }

    pub fn detach_alert_hook(&mut self) {
        self.attachments
            .retain(|a| !matches!(a, Attachment::AlertHook { .. }));
    }

    /// Record an error raised by `source`; only the first one is kept
    pub fn record_error(&mut self, source: impl Into<String>, error: LoggerError) {
        if self.error.is_none() {
            self.error = Some((source.into(), error));
        }
    }

    pub fn error(&self) -> Option<&LoggerError> {
        self.error.as_ref().map(|(_, e)| e)
    }

    pub(crate) fn take_error(&mut self) -> Option<(String, LoggerError)> {
        self.error.take()
    }

    /// Record a setting that was accepted but had no effect
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub(crate) fn take_notes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notes)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildConfig")
            .field("level", &self.level)
            .field("encode", &self.encode)
            .field("keys", &self.keys)
            .field("fields", &self.fields)
            .field("sink", &self.sink.as_ref().map(|s| s.name().to_string()))
            .field("attachments", &self.attachments)
            .field("alerting", &self.alerting)
            .field("error", &self.error)
            .field("notes", &self.notes)
            .finish()
    }
}
