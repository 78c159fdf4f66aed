//! Environment-driven assembly of the process logger
//!
//! Turns [`EnvSettings`] into the ordered option list the process logger is
//! built from: profile defaults first, then the explicit level override,
//! then the fixed annotations, alerting and output.

use crate::alert::{AlertChannel, AlertDiagnostics, Notifier};
use crate::core::options::{
    with_alert_hook, with_alerting, with_caller_info, with_color, with_encode, with_field,
    with_level, with_level_override, with_output, with_stack_trace_at,
};
use crate::core::{LogLevel, Logger, LoggerOption, Result, Sink, DEFAULT_SOURCE_TYPE};
use crate::env::EnvSettings;
use crate::sinks::StdoutSink;
use std::fmt;
use std::sync::Arc;

/// Exit code when the environment fails validation
pub const EXIT_ENV_INVALID: i32 = 1;
/// Exit code when the logger cannot be constructed
pub const EXIT_LOGGER_INIT: i32 = 2;

pub struct Bootstrap {
    settings: EnvSettings,
    sink: Option<Box<dyn Sink>>,
    notifier: Option<Arc<dyn Notifier>>,
    diagnostics: Option<Arc<AlertDiagnostics>>,
    attach_alert_hook: bool,
    alert_threshold: LogLevel,
    stack_trace_level: LogLevel,
    extra: Vec<LoggerOption>,
}

impl Bootstrap {
    /// Defaults: stdout, stack traces from Error, alert hook detached
    pub fn new(settings: EnvSettings) -> Self {
        Self {
            settings,
            sink: None,
            notifier: None,
            diagnostics: None,
            attach_alert_hook: false,
            alert_threshold: LogLevel::Error,
            stack_trace_level: LogLevel::Error,
            extra: Vec::new(),
        }
    }

    pub fn settings(&self) -> &EnvSettings {
        &self.settings
    }

    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Delivery capability used when an alerting API key is present
    ///
    /// Without one, incidents are written to the alert diagnostic log.
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Diagnostic log of the alert client; stdout when not set
    #[must_use]
    pub fn diagnostics(mut self, diagnostics: Arc<AlertDiagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    #[must_use]
    pub fn attach_alert_hook(mut self, attach: bool) -> Self {
        self.attach_alert_hook = attach;
        self
    }

    #[must_use]
    pub fn alert_threshold(mut self, level: LogLevel) -> Self {
        self.alert_threshold = level;
        self
    }

    #[must_use]
    pub fn stack_trace_level(mut self, level: LogLevel) -> Self {
        self.stack_trace_level = level;
        self
    }

    /// Extra option applied after all environment-derived ones
    #[must_use]
    pub fn option(mut self, option: LoggerOption) -> Self {
        self.extra.push(option);
        self
    }

    /// The alerting capability, present whenever an API key is
    pub fn alert_channel(&self) -> Option<AlertChannel> {
        let settings = self.settings.alert_settings()?;
        let diagnostics = match self.diagnostics {
            Some(ref diagnostics) => Arc::clone(diagnostics),
            None => Arc::new(AlertDiagnostics::stdout(&settings.release_stage)),
        };

        Some(match self.notifier {
            Some(ref notifier) => {
                AlertChannel::with_parts(settings, Arc::clone(notifier), diagnostics)
            }
            None => AlertChannel::logging(settings, diagnostics),
        })
    }

    pub fn into_options(self) -> Vec<LoggerOption> {
        let profile = self.settings.profile();
        let channel = self.alert_channel();

        let mut options = vec![
            with_level(profile.level),
            with_encode(profile.encode),
            with_color(profile.color),
        ];

        if let Some(raw) = self.settings.level_override {
            options.push(with_level_override(raw));
        }

        options.push(with_stack_trace_at(self.stack_trace_level));
        options.push(with_caller_info(0));
        options.push(with_field("type", DEFAULT_SOURCE_TYPE));

        if self.attach_alert_hook {
            options.push(with_alert_hook(self.alert_threshold, channel));
        } else {
            options.push(with_alerting(channel));
        }

        let sink = self.sink.unwrap_or_else(|| Box::new(StdoutSink::new()));
        options.push(with_output(sink));

        options.extend(self.extra);
        options
    }

    pub fn build(self) -> Result<Logger> {
        Logger::builder().options(self.into_options()).build()
    }
}

impl fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bootstrap")
            .field("settings", &self.settings)
            .field("sink", &self.sink.as_ref().map(|s| s.name().to_string()))
            .field("notifier", &self.notifier.is_some())
            .field("diagnostics", &self.diagnostics)
            .field("attach_alert_hook", &self.attach_alert_hook)
            .field("alert_threshold", &self.alert_threshold)
            .field("stack_trace_level", &self.stack_trace_level)
            .field("extra", &self.extra)
            .finish()
    }
}
