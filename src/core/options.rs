//! Composable logger options
//!
//! An option is a named, one-shot mutation of a [`BuildConfig`]. Options are
//! applied in the order given, so a later option overrides an earlier one
//! that set the same field. That ordering is how an explicit override from
//! the environment beats a profile default.
//!
//! # Example
//!
//! ```
//! use profile_logger::core::options::{compose, with_encode, with_level};
//! use profile_logger::{LogEncode, LogLevel};
//!
//! let cfg = compose([
//!     with_level(LogLevel::Debug),
//!     with_encode(LogEncode::Json),
//!     with_level(LogLevel::Error),
//! ]);
//! assert_eq!(cfg.level, LogLevel::Error);
//! ```

use super::config::{Attachment, BuildConfig};
use super::encoding::LogEncode;
use super::error::{LoggerError, Result};
use super::log_context::FieldValue;
use super::log_level::LogLevel;
use super::output_format::FieldKeys;
use super::sink::Sink;
use crate::alert::AlertChannel;
use std::fmt;

type ApplyFn = Box<dyn FnOnce(&mut BuildConfig) -> Result<()> + Send>;

pub struct LoggerOption {
    name: &'static str,
    apply: ApplyFn,
}

impl LoggerOption {
    /// Wrap a custom mutation
    pub fn new<F>(name: &'static str, apply: F) -> Self
    where
        F: FnOnce(&mut BuildConfig) -> Result<()> + Send + 'static,
    {
        Self {
            name,
            apply: Box::new(apply),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the mutation; failures are returned, not recorded
    pub fn apply(self, cfg: &mut BuildConfig) -> Result<()> {
        (self.apply)(cfg)
    }
}

impl fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoggerOption").field(&self.name).finish()
    }
}

impl BuildConfig {
    /// Apply options in order, recording the first failure
    pub fn apply_all<I>(&mut self, options: I)
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        for option in options {
            let name = option.name();
            if let Err(e) = option.apply(self) {
                self.record_error(name, e);
            }
        }
    }
}

/// Apply options to a fresh [`BuildConfig`]
pub fn compose<I>(options: I) -> BuildConfig
where
    I: IntoIterator<Item = LoggerOption>,
{
    let mut cfg = BuildConfig::new();
    cfg.apply_all(options);
    cfg
}

pub fn with_level(level: LogLevel) -> LoggerOption {
    LoggerOption::new("with_level", move |cfg| {
        cfg.level = level;
        Ok(())
    })
}

/// Numeric level override as read from the environment
///
/// Blank input leaves the level alone. Input that is not an integer is
/// ignored and noted; an integer outside the level range is an error.
pub fn with_level_override(raw: impl Into<String>) -> LoggerOption {
    let raw = raw.into();
    LoggerOption::new("with_level_override", move |cfg| {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(());
        }

        match raw.parse::<i64>() {
            Ok(n) => {
                cfg.level = LogLevel::from_ordinal(n)?;
                Ok(())
            }
            Err(_) => {
                cfg.note(format!("ignored non-numeric level override '{}'", raw));
                Ok(())
            }
        }
    })
}

pub fn with_encode(encode: LogEncode) -> LoggerOption {
    LoggerOption::new("with_encode", move |cfg| {
        cfg.encode = encode;
        Ok(())
    })
}

/// Encode selected by canonical name (`json`, `console`, `color`)
pub fn with_encode_name(name: impl Into<String>) -> LoggerOption {
    let name = name.into();
    LoggerOption::new("with_encode_name", move |cfg| {
        cfg.encode = LogEncode::from_name(&name)?;
        Ok(())
    })
}

/// Toggle level coloring of text output
///
/// JSON output never carries escape codes: on a JSON encode this is a
/// no-op, noted in the build notes.
pub fn with_color(enabled: bool) -> LoggerOption {
    LoggerOption::new("with_color", move |cfg| {
        match (cfg.encode, enabled) {
            (LogEncode::Json, true) => {
                cfg.note("ignored color for json encode");
            }
            (LogEncode::Console, true) => cfg.encode = LogEncode::ColorText,
            (LogEncode::ColorText, false) => cfg.encode = LogEncode::Console,
            _ => {}
        }
        Ok(())
    })
}

/// Drop the timestamp so output is byte-reproducible
pub fn with_suppressed_timestamp() -> LoggerOption {
    LoggerOption::new("with_suppressed_timestamp", |cfg| {
        cfg.keys.time = None;
        Ok(())
    })
}

pub fn with_field_keys(keys: FieldKeys) -> LoggerOption {
    LoggerOption::new("with_field_keys", move |cfg| {
        if keys.level.is_empty() || keys.message.is_empty() {
            return Err(LoggerError::config(
                "FieldKeys",
                "level and message keys must not be empty",
            ));
        }
        cfg.keys = keys;
        Ok(())
    })
}

/// Field written into every entry, e.g. `("type", "app")`
pub fn with_field(key: impl Into<String>, value: impl Into<FieldValue>) -> LoggerOption {
    let key = key.into();
    let value = value.into();
    LoggerOption::new("with_field", move |cfg| {
        cfg.fields.add_field(key, value);
        Ok(())
    })
}

/// Attribute entries to their call site
///
/// `skip_frames` walks further up the stack, for wrappers that are not
/// themselves `#[track_caller]`.
pub fn with_caller_info(skip_frames: usize) -> LoggerOption {
    LoggerOption::new("with_caller_info", move |cfg| {
        cfg.attach(Attachment::CallerInfo { skip: skip_frames });
        Ok(())
    })
}

pub fn with_stack_trace_at(level: LogLevel) -> LoggerOption {
    LoggerOption::new("with_stack_trace_at", move |cfg| {
        cfg.attach(Attachment::StackTrace { level });
        Ok(())
    })
}

/// Register the alerting capability without forwarding anything to it
pub fn with_alerting(channel: Option<AlertChannel>) -> LoggerOption {
    LoggerOption::new("with_alerting", move |cfg| {
        cfg.alerting = channel;
        Ok(())
    })
}

/// Forward entries at or above `threshold` to the alerting service
///
/// A `None` channel falls back to one registered earlier; with neither,
/// alerting was never configured and nothing is attached.
pub fn with_alert_hook(threshold: LogLevel, channel: Option<AlertChannel>) -> LoggerOption {
    LoggerOption::new("with_alert_hook", move |cfg| {
        if channel.is_some() {
            cfg.alerting = channel;
        }

        if cfg.alerting.is_some() {
            cfg.attach(Attachment::AlertHook { threshold });
        } else {
            cfg.note("alert hook not attached: alerting is not configured");
        }
        Ok(())
    })
}

pub fn with_output(sink: impl Sink + 'static) -> LoggerOption {
    LoggerOption::new("with_output", move |cfg| {
        cfg.set_sink(Box::new(sink));
        Ok(())
    })
}
