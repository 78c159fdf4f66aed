//! Serialization of log entries into single output lines
//!
//! Provides the two serializers behind [`LogEncode`]:
//! - JSON: `{"caller":"src/main.rs:10","level":"INFO","msg":"started","timelocal":"..."}`
//! - Console: `2025-01-08T10:30:45.123+0900\tINFO\tsrc/main.rs:10\tstarted\t{"type":"app"}`

use super::encoding::LogEncode;
use super::log_context::LogContext;
use super::log_entry::LogEntry;
use serde::{Deserialize, Serialize};

/// ISO 8601 local time with milliseconds and numeric offset
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Names of the built-in keys written into every entry
///
/// The defaults mirror the columns of the analytics schema that ingests
/// these logs; renaming one is a schema change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldKeys {
    /// `None` drops the timestamp entirely
    pub time: Option<String>,
    pub level: String,
    pub caller: String,
    pub message: String,
    pub stack: String,
}

impl Default for FieldKeys {
    fn default() -> Self {
        Self {
            time: Some("timelocal".to_string()),
            level: "level".to_string(),
            caller: "caller".to_string(),
            message: "msg".to_string(),
            stack: "stack".to_string(),
        }
    }
}

/// Serializer resolved from a [`LogEncode`] at build time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Console { color: bool },
}

impl OutputFormat {
    pub fn for_encode(encode: LogEncode) -> Self {
        match encode {
            LogEncode::Json => OutputFormat::Json,
            LogEncode::Console => OutputFormat::Console { color: false },
            LogEncode::ColorText => OutputFormat::Console { color: true },
        }
    }

    /// Format an entry as one line (plus an indented stack block for text)
    pub fn format(&self, entry: &LogEntry, base: &LogContext, keys: &FieldKeys) -> String {
        match self {
            OutputFormat::Json => self.format_json(entry, base, keys),
            OutputFormat::Console { color } => self.format_console(entry, base, keys, *color),
        }
    }

    fn format_json(&self, entry: &LogEntry, base: &LogContext, keys: &FieldKeys) -> String {
        use serde_json::Value;

        let mut json_obj = base.merged_with(&entry.fields).to_json_object();

        json_obj.insert(
            keys.level.clone(),
            Value::String(entry.level.to_str().to_string()),
        );
        if let Some(ref time_key) = keys.time {
            json_obj.insert(
                time_key.clone(),
                Value::String(entry.timestamp.format(TIME_FORMAT).to_string()),
            );
        }
        if let Some(ref caller) = entry.caller {
            json_obj.insert(keys.caller.clone(), Value::String(caller.clone()));
        }
        json_obj.insert(keys.message.clone(), Value::String(entry.message.clone()));
        if let Some(ref stack) = entry.stack {
            json_obj.insert(keys.stack.clone(), Value::String(stack.clone()));
        }

        serde_json::to_string(&Value::Object(json_obj)).unwrap_or_default()
    }

    fn format_console(
        &self,
        entry: &LogEntry,
        base: &LogContext,
        keys: &FieldKeys,
        color: bool,
    ) -> String {
        let mut parts = Vec::with_capacity(5);

        if keys.time.is_some() {
            parts.push(entry.timestamp.format(TIME_FORMAT).to_string());
        }

        let level = entry.level.to_str();
        if color {
            parts.push(paint(level, entry.level.color_code()));
        } else {
            parts.push(level.to_string());
        }

        if let Some(ref caller) = entry.caller {
            parts.push(caller.clone());
        }
        parts.push(entry.message.clone());

        let fields = base.merged_with(&entry.fields);
        if !fields.is_empty() {
            let object = serde_json::Value::Object(fields.to_json_object());
            parts.push(serde_json::to_string(&object).unwrap_or_default());
        }

        let mut line = parts.join("\t");
        if let Some(ref stack) = entry.stack {
            line.push('\n');
            line.push_str(stack.trim_end());
        }
        line
    }
}

/// Wrap `text` in the ANSI foreground sequence of `color`
///
/// Independent of terminal detection: a colored format colors every sink.
fn paint(text: &str, color: colored::Color) -> String {
    format!("\u{1b}[{}m{}\u{1b}[0m", color.to_fg_str(), text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    fn untimed() -> FieldKeys {
        FieldKeys {
            time: None,
            ..FieldKeys::default()
        }
    }

    #[test]
    fn test_json_format() {
        let entry = LogEntry::new(LogLevel::Error, "Error occurred").with_caller("src/db.rs:42");
        let base = LogContext::new().with_field("type", "app");
        let result = OutputFormat::Json.format(&entry, &base, &untimed());

        assert_eq!(
            result,
            r#"{"caller":"src/db.rs:42","level":"ERROR","msg":"Error occurred","type":"app"}"#
        );
    }

    #[test]
    fn test_json_format_with_timestamp() {
        let entry = LogEntry::new(LogLevel::Info, "tick");
        let result = OutputFormat::Json.format(&entry, &LogContext::new(), &FieldKeys::default());

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert!(parsed["timelocal"].is_string());
        assert_eq!(parsed["msg"], "tick");
    }

    #[test]
    fn test_json_reserved_keys_win_over_fields() {
        let entry = LogEntry::new(LogLevel::Info, "real")
            .with_fields(LogContext::new().with_field("msg", "spoofed"));
        let result = OutputFormat::Json.format(&entry, &LogContext::new(), &untimed());

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["msg"], "real");
    }

    #[test]
    fn test_console_format() {
        let entry = LogEntry::new(LogLevel::Warn, "disk low").with_caller("src/fs.rs:7");
        let base = LogContext::new().with_field("type", "app");
        let result = OutputFormat::Console { color: false }.format(&entry, &base, &untimed());

        assert_eq!(result, "WARN\tsrc/fs.rs:7\tdisk low\t{\"type\":\"app\"}");
    }

    #[test]
    fn test_console_stack_on_following_lines() {
        let entry = LogEntry::new(LogLevel::Error, "boom").with_stack("0: main\n1: start\n");
        let result =
            OutputFormat::Console { color: false }.format(&entry, &LogContext::new(), &untimed());

        assert_eq!(result, "ERROR\tboom\n0: main\n1: start");
    }

    #[test]
    fn test_color_does_not_depend_on_terminal() {
        let format = OutputFormat::Console { color: true };
        let keys = untimed();

        let debug = format.format(&LogEntry::new(LogLevel::Debug, "hi"), &LogContext::new(), &keys);
        assert_eq!(debug, "\u{1b}[35mDEBUG\u{1b}[0m\thi");

        let error = format.format(&LogEntry::new(LogLevel::Error, "hi"), &LogContext::new(), &keys);
        assert_eq!(error, "\u{1b}[31mERROR\u{1b}[0m\thi");
    }

    #[test]
    fn test_for_encode() {
        assert_eq!(OutputFormat::for_encode(LogEncode::Json), OutputFormat::Json);
        assert_eq!(
            OutputFormat::for_encode(LogEncode::ColorText),
            OutputFormat::Console { color: true }
        );
    }
}
