//! Output encodings for log entries
//!
//! - `Json`: one JSON object per line, for aggregation pipelines
//! - `Console`: tab-separated human-readable text
//! - `ColorText`: `Console` with ANSI-colored level names

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEncode {
    #[default]
    Json,
    Console,
    #[serde(rename = "color")]
    ColorText,
}

impl LogEncode {
    /// Resolve one of the canonical names `json`, `console` or `color`
    ///
    /// Matching is case-sensitive.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "json" => Ok(LogEncode::Json),
            "console" => Ok(LogEncode::Console),
            "color" => Ok(LogEncode::ColorText),
            _ => Err(LoggerError::invalid_encode(name)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LogEncode::Json => "json",
            LogEncode::Console => "console",
            LogEncode::ColorText => "color",
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, LogEncode::ColorText)
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, LogEncode::Json)
    }
}

impl fmt::Display for LogEncode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
