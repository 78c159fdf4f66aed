//! Log level definitions
//!
//! The integer values are part of the public contract: downstream analytics
//! schemas store them, so `Debug = -1 .. Fatal = 3` must never be renumbered.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[repr(i8)]
pub enum LogLevel {
    Debug = -1,
    #[default]
    Info = 0,
    Warn = 1,
    Error = 2,
    Fatal = 3,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Map a numeric level (as found in `LOG_LEVEL`) to a `LogLevel`
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_logger::LogLevel;
    ///
    /// assert_eq!(LogLevel::from_ordinal(2).unwrap(), LogLevel::Error);
    /// assert!(LogLevel::from_ordinal(4).is_err());
    /// ```
    pub fn from_ordinal(n: i64) -> Result<Self> {
        match n {
            -1 => Ok(LogLevel::Debug),
            0 => Ok(LogLevel::Info),
            1 => Ok(LogLevel::Warn),
            2 => Ok(LogLevel::Error),
            3 => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::invalid_level(n)),
        }
    }

    pub fn ordinal(&self) -> i8 {
        *self as i8
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Magenta,
            LogLevel::Info => Blue,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}
