//! Default logging profile per deployment environment

use super::encoding::LogEncode;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// Default (level, encode, color) triple for a named environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    pub level: LogLevel,
    pub encode: LogEncode,
    pub color: bool,
}

impl EnvironmentProfile {
    /// Resolve the profile for an environment name
    ///
    /// Case-insensitive and total: unknown names get verbose JSON output
    /// without color.
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_logger::{EnvironmentProfile, LogEncode, LogLevel};
    ///
    /// let profile = EnvironmentProfile::resolve("Production");
    /// assert_eq!(profile.level, LogLevel::Info);
    /// assert_eq!(profile.encode, LogEncode::Json);
    /// assert!(!profile.color);
    /// ```
    pub fn resolve(env_name: &str) -> Self {
        match env_name.to_lowercase().as_str() {
            "dev" | "development" => Self::new(LogLevel::Debug, LogEncode::Console, true),
            "stg" | "staging" => Self::new(LogLevel::Debug, LogEncode::Json, false),
            "prod" | "production" => Self::new(LogLevel::Info, LogEncode::Json, false),
            _ => Self::fallback(),
        }
    }

    pub fn fallback() -> Self {
        Self::new(LogLevel::Debug, LogEncode::Json, false)
    }

    const fn new(level: LogLevel, encode: LogEncode, color: bool) -> Self {
        Self {
            level,
            encode,
            color,
        }
    }
}

impl Default for EnvironmentProfile {
    fn default() -> Self {
        Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table() {
        let cases = [
            ("dev", LogLevel::Debug, LogEncode::Console, true),
            ("development", LogLevel::Debug, LogEncode::Console, true),
            ("stg", LogLevel::Debug, LogEncode::Json, false),
            ("staging", LogLevel::Debug, LogEncode::Json, false),
            ("prod", LogLevel::Info, LogEncode::Json, false),
            ("production", LogLevel::Info, LogEncode::Json, false),
        ];

        for (name, level, encode, color) in cases {
            let profile = EnvironmentProfile::resolve(name);
            assert_eq!(profile.level, level, "{}", name);
            assert_eq!(profile.encode, encode, "{}", name);
            assert_eq!(profile.color, color, "{}", name);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            EnvironmentProfile::resolve("DEVELOPMENT"),
            EnvironmentProfile::resolve("development")
        );
        assert_eq!(
            EnvironmentProfile::resolve("Stg"),
            EnvironmentProfile::resolve("staging")
        );
    }

    #[test]
    fn test_unknown_falls_back() {
        for name in ["", "proto", "testing", " production"] {
            assert_eq!(EnvironmentProfile::resolve(name), EnvironmentProfile::fallback());
        }
    }
}
