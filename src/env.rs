//! Logger settings read from the process environment
//!
//! Values come from any source of string pairs, so tests never touch the
//! real environment. The binary first merges a `.env` file into the process
//! environment; variables already set win over the file.

use crate::alert::AlertSettings;
use crate::core::{EnvironmentProfile, LoggerError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Deployment environment name, e.g. `development` or `production`
pub const APP_ENV_KEY: &str = "APP_ENV";
/// Numeric level override (`-1` Debug .. `3` Fatal)
pub const LEVEL_OVERRIDE_KEY: &str = "LOG_LEVEL";
/// API key of the alerting service; absent means alerting is not configured
pub const ALERT_API_KEY_KEY: &str = "ALERT_API_KEY";
/// Older name of [`LEVEL_OVERRIDE_KEY`], read when the new one is absent
pub const LEGACY_LEVEL_OVERRIDE_KEY: &str = "ZAP_LEVEL";
/// Older name of [`ALERT_API_KEY_KEY`], read when the new one is absent
pub const LEGACY_ALERT_API_KEY_KEY: &str = "BUGSNAG_KEY";

/// Merge `.env` from the working directory or a parent into the process
/// environment
///
/// A missing or malformed file is reported on stderr and otherwise ignored.
pub fn load_dotenv() -> Option<PathBuf> {
    report_dotenv(dotenvy::dotenv())
}

/// Merge the dotenv file at `path` into the process environment
pub fn load_dotenv_from(path: impl AsRef<Path>) -> Option<PathBuf> {
    let path = path.as_ref();
    report_dotenv(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn report_dotenv(result: dotenvy::Result<PathBuf>) -> Option<PathBuf> {
    match result {
        Ok(path) => Some(path),
        Err(e) => {
            eprintln!("[LOGGER WARNING] Could not load .env file: {}", e);
            None
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct EnvSettings {
    pub app_env: String,
    pub level_override: Option<String>,
    pub alert_api_key: Option<String>,
}

impl EnvSettings {
    /// Read settings from key/value pairs
    ///
    /// Empty values count as absent. `APP_ENV` is required. `ZAP_LEVEL` and
    /// `BUGSNAG_KEY` are accepted when their current names are not set.
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_logger::env::EnvSettings;
    ///
    /// let vars = [("APP_ENV", "staging"), ("LOG_LEVEL", "1")];
    /// let settings = EnvSettings::from_vars(vars).unwrap();
    /// assert_eq!(settings.app_env, "staging");
    /// assert_eq!(settings.level_override.as_deref(), Some("1"));
    /// assert!(settings.alert_api_key.is_none());
    /// ```
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut app_env = None;
        let mut level_override = None;
        let mut alert_api_key = None;
        let mut legacy_level = None;
        let mut legacy_api_key = None;

        for (key, value) in vars {
            let value = value.into();
            if value.trim().is_empty() {
                continue;
            }
            match key.as_ref() {
                APP_ENV_KEY => app_env = Some(value),
                LEVEL_OVERRIDE_KEY => level_override = Some(value),
                ALERT_API_KEY_KEY => alert_api_key = Some(value),
                LEGACY_LEVEL_OVERRIDE_KEY => legacy_level = Some(value),
                LEGACY_ALERT_API_KEY_KEY => legacy_api_key = Some(value),
                _ => {}
            }
        }

        Ok(Self {
            app_env: app_env.ok_or_else(|| LoggerError::missing_env(APP_ENV_KEY))?,
            level_override: level_override.or(legacy_level),
            alert_api_key: alert_api_key.or(legacy_api_key),
        })
    }

    pub fn from_process_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Read settings from a dotenv file alone, leaving the process untouched
    pub fn from_dotenv_file(path: impl AsRef<Path>) -> Result<Self> {
        let dotenv_error = |e: dotenvy::Error| LoggerError::config(".env", e.to_string());
        let vars = dotenvy::from_path_iter(path.as_ref())
            .map_err(dotenv_error)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(dotenv_error)?;
        Self::from_vars(vars)
    }

    pub fn profile(&self) -> EnvironmentProfile {
        EnvironmentProfile::resolve(&self.app_env)
    }

    /// Alerting client settings, or `None` when no API key is present
    pub fn alert_settings(&self) -> Option<AlertSettings> {
        self.alert_api_key
            .as_ref()
            .map(|key| AlertSettings::new(key.clone(), self.app_env.clone()))
    }
}

impl fmt::Debug for EnvSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvSettings")
            .field("app_env", &self.app_env)
            .field("level_override", &self.level_override)
            .field(
                "alert_api_key",
                &self.alert_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
