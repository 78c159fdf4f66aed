//! Incident reports and the notifier capability they are sent through

use super::diagnostics::{AlertDiagnostics, DiagnosticNotifier};
use crate::core::{LogLevel, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Release stages that forward incidents unless configured otherwise
pub const DEFAULT_NOTIFY_RELEASE_STAGES: [&str; 3] = ["production", "staging", "testing"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentSeverity {
    Info,
    Warning,
    Error,
}

impl From<LogLevel> for IncidentSeverity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug | LogLevel::Info => IncidentSeverity::Info,
            LogLevel::Warn => IncidentSeverity::Warning,
            LogLevel::Error | LogLevel::Fatal => IncidentSeverity::Error,
        }
    }
}

/// What the alerting service receives for one log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentReport {
    pub message: String,
    pub severity: IncidentSeverity,
    pub metadata: BTreeMap<String, String>,
}

impl IncidentReport {
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// Capability to deliver an incident report to an alerting service
///
/// Implementations may block; the logger always calls them from its own
/// dispatch thread. Closures of the right shape implement this trait.
pub trait Notifier: Send + Sync {
    fn notify(&self, report: &IncidentReport) -> Result<()>;
}

impl<F> Notifier for F
where
    F: Fn(&IncidentReport) -> Result<()> + Send + Sync,
{
    fn notify(&self, report: &IncidentReport) -> Result<()> {
        self(report)
    }
}

/// Client-side settings of the alerting service
#[derive(Clone, PartialEq, Eq)]
pub struct AlertSettings {
    pub api_key: String,
    pub app_type: String,
    pub release_stage: String,
    /// Shown as the device name of an incident; `None` lets the service decide
    pub hostname: Option<String>,
    pub notify_release_stages: Vec<String>,
}

impl AlertSettings {
    /// Settings for `release_stage` with the default app type and stages
    ///
    /// Development machines report as `localhost`.
    pub fn new(api_key: impl Into<String>, release_stage: impl Into<String>) -> Self {
        let release_stage = release_stage.into();
        let hostname = (release_stage == "development").then(|| "localhost".to_string());

        Self {
            api_key: api_key.into(),
            app_type: "backend".to_string(),
            release_stage,
            hostname,
            notify_release_stages: DEFAULT_NOTIFY_RELEASE_STAGES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    #[must_use]
    pub fn with_notify_release_stages<I, S>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notify_release_stages = stages.into_iter().map(Into::into).collect();
        self
    }

    /// Whether incidents raised in the current release stage are forwarded
    pub fn notifies(&self) -> bool {
        self.notify_release_stages
            .iter()
            .any(|stage| *stage == self.release_stage)
    }
}

impl fmt::Debug for AlertSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertSettings")
            .field("api_key", &"<redacted>")
            .field("app_type", &self.app_type)
            .field("release_stage", &self.release_stage)
            .field("hostname", &self.hostname)
            .field("notify_release_stages", &self.notify_release_stages)
            .finish()
    }
}

/// A configured alerting capability: settings, the notifier to call and the
/// diagnostic log of the alert client
#[derive(Clone)]
pub struct AlertChannel {
    settings: AlertSettings,
    notifier: Arc<dyn Notifier>,
    diagnostics: Arc<AlertDiagnostics>,
}

impl AlertChannel {
    /// Channel with diagnostics on stdout for the settings' release stage
    pub fn new(settings: AlertSettings, notifier: Arc<dyn Notifier>) -> Self {
        let diagnostics = Arc::new(AlertDiagnostics::stdout(&settings.release_stage));
        Self::with_parts(settings, notifier, diagnostics)
    }

    pub fn with_parts(
        settings: AlertSettings,
        notifier: Arc<dyn Notifier>,
        diagnostics: Arc<AlertDiagnostics>,
    ) -> Self {
        Self {
            settings,
            notifier,
            diagnostics,
        }
    }

    /// Channel without a delivery backend: incidents go to the diagnostic log
    pub fn logging(settings: AlertSettings, diagnostics: Arc<AlertDiagnostics>) -> Self {
        let notifier = Arc::new(DiagnosticNotifier::new(Arc::clone(&diagnostics)));
        Self::with_parts(settings, notifier, diagnostics)
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<AlertDiagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn settings(&self) -> &AlertSettings {
        &self.settings
    }

    pub fn diagnostics(&self) -> &AlertDiagnostics {
        &self.diagnostics
    }

    pub(crate) fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    pub(crate) fn shared_diagnostics(&self) -> Arc<AlertDiagnostics> {
        Arc::clone(&self.diagnostics)
    }
}

impl fmt::Debug for AlertChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertChannel")
            .field("settings", &self.settings)
            .field("diagnostics", &self.diagnostics.is_enabled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AlertSettings::new("key", "production");
        assert_eq!(settings.app_type, "backend");
        assert_eq!(settings.hostname, None);
        assert!(settings.notifies());
    }

    #[test]
    fn test_development_reports_localhost_and_is_silent() {
        let settings = AlertSettings::new("key", "development");
        assert_eq!(settings.hostname.as_deref(), Some("localhost"));
        assert!(!settings.notifies());
    }

    #[test]
    fn test_custom_notify_stages() {
        let settings =
            AlertSettings::new("key", "development").with_notify_release_stages(["development"]);
        assert!(settings.notifies());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", AlertSettings::new("s3cr3t", "staging"));
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(IncidentSeverity::from(LogLevel::Warn), IncidentSeverity::Warning);
        assert_eq!(IncidentSeverity::from(LogLevel::Fatal), IncidentSeverity::Error);
        assert_eq!(IncidentSeverity::from(LogLevel::Info), IncidentSeverity::Info);
    }
}
