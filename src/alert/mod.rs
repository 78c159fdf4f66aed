//! Escalation of severe log entries to an external alerting service

pub(crate) mod bridge;
pub mod diagnostics;
pub mod report;

pub use bridge::DEFAULT_ALERT_QUEUE_CAPACITY;
pub use diagnostics::{AlertDiagnostics, DiagnosticNotifier, DIAGNOSTIC_SOURCE_TYPE};
pub use report::{
    AlertChannel, AlertSettings, IncidentReport, IncidentSeverity, Notifier,
    DEFAULT_NOTIFY_RELEASE_STAGES,
};
