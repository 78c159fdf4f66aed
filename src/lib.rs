//! # Profile Logger
//!
//! A structured logger configured from the deployment environment.
//!
//! ## Features
//!
//! - **Environment Profiles**: `development`, `staging` and `production` pick
//!   sensible level and encoding defaults
//! - **Composable Options**: ordered, independently testable configuration
//!   mutators where the last write wins
//! - **JSON and Console Output**: with optional level coloring for terminals
//! - **Alert Bridge**: severe entries forwarded to an incident-alerting service
//!   without ever blocking the caller
//! - **Thread Safe**: one logger shared across the whole process
//!
//! ```
//! use profile_logger::prelude::*;
//! use profile_logger::sinks::MemorySink;
//!
//! let sink = MemorySink::new();
//! let settings = EnvSettings::from_vars([("APP_ENV", "production")])?;
//! let logger = Bootstrap::new(settings)
//!     .sink(sink.clone())
//!     .option(with_suppressed_timestamp())
//!     .build()?;
//!
//! logger.debug("not emitted in production");
//! logger.info("service started");
//! logger.close()?;
//!
//! assert_eq!(sink.lines().len(), 1);
//! # Ok::<(), profile_logger::LoggerError>(())
//! ```

pub mod alert;
pub mod bootstrap;
pub mod core;
pub mod env;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::alert::{AlertChannel, AlertSettings, IncidentReport, Notifier};
    pub use crate::bootstrap::Bootstrap;
    pub use crate::core::options::*;
    pub use crate::core::{
        AlertStatus, EnvironmentProfile, FatalSignal, FieldKeys, LogContext, LogEncode, LogLevel,
        Logger, LoggerBuilder, LoggerError, Result, Sink,
    };
    pub use crate::env::EnvSettings;
}

pub use crate::alert::{
    AlertChannel, AlertDiagnostics, AlertSettings, IncidentReport, IncidentSeverity, Notifier,
};
pub use crate::bootstrap::{Bootstrap, EXIT_ENV_INVALID, EXIT_LOGGER_INIT};
pub use crate::core::{
    AlertStatus, Attachment, BuildConfig, EnvironmentProfile, FatalSignal, FieldKeys, FieldValue,
    LogContext, LogEncode, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
    LoggerOption, LoggerSummary, Result, Sink, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::env::EnvSettings;
