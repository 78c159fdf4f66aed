//! Core logger types and traits

pub mod builder;
pub(crate) mod caller;
pub mod config;
pub mod encoding;
pub mod error;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod output_format;
pub mod profile;
pub mod sink;

pub use builder::{build, LoggerBuilder, DEFAULT_SOURCE_TYPE};
pub use config::{Attachment, BuildConfig};
pub use encoding::LogEncode;
pub use error::{LoggerError, Result};
pub use log_context::{FieldValue, LogContext};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{
    AlertStatus, FatalSignal, Logger, LoggerSummary, DEFAULT_SHUTDOWN_TIMEOUT, FATAL_EXIT_CODE,
};
pub use metrics::LoggerMetrics;
pub use options::{compose, LoggerOption};
pub use output_format::{FieldKeys, OutputFormat};
pub use profile::EnvironmentProfile;
pub use sink::Sink;
