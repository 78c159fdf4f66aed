//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. The call site of
//! the macro is what caller info reports.
//!
//! # Examples
//!
//! ```
//! use profile_logger::prelude::*;
//! use profile_logger::sinks::MemorySink;
//! use profile_logger::info;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder()
//!     .option(with_level(LogLevel::Info))
//!     .option(with_output(sink.clone()))
//!     .build()?;
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! assert_eq!(sink.lines().len(), 1);
//! # Ok::<(), profile_logger::LoggerError>(())
//! ```

/// Log a message at the given level with automatic formatting.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, evaluating to the [`FatalSignal`](crate::FatalSignal).
///
/// ```
/// # use profile_logger::prelude::*;
/// # use profile_logger::sinks::MemorySink;
/// use profile_logger::fatal;
/// # let logger = Logger::builder().option(with_output(MemorySink::new())).build()?;
/// let signal = fatal!(logger, "Unable to recover from error: {}", "disk full");
/// assert_eq!(signal.message(), "Unable to recover from error: disk full");
/// # Ok::<(), profile_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::options::{
        with_caller_info, with_encode, with_output, with_suppressed_timestamp,
    };
    use crate::core::{LogEncode, LogLevel, Logger};
    use crate::sinks::MemorySink;

    fn logger() -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .min_level(LogLevel::Debug)
            .option(with_encode(LogEncode::Console))
            .option(with_suppressed_timestamp())
            .option(with_output(sink.clone()))
            .build()
            .unwrap();
        (logger, sink)
    }

    #[test]
    fn test_level_macros() {
        let (logger, sink) = logger();
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);

        assert_eq!(
            sink.lines(),
            vec![
                "INFO\tFormatted: 42",
                "DEBUG\tCount: 5",
                "INFO\tItems: 100",
                "WARN\tRetry 1 of 3",
                "ERROR\tCode: 500",
            ]
        );
    }

    #[test]
    fn test_fatal_macro() {
        let (logger, sink) = logger();
        let signal = fatal!(logger, "Critical failure: {}", "system");
        assert_eq!(signal.message(), "Critical failure: system");
        assert_eq!(sink.lines(), vec!["FATAL\tCritical failure: system"]);
    }

    #[test]
    fn test_macro_reports_its_call_site() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .option(with_encode(LogEncode::Console))
            .option(with_suppressed_timestamp())
            .option(with_caller_info(0))
            .option(with_output(sink.clone()))
            .build()
            .unwrap();

        let line = line!() + 1;
        info!(logger, "here");
        assert_eq!(sink.lines(), vec![format!("INFO\tsrc/macros.rs:{}\there", line)]);
    }
}
