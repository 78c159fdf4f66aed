//! Sink that discards everything

use crate::core::{Result, Sink};

/// Accepts and drops every line
///
/// Backs [`Logger::nop`](crate::Logger::nop), a logger for tests that must
/// not produce output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn write_line(&mut self, _line: &str) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}
