//! Sink trait for log output destinations

use super::error::Result;

/// Destination for serialized log lines
///
/// The logger hands every sink one fully formatted entry at a time, without
/// the trailing newline, and serializes access to it.
pub trait Sink: Send {
    fn write_line(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

impl Sink for Box<dyn Sink> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
