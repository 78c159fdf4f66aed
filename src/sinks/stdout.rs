//! Standard output sink

use crate::core::{Result, Sink};
use std::io::{self, LineWriter, Stdout, Write};

/// Writes every entry to the process standard output
///
/// This is the default destination of environment-configured loggers.
pub struct StdoutSink {
    writer: LineWriter<Stdout>,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            writer: LineWriter::new(io::stdout()),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StdoutSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}
