//! In-memory sink, mainly for tests

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Collects lines in a shared buffer
///
/// Clones share the same buffer, so a test keeps one handle and moves the
/// other into the logger.
///
/// # Example
///
/// ```
/// use profile_logger::sinks::MemorySink;
/// use profile_logger::Sink;
///
/// let sink = MemorySink::new();
/// let mut writer = sink.clone();
/// writer.write_line("hello").unwrap();
/// assert_eq!(sink.lines(), vec!["hello".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
    flushes: Arc<AtomicUsize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn contents(&self) -> String {
        let lines = self.lines.lock();
        let mut out = String::new();
        for line in lines.iter() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::Relaxed)
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
