//! Sink implementations

pub mod file;
pub mod memory;
pub mod null;
pub mod stdout;

pub use file::{FileSink, WriterSink};
pub use memory::MemorySink;
pub use null::NullSink;
pub use stdout::StdoutSink;

pub use crate::core::Sink;
