//! Optional process-wide logger slot
//!
//! Prefer passing an `Arc<Logger>` explicitly. This accessor exists for code
//! that cannot; it is set once at startup and closed once at shutdown.

use crate::core::{Logger, LoggerError, Result};
use once_cell::sync::OnceCell;
use std::sync::Arc;

static GLOBAL_LOGGER: OnceCell<Arc<Logger>> = OnceCell::new();

/// Install the process logger; fails if one is already installed
pub fn init(logger: Logger) -> Result<Arc<Logger>> {
    let logger = Arc::new(logger);
    GLOBAL_LOGGER
        .set(Arc::clone(&logger))
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    Ok(logger)
}

pub fn get() -> Result<Arc<Logger>> {
    GLOBAL_LOGGER
        .get()
        .cloned()
        .ok_or(LoggerError::NotInitialized)
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Close the process logger if one was installed
pub fn shutdown() -> Result<()> {
    match GLOBAL_LOGGER.get() {
        Some(logger) => logger.close(),
        None => Ok(()),
    }
}
