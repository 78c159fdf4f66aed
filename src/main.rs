//! Service entry point: builds the process logger from the environment

use profile_logger::{env, global, Bootstrap, EnvSettings, EXIT_ENV_INVALID, EXIT_LOGGER_INIT};
use std::process;

fn main() {
    env::load_dotenv();

    let settings = match EnvSettings::from_process_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("failed to load environment: {}", e);
            process::exit(EXIT_ENV_INVALID);
        }
    };

    let logger = match Bootstrap::new(settings).build().and_then(global::init) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("failed to initialize logger: {}", e);
            process::exit(EXIT_LOGGER_INIT);
        }
    };

    logger.info(format!("{} v{} started", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")));

    if let Err(e) = global::shutdown() {
        eprintln!("failed to close logger: {}", e);
    }
}
