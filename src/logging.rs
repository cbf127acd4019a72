//! Process-wide `tracing` subscriber setup

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILTER;

static LOGGING_INIT: Once = Once::new();

/// Where log records are written
#[derive(Debug)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

/// Install the global subscriber. Later calls are no-ops.
///
/// The TUI owns the terminal, so it should log to a file (or not at all).
pub fn init_logging(target: LogTarget<'_>) -> io::Result<()> {
    let mut init_result = Ok(());

    LOGGING_INIT.call_once(|| {
        let builder = tracing_subscriber::fmt().with_env_filter(default_env_filter());
        let installed = match target {
            LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
            LogTarget::File(path) => match File::create(path) {
                Ok(file) => builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init(),
                Err(error) => {
                    init_result = Err(error);
                    return;
                }
            },
        };

        if let Err(error) = installed {
            init_result = Err(io::Error::new(
                io::ErrorKind::Other,
                format!("failed to initialize logging: {}", error),
            ));
        }
    });

    init_result
}

fn default_env_filter() -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(DEFAULT_LOG_FILTER),
    }
}
