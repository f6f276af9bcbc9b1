//! Logging Setup

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::constants::APP_NAME;
use crate::domain::config::LoggingConfig;
use crate::error::{Error, Result};

/// Install the global subscriber
///
/// Console output always; a daily rolling file when a directory is configured.
/// `RUST_LOG` overrides the configured level. Keep the returned guard alive
/// for the life of the process or buffered file lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = || match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level),
    };
    let console_filter = filter().map_err(|e| Error::Config {
        message: format!("invalid log level {:?}: {e}", config.level),
    })?;

    let console = fmt::layer()
        .with_timer(LocalTime::rfc_3339())
        .with_target(false)
        .with_filter(console_filter);

    let Some(directory) = config.directory.as_deref().filter(|d| !d.is_empty()) else {
        tracing_subscriber::registry()
            .with(console)
            .try_init()
            .map_err(|e| Error::Config {
                message: e.to_string(),
            })?;
        return Ok(None);
    };

    let directory = PathBuf::from(directory);
    fs::create_dir_all(&directory)?;
    let appender = tracing_appender::rolling::daily(&directory, format!("{APP_NAME}.log"));
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_filter = filter().map_err(|e| Error::Config {
        message: e.to_string(),
    })?;

    tracing_subscriber::registry()
        .with(console)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(file_filter),
        )
        .try_init()
        .map_err(|e| Error::Config {
            message: e.to_string(),
        })?;
    Ok(Some(guard))
}
