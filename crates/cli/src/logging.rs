use anyhow::{anyhow, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// Interactive runs without a log file; stderr would draw over the screen.
    Discard,
}

/// Installs the global subscriber. For file targets the returned guard must be
/// held until exit so buffered lines are flushed.
pub fn init(target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let guard = match target {
        LogTarget::Stderr => {
            builder.with_writer(std::io::stderr).try_init().map_err(|e| anyhow!(e))?;
            None
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            builder
                .with_ansi(false)
                .with_writer(writer)
                .try_init()
                .map_err(|e| anyhow!(e))?;
            Some(guard)
        }
        LogTarget::Discard => {
            builder.with_writer(std::io::sink).try_init().map_err(|e| anyhow!(e))?;
            None
        }
    };
    Ok(guard)
}
