use anyhow::{Context, Result, anyhow};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log filter `{level}`"))
}

/// Route log events to an append-only file. The host's stdout carries
/// framed responses, so nothing here may touch it.
pub fn init_file_logging(log_file: &Path, level: &str) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(level)?)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|err| anyhow!("failed to install logger: {err}"))
}

pub fn init_stderr_logging(level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(level)?)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|err| anyhow!("failed to install logger: {err}"))
}
