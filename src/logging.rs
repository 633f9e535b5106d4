//! Logger installation for the binary.

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use env_logger::{Builder, Target};

use crate::config::AppConfig;

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// Terminal game: only a configured file, never the screen
    Interactive,
    /// Headless runs: stderr unless a file is configured
    Headless,
}

/// Install the global logger; returns false when nothing was installed.
pub fn init(config: &AppConfig, sink: LogSink) -> Result<bool> {
    let mut builder = Builder::new();
    builder.parse_filters(&config.log_filter);

    match (&config.log_path, sink) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {path}"))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        (None, LogSink::Headless) => {
            builder.target(Target::Stderr);
        }
        (None, LogSink::Interactive) => return Ok(false),
    }

    builder.try_init().context("logger already initialized")?;
    Ok(true)
}
