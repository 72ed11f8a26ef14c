//! Tracing setup
//!
//! The interactive mode owns the terminal, so its logs go to a file or
//! nowhere. Headless runs log to stderr unless a file is given.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log lines end up
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
    Discard,
}

/// Install the global subscriber; `filter` uses `RUST_LOG` syntax
pub fn init(target: LogTarget<'_>, filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(filter)
        .with_context(|| format!("Invalid log filter {:?}", filter))?;
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let installed = match target {
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::Discard => builder.with_writer(std::io::sink).try_init(),
    };

    installed.map_err(|err| anyhow::anyhow!("Failed to install logger: {err}"))
}
