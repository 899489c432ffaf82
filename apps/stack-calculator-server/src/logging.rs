//! Tracing subscriber setup
//!
//! `RUST_LOG`, when set, takes precedence over the configured level. Logs go
//! to stderr so stdout stays clean for `--print-config` and `check`.

use anyhow::{Context as _, Result};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber.
///
/// # Errors
/// Fails if the configured level is unknown or a subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let default_level: LevelFilter = config
        .level
        .parse()
        .with_context(|| format!("invalid log level '{}'", config.level))?;
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    installed.context("failed to install tracing subscriber")
}
