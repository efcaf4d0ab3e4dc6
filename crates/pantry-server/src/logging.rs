//! Structured logging initialization.
//!
//! RUST_LOG takes precedence over the configured level.

use pantry_core::config::{LogFormat, LoggingConfig};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

pub fn init(config: &LoggingConfig) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(config.level.as_str())
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Pretty => registry.with(fmt::layer().with_ansi(true)).init(),
        LogFormat::Compact => registry.with(fmt::layer().compact().with_ansi(true)).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}
