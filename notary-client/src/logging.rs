//! Tracing setup for the notary binary
//!
//! Filter: `RUST_LOG` when set, else `logging.level` from the config file.
//! Output goes to `logging.file` when configured, else stderr, so stdout
//! only carries panels. ANSI colors are emitted only to a terminal.

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use notary_common::config::LoggingConfig;

/// fmt layer writing to a file or stderr
pub type LogLayer<S> = tracing_subscriber::fmt::Layer<S, DefaultFields, Format, BoxMakeWriter>;

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::new(format!(
        "notary={0},notary_client={0},notary_common={0}",
        logging.level
    ))
}

/// Output layer for `logging`; files never receive ANSI escapes
pub fn log_layer<S>(logging: &LoggingConfig) -> Result<LogLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let (writer, ansi) = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (
            BoxMakeWriter::new(std::io::stderr),
            std::io::stderr().is_terminal(),
        ),
    };

    Ok(tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi))
}

/// First log line of every run, identifying the build
pub fn startup_banner() -> String {
    format!(
        "Starting notary client v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    )
}

/// Install the global subscriber
pub fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(logging));

    tracing_subscriber::registry()
        .with(filter)
        .with(log_layer(logging)?)
        .init();
    Ok(())
}
