//! Subscriber setup for `catbuf-inspect`.
//!
//! Stdout is reserved for decoded output (so `decode | jq` works); every log
//! line goes to stderr.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain lines for a terminal.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_directives`,
/// e.g. `RUST_LOG=catbuf_protocol=trace` to watch field-by-field decoding.
pub fn init_logging(default_directives: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_writer(std::io::stderr)).init(),
    }

    tracing::debug!(?format, "tracing subscriber installed");
}
