//! Tracing subscriber setup.

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Line format for log records written to stderr.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
/// Records go to stderr so stdout stays reserved for emitted indexes.
pub fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?,
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
