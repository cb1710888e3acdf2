use anyhow::Result;
use tracing_subscriber::prelude::*;

/// Log to stderr, filtered by `RUST_LOG` (default `info`). Stdout carries
/// command output only.
pub fn init() -> Result<()> {
    let env_filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter_layer)
        .try_init()?;

    Ok(())
}
