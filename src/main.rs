//! dash — a live sensor dashboard polling a JSON telemetry endpoint.
//!
//! Run with:  `RUST_LOG=info dash`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("dash v{} starting", env!("CARGO_PKG_VERSION"));

    dash_ui::run().map_err(Into::into)
}
