//! Structured logging bootstrap using `tracing`.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable controlling the log filter for this crate.
const LOG_ENV: &str = "LEXREL_LOG";

/// Install a global tracing subscriber.
///
/// The filter comes from `LEXREL_LOG`, then `RUST_LOG`, then a default
/// that keeps the pipeline's per-pair diagnostics visible at debug level
/// while the rest of the stack stays at info.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new("info,lexrel=debug"))?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_level(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(fmt_layer).init();
    Ok(())
}
