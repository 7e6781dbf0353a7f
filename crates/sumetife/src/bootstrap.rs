use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Build the filter for `log_level`, a bare level or an `EnvFilter`
/// directive list, falling back to `info` when it does not parse.
pub fn log_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialise the global `tracing` subscriber.
///
/// Log lines go to stderr so stdout carries only the per-level summary.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(log_filter(log_level))
        .with(subscriber)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
