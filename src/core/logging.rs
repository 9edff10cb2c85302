use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Compact human-readable output for applications embedding the model.
///
/// `RUST_LOG` wins over `verbose` when set. Returns an error if a global
/// subscriber is already installed.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let fallback = if verbose { "bord_model=debug,info" } else { "bord_model=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}

/// JSON lines, for hosts that ship logs to a collector.
pub fn init_json_logging() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bord_model=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).json())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}
