//! Log subscriber setup.

use miette::{IntoDiagnostic, WrapErr};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::TracingConfig;

/// Initializes the global log subscriber.
///
/// Filtering follows `RUST_LOG` when set and defaults to debug records of
/// this crate otherwise. The `tracing.json` config option switches the
/// stdout layer to JSON records.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn try_init(config: &TracingConfig) -> miette::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "npbot=debug".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    let initialized = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    initialized
        .into_diagnostic()
        .wrap_err("could not init registry")?;

    info!("tracing initialized");

    Ok(())
}
