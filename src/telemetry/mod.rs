use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::infrastructure::config::{LogFormat, TelemetryConfig};

static TELEMETRY: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber once. `RUST_LOG` takes precedence over the
/// configured filter.
pub fn init(config: &TelemetryConfig) {
    TELEMETRY.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(env_filter);
        match config.format {
            LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
            LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        }
    });
}
