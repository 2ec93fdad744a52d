// Path: crates/telemetry/src/init.rs
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// The filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Initializes the global `tracing` subscriber for structured JSON logging on stderr.
///
/// `log` records from dependencies are bridged into `tracing`.
pub fn init_tracing() -> Result<(), anyhow::Error> {
    init_tracing_with(DEFAULT_FILTER)
}

/// Like [`init_tracing`], with an explicit fallback filter (e.g. `"vigil=debug"`).
pub fn init_tracing_with(default_filter: &str) -> Result<(), anyhow::Error> {
    let fmt_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());
    let subscriber = Registry::default()
        .with(env_filter(default_filter))
        .with(fmt_layer);
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_filter_is_used() {
        std::env::remove_var("RUST_LOG");
        assert_eq!(env_filter("rules=debug").to_string(), "rules=debug");
    }
}
