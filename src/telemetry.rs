//! Telemetry helpers for applications embedding `schedule-flow`.
//!
//! The layout engine only emits `tracing` events; installing a subscriber is
//! left to the host. Enable the `telemetry` feature to get a ready-made one.

/// Filter used when `RUST_LOG` is unset: layout passes at `debug`, everything
/// else at `warn`.
pub const DEFAULT_FILTER: &str = "warn,schedule_flow=debug";

/// Installs a compact global subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_FILTER`] when the variable is missing or unparsable.
///
/// Returns `false` when the `telemetry` feature is disabled or the host
/// application already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
