//! Telemetry helpers for applications embedding `chart-state`.
//!
//! The pipeline emits `tracing` events under the `chart_state` target.
//! Registrations and state assembly log at `debug`, registry overwrites at
//! `warn`, extraction and accessor detail at `trace`.
//! Hosts either call one of the initializers below or install their own
//! subscriber.

/// Filter used when `RUST_LOG` is unset: this crate's assembly and registry
/// events, warnings only from everything else.
pub const DEFAULT_FILTER: &str = "warn,chart_state=debug";

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is
/// enabled, honoring `RUST_LOG` and falling back to [`DEFAULT_FILTER`].
///
/// Returns `false` when the feature is disabled or a global subscriber was
/// already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"chart_state::adapters=trace"` while debugging one adapter.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(fallback))
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::DEFAULT_FILTER;

    #[test]
    fn default_filter_scopes_verbose_output_to_this_crate() {
        assert!(DEFAULT_FILTER.starts_with("warn,"));
        assert!(DEFAULT_FILTER.contains("chart_state=debug"));
    }

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn initializers_are_inert_without_the_feature() {
        assert!(!super::init_default_tracing());
        assert!(!super::init_tracing_with_filter("chart_state=trace"));
    }
}
