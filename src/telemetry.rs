//! Telemetry helpers for the `impl-tradeoffs` binary and embedding tools.
//!
//! Tracing setup stays explicit and opt-in: the library only emits `tracing`
//! events, the binary decides whether a subscriber is installed.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Events go to stderr so they never mix with anything a caller pipes from
/// stdout. The filter comes from `RUST_LOG` and falls back to `info`.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
