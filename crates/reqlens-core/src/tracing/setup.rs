//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Filter used when neither `REQLENS_LOG` nor a configured filter is usable.
pub const DEFAULT_FILTER: &str = "reqlens=info";

/// Initialize the reqlens tracing/logging system.
///
/// Reads `REQLENS_LOG` for per-module log levels, e.g.
/// `REQLENS_LOG=reqlens_storage=debug,tower_http=info`. When it is not set or
/// fails to parse, `fallback` is used, then `reqlens=info`.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing(fallback: Option<&str>) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("REQLENS_LOG")
            .or_else(|_| EnvFilter::try_new(fallback.unwrap_or(DEFAULT_FILTER)))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // try_init: a host (tests, embedding) may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init();
    });
}
