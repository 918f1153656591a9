//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{defaults, LoggingConfig};

static INIT: Once = Once::new();

/// Initialize the strata tracing/logging system.
///
/// Reads the `STRATA_LOG` environment variable for per-crate log levels.
/// Format: `STRATA_LOG=strata_order=debug,strata_estimate=trace`
///
/// Falls back to the configured filter, then to
/// `strata_order=info,strata_estimate=info`.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing(logging: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(defaults::LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_new(logging.effective_filter()))
            .unwrap_or_else(|_| EnvFilter::new(defaults::DEFAULT_LOG_FILTER));

        let registry = tracing_subscriber::registry().with(filter);
        if logging.effective_json() {
            let _ = registry
                .with(fmt::layer().json().with_target(true))
                .try_init();
        } else {
            let _ = registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init();
        }
    });
}
