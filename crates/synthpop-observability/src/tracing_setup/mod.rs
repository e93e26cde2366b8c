//! Tracing setup: subscriber installation, span macros, and lifecycle events.

pub mod events;
pub mod spans;

use std::sync::Once;

use synthpop_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding per-target filter directives,
/// e.g. `SYNTHPOP_LOG=synthpop_simulation=debug,synthpop_analysis=info`.
pub const LOG_ENV: &str = "SYNTHPOP_LOG";

fn filter_or(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize human-readable tracing output. Idempotent.
pub fn init_tracing() {
    init_with(filter_or("info"), false);
}

/// Initialize JSON line output. Idempotent.
pub fn init_tracing_json() {
    init_with(filter_or("info"), true);
}

/// Initialize from the `[observability]` config section. `SYNTHPOP_LOG` still wins.
pub fn init_from_config(config: &ObservabilityConfig) {
    init_with(filter_or(&config.log_level), config.json);
}

fn init_with(filter: EnvFilter, json: bool) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(filter);
        let result = if json {
            registry
                .with(fmt::layer().json().with_target(true).with_thread_ids(true))
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
        };
        // A host application may already own the global subscriber.
        if result.is_err() {
            tracing::debug!("global tracing subscriber already installed");
        }
    });
}
