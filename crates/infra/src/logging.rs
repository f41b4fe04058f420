//! Tracing subscriber setup for binaries and tests using the client
//!
//! The library itself only emits `tracing` events. Installing a subscriber is
//! left to the embedding application; these helpers cover the common case.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a human-readable fmt subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `default_directive`
/// (e.g. `"gttx_infra=debug"`). Returns `false` if a global subscriber was
/// already installed, in which case nothing changes.
pub fn init_tracing(default_directive: &str) -> bool {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(env_filter(default_directive))
        .try_init()
        .is_ok()
}

/// Same as [`init_tracing`] but emits one JSON object per event.
pub fn init_json_tracing(default_directive: &str) -> bool {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().json().flatten_event(true).with_current_span(true))
        .with(env_filter(default_directive))
        .try_init()
        .is_ok()
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}
