//! Tracing subscriber setup.
//!
//! Filtering follows `RUST_LOG` and falls back to `info`.

use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Installs the global subscriber, emitting JSON lines when `json` is set.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    subscriber(json, filter).try_init()
}

fn subscriber(json: bool, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    let output = if json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };
    tracing_subscriber::registry().with(filter).with(output)
}
