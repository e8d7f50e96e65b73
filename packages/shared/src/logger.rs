//! Tracing subscriber bootstrap.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Transport crates that are too chatty below `warn`.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "tungstenite", "tokio_tungstenite"];

/// Build the default filter directive for a binary.
///
/// Cargo binary names use `-`, tracing targets use `_`.
pub fn default_directive(bin_name: &str, level: &str) -> String {
    let target = bin_name.replace('-', "_");
    let mut directive = format!("{level},{target}={level},tower_http={level}");
    for quiet in QUIET_TARGETS {
        directive.push_str(&format!(",{quiet}=warn"));
    }
    directive
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` applies everywhere
/// except the transport crates in `QUIET_TARGETS`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, default_level)));

    // A second call (e.g. from tests) must not panic.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
