/*---------- Imports ----------*/
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// JSON lines on stdout, which is what CloudWatch ingests from a Lambda.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .with_target(false)
        .init();
}
