//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Keep stdout free for the request/response report
//!
//! # Design Decisions
//! - `RUST_LOG` wins when set; otherwise `--verbose` picks debug over info

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "taxii_client=debug,reqwest=debug"
    } else {
        "taxii_client=info"
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(verbose).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
