//! Debug logging setup
//!
//! Logging is off unless `RUST_LOG` asks for it, so standard error carries
//! nothing but the fixed diagnostic by default. Log lines go to standard
//! error as well and never affect control flow.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
